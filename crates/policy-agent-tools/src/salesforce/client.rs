use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::credentials::SalesforceCredentials;
use super::error::SalesforceError;
use super::settings::SalesforceSettings;
use super::soap::{self, LoginSession};

/// Per-call Salesforce client.
///
/// Built fresh for each invocation so no connection pool or session outlives
/// the call that created it.
pub struct SalesforceClient {
    http: Client,
    settings: SalesforceSettings,
}

#[derive(Debug, Deserialize)]
struct QueryEnvelope {
    #[serde(rename = "totalSize")]
    total_size: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(rename = "errorCode")]
    error_code: String,
}

impl SalesforceClient {
    pub fn new(settings: SalesforceSettings) -> Result<Self, SalesforceError> {
        settings.validate()?;
        let http = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { http, settings })
    }

    /// Authenticate through the SOAP partner `login` call.
    pub async fn login(
        &self,
        credentials: &SalesforceCredentials,
    ) -> Result<LoginSession, SalesforceError> {
        let endpoint = self.settings.soap_login_endpoint();
        tracing::debug!(endpoint = %endpoint, "logging in to Salesforce");

        let body = soap::login_envelope(
            &credentials.username,
            &credentials.password,
            &credentials.security_token,
        );

        let response = self
            .http
            .post(&endpoint)
            .header("Content-Type", "text/xml; charset=UTF-8")
            .header("SOAPAction", "login")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        match soap::parse_login_response(&text) {
            Err(SalesforceError::MalformedResponse(detail)) if !status.is_success() => {
                Err(SalesforceError::AuthenticationFailed {
                    code: status.as_u16().to_string(),
                    message: format!("login returned HTTP {status}: {detail}"),
                })
            }
            other => other,
        }
    }

    /// Run a `SELECT COUNT()` query and return `totalSize`.
    pub async fn count(&self, session: &LoginSession, soql: &str) -> Result<u64, SalesforceError> {
        let endpoint = self.settings.query_endpoint(&session.instance);
        tracing::info!(query = soql, "executing Salesforce query");

        let response = self
            .http
            .get(&endpoint)
            .query(&[("q", soql)])
            .bearer_auth(session.session_id.expose_as_str())
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(SalesforceError::QueryRejected {
                status: status.as_u16(),
                message: describe_api_errors(&text),
            });
        }

        parse_total_size(&text)
    }
}

fn describe_api_errors(body: &str) -> String {
    match serde_json::from_str::<Vec<ApiError>>(body) {
        Ok(errors) if !errors.is_empty() => errors
            .iter()
            .map(|e| format!("{}: {}", e.error_code, e.message))
            .collect::<Vec<_>>()
            .join("; "),
        _ if body.trim().is_empty() => "empty response body".to_string(),
        _ => body.trim().to_string(),
    }
}

fn parse_total_size(body: &str) -> Result<u64, SalesforceError> {
    let envelope: QueryEnvelope = serde_json::from_str(body)
        .map_err(|e| SalesforceError::MalformedResponse(format!("query response: {e}")))?;

    match envelope.total_size {
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
            SalesforceError::MalformedResponse(format!("totalSize is not a count: {n}"))
        }),
        Some(other) => Err(SalesforceError::MalformedResponse(format!(
            "totalSize is not a number: {other}"
        ))),
        None => Err(SalesforceError::MalformedResponse(
            "query response has no totalSize".to_string(),
        )),
    }
}
