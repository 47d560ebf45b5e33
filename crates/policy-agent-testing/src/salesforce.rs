//! Local stand-in for the Salesforce login and query endpoints.

use policy_agent_tools::salesforce::{
    PASSWORD_KEY, SECURITY_TOKEN_KEY, SalesforceSettings, USERNAME_KEY,
};
use serde_json::json;
use std::collections::HashMap;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_VERSION: &str = "59.0";
pub const SESSION_ID: &str = "00D000000000001!AQ0AQMockSession";
pub const ORG_ID: &str = "00D000000000001";

/// A complete set of credentials for the mock org.
pub fn fixture_credentials() -> HashMap<String, String> {
    [
        (USERNAME_KEY, "agent@example.com"),
        (PASSWORD_KEY, "correct-horse"),
        (SECURITY_TOKEN_KEY, "battery-staple"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Mock org on a local port.
pub struct SalesforceMock {
    server: MockServer,
}

impl SalesforceMock {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Settings pointing both login and instance at this server.
    ///
    /// # Panics
    ///
    /// Panics if the server URI cannot be parsed, which would mean wiremock
    /// handed out a broken address.
    pub fn settings(&self) -> SalesforceSettings {
        SalesforceSettings::default()
            .with_login_url(&self.server.uri())
            .expect("mock server URI is a valid URL")
    }

    fn login_path() -> String {
        format!("/services/Soap/u/{API_VERSION}")
    }

    fn query_path() -> String {
        format!("/services/data/v{API_VERSION}/query/")
    }

    /// Accept any login and hand out [`SESSION_ID`]. Expects `times` calls.
    pub async fn expect_login(&self, times: u64) {
        let body = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns="urn:partner.soap.sforce.com">
  <soapenv:Body>
    <loginResponse>
      <result>
        <passwordExpired>false</passwordExpired>
        <serverUrl>{uri}/services/Soap/u/{API_VERSION}/{ORG_ID}</serverUrl>
        <sessionId>{SESSION_ID}</sessionId>
      </result>
    </loginResponse>
  </soapenv:Body>
</soapenv:Envelope>"#,
            uri = self.server.uri()
        );

        Mock::given(method("POST"))
            .and(path(Self::login_path()))
            .and(header("SOAPAction", "login"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Reject every login with an `INVALID_LOGIN` fault.
    pub async fn reject_login(&self) {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:sf="urn:fault.partner.soap.sforce.com">
  <soapenv:Body>
    <soapenv:Fault>
      <faultcode>sf:INVALID_LOGIN</faultcode>
      <faultstring>INVALID_LOGIN: Invalid username, password, security token; or user locked out.</faultstring>
    </soapenv:Fault>
  </soapenv:Body>
</soapenv:Envelope>"#;

        Mock::given(method("POST"))
            .and(path(Self::login_path()))
            .respond_with(ResponseTemplate::new(500).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `soql` with `totalSize = count`. Expects `times` calls.
    pub async fn expect_count(&self, soql: &str, count: u64, times: u64) {
        Mock::given(method("GET"))
            .and(path(Self::query_path()))
            .and(query_param("q", soql))
            .and(header("Authorization", format!("Bearer {SESSION_ID}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": count,
                "done": true,
                "records": []
            })))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Answer any query with `status` and a raw body.
    pub async fn query_responds(&self, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(Self::query_path()))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the server has seen so far.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }

    /// Check every `expect` set on this server.
    pub async fn verify(&self) {
        self.server.verify().await;
    }
}
