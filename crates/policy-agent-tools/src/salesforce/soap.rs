//! SOAP partner `login` envelope and response parsing.

use policy_agent_core::SecretString;
use quick_xml::Reader;
use quick_xml::escape::{escape, resolve_predefined_entity};
use quick_xml::events::Event;
use url::Url;

use super::error::SalesforceError;

const CLIENT_ID: &str = "policy-agent";

/// Session established by a successful login
#[derive(Debug)]
pub struct LoginSession {
    pub session_id: SecretString,
    pub instance: Url,
}

/// Build the `login` request body. The password is sent with the security
/// token appended, as the partner API expects.
pub fn login_envelope(
    username: &str,
    password: &SecretString,
    security_token: &SecretString,
) -> String {
    let secret = format!(
        "{}{}",
        password.expose_as_str(),
        security_token.expose_as_str()
    );

    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<env:Envelope
        xmlns:xsd="http://www.w3.org/2001/XMLSchema"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xmlns:env="http://schemas.xmlsoap.org/soap/envelope/"
        xmlns:urn="urn:partner.soap.sforce.com">
    <env:Header>
        <urn:CallOptions>
            <urn:client>{client}</urn:client>
            <urn:defaultNamespace>sf</urn:defaultNamespace>
        </urn:CallOptions>
    </env:Header>
    <env:Body>
        <n1:login xmlns:n1="urn:partner.soap.sforce.com">
            <n1:username>{username}</n1:username>
            <n1:password>{password}</n1:password>
        </n1:login>
    </env:Body>
</env:Envelope>"#,
        client = CLIENT_ID,
        username = escape(username),
        password = escape(secret.as_str()),
    )
}

/// Parse a login response body.
///
/// A SOAP fault becomes `AuthenticationFailed`; a body with neither a fault
/// nor a session is `MalformedResponse`.
pub fn parse_login_response(body: &str) -> Result<LoginSession, SalesforceError> {
    if let Some(message) = element_text(body, "faultstring") {
        let code = element_text(body, "faultcode").unwrap_or_else(|| "UNKNOWN".to_string());
        return Err(SalesforceError::AuthenticationFailed { code, message });
    }

    let session_id = element_text(body, "sessionId").ok_or_else(|| {
        SalesforceError::MalformedResponse("login response has no sessionId".to_string())
    })?;
    let server_url = element_text(body, "serverUrl").ok_or_else(|| {
        SalesforceError::MalformedResponse("login response has no serverUrl".to_string())
    })?;

    Ok(LoginSession {
        session_id: SecretString::from_string(session_id),
        instance: instance_origin(&server_url)?,
    })
}

/// Reduce `https://host/services/Soap/u/59.0/00D...` to `https://host`.
fn instance_origin(server_url: &str) -> Result<Url, SalesforceError> {
    let parsed = Url::parse(server_url).map_err(|e| {
        SalesforceError::MalformedResponse(format!("invalid serverUrl '{server_url}': {e}"))
    })?;

    let origin = parsed.origin();
    if !origin.is_tuple() {
        return Err(SalesforceError::MalformedResponse(format!(
            "serverUrl '{server_url}' has no host"
        )));
    }

    Url::parse(&origin.ascii_serialization()).map_err(|e| {
        SalesforceError::MalformedResponse(format!("invalid serverUrl '{server_url}': {e}"))
    })
}

/// Text content of the first element whose local name is `local_name`,
/// ignoring namespace prefixes. Entity and character references are resolved.
fn element_text(xml: &str, local_name: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    let target = local_name.as_bytes();
    let mut capturing = false;
    let mut raw = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == target => {
                capturing = true;
                raw.clear();
            }
            Ok(Event::Text(t)) if capturing => {
                raw.push_str(&String::from_utf8_lossy(&t));
            }
            Ok(Event::CData(t)) if capturing => {
                raw.push_str(&String::from_utf8_lossy(&t));
            }
            Ok(Event::GeneralRef(r)) if capturing => {
                let name = String::from_utf8_lossy(&r).into_owned();
                match r.resolve_char_ref() {
                    Ok(Some(ch)) => raw.push(ch),
                    _ => match resolve_predefined_entity(&name) {
                        Some(text) => raw.push_str(text),
                        None => raw.push_str(&format!("&{name};")),
                    },
                }
            }
            Ok(Event::End(e)) if capturing && e.local_name().as_ref() == target => {
                return Some(raw.trim().to_string());
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}
