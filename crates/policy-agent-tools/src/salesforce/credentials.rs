//! Credential lookup.
//!
//! Credentials are resolved through a [`CredentialSource`] on every call and
//! dropped when the call ends. Password and token are held as
//! [`SecretString`] so they never show up in logs.

use policy_agent_core::SecretString;
use std::collections::HashMap;

use super::error::SalesforceError;

pub const USERNAME_KEY: &str = "SALESFORCE_USERNAME";
pub const PASSWORD_KEY: &str = "SALESFORCE_PASSWORD";
pub const SECURITY_TOKEN_KEY: &str = "SALESFORCE_SECURITY_TOKEN";

/// Where credential values come from
pub trait CredentialSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads the process environment at lookup time
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentialSource;

impl CredentialSource for EnvCredentialSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl CredentialSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Fixed credentials supplied by the caller
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    password: SecretString,
    security_token: SecretString,
}

impl StaticCredentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<SecretString>,
        security_token: impl Into<SecretString>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            security_token: security_token.into(),
        }
    }
}

impl CredentialSource for StaticCredentials {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            USERNAME_KEY => Some(self.username.clone()),
            PASSWORD_KEY => Some(self.password.expose_as_str().to_string()),
            SECURITY_TOKEN_KEY => Some(self.security_token.expose_as_str().to_string()),
            _ => None,
        }
    }
}

/// Username, password and security token for one login
#[derive(Debug)]
pub struct SalesforceCredentials {
    pub username: String,
    pub password: SecretString,
    pub security_token: SecretString,
}

impl SalesforceCredentials {
    /// Pull all three fields from `source`. Empty values count as missing.
    pub fn resolve(source: &dyn CredentialSource) -> Result<Self, SalesforceError> {
        let fetch = |key: &'static str| {
            source
                .get(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(SalesforceError::MissingCredential { key })
        };

        Ok(Self {
            username: fetch(USERNAME_KEY)?,
            password: SecretString::from_string(fetch(PASSWORD_KEY)?),
            security_token: SecretString::from_string(fetch(SECURITY_TOKEN_KEY)?),
        })
    }
}
