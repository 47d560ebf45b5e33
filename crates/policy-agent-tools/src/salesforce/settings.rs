//! Connection settings.
//!
//! - `SALESFORCE_LOGIN_URL` - SOAP login host (default: `https://login.salesforce.com`)
//! - `SALESFORCE_API_VERSION` - API version (default: `59.0`)
//! - `SALESFORCE_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)

use policy_agent_core::ConfigError;
use policy_agent_core::config::{get_env_parsed, get_env_string};
use std::time::Duration;
use url::Url;

pub const DEFAULT_LOGIN_URL: &str = "https://login.salesforce.com";
pub const DEFAULT_API_VERSION: &str = "59.0";

#[derive(Debug, Clone, PartialEq)]
pub struct SalesforceSettings {
    pub login_url: Url,
    pub api_version: String,
    pub timeout: Duration,
}

impl Default for SalesforceSettings {
    fn default() -> Self {
        Self {
            login_url: Url::parse(DEFAULT_LOGIN_URL)
                .unwrap_or_else(|e| unreachable!("default login URL is valid: {e}")),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl SalesforceSettings {
    /// Load settings from environment variables on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(raw) = get_env_string("SALESFORCE_LOGIN_URL") {
            settings.login_url = Url::parse(&raw).map_err(|e| ConfigError::InvalidEnvVar {
                key: "SALESFORCE_LOGIN_URL".to_string(),
                message: format!("invalid URL '{raw}': {e}"),
            })?;
        }
        if let Some(version) = get_env_string("SALESFORCE_API_VERSION") {
            settings.api_version = version;
        }
        if let Some(secs) = get_env_parsed::<u64>("SALESFORCE_TIMEOUT_SECS")? {
            settings.timeout = Duration::from_secs(secs);
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn with_login_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.login_url = Url::parse(raw)
            .map_err(|e| ConfigError::ValidationError(format!("invalid login URL '{raw}': {e}")))?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut parts = self.api_version.split('.');
        let well_formed = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(major), Some(minor), None)
                if !major.is_empty()
                    && !minor.is_empty()
                    && major.chars().all(|c| c.is_ascii_digit())
                    && minor.chars().all(|c| c.is_ascii_digit())
        );
        if !well_formed {
            return Err(ConfigError::ValidationError(format!(
                "api_version must look like '59.0', got '{}'",
                self.api_version
            )));
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "timeout must be greater than 0".to_string(),
            ));
        }

        if !matches!(self.login_url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "login URL must be http or https, got '{}'",
                self.login_url
            )));
        }

        Ok(())
    }

    /// SOAP partner endpoint used for `login`.
    pub fn soap_login_endpoint(&self) -> String {
        format!(
            "{}/services/Soap/u/{}",
            self.login_url.as_str().trim_end_matches('/'),
            self.api_version
        )
    }

    /// REST query endpoint on the instance returned by login.
    pub fn query_endpoint(&self, instance: &Url) -> String {
        format!(
            "{}/services/data/v{}/query/",
            instance.as_str().trim_end_matches('/'),
            self.api_version
        )
    }
}
