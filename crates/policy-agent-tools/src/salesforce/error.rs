use policy_agent_core::{ConfigError, FailureKind};

/// Everything that can go wrong between reading credentials and reading
/// `totalSize`.
#[derive(Debug, thiserror::Error)]
pub enum SalesforceError {
    #[error("missing credential '{key}'")]
    MissingCredential { key: &'static str },

    #[error("invalid Salesforce settings: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("request to Salesforce failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication failed: {message}")]
    AuthenticationFailed { code: String, message: String },

    #[error("query rejected with status {status}: {message}")]
    QueryRejected { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("async runtime unavailable: {0}")]
    Runtime(String),
}

impl SalesforceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SalesforceError::MissingCredential { .. } | SalesforceError::InvalidConfig(_) => {
                FailureKind::Configuration
            }
            SalesforceError::Http(_)
            | SalesforceError::AuthenticationFailed { .. }
            | SalesforceError::QueryRejected { .. }
            | SalesforceError::MalformedResponse(_) => FailureKind::Remote,
            SalesforceError::Runtime(_) => FailureKind::Internal,
        }
    }
}
