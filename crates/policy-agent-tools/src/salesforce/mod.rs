//! # Salesforce Query Tool
//!
//! One authenticated, read-only count query against a Salesforce org:
//! SOAP partner login for a session, then a REST `query` call whose
//! `totalSize` is the answer. Nothing is retained between calls.

mod client;
mod credentials;
mod error;
mod settings;
mod soap;
mod tool;

pub use client::SalesforceClient;
pub use credentials::{
    CredentialSource, EnvCredentialSource, PASSWORD_KEY, SECURITY_TOKEN_KEY, SalesforceCredentials,
    StaticCredentials, USERNAME_KEY,
};
pub use error::SalesforceError;
pub use settings::SalesforceSettings;
pub use soap::LoginSession;
pub use tool::{ActivePoliciesTool, DEFAULT_COUNT_QUERY};
