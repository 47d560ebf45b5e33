//! Registry-level errors.
//!
//! These never come out of a tool itself (tools answer with strings); they
//! describe problems with looking a tool up or assembling a registry.

use crate::schema::SchemaError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    #[error("Tool '{name}' not found in registry")]
    NotFound { name: String },

    #[error("Tool '{name}' is already registered")]
    Duplicate { name: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ToolError {
    pub fn not_found(name: impl Into<String>) -> Self {
        ToolError::NotFound { name: name.into() }
    }
}
