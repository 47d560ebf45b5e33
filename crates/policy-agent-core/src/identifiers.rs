//! Validated tool identifiers
//!
//! Tool names travel from a language model, through the orchestrator, into
//! the registry. `ToolId` is the only way a name reaches the registry, so the
//! rules below hold everywhere a tool is looked up:
//!
//! - Non-empty, at most [`MAX_ID_LENGTH`] characters
//! - No leading or trailing whitespace
//! - Only alphanumeric characters, hyphens (`-`), underscores (`_`) and dots (`.`)
//! - No path traversal sequences (`../`, `./`)
//!
//! # Examples
//!
//! ```rust
//! use policy_agent_core::identifiers::ToolId;
//!
//! let id = ToolId::parse("get_current_time_in_timezone").unwrap();
//! assert_eq!(id.as_str(), "get_current_time_in_timezone");
//!
//! assert!(ToolId::parse("").is_err());
//! assert!(ToolId::parse("tool with spaces").is_err());
//! assert!(ToolId::parse("../etc").is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a tool identifier
pub const MAX_ID_LENGTH: usize = 128;

/// Reasons an identifier can be rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    #[error("Identifier cannot be empty")]
    Empty,

    #[error("Identifier cannot be whitespace-only")]
    WhitespaceOnly,

    #[error("Identifier cannot have leading or trailing whitespace")]
    LeadingTrailingWhitespace,

    #[error(
        "Identifier can only contain alphanumeric characters, hyphens, underscores, and dots"
    )]
    InvalidCharacters,

    #[error("Identifier too long ({length} chars, max {max})")]
    TooLong { length: usize, max: usize },

    #[error("Identifier cannot contain path traversal sequences (../)")]
    PathTraversal,
}

/// Validator shared by every identifier in the workspace
pub struct IdValidator;

impl IdValidator {
    /// Validate an identifier, returning it unchanged on success.
    pub fn validate(id: &str) -> Result<&str, IdValidationError> {
        if id.is_empty() {
            return Err(IdValidationError::Empty);
        }

        if id.trim().is_empty() {
            return Err(IdValidationError::WhitespaceOnly);
        }

        if id.trim() != id {
            return Err(IdValidationError::LeadingTrailingWhitespace);
        }

        let length = id.chars().count();
        if length > MAX_ID_LENGTH {
            return Err(IdValidationError::TooLong {
                length,
                max: MAX_ID_LENGTH,
            });
        }

        if id.contains("../") || id.contains("./") || id == ".." {
            return Err(IdValidationError::PathTraversal);
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(IdValidationError::InvalidCharacters);
        }

        Ok(id)
    }
}

/// Name under which a tool is registered and invoked
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToolId(String);

impl ToolId {
    /// Parse and validate a tool identifier.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, IdValidationError> {
        IdValidator::validate(id.as_ref()).map(|s| Self(s.to_string()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ToolId {
    type Err = IdValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ToolId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ToolId> for String {
    fn from(id: ToolId) -> Self {
        id.0
    }
}

impl TryFrom<String> for ToolId {
    type Error = IdValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        IdValidator::validate(&s)?;
        Ok(Self(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_registered_tool_names() {
        assert!(ToolId::parse("my_custom_tool").is_ok());
        assert!(ToolId::parse("get_current_time_in_timezone").is_ok());
        assert!(ToolId::parse("get_active_insurance_policies").is_ok());
        assert!(ToolId::parse("tool-name.v2").is_ok());
    }

    #[test]
    fn rejects_invalid_names() {
        assert_eq!(ToolId::parse(""), Err(IdValidationError::Empty));
        assert_eq!(ToolId::parse("   "), Err(IdValidationError::WhitespaceOnly));
        assert_eq!(
            ToolId::parse(" padded"),
            Err(IdValidationError::LeadingTrailingWhitespace)
        );
        assert_eq!(
            ToolId::parse("tool@special"),
            Err(IdValidationError::InvalidCharacters)
        );
        assert_eq!(
            ToolId::parse("../etc/passwd"),
            Err(IdValidationError::PathTraversal)
        );
        assert!(matches!(
            ToolId::parse("a".repeat(129)),
            Err(IdValidationError::TooLong { length: 129, .. })
        ));
    }

    #[test]
    fn serde_round_trip_validates() {
        let id: ToolId = serde_json::from_str("\"clock\"").unwrap();
        assert_eq!(id.as_str(), "clock");
        assert!(serde_json::from_str::<ToolId>("\"bad name\"").is_err());
    }
}
