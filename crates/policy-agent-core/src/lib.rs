//! # Policy Agent Core
//!
//! The tool contract shared by every Policy Agent crate:
//!
//! - **[`Tool`]**: a named, schema-described capability that always answers
//!   with a string
//! - **[`ToolDescriptor`]**: validated name, description, effect and
//!   ordered primitive parameters
//! - **[`ToolFailure`]**: the internal error a tool body returns, flattened
//!   to `Error <activity>: <cause>` at the boundary
//! - **[`AgentSettings`]** and **[`PromptTemplates`]**: what the
//!   orchestrator is assembled from

pub mod args;
pub mod config;
pub mod error;
pub mod identifiers;
pub mod prompts;
pub mod schema;
pub mod secret;
pub mod tool;

pub use args::{ArgValue, ArgumentError, BoundArgs, ToolArgs};
pub use config::{AgentSettings, AgentSettingsBuilder, ConfigError, ModelSettings};
pub use error::ToolError;
pub use identifiers::{IdValidationError, ToolId};
pub use prompts::{PromptError, PromptTemplates};
pub use schema::{ParamSpec, ParamType, SchemaError, ToolDescriptor, ToolEffect};
pub use secret::SecretString;
pub use tool::{FailureKind, Tool, ToolCall, ToolFailure, ToolResult, render_result};
