//! # Policy Agent Tools
//!
//! The tool registry and the tools the agent ships with:
//!
//! - `my_custom_tool`: placeholder returning a fixed answer
//! - `get_current_time_in_timezone`: wall-clock time in an IANA timezone
//!   (feature `clock`)
//! - `get_active_insurance_policies`: Salesforce record count
//!   (feature `salesforce`)
//!
//! # Example
//!
//! ```rust
//! use policy_agent_tools::{InMemoryToolRegistry, ToolRegistry, MagicTool};
//! use std::sync::Arc;
//!
//! let registry = InMemoryToolRegistry::new().with_tool(Arc::new(MagicTool::new()));
//! assert_eq!(registry.tool_names(), vec!["my_custom_tool"]);
//! ```

pub mod registry;
pub mod standard;

#[cfg(feature = "salesforce")]
pub mod salesforce;

pub use registry::{InMemoryToolRegistry, ToolRegistry};
pub use standard::MagicTool;

#[cfg(feature = "clock")]
pub use standard::{Clock, FixedClock, SystemClock, TimezoneClockTool};

#[cfg(feature = "salesforce")]
pub use salesforce::{ActivePoliciesTool, CredentialSource, SalesforceSettings};

pub use policy_agent_core::{Tool, ToolCall, ToolError};

/// Registry holding every tool the agent is configured with.
#[cfg(all(feature = "clock", feature = "salesforce"))]
pub fn agent_registry(
    credentials: std::sync::Arc<dyn CredentialSource>,
    settings: SalesforceSettings,
) -> InMemoryToolRegistry {
    registry_with(ActivePoliciesTool::new(credentials, settings))
}

/// Like [`agent_registry`], with Salesforce credentials and settings read
/// from the environment when the tool is called. Building it never fails.
#[cfg(all(feature = "clock", feature = "salesforce"))]
pub fn agent_registry_from_env() -> InMemoryToolRegistry {
    registry_with(ActivePoliciesTool::from_env())
}

#[cfg(all(feature = "clock", feature = "salesforce"))]
fn registry_with(policies: ActivePoliciesTool) -> InMemoryToolRegistry {
    use std::sync::Arc;

    InMemoryToolRegistry::new()
        .with_tool(Arc::new(MagicTool::new()))
        .with_tool(Arc::new(TimezoneClockTool::new()))
        .with_tool(Arc::new(policies))
}
