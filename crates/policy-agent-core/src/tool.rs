use serde::{Deserialize, Serialize};
use std::fmt;

use crate::args::{BoundArgs, ToolArgs};
use crate::identifiers::{IdValidationError, ToolId};
use crate::schema::ToolDescriptor;

/// A request to invoke a specific tool with primitive arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool: ToolId,
    #[serde(default)]
    pub args: ToolArgs,
}

impl ToolCall {
    /// Create a call, validating the tool name.
    pub fn new(name: &str, args: ToolArgs) -> Result<Self, IdValidationError> {
        Ok(Self {
            tool: ToolId::parse(name)?,
            args,
        })
    }

    pub fn name(&self) -> &str {
        self.tool.as_str()
    }
}

/// Categorized failure reasons for tool execution.
///
/// The kind never reaches the orchestrator (it only sees the rendered
/// string), but it is recorded on every failure log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Missing or invalid configuration, e.g. an absent credential
    Configuration,
    /// The remote system rejected the request or answered with garbage
    Remote,
    /// The caller passed an argument the tool cannot use
    InvalidArgument,
    /// Anything else that went wrong inside the tool
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Configuration => "configuration",
            FailureKind::Remote => "remote",
            FailureKind::InvalidArgument => "invalid_argument",
            FailureKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// A failure inside a tool.
///
/// Renders as `Error <activity>: <cause>`, which is exactly what the
/// orchestrator receives in place of a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolFailure {
    kind: FailureKind,
    activity: String,
    cause: String,
}

impl ToolFailure {
    /// `activity` reads as a gerund phrase: "fetching time for timezone 'X'".
    pub fn new(kind: FailureKind, activity: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self {
            kind,
            activity: activity.into(),
            cause: cause.to_string(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn activity(&self) -> &str {
        &self.activity
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }
}

impl fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {}: {}", self.activity, self.cause)
    }
}

impl std::error::Error for ToolFailure {}

/// The outcome of a tool body before it is flattened at the boundary.
pub type ToolResult = Result<String, ToolFailure>;

/// Flatten a tool outcome into the string handed back to the orchestrator.
///
/// Failures are logged with their kind so they stay distinguishable from
/// successful output even though both are plain strings.
pub fn render_result(tool: &str, result: ToolResult) -> String {
    match result {
        Ok(output) => {
            tracing::debug!(tool, "tool call succeeded");
            output
        }
        Err(failure) => {
            tracing::warn!(
                tool,
                kind = %failure.kind(),
                cause = failure.cause(),
                "tool call failed"
            );
            failure.to_string()
        }
    }
}

/// Trait defining an external capability that agents can invoke.
///
/// Implementors provide a [`ToolDescriptor`] and an [`execute`](Tool::execute)
/// body that returns a [`ToolResult`]. Callers use [`call`](Tool::call), which
/// never fails: whatever happens inside becomes a string.
///
/// # Example
///
/// ```rust
/// use policy_agent_core::tool::{FailureKind, Tool, ToolFailure, ToolResult};
/// use policy_agent_core::schema::{ParamType, ToolDescriptor};
/// use policy_agent_core::args::{BoundArgs, ToolArgs};
///
/// struct DoubleTool {
///     descriptor: ToolDescriptor,
/// }
///
/// impl Tool for DoubleTool {
///     fn descriptor(&self) -> &ToolDescriptor {
///         &self.descriptor
///     }
///
///     fn execute(&self, args: &BoundArgs) -> ToolResult {
///         let n = args
///             .float("n")
///             .map_err(|e| ToolFailure::new(FailureKind::InvalidArgument, "doubling", e))?;
///         Ok((n * 2.0).to_string())
///     }
/// }
///
/// let tool = DoubleTool {
///     descriptor: ToolDescriptor::builder("double")
///         .description("Multiplies a number by 2")
///         .param("n", ParamType::Float, "the number to double")
///         .build()
///         .unwrap(),
/// };
///
/// let args = tool.descriptor().bind(ToolArgs::new().with("n", 2.5)).unwrap();
/// assert_eq!(tool.call(&args), "5");
/// ```
pub trait Tool: Send + Sync {
    /// Name, description, effect and parameter schema.
    fn descriptor(&self) -> &ToolDescriptor;

    /// The tool body. Arguments have already been bound to the descriptor.
    fn execute(&self, args: &BoundArgs) -> ToolResult;

    fn name(&self) -> &str {
        self.descriptor().name().as_str()
    }

    /// Run the tool and flatten the outcome to a string.
    fn call(&self, args: &BoundArgs) -> String {
        render_result(self.name(), self.execute(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ParamType;

    struct EchoTool {
        descriptor: ToolDescriptor,
    }

    impl EchoTool {
        fn new() -> Self {
            Self {
                descriptor: ToolDescriptor::builder("echo")
                    .description("Echoes its input")
                    .param("text", ParamType::String, "text to echo")
                    .build()
                    .unwrap(),
            }
        }
    }

    impl Tool for EchoTool {
        fn descriptor(&self) -> &ToolDescriptor {
            &self.descriptor
        }

        fn execute(&self, args: &BoundArgs) -> ToolResult {
            let text = args
                .str("text")
                .map_err(|e| ToolFailure::new(FailureKind::InvalidArgument, "echoing", e))?;
            if text.is_empty() {
                return Err(ToolFailure::new(
                    FailureKind::InvalidArgument,
                    "echoing",
                    "nothing to echo",
                ));
            }
            Ok(format!("Echo: {text}"))
        }
    }

    fn call_with(tool: &EchoTool, text: &str) -> String {
        let args = tool
            .descriptor()
            .bind(ToolArgs::new().with("text", text))
            .unwrap();
        tool.call(&args)
    }

    #[test]
    fn tool_can_echo_input() {
        let tool = EchoTool::new();
        assert_eq!(call_with(&tool, "Policy"), "Echo: Policy");
        assert_eq!(tool.name(), "echo");
    }

    #[test]
    fn failures_render_as_error_strings() {
        let tool = EchoTool::new();
        assert_eq!(call_with(&tool, ""), "Error echoing: nothing to echo");
    }

    #[test]
    fn failure_keeps_kind_and_cause() {
        let failure = ToolFailure::new(FailureKind::Remote, "fetching things", "timed out");
        assert_eq!(failure.kind(), FailureKind::Remote);
        assert_eq!(failure.activity(), "fetching things");
        assert_eq!(failure.cause(), "timed out");
        assert_eq!(failure.to_string(), "Error fetching things: timed out");
    }

    #[test]
    fn tool_call_validates_name() {
        assert!(ToolCall::new("echo", ToolArgs::new()).is_ok());
        assert!(ToolCall::new("not valid", ToolArgs::new()).is_err());
    }

    #[test]
    fn tool_call_deserializes_without_args() {
        let call: ToolCall = serde_json::from_str(r#"{"tool": "echo"}"#).unwrap();
        assert_eq!(call.name(), "echo");
        assert!(call.args.is_empty());
    }
}
