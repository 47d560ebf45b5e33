use policy_agent_core::{
    FailureKind, Tool, ToolCall, ToolDescriptor, ToolError, ToolFailure, ToolId, render_result,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Trait for managing and dispatching tool calls.
///
/// Registries route incoming calls to the tool registered under the call's
/// name. Whatever the tool does, dispatch produces a string; the only
/// non-string outcome is "no such tool".
pub trait ToolRegistry {
    /// Dispatch a tool call to the appropriate tool implementation.
    ///
    /// Returns `None` if the requested tool is not registered.
    fn dispatch(&self, call: &ToolCall) -> Option<String>;

    /// Descriptors of every registered tool, in registration order.
    fn descriptors(&self) -> Vec<&ToolDescriptor>;

    /// Dispatch with a structured error for unknown tools.
    fn try_dispatch(&self, call: &ToolCall) -> Result<String, ToolError> {
        self.dispatch(call)
            .ok_or_else(|| ToolError::not_found(call.name()))
    }
}

/// In-memory tool registry for local tool storage and dispatch.
///
/// Built once at startup and immutable afterwards; clones share the same
/// tool instances.
///
/// # Example
///
/// ```rust
/// use policy_agent_tools::{InMemoryToolRegistry, ToolRegistry, MagicTool};
/// use policy_agent_core::{ToolArgs, ToolCall};
/// use std::sync::Arc;
///
/// let registry = InMemoryToolRegistry::new()
///     .with_tool(Arc::new(MagicTool::new()));
///
/// let call = ToolCall::new(
///     "my_custom_tool",
///     ToolArgs::new().with("arg1", "x").with("arg2", 1i64),
/// )
/// .unwrap();
///
/// assert_eq!(
///     registry.dispatch(&call).as_deref(),
///     Some("What magic will you build ?")
/// );
/// ```
#[derive(Clone, Default)]
pub struct InMemoryToolRegistry {
    tools: HashMap<ToolId, Arc<dyn Tool>>,
    order: Vec<ToolId>,
}

impl InMemoryToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool using the builder pattern.
    ///
    /// # Panics
    ///
    /// Panics if a tool with the same name is already registered. Use
    /// [`try_with_tool`](Self::try_with_tool) to handle that case.
    pub fn with_tool(self, tool: Arc<dyn Tool>) -> Self {
        let name = tool.name().to_string();
        match self.try_with_tool(tool) {
            Ok(registry) => registry,
            Err(e) => panic!("cannot register tool '{name}': {e}"),
        }
    }

    /// Add a tool, rejecting duplicate names.
    pub fn try_with_tool(mut self, tool: Arc<dyn Tool>) -> Result<Self, ToolError> {
        let id = tool.descriptor().name().clone();
        if self.tools.contains_key(&id) {
            return Err(ToolError::Duplicate {
                name: id.to_string(),
            });
        }

        tracing::debug!(tool = %id, effect = ?tool.descriptor().effect(), "registered tool");
        self.order.push(id.clone());
        self.tools.insert(id, tool);
        Ok(self)
    }

    /// Names of all registered tools, in registration order.
    pub fn tool_names(&self) -> Vec<String> {
        self.order.iter().map(ToString::to_string).collect()
    }

    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let id = ToolId::parse(name).ok()?;
        self.tools.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl ToolRegistry for InMemoryToolRegistry {
    fn dispatch(&self, call: &ToolCall) -> Option<String> {
        let tool = self.tools.get(&call.tool)?;

        match tool.descriptor().bind(call.args.clone()) {
            Ok(args) => Some(tool.call(&args)),
            Err(e) => Some(render_result(
                tool.name(),
                Err(ToolFailure::new(
                    FailureKind::InvalidArgument,
                    format!("invoking tool '{}'", tool.name()),
                    e,
                )),
            )),
        }
    }

    fn descriptors(&self) -> Vec<&ToolDescriptor> {
        self.order
            .iter()
            .filter_map(|id| self.tools.get(id))
            .map(|tool| tool.descriptor())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy_agent_core::{BoundArgs, ParamType, ToolArgs, ToolResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct UppercaseTool {
        descriptor: ToolDescriptor,
        calls: AtomicUsize,
    }

    impl UppercaseTool {
        fn new(name: &str) -> Self {
            Self {
                descriptor: ToolDescriptor::builder(name)
                    .description("Uppercases text")
                    .param("text", ParamType::String, "text to uppercase")
                    .build()
                    .unwrap(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Tool for UppercaseTool {
        fn descriptor(&self) -> &ToolDescriptor {
            &self.descriptor
        }

        fn execute(&self, args: &BoundArgs) -> ToolResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let text = args
                .str("text")
                .map_err(|e| ToolFailure::new(FailureKind::InvalidArgument, "uppercasing", e))?;
            Ok(text.to_uppercase())
        }
    }

    fn call(name: &str, args: ToolArgs) -> ToolCall {
        ToolCall::new(name, args).expect("Valid tool name")
    }

    #[test]
    fn registry_dispatches_to_correct_tool() {
        let registry = InMemoryToolRegistry::new()
            .with_tool(Arc::new(UppercaseTool::new("uppercase")))
            .with_tool(Arc::new(UppercaseTool::new("shout")));

        let upper = registry.dispatch(&call("uppercase", ToolArgs::new().with("text", "policy")));
        let missing = registry.dispatch(&call("nonexistent", ToolArgs::new()));

        assert_eq!(upper.as_deref(), Some("POLICY"));
        assert!(missing.is_none());
    }

    #[test]
    fn try_dispatch_reports_unknown_tool() {
        let registry = InMemoryToolRegistry::new();
        let err = registry
            .try_dispatch(&call("nonexistent", ToolArgs::new()))
            .unwrap_err();
        assert_eq!(err, ToolError::not_found("nonexistent"));
        assert_eq!(err.to_string(), "Tool 'nonexistent' not found in registry");
    }

    #[test]
    fn invalid_arguments_become_error_strings_without_running_tool() {
        let tool = Arc::new(UppercaseTool::new("uppercase"));
        let registry = InMemoryToolRegistry::new().with_tool(tool.clone());

        let wrong_type = registry
            .dispatch(&call("uppercase", ToolArgs::new().with("text", 5i64)))
            .unwrap();
        let missing = registry
            .dispatch(&call("uppercase", ToolArgs::new()))
            .unwrap();

        assert_eq!(
            wrong_type,
            "Error invoking tool 'uppercase': argument 'text' must be string, got integer"
        );
        assert_eq!(
            missing,
            "Error invoking tool 'uppercase': missing required argument 'text'"
        );
        assert_eq!(tool.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = InMemoryToolRegistry::new()
            .with_tool(Arc::new(UppercaseTool::new("uppercase")))
            .try_with_tool(Arc::new(UppercaseTool::new("uppercase")));

        assert!(matches!(result, Err(ToolError::Duplicate { ref name }) if name == "uppercase"));
    }

    #[test]
    fn names_and_descriptors_keep_registration_order() {
        let registry = InMemoryToolRegistry::new()
            .with_tool(Arc::new(UppercaseTool::new("zeta")))
            .with_tool(Arc::new(UppercaseTool::new("alpha")));

        assert_eq!(registry.tool_names(), vec!["zeta", "alpha"]);
        let names: Vec<_> = registry
            .descriptors()
            .iter()
            .map(|d| d.name().as_str())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn registry_get_tool_and_len() {
        let empty = InMemoryToolRegistry::new();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);

        let registry = InMemoryToolRegistry::new().with_tool(Arc::new(UppercaseTool::new("upper")));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get_tool("upper").unwrap().name(), "upper");
        assert!(registry.get_tool("missing").is_none());
        assert!(registry.get_tool("not valid").is_none());
    }
}
