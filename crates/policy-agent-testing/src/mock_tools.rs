//! # Mock Tools for Testing
//!
//! A tool that returns predictable responses so registry and orchestration
//! code can be tested without real effects.

use policy_agent_core::{
    ArgValue, BoundArgs, FailureKind, ParamType, Tool, ToolDescriptor, ToolFailure, ToolResult,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A mock tool with one string parameter, `input`, answering from a table.
#[derive(Debug, Clone)]
pub struct MockTool {
    descriptor: ToolDescriptor,
    responses: HashMap<String, Result<String, String>>,
    default_response: Option<Result<String, String>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl MockTool {
    /// Create a mock tool registered under `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid tool identifier.
    pub fn new(name: &str) -> Self {
        let descriptor = ToolDescriptor::builder(name)
            .description("Mock tool for tests")
            .param("input", ParamType::String, "input to match against canned responses")
            .build()
            .expect("valid mock tool name");

        Self {
            descriptor,
            responses: HashMap::new(),
            default_response: None,
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer `response` when called with `input`.
    pub fn with_response(mut self, input: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses.insert(input.into(), Ok(response.into()));
        self
    }

    /// Fail with `cause` when called with `input`.
    pub fn with_failure(mut self, input: impl Into<String>, cause: impl Into<String>) -> Self {
        self.responses.insert(input.into(), Err(cause.into()));
        self
    }

    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = Some(Ok(response.into()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_history.lock().map(|h| h.len()).unwrap_or(0)
    }

    pub fn call_history(&self) -> Vec<String> {
        self.call_history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default()
    }

    pub fn was_called_with(&self, input: &str) -> bool {
        self.call_history().iter().any(|i| i == input)
    }
}

impl Tool for MockTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, args: &BoundArgs) -> ToolResult {
        let input = match args.get("input") {
            Some(ArgValue::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };

        if let Ok(mut history) = self.call_history.lock() {
            history.push(input.clone());
        }

        let canned = self
            .responses
            .get(&input)
            .or(self.default_response.as_ref())
            .cloned()
            .unwrap_or_else(|| Ok(format!("Mock response for: {input}")));

        canned.map_err(|cause| {
            ToolFailure::new(
                FailureKind::Internal,
                format!("running mock tool '{}'", self.name()),
                cause,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy_agent_core::ToolArgs;

    fn call(tool: &MockTool, input: &str) -> String {
        let args = tool
            .descriptor()
            .bind(ToolArgs::new().with("input", input))
            .unwrap();
        tool.call(&args)
    }

    #[test]
    fn answers_from_table_and_tracks_calls() {
        let tool = MockTool::new("mock")
            .with_response("ping", "pong")
            .with_failure("boom", "exploded");

        assert_eq!(call(&tool, "ping"), "pong");
        assert_eq!(call(&tool, "boom"), "Error running mock tool 'mock': exploded");
        assert_eq!(call(&tool, "other"), "Mock response for: other");

        assert_eq!(tool.call_count(), 3);
        assert!(tool.was_called_with("boom"));
    }

    #[test]
    fn default_response_covers_unmatched_input() {
        let tool = MockTool::new("mock").with_default_response("fallback");
        assert_eq!(call(&tool, "anything"), "fallback");
    }
}
