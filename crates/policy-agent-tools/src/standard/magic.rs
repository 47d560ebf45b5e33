use policy_agent_core::{BoundArgs, ParamType, Tool, ToolDescriptor, ToolEffect, ToolResult};

/// Placeholder tool showing the minimal shape: two primitive parameters and
/// a fixed answer.
pub struct MagicTool {
    descriptor: ToolDescriptor,
}

impl MagicTool {
    pub const NAME: &'static str = "my_custom_tool";
    pub const ANSWER: &'static str = "What magic will you build ?";

    pub fn new() -> Self {
        let descriptor = ToolDescriptor::builder(Self::NAME)
            .description("A tool that does nothing yet")
            .param("arg1", ParamType::String, "the first argument")
            .param("arg2", ParamType::Integer, "the second argument")
            .effect(ToolEffect::ReadOnly)
            .build()
            .unwrap_or_else(|e| unreachable!("static descriptor is valid: {e}"));

        Self { descriptor }
    }
}

impl Default for MagicTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for MagicTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, _args: &BoundArgs) -> ToolResult {
        Ok(Self::ANSWER.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy_agent_core::ToolArgs;

    #[test]
    fn answers_the_same_for_any_input() {
        let tool = MagicTool::new();
        for (arg1, arg2) in [("", 0i64), ("anything", -7), ("emoji ✨", i64::MAX)] {
            let args = tool
                .descriptor()
                .bind(ToolArgs::new().with("arg1", arg1).with("arg2", arg2))
                .unwrap();
            assert_eq!(tool.call(&args), "What magic will you build ?");
        }
    }

    #[test]
    fn descriptor_documents_both_arguments() {
        let tool = MagicTool::new();
        let params = tool.descriptor().params();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].param_type, ParamType::String);
        assert_eq!(params[1].param_type, ParamType::Integer);
        assert!(tool.descriptor().is_read_only());
    }
}
