pub use policy_agent_core::{
    AgentSettings, PromptTemplates, Tool, ToolArgs, ToolCall, ToolDescriptor, ToolFailure,
};
pub use policy_agent_tools::{
    InMemoryToolRegistry, ToolRegistry, agent_registry, agent_registry_from_env,
};
