use policy_agent_core::{
    AgentSettingsBuilder, ArgumentError, ConfigError, IdValidationError, PromptError,
    PromptTemplates, ToolArgs, ToolCall, ToolDescriptor, ToolError,
};
use policy_agent_tools::{InMemoryToolRegistry, ToolRegistry, agent_registry_from_env};
use std::path::PathBuf;

use crate::manifest::AgentManifest;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Prompts(#[from] PromptError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("invalid tool name: {0}")]
    ToolName(#[from] IdValidationError),

    #[error("expected key=value, got '{0}'")]
    MalformedArg(String),

    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Registry wired to the process environment. Salesforce settings are read
/// when that tool runs, so a bad value never blocks the other tools.
pub fn build_registry() -> InMemoryToolRegistry {
    agent_registry_from_env()
}

pub fn list_tools(registry: &dyn ToolRegistry, json: bool) -> Result<String, CliError> {
    let descriptors = registry.descriptors();
    if json {
        let listing: Vec<_> = descriptors
            .iter()
            .map(|d| crate::manifest::ToolManifest::from(*d))
            .collect();
        return Ok(serde_json::to_string_pretty(&listing)?);
    }

    Ok(descriptors
        .iter()
        .map(|d| describe(d))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn describe(descriptor: &ToolDescriptor) -> String {
    let params = descriptor
        .params()
        .iter()
        .map(|p| format!("{}: {}", p.name, p.param_type))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{}({}) -> {}\n    {}",
        descriptor.name(),
        params,
        descriptor.return_type(),
        descriptor.description()
    )
}

/// Split `key=value` at the first `=`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), CliError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(CliError::MalformedArg(raw.to_string())),
    }
}

/// Turn raw `key=value` pairs into typed arguments using the tool's
/// declared parameter types. Unknown keys pass through as strings and are
/// rejected when the registry binds them.
pub fn typed_args(
    descriptor: Option<&ToolDescriptor>,
    raw_args: &[String],
) -> Result<ToolArgs, CliError> {
    let mut args = ToolArgs::new();
    for raw in raw_args {
        let (key, value) = parse_key_value(raw)?;
        let declared = descriptor.and_then(|d| d.params().iter().find(|p| p.name == key));
        match declared {
            Some(spec) => args.insert(key.clone(), spec.param_type.parse_value(&key, &value)?),
            None => args.insert(key, value),
        }
    }
    Ok(args)
}

pub fn call_tool(
    registry: &InMemoryToolRegistry,
    name: &str,
    raw_args: &[String],
) -> Result<String, CliError> {
    let tool = registry.get_tool(name);
    let args = typed_args(tool.as_ref().map(|t| t.descriptor()), raw_args)?;
    let call = ToolCall::new(name, args)?;
    tracing::info!(tool = %call.tool, args = call.args.len(), "dispatching tool call");
    Ok(registry.try_dispatch(&call)?)
}

pub fn render_manifest(
    registry: &dyn ToolRegistry,
    prompts: Option<PathBuf>,
) -> Result<String, CliError> {
    let mut builder = AgentSettingsBuilder::from_env()?;
    if let Some(path) = prompts {
        builder = builder.prompts_path(path);
    }
    let settings = builder.build()?;

    let templates = PromptTemplates::load(&settings.prompts_path)?;
    let manifest = AgentManifest::assemble(settings, registry, templates);
    Ok(serde_json::to_string_pretty(&manifest)?)
}
