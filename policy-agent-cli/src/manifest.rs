//! The hand-off document for the external orchestrator.

use policy_agent_core::{
    AgentSettings, ModelSettings, PromptTemplates, ToolDescriptor, ToolEffect,
};
use policy_agent_tools::ToolRegistry;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// One tool as the orchestrator sees it
#[derive(Debug, Clone, Serialize)]
pub struct ToolManifest {
    pub name: String,
    pub description: String,
    pub effect: ToolEffect,
    pub parameters: Value,
    pub returns: &'static str,
}

impl From<&ToolDescriptor> for ToolManifest {
    fn from(descriptor: &ToolDescriptor) -> Self {
        Self {
            name: descriptor.name().to_string(),
            description: descriptor.description().to_string(),
            effect: descriptor.effect(),
            parameters: descriptor.json_schema(),
            returns: descriptor.return_type().json_type(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentLimits {
    pub max_steps: u32,
    pub verbosity_level: u8,
    pub planning_interval: Option<u32>,
    pub prompts_path: PathBuf,
}

/// Model settings, orchestrator limits, tools and prompt templates
#[derive(Debug, Clone, Serialize)]
pub struct AgentManifest {
    pub model: ModelSettings,
    pub agent: AgentLimits,
    pub tools: Vec<ToolManifest>,
    pub prompt_templates: PromptTemplates,
}

impl AgentManifest {
    pub fn assemble(
        settings: AgentSettings,
        registry: &dyn ToolRegistry,
        prompt_templates: PromptTemplates,
    ) -> Self {
        let AgentSettings {
            model,
            max_steps,
            verbosity_level,
            planning_interval,
            prompts_path,
        } = settings;

        Self {
            model,
            agent: AgentLimits {
                max_steps,
                verbosity_level,
                planning_interval,
                prompts_path,
            },
            tools: registry
                .descriptors()
                .into_iter()
                .map(ToolManifest::from)
                .collect(),
            prompt_templates,
        }
    }
}
