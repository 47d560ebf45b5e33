//! # Environment-Based Configuration
//!
//! Settings that shape how the agent is assembled: which hosted model to
//! target, its sampling hyperparameters, orchestrator limits, and where the
//! prompt templates live. Defaults mirror the values the agent was tuned
//! with; every field can be overridden from the environment.
//!
//! ## Environment Variables
//!
//! - `POLICY_AGENT_MODEL_ID` - Hosted model id or endpoint URL (default: `Qwen/Qwen2.5-Coder-32B-Instruct`)
//! - `POLICY_AGENT_MAX_TOKENS` - Generation limit (default: 2096)
//! - `POLICY_AGENT_TEMPERATURE` - Sampling temperature, 0.0-2.0 (default: 0.5)
//! - `POLICY_AGENT_MAX_STEPS` - Orchestrator step cap (default: 6)
//! - `POLICY_AGENT_VERBOSITY` - Orchestrator verbosity level (default: 1)
//! - `POLICY_AGENT_PLANNING_INTERVAL` - Steps between planning passes (default: unset)
//! - `POLICY_AGENT_PROMPTS_PATH` - Prompt template file (default: `prompts.yaml`)

use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

/// Default hosted model
pub const DEFAULT_MODEL_ID: &str = "Qwen/Qwen2.5-Coder-32B-Instruct";

/// Error type for configuration loading
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable '{key}': {message}")]
    InvalidEnvVar { key: String, message: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Hosted model client parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            max_tokens: 2096,
            temperature: 0.5,
        }
    }
}

/// Everything needed to assemble the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSettings {
    pub model: ModelSettings,
    pub max_steps: u32,
    pub verbosity_level: u8,
    pub planning_interval: Option<u32>,
    pub prompts_path: PathBuf,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: ModelSettings::default(),
            max_steps: 6,
            verbosity_level: 1,
            planning_interval: None,
            prompts_path: PathBuf::from("prompts.yaml"),
        }
    }
}

/// Builder for [`AgentSettings`] with environment variable support
#[derive(Debug, Clone, Default)]
pub struct AgentSettingsBuilder {
    settings: AgentSettings,
}

impl AgentSettingsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from environment variables on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set to a value
    /// that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::default();

        if let Some(model_id) = get_env_string("POLICY_AGENT_MODEL_ID") {
            builder = builder.model_id(model_id);
        }
        if let Some(max_tokens) = get_env_parsed::<u32>("POLICY_AGENT_MAX_TOKENS")? {
            builder = builder.max_tokens(max_tokens);
        }
        if let Some(temperature) = get_env_parsed::<f64>("POLICY_AGENT_TEMPERATURE")? {
            builder = builder.temperature(temperature);
        }
        if let Some(max_steps) = get_env_parsed::<u32>("POLICY_AGENT_MAX_STEPS")? {
            builder = builder.max_steps(max_steps);
        }
        if let Some(verbosity) = get_env_parsed::<u8>("POLICY_AGENT_VERBOSITY")? {
            builder = builder.verbosity_level(verbosity);
        }
        if let Some(interval) = get_env_parsed::<u32>("POLICY_AGENT_PLANNING_INTERVAL")? {
            builder = builder.planning_interval(Some(interval));
        }
        if let Some(path) = get_env_string("POLICY_AGENT_PROMPTS_PATH") {
            builder = builder.prompts_path(path);
        }

        Ok(builder)
    }

    pub fn model_id(mut self, model_id: impl Into<String>) -> Self {
        self.settings.model.model_id = model_id.into();
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.settings.model.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.settings.model.temperature = temperature;
        self
    }

    pub fn max_steps(mut self, max_steps: u32) -> Self {
        self.settings.max_steps = max_steps;
        self
    }

    pub fn verbosity_level(mut self, level: u8) -> Self {
        self.settings.verbosity_level = level;
        self
    }

    pub fn planning_interval(mut self, interval: Option<u32>) -> Self {
        self.settings.planning_interval = interval;
        self
    }

    pub fn prompts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings.prompts_path = path.into();
        self
    }

    /// Validate and return the settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` for out-of-range values.
    pub fn build(self) -> Result<AgentSettings, ConfigError> {
        self.validate()?;
        Ok(self.settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.settings;

        if s.model.model_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "model_id cannot be empty".to_string(),
            ));
        }
        if s.model.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "max_tokens must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&s.model.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                s.model.temperature
            )));
        }
        if s.max_steps == 0 {
            return Err(ConfigError::ValidationError(
                "max_steps must be greater than 0".to_string(),
            ));
        }
        if s.planning_interval == Some(0) {
            return Err(ConfigError::ValidationError(
                "planning_interval must be greater than 0 when set".to_string(),
            ));
        }

        Ok(())
    }
}

// Environment variable helper functions

/// Read a variable, treating unset and empty the same way.
pub fn get_env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read and parse a variable; unset yields `Ok(None)`.
pub fn get_env_parsed<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_string(key) {
        Some(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!("invalid value '{val}': {e}"),
            }),
        None => Ok(None),
    }
}
