//! Prompt templates
//!
//! The orchestrator's system instructions live in a YAML document. This crate
//! only parses it into a mapping and hands it over; the keys and values are
//! the orchestrator's business. Failing to load the file is fatal at startup.

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("failed to read prompt templates from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse prompt templates: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("prompt templates must be a key/value mapping at the top level")]
    NotAMapping,
}

/// Parsed prompt template document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PromptTemplates(Mapping);

impl PromptTemplates {
    /// Load templates from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PromptError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| PromptError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let templates = Self::parse(&raw)?;
        tracing::info!(
            path = %path.display(),
            templates = templates.len(),
            "loaded prompt templates"
        );
        Ok(templates)
    }

    /// Parse templates from YAML text.
    pub fn parse(raw: &str) -> Result<Self, PromptError> {
        match serde_yaml::from_str::<Value>(raw)? {
            Value::Mapping(mapping) => Ok(Self(mapping)),
            _ => Err(PromptError::NotAMapping),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Top-level template names, in document order.
    pub fn keys(&self) -> Vec<String> {
        self.0
            .keys()
            .filter_map(|k| k.as_str().map(str::to_string))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }
}
