//! Tool descriptors
//!
//! A [`ToolDescriptor`] is everything an orchestrator (and, through it, a
//! language model) knows about a tool before calling it: the name, what it
//! does, whether it reaches outside the process, and an ordered list of
//! primitive parameters, each with its own description. Descriptors are
//! validated once, at construction, and never change afterwards.
//!
//! # Example
//!
//! ```rust
//! use policy_agent_core::schema::{ParamType, ToolDescriptor, ToolEffect};
//!
//! let descriptor = ToolDescriptor::builder("get_current_time_in_timezone")
//!     .description("A tool that fetches the current local time in a specified timezone.")
//!     .param("timezone", ParamType::String, "A string representing a valid timezone")
//!     .effect(ToolEffect::ReadOnly)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(descriptor.params().len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::args::{ArgValue, ArgumentError, BoundArgs, ToolArgs};
use crate::identifiers::{IdValidationError, ToolId};

/// Primitive parameter types a tool may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    String,
    Integer,
    Float,
    Boolean,
}

impl ParamType {
    /// JSON Schema `type` keyword for this parameter.
    pub fn json_type(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Float => "number",
            ParamType::Boolean => "boolean",
        }
    }

    /// Convert free text (e.g. a command-line value) into a value of this type.
    pub fn parse_value(&self, name: &str, raw: &str) -> Result<ArgValue, ArgumentError> {
        let unparseable = || ArgumentError::Unparseable {
            name: name.to_string(),
            expected: *self,
            raw: raw.to_string(),
        };

        match self {
            ParamType::String => Ok(ArgValue::String(raw.to_string())),
            ParamType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(ArgValue::Integer)
                .map_err(|_| unparseable()),
            ParamType::Float => raw
                .trim()
                .parse::<f64>()
                .map(ArgValue::Float)
                .map_err(|_| unparseable()),
            ParamType::Boolean => match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(ArgValue::Boolean(true)),
                "false" | "0" | "no" | "off" => Ok(ArgValue::Boolean(false)),
                _ => Err(unparseable()),
            },
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Float => "float",
            ParamType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// Whether invoking a tool can touch anything outside the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolEffect {
    /// Pure lookup; never mutates shared state
    ReadOnly,
    /// Reaches an external system (network, remote API)
    External,
}

/// One declared parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub description: String,
}

/// Problems found while building a descriptor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid tool name: {0}")]
    InvalidName(#[from] IdValidationError),

    #[error("tool '{tool}' has no description")]
    MissingDescription { tool: String },

    #[error("parameter '{param}' of tool '{tool}' has no description")]
    MissingParamDescription { tool: String, param: String },

    #[error("parameter '{param}' of tool '{tool}' is declared more than once")]
    DuplicateParam { tool: String, param: String },

    #[error("parameter name '{param}' of tool '{tool}' is invalid: {source}")]
    InvalidParamName {
        tool: String,
        param: String,
        source: IdValidationError,
    },
}

/// Immutable description of a registered tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    name: ToolId,
    description: String,
    params: Vec<ParamSpec>,
    effect: ToolEffect,
}

impl ToolDescriptor {
    /// Start building a descriptor for the tool called `name`.
    pub fn builder(name: impl Into<String>) -> ToolDescriptorBuilder {
        ToolDescriptorBuilder {
            name: name.into(),
            description: String::new(),
            params: Vec::new(),
            effect: ToolEffect::ReadOnly,
        }
    }

    pub fn name(&self) -> &ToolId {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn effect(&self) -> ToolEffect {
        self.effect
    }

    pub fn is_read_only(&self) -> bool {
        self.effect == ToolEffect::ReadOnly
    }

    /// Tools always return a string.
    pub fn return_type(&self) -> ParamType {
        ParamType::String
    }

    /// Render the parameter list as a JSON Schema object.
    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.params {
            properties.insert(
                param.name.clone(),
                json!({
                    "type": param.param_type.json_type(),
                    "description": param.description,
                }),
            );
        }
        let required: Vec<&str> = self.params.iter().map(|p| p.name.as_str()).collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }

    /// Check caller-supplied arguments against this descriptor.
    ///
    /// Every declared parameter must be present with a compatible type and
    /// nothing undeclared may be passed.
    pub fn bind(&self, args: ToolArgs) -> Result<BoundArgs, ArgumentError> {
        let mut supplied = args.into_inner();
        let mut values = BTreeMap::new();

        for param in &self.params {
            let value = supplied
                .remove(&param.name)
                .ok_or_else(|| ArgumentError::Missing {
                    name: param.name.clone(),
                })?;

            if !value.fits(param.param_type) {
                return Err(ArgumentError::WrongType {
                    name: param.name.clone(),
                    expected: param.param_type,
                    actual: value.param_type(),
                });
            }

            values.insert(param.name.clone(), value);
        }

        if let Some(name) = supplied.into_keys().next() {
            return Err(ArgumentError::Unexpected { name });
        }

        Ok(BoundArgs::new(values))
    }
}

/// Builder for [`ToolDescriptor`]; validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ToolDescriptorBuilder {
    name: String,
    description: String,
    params: Vec<ParamSpec>,
    effect: ToolEffect,
}

impl ToolDescriptorBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare the next parameter. Order is preserved.
    pub fn param(
        mut self,
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            param_type,
            description: description.into(),
        });
        self
    }

    pub fn effect(mut self, effect: ToolEffect) -> Self {
        self.effect = effect;
        self
    }

    pub fn build(self) -> Result<ToolDescriptor, SchemaError> {
        let name = ToolId::parse(&self.name)?;

        if self.description.trim().is_empty() {
            return Err(SchemaError::MissingDescription { tool: self.name });
        }

        let mut seen = HashSet::new();
        for param in &self.params {
            ToolId::parse(&param.name).map_err(|source| SchemaError::InvalidParamName {
                tool: self.name.clone(),
                param: param.name.clone(),
                source,
            })?;

            if param.description.trim().is_empty() {
                return Err(SchemaError::MissingParamDescription {
                    tool: self.name.clone(),
                    param: param.name.clone(),
                });
            }

            if !seen.insert(param.name.as_str()) {
                return Err(SchemaError::DuplicateParam {
                    tool: self.name.clone(),
                    param: param.name.clone(),
                });
            }
        }

        Ok(ToolDescriptor {
            name,
            description: self.description,
            params: self.params,
            effect: self.effect,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder() -> ToolDescriptor {
        ToolDescriptor::builder("my_custom_tool")
            .description("A tool that does nothing yet")
            .param("arg1", ParamType::String, "the first argument")
            .param("arg2", ParamType::Integer, "the second argument")
            .build()
            .expect("valid descriptor")
    }

    #[test]
    fn builder_preserves_parameter_order() {
        let descriptor = placeholder();
        let names: Vec<_> = descriptor.params().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["arg1", "arg2"]);
        assert!(descriptor.is_read_only());
        assert_eq!(descriptor.return_type(), ParamType::String);
    }

    #[test]
    fn every_parameter_needs_a_description() {
        let err = ToolDescriptor::builder("tool")
            .description("does things")
            .param("arg1", ParamType::String, "  ")
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            SchemaError::MissingParamDescription {
                tool: "tool".into(),
                param: "arg1".into()
            }
        );
    }

    #[test]
    fn rejects_missing_description_and_duplicates() {
        assert!(matches!(
            ToolDescriptor::builder("tool").build(),
            Err(SchemaError::MissingDescription { .. })
        ));

        assert!(matches!(
            ToolDescriptor::builder("tool")
                .description("d")
                .param("a", ParamType::String, "x")
                .param("a", ParamType::Integer, "y")
                .build(),
            Err(SchemaError::DuplicateParam { .. })
        ));

        assert!(matches!(
            ToolDescriptor::builder("bad name").description("d").build(),
            Err(SchemaError::InvalidName(_))
        ));
    }

    #[test]
    fn json_schema_lists_required_properties() {
        let schema = placeholder().json_schema();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["arg1"]["type"], "string");
        assert_eq!(schema["properties"]["arg2"]["type"], "integer");
        assert_eq!(
            schema["properties"]["arg2"]["description"],
            "the second argument"
        );
        assert_eq!(schema["required"], json!(["arg1", "arg2"]));
    }

    #[test]
    fn bind_checks_presence_type_and_extras() {
        let descriptor = placeholder();

        let bound = descriptor
            .bind(ToolArgs::new().with("arg1", "x").with("arg2", 3i64))
            .unwrap();
        assert_eq!(bound.str("arg1"), Ok("x"));
        assert_eq!(bound.integer("arg2"), Ok(3));

        assert_eq!(
            descriptor.bind(ToolArgs::new().with("arg1", "x")),
            Err(ArgumentError::Missing {
                name: "arg2".into()
            })
        );

        assert_eq!(
            descriptor.bind(ToolArgs::new().with("arg1", "x").with("arg2", "three")),
            Err(ArgumentError::WrongType {
                name: "arg2".into(),
                expected: ParamType::Integer,
                actual: ParamType::String,
            })
        );

        assert_eq!(
            descriptor.bind(
                ToolArgs::new()
                    .with("arg1", "x")
                    .with("arg2", 1i64)
                    .with("arg3", true)
            ),
            Err(ArgumentError::Unexpected {
                name: "arg3".into()
            })
        );
    }

    #[test]
    fn parse_value_follows_declared_type() {
        assert_eq!(
            ParamType::Integer.parse_value("n", " 42 "),
            Ok(ArgValue::Integer(42))
        );
        assert_eq!(
            ParamType::Boolean.parse_value("b", "yes"),
            Ok(ArgValue::Boolean(true))
        );
        assert_eq!(
            ParamType::String.parse_value("s", "Europe/Paris"),
            Ok(ArgValue::String("Europe/Paris".into()))
        );
        assert!(matches!(
            ParamType::Float.parse_value("f", "abc"),
            Err(ArgumentError::Unparseable { .. })
        ));
    }
}
