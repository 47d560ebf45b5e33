//! Primitive tool arguments
//!
//! Orchestrators hand tools nothing but primitives: strings, integers, floats
//! and booleans. [`ToolArgs`] is the unvalidated bag a caller builds;
//! [`BoundArgs`] is what a tool receives after the registry has checked the
//! bag against the tool's descriptor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::schema::ParamType;

/// A single primitive argument value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl ArgValue {
    /// The primitive type this value carries.
    pub fn param_type(&self) -> ParamType {
        match self {
            ArgValue::Boolean(_) => ParamType::Boolean,
            ArgValue::Integer(_) => ParamType::Integer,
            ArgValue::Float(_) => ParamType::Float,
            ArgValue::String(_) => ParamType::String,
        }
    }

    /// Whether this value can be passed where `expected` is declared.
    ///
    /// Integers widen to floats; nothing else converts implicitly.
    pub fn fits(&self, expected: ParamType) -> bool {
        matches!(
            (self, expected),
            (ArgValue::Boolean(_), ParamType::Boolean)
                | (ArgValue::Integer(_), ParamType::Integer)
                | (ArgValue::Integer(_), ParamType::Float)
                | (ArgValue::Float(_), ParamType::Float)
                | (ArgValue::String(_), ParamType::String)
        )
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Boolean(v) => write!(f, "{v}"),
            ArgValue::Integer(v) => write!(f, "{v}"),
            ArgValue::Float(v) => write!(f, "{v}"),
            ArgValue::String(v) => f.write_str(v),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        ArgValue::String(v.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        ArgValue::String(v)
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        ArgValue::Integer(v)
    }
}

impl From<f64> for ArgValue {
    fn from(v: f64) -> Self {
        ArgValue::Float(v)
    }
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        ArgValue::Boolean(v)
    }
}

/// Arguments supplied by a caller, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolArgs(BTreeMap<String, ArgValue>);

impl ToolArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument using the builder pattern.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub(crate) fn into_inner(self) -> BTreeMap<String, ArgValue> {
        self.0
    }
}

impl<K: Into<String>, V: Into<ArgValue>> FromIterator<(K, V)> for ToolArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Why a set of arguments does not match a descriptor
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArgumentError {
    #[error("missing required argument '{name}'")]
    Missing { name: String },

    #[error("unexpected argument '{name}'")]
    Unexpected { name: String },

    #[error("argument '{name}' must be {expected}, got {actual}")]
    WrongType {
        name: String,
        expected: ParamType,
        actual: ParamType,
    },

    #[error("argument '{name}' is not a valid {expected}: '{raw}'")]
    Unparseable {
        name: String,
        expected: ParamType,
        raw: String,
    },
}

/// Arguments that have been checked against a tool descriptor.
///
/// Every declared parameter is present with a compatible type, so the typed
/// getters only fail when a tool asks for a parameter it never declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArgs {
    values: BTreeMap<String, ArgValue>,
}

impl BoundArgs {
    pub(crate) fn new(values: BTreeMap<String, ArgValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn str(&self, name: &str) -> Result<&str, ArgumentError> {
        match self.require(name)? {
            ArgValue::String(v) => Ok(v),
            other => Err(self.wrong_type(name, ParamType::String, other)),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i64, ArgumentError> {
        match self.require(name)? {
            ArgValue::Integer(v) => Ok(*v),
            other => Err(self.wrong_type(name, ParamType::Integer, other)),
        }
    }

    pub fn float(&self, name: &str) -> Result<f64, ArgumentError> {
        match self.require(name)? {
            ArgValue::Float(v) => Ok(*v),
            ArgValue::Integer(v) => Ok(*v as f64),
            other => Err(self.wrong_type(name, ParamType::Float, other)),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<bool, ArgumentError> {
        match self.require(name)? {
            ArgValue::Boolean(v) => Ok(*v),
            other => Err(self.wrong_type(name, ParamType::Boolean, other)),
        }
    }

    fn require(&self, name: &str) -> Result<&ArgValue, ArgumentError> {
        self.values.get(name).ok_or_else(|| ArgumentError::Missing {
            name: name.to_string(),
        })
    }

    fn wrong_type(&self, name: &str, expected: ParamType, actual: &ArgValue) -> ArgumentError {
        ArgumentError::WrongType {
            name: name.to_string(),
            expected,
            actual: actual.param_type(),
        }
    }
}
