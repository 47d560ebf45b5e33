//! Type-safe secret handling
//!
//! [`Secret`] wraps passwords and tokens so they cannot leak through logging,
//! `Debug` output or serialization. The value is zeroed on drop and can only
//! be read through [`Secret::expose_secret`].
//!
//! ```
//! use policy_agent_core::secret::SecretString;
//!
//! let token = SecretString::from_string("abc123".to_string());
//! assert_eq!(format!("{:?}", token), "[REDACTED]");
//! assert_eq!(token.expose_as_str(), "abc123");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secret value that cannot be accidentally exposed
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret<T: Zeroize> {
    inner: T,
}

impl<T: Zeroize> Secret<T> {
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// The only way to read the value. Never log what it returns.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T: Zeroize> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T: Zeroize> Serialize for Secret<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de, T: Zeroize + Deserialize<'de>> Deserialize<'de> for Secret<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Secret::new)
    }
}

pub type SecretString = Secret<String>;

impl SecretString {
    pub fn from_string(s: String) -> Self {
        Secret::new(s)
    }

    pub fn expose_as_str(&self) -> &str {
        &self.inner
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Secret::new(s.to_string())
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Secret::new(s)
    }
}
