//! Environment variables and override precedence.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::record::KeyValuePair;
use crate::CoreError;

/// A single environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

impl EnvVar {
    /// Create a new EnvVar.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Parses `KEY=VALUE`. Only the first `=` separates; the value may be empty.
impl FromStr for EnvVar {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok(Self::new(key, value)),
            _ => Err(CoreError::InvalidEnvVar(s.to_string())),
        }
    }
}

impl From<&KeyValuePair> for EnvVar {
    fn from(pair: &KeyValuePair) -> Self {
        Self::new(
            pair.name.clone().unwrap_or_default(),
            pair.value.clone().unwrap_or_default(),
        )
    }
}

impl From<&EnvVar> for KeyValuePair {
    fn from(var: &EnvVar) -> Self {
        KeyValuePair::new(var.key.clone(), var.value.clone())
    }
}

/// Compute the effective environment of a container.
///
/// Every override is kept, in override order. A declared variable follows only
/// when no override has the same name (exact, case-sensitive). Duplicate names
/// inside `overrides` are passed through untouched.
pub fn merge_env(declared: &[EnvVar], overrides: &[EnvVar]) -> Vec<EnvVar> {
    let mut merged: Vec<EnvVar> = overrides.to_vec();

    merged.extend(
        declared
            .iter()
            .filter(|var| !overrides.iter().any(|o| o.key == var.key))
            .cloned(),
    );

    merged
}
