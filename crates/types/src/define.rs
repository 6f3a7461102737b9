//! CMake cache definitions (`-DKEY=VALUE`)

use cbuild_errors::InvokeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single cache entry passed to the configure step.
///
/// Serialized as its `KEY=VALUE` string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CacheDefine {
    pub key: String,
    pub value: String,
}

impl CacheDefine {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Render as a configure argument
    #[must_use]
    pub fn to_arg(&self) -> String {
        format!("-D{}={}", self.key, self.value)
    }
}

impl FromStr for CacheDefine {
    type Err = InvokeError;

    /// Parses `KEY=VALUE`. The value may be empty or contain further `=`;
    /// `KEY:TYPE=VALUE` passes through with the type kept in the key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok(Self::new(key, value)),
            _ => Err(InvokeError::InvalidDefine {
                definition: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for CacheDefine {
    type Error = InvokeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CacheDefine> for String {
    fn from(define: CacheDefine) -> Self {
        define.to_string()
    }
}

impl fmt::Display for CacheDefine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
