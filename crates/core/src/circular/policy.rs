use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// What `enqueue` does when the buffer is already full.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Keep the stored elements and drop the incoming one.
    Ignore,
    /// Evict the oldest element to make room for the incoming one.
    #[default]
    Overwrite,
}

impl OverwritePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Overwrite => "overwrite",
        }
    }
}

impl fmt::Display for OverwritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown overwrite policy `{0}` (expected `ignore` or `overwrite`)")]
pub struct ParsePolicyError(pub String);

impl FromStr for OverwritePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "overwrite" => Ok(Self::Overwrite),
            _ => Err(ParsePolicyError(s.to_owned())),
        }
    }
}
