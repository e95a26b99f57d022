use crate::circular::{CircularBuffer, OverwritePolicy, ParsePolicyError, DEFAULT_CAPACITY};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LINE_CAPACITY: usize = 10;
pub const ENV_CAPACITY: &str = "RINGKIT_CAPACITY";
pub const ENV_POLICY: &str = "RINGKIT_POLICY";

/// Buffer capacity that is known to be non-zero.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "usize", into = "usize")]
pub struct Capacity(usize);

impl Capacity {
    pub fn new(value: usize) -> Result<Self, ConfigError> {
        if value == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self(DEFAULT_CAPACITY)
    }
}

impl TryFrom<usize> for Capacity {
    type Error = ConfigError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Capacity> for usize {
    fn from(value: Capacity) -> Self {
        value.0
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BufferConfig {
    pub capacity: Capacity,
    #[serde(default)]
    pub policy: OverwritePolicy,
}

impl BufferConfig {
    pub fn build<T>(&self) -> CircularBuffer<T> {
        CircularBuffer::with_valid_capacity(self.capacity.get(), self.policy)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("capacity must be > 0")]
    ZeroCapacity,
    #[error("invalid capacity `{value}`: expected a positive integer")]
    InvalidCapacity { value: String },
    #[error(transparent)]
    InvalidPolicy(#[from] ParsePolicyError),
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_capacity(
    cli_value: Option<usize>,
    env: &impl Env,
    default: usize,
) -> Result<Capacity, ConfigError> {
    match cli_value {
        Some(v) => Capacity::new(v),
        None => match env.var(ENV_CAPACITY) {
            Some(raw) => {
                let value = raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidCapacity { value: raw.clone() })?;
                Capacity::new(value)
            }
            None => Capacity::new(default),
        },
    }
}

pub fn resolve_policy(
    cli_value: Option<OverwritePolicy>,
    env: &impl Env,
) -> Result<OverwritePolicy, ConfigError> {
    match cli_value {
        Some(v) => Ok(v),
        None => match env.var(ENV_POLICY) {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(OverwritePolicy::default()),
        },
    }
}

pub fn resolve_buffer_config(
    cli_capacity: Option<usize>,
    cli_policy: Option<OverwritePolicy>,
    env: &impl Env,
) -> Result<BufferConfig, ConfigError> {
    Ok(BufferConfig {
        capacity: resolve_capacity(cli_capacity, env, DEFAULT_LINE_CAPACITY)?,
        policy: resolve_policy(cli_policy, env)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_rejects_zero() {
        assert_eq!(Capacity::new(0), Err(ConfigError::ZeroCapacity));
        assert_eq!(Capacity::new(3).map(|c| c.get()), Ok(3));
    }

    #[test]
    fn capacity_cli_takes_precedence_over_env() {
        let env = MapEnv::default().with_var(ENV_CAPACITY, "7");
        let cap = resolve_capacity(Some(4), &env, 10).expect("valid capacity");
        assert_eq!(cap.get(), 4);
    }

    #[test]
    fn capacity_env_used_when_cli_missing() {
        let env = MapEnv::default().with_var(ENV_CAPACITY, " 7 ");
        let cap = resolve_capacity(None, &env, 10).expect("valid capacity");
        assert_eq!(cap.get(), 7);
    }

    #[test]
    fn capacity_default_used_when_both_missing() {
        let cap = resolve_capacity(None, &MapEnv::default(), 10).expect("valid capacity");
        assert_eq!(cap.get(), 10);
    }

    #[test]
    fn capacity_env_must_be_numeric() {
        let env = MapEnv::default().with_var(ENV_CAPACITY, "lots");
        assert_eq!(
            resolve_capacity(None, &env, 10),
            Err(ConfigError::InvalidCapacity {
                value: "lots".to_owned()
            })
        );
    }

    #[test]
    fn policy_env_used_when_cli_missing() {
        let env = MapEnv::default().with_var(ENV_POLICY, "ignore");
        assert_eq!(resolve_policy(None, &env), Ok(OverwritePolicy::Ignore));
        assert_eq!(
            resolve_policy(Some(OverwritePolicy::Overwrite), &env),
            Ok(OverwritePolicy::Overwrite)
        );
    }

    #[test]
    fn policy_env_rejects_unknown_value() {
        let env = MapEnv::default().with_var(ENV_POLICY, "sometimes");
        assert!(matches!(
            resolve_policy(None, &env),
            Err(ConfigError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn buffer_config_builds_matching_buffer() {
        let cfg = resolve_buffer_config(Some(2), Some(OverwritePolicy::Ignore), &MapEnv::default())
            .expect("valid config");
        let mut rb = cfg.build::<u32>();
        assert_eq!(rb.capacity(), 2);
        rb.extend([1, 2, 3]);
        assert_eq!(rb.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn buffer_config_deserialization_validates_capacity() {
        let cfg: BufferConfig =
            serde_json::from_str(r#"{"capacity": 4, "policy": "ignore"}"#).expect("valid json");
        assert_eq!(cfg.capacity.get(), 4);
        assert_eq!(cfg.policy, OverwritePolicy::Ignore);

        let missing_policy: BufferConfig =
            serde_json::from_str(r#"{"capacity": 1}"#).expect("policy defaults");
        assert_eq!(missing_policy.policy, OverwritePolicy::Overwrite);

        assert!(serde_json::from_str::<BufferConfig>(r#"{"capacity": 0}"#).is_err());
    }
}
