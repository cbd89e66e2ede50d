//! Environment-derived cache configuration.
//!
//! The process environment is mirrored into a snapshot first, so
//! resolution stays a pure function of the snapshot and tests never have
//! to mutate real environment variables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::cache::gc::GcPolicy;
use crate::core::object::InfoAge;

/// Prefix shared by all recognized environment variables.
pub const ENV_PREFIX: &str = "OBJCACHE_";

/// Snapshot of `OBJCACHE_*` environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn from_current_env() -> Self {
        let mut vars = HashMap::new();
        for (key, value) in std::env::vars() {
            if key.starts_with(ENV_PREFIX) {
                vars.insert(key, value);
            }
        }
        Self { vars }
    }

    /// Snapshot built from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|s| s.as_str())
    }

    /// Parse a variable as `T`, ignoring unparseable values.
    pub fn parse<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key)?.parse().ok()
    }
}

/// Which of the two GC policies a configuration selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GcStrategyKind {
    Size,
    Age,
}

/// Cache configuration derived from the environment or explicit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Strategy to bind at construction.
    pub strategy: GcStrategyKind,
    /// Entry limit for the size-based policy.
    pub max_size: u16,
    /// Age threshold for the age-based policy.
    pub max_age: InfoAge,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            strategy: GcStrategyKind::Size,
            max_size: 1024,
            max_age: InfoAge::from_millis(60_000),
        }
    }
}

impl CacheConfig {
    /// Resolve configuration from the current process environment.
    pub fn from_env() -> Self {
        Self::from_env_snapshot(&EnvSnapshot::from_current_env())
    }

    /// Resolve configuration from a snapshot (pure function).
    ///
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_env_snapshot(env: &EnvSnapshot) -> Self {
        let mut config = Self::default();

        if let Some(size) = env.parse::<u16>("OBJCACHE_MAX_SIZE") {
            config.max_size = size;
        }

        if let Some(age) = env.parse::<InfoAge>("OBJCACHE_MAX_AGE_MS") {
            config.max_age = age;
        }

        if let Some(strategy) = env.get("OBJCACHE_GC_STRATEGY") {
            config.strategy = match strategy.to_lowercase().as_str() {
                "age" | "age_based" => GcStrategyKind::Age,
                _ => GcStrategyKind::Size,
            };
        }

        config
    }

    /// Concrete policy value for this configuration.
    pub fn policy(&self) -> GcPolicy {
        match self.strategy {
            GcStrategyKind::Size => GcPolicy::SizeBased(self.max_size),
            GcStrategyKind::Age => GcPolicy::AgeBased(self.max_age),
        }
    }
}
