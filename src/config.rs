//! Engine configuration
//!
//! Read from the environment (and a `.env` file when present):
//! - `RENAME_TEMPLATE_BACKEND` - `compiled` (default) or `interpreted`
//! - `RENAME_TEMPLATE_CACHE_CAPACITY` - number of prepared templates kept

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const BACKEND_VAR: &str = "RENAME_TEMPLATE_BACKEND";
pub const CACHE_CAPACITY_VAR: &str = "RENAME_TEMPLATE_CACHE_CAPACITY";

/// How prepared templates are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Closures built once per template
    #[default]
    Compiled,
    /// Walk the AST for every file
    Interpreted,
}

impl Backend {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "compiled" | "compile" => Some(Backend::Compiled),
            "interpreted" | "interpret" | "eval" => Some(Backend::Interpreted),
            _ => None,
        }
    }

    pub fn canonical_name(&self) -> &'static str {
        match self {
            Backend::Compiled => "compiled",
            Backend::Interpreted => "interpreted",
        }
    }
}

/// Configuration for the template engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub backend: Backend,
    /// Maximum number of distinct templates kept prepared
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Compiled,
            cache_capacity: 64,
        }
    }
}

impl EngineConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        // .env is optional
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(BACKEND_VAR) {
            config.backend =
                Backend::from_str(&raw).ok_or_else(|| ConfigError::InvalidBackend(raw.clone()))?;
        }

        if let Some(raw) = lookup(CACHE_CAPACITY_VAR) {
            config.cache_capacity = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidCapacity(raw.clone()))?;
        }

        tracing::debug!(
            "Engine config: backend={}, cache_capacity={}",
            config.backend.canonical_name(),
            config.cache_capacity
        );
        Ok(config)
    }
}
