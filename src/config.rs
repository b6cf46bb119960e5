//! Facade configuration.
//!
//! Layered with figment: built-in defaults, then an optional TOML file, then
//! `NEWS_PROXY_`-prefixed environment variables (`__` separates nested keys):
//!
//! ```toml
//! [cache]
//! enabled = true
//! fencing = false
//! ```
//!
//! ```text
//! NEWS_PROXY_CACHE__ENABLED=false
//! ```

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "NEWS_PROXY_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// Read-through cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// When false every read goes to the store and nothing is cached.
    pub enabled: bool,
    /// When true a read that was overtaken by an invalidation does not fill
    /// the cache. When false the read/edit race can leave a stale entry.
    pub fencing: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fencing: true,
        }
    }
}

impl CacheConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn unfenced() -> Self {
        Self {
            fencing: false,
            ..Self::default()
        }
    }
}

/// Top-level configuration for a [`NewsFacade`](crate::NewsFacade).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacadeConfig {
    pub cache: CacheConfig,
}

impl FacadeConfig {
    pub fn with_cache(cache: CacheConfig) -> Self {
        Self { cache }
    }

    /// The layered provider: defaults, then `path` (if given and present),
    /// then the environment.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(FacadeConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Self::figment(path).extract()?;
        tracing::debug!(?config, "loaded facade config");
        Ok(config)
    }

    /// Defaults plus environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }
}
