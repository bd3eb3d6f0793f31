//! Configuration for Emporia client applications.
//!
//! Provides the [`EmporiaConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `config_path` argument
//! 2. `EMPORIA_CONFIG` environment variable
//! 3. XDG default: `~/.config/emporia/config.toml`
//! 4. Built-in defaults

use confyg::{env, Confygery};
use emporia_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for Emporia client applications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmporiaConfig {
    /// API connection configuration.
    pub api: ApiConfig,

    /// Auth/session configuration.
    pub auth: AuthConfig,
}

/// API connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the admin REST API.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Auth/session configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Path of the durable session-token file. `None` means the XDG
    /// default location.
    pub token_path: Option<String>,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for EmporiaConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl EmporiaConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// Loading priority:
    /// 1. Explicit `config_path`
    /// 2. `EMPORIA_CONFIG` env var
    /// 3. XDG default: `~/.config/emporia/config.toml`
    /// 4. Built-in defaults
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("EMPORIA");
        env_opts.add_section("api");
        env_opts.add_section("auth");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit argument, env var, or XDG
    /// default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("EMPORIA_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("emporia").join("config.toml"))
    }

    /// Per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
