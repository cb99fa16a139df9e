//! Application configuration.
//!
//! Loaded from YAML files and environment variables. Only the standard
//! wrappers are configurable; types and their method tables are always
//! registered in code.

mod advice;

pub use advice::{AdviceConfig, SinkKind};

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::advice::CallTracer;
use crate::interceptor::{decorate, Decorator};
use crate::interfaces::Wrapper;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "interpose.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "INTERPOSE_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "INTERPOSE";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "INTERPOSE_LOG";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Standard wrapper settings.
    pub advice: AdviceConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `interpose.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix and `__` separator,
    ///    e.g. `INTERPOSE__ADVICE__TRACE_CALLS=true`
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            ensure_exists(config_path)?;
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            ensure_exists(&config_path)?;
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Create config for testing.
    pub fn for_test() -> Self {
        Self::default()
    }

    /// The standard wrapper chain, outermost first:
    /// `[CallTracer?, ErrorReporter, Logger]`.
    pub fn wrappers(&self) -> Vec<Arc<dyn Wrapper>> {
        let mut chain: Vec<Arc<dyn Wrapper>> = Vec::with_capacity(3);
        if self.advice.trace_calls {
            chain.push(Arc::new(CallTracer::new()));
        }
        chain.push(Arc::new(self.advice.error_reporter()));
        chain.push(Arc::new(self.advice.logger()));
        chain
    }

    /// Decorator over [`wrappers`](Self::wrappers).
    pub fn decorator(&self) -> Decorator {
        decorate(self.wrappers())
    }
}

fn ensure_exists(path: &str) -> Result<(), ConfigError> {
    if Path::new(path).exists() {
        Ok(())
    } else {
        Err(ConfigError::FileRead(
            path.to_string(),
            "file not found".to_string(),
        ))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),
}
