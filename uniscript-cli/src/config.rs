//! `uniscript.toml` configuration.
//!
//! ```toml
//! [compile]
//! default_title = "Playground"
//!
//! [transform]
//! typescript = ["esbuild", "--loader=ts"]
//!
//! [sandbox]
//! instrument = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use uniscript_core::CompileOptions;

pub const DEFAULT_CONFIG: &str = "uniscript.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub compile: CompileOptions,
    pub transform: TransformConfig,
    pub sandbox: SandboxConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Command line of the TypeScript transform. The block source is
    /// written to its stdin and JavaScript is read from its stdout.
    pub typescript: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SandboxConfig {
    /// Inject the error shim into every compiled document.
    pub instrument: bool,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`. A missing file yields the defaults unless it was
    /// named explicitly.
    pub fn load(path: &Path, explicit: bool) -> Result<Self, ConfigError> {
        if !explicit && !path.exists() {
            return Ok(Config::default());
        }
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::parse(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(command) = &self.transform.typescript {
            if command.first().is_none_or(|program| program.trim().is_empty()) {
                return Err(ConfigError::Validation(
                    "[transform].typescript must name a program".to_string(),
                ));
            }
        }
        if self.compile.python_runtime.is_empty() {
            return Err(ConfigError::Validation(
                "[compile].python_runtime needs at least one script URL".to_string(),
            ));
        }
        Ok(())
    }
}
