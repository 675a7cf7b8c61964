//! Global context for CLI commands

use anyhow::{Result, anyhow};
use std::env;
use std::path::{Path, PathBuf};
use tex2svg_core::config::{Config, consts::CONFIG_FILE_NAME};

/// Where the loaded configuration came from
#[derive(Debug, Clone)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

pub struct Context {
    pub config: Config,
    pub source: ConfigSource,
    pub verbose: bool,
}

impl Context {
    /// Load configuration from `config_path`, or `tex2svg.toml` in the
    /// current directory, or defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen config file cannot be read, parsed or
    /// validated
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self> {
        let current_dir = env::current_dir()?;
        let config = Config::discover(config_path, &current_dir)
            .map_err(|e| anyhow!("Failed to load config: {}", e))?;

        let source = match config_path {
            Some(path) => ConfigSource::File(path.to_path_buf()),
            None => {
                let candidate = current_dir.join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    ConfigSource::File(candidate)
                } else {
                    ConfigSource::Defaults
                }
            }
        };

        Ok(Self {
            config,
            source,
            verbose,
        })
    }
}
