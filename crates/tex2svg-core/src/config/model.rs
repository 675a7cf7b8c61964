use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::consts;
use crate::error::{Result, Tex2SvgError};

/// tex2svg.toml schema - every section is optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// 0 lets the OS pick a free port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

fn default_bind() -> String {
    consts::DEFAULT_BIND.to_string()
}

fn default_port() -> u16 {
    consts::DEFAULT_PORT
}

/// Program names (looked up on PATH) or absolute paths of the external tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    #[serde(default = "default_typesetter")]
    pub typesetter: String,
    #[serde(default = "default_converter")]
    pub converter: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            typesetter: default_typesetter(),
            converter: default_converter(),
        }
    }
}

fn default_typesetter() -> String {
    consts::DEFAULT_TYPESETTER.to_string()
}

fn default_converter() -> String {
    consts::DEFAULT_CONVERTER.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Document template offered on `GET /`
    #[serde(default = "default_template")]
    pub template: PathBuf,
    /// Where finished SVG artifacts wait for download
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
    /// Parent directory of per-conversion working areas
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            scratch_dir: None,
            work_dir: None,
        }
    }
}

fn default_template() -> PathBuf {
    PathBuf::from(consts::DEFAULT_TEMPLATE_FILE)
}

impl PathsConfig {
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn work_dir(&self) -> PathBuf {
        self.work_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Cookie signing secret. A random key is generated at startup when unset.
    #[serde(default)]
    pub secret: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            secret: None,
        }
    }
}

fn default_ttl_secs() -> u64 {
    consts::DEFAULT_SESSION_TTL_SECS
}

fn default_sweep_interval_secs() -> u64 {
    consts::DEFAULT_SWEEP_INTERVAL_SECS
}

impl Config {
    /// tex2svg.toml を読み込む
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Tex2SvgError::ConfigParseError(e.to_string()))?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Tex2SvgError::ConfigParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise `tex2svg.toml` in `dir` if present,
    /// otherwise defaults.
    pub fn discover(path: Option<&std::path::Path>, dir: &std::path::Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let candidate = dir.join(consts::CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::from_file(candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.bind.trim().is_empty() {
            return Err(invalid("server.bind", "must not be empty"));
        }
        if self.toolchain.typesetter.trim().is_empty() {
            return Err(invalid("toolchain.typesetter", "must not be empty"));
        }
        if self.toolchain.converter.trim().is_empty() {
            return Err(invalid("toolchain.converter", "must not be empty"));
        }
        if self.session.ttl_secs == 0 {
            return Err(invalid("session.ttl_secs", "must be greater than 0"));
        }
        if self.session.sweep_interval_secs == 0 {
            return Err(invalid(
                "session.sweep_interval_secs",
                "must be greater than 0",
            ));
        }
        if let Some(secret) = &self.session.secret {
            if secret.len() < consts::MIN_SECRET_BYTES {
                return Err(invalid(
                    "session.secret",
                    &format!("must be at least {} bytes", consts::MIN_SECRET_BYTES),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> Tex2SvgError {
    Tex2SvgError::ConfigInvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
