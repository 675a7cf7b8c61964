use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tex2svg_core::config::Config;
use tex2svg_core::template::DEFAULT_TEMPLATE;
use tex2svg_core::{ArtifactStore, SessionStore};
use tex2svg_toolchain::Toolchain;
use tracing::warn;

use crate::views::Views;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub toolchain: Arc<Toolchain>,
    pub artifacts: ArtifactStore,
    /// Parent of the per-conversion working areas
    pub work_dir: PathBuf,
    /// Template file read on every `GET /`
    pub template_path: PathBuf,
    pub session_ttl: Duration,
    pub sweep_interval: Duration,
    pub views: Arc<Views>,
    key: Key,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, minijinja::Error> {
        let key = match &config.session.secret {
            Some(secret) => signing_key(secret),
            None => Key::generate(),
        };

        Ok(Self {
            toolchain: Arc::new(Toolchain::from(&config.toolchain)),
            artifacts: ArtifactStore::new(config.paths.scratch_dir(), SessionStore::new()),
            work_dir: config.paths.work_dir(),
            template_path: config.paths.template.clone(),
            session_ttl: Duration::from_secs(config.session.ttl_secs),
            sweep_interval: Duration::from_secs(config.session.sweep_interval_secs),
            views: Arc::new(Views::new()?),
            key,
        })
    }

    /// Contents of the template file, or the bundled template if it cannot be read
    pub async fn load_template(&self) -> String {
        match tokio::fs::read_to_string(&self.template_path).await {
            Ok(template) => template,
            Err(e) => {
                warn!(
                    "cannot read template {}: {}; using bundled template",
                    self.template_path.display(),
                    e
                );
                DEFAULT_TEMPLATE.to_string()
            }
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

/// Stretch a configured secret to the 64 bytes a cookie key needs
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_key_is_deterministic() {
        let a = signing_key("0123456789abcdef0123456789abcdef");
        let b = signing_key("0123456789abcdef0123456789abcdef");
        let c = signing_key("fedcba9876543210fedcba9876543210");

        assert_eq!(a.master(), b.master());
        assert_ne!(a.master(), c.master());
    }

    #[tokio::test]
    async fn test_load_template_falls_back_to_bundled() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.template = temp.path().join("missing.tex");
        let state = AppState::from_config(&config).unwrap();

        assert_eq!(state.load_template().await, DEFAULT_TEMPLATE);
    }

    #[tokio::test]
    async fn test_load_template_reads_file_each_time() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("template.tex");
        std::fs::write(&path, "first %%content%%").unwrap();
        let mut config = Config::default();
        config.paths.template = path.clone();
        let state = AppState::from_config(&config).unwrap();

        assert_eq!(state.load_template().await, "first %%content%%");
        std::fs::write(&path, "second %%content%%").unwrap();
        assert_eq!(state.load_template().await, "second %%content%%");
    }
}
