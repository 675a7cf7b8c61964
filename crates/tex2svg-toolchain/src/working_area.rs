//! Per-conversion scratch directory with guaranteed removal

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tex2svg_core::{Result, Tex2SvgError};
use tracing::warn;

const PREFIX: &str = "tex2svg-";

/// Exclusively owned directory for one conversion's intermediate files
///
/// Removed recursively when dropped, on every exit path including early
/// returns and panics. Use [`WorkingArea::close`] to observe removal errors.
#[derive(Debug)]
pub struct WorkingArea {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl WorkingArea {
    /// Create a fresh, uniquely named directory under `parent`
    pub fn acquire(parent: &Path) -> Result<Self> {
        std::fs::create_dir_all(parent).map_err(|e| {
            Tex2SvgError::WorkingAreaFailed(format!("{}: {}", parent.display(), e))
        })?;

        let dir = tempfile::Builder::new()
            .prefix(PREFIX)
            .tempdir_in(parent)
            .map_err(|e| {
                Tex2SvgError::WorkingAreaFailed(format!("{}: {}", parent.display(), e))
            })?;
        let path = dir.path().to_path_buf();

        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Remove the directory now, reporting failure
    pub fn close(mut self) -> std::io::Result<()> {
        match self.dir.take() {
            Some(dir) => dir.close(),
            None => Ok(()),
        }
    }
}

impl Drop for WorkingArea {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            if let Err(e) = dir.close() {
                warn!("failed to remove working area {}: {}", self.path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_creates_unique_directories() {
        let parent = tempfile::TempDir::new().unwrap();
        let a = WorkingArea::acquire(parent.path()).unwrap();
        let b = WorkingArea::acquire(parent.path()).unwrap();

        assert!(a.path().is_dir());
        assert!(b.path().is_dir());
        assert_ne!(a.path(), b.path());
        assert!(a.path().starts_with(parent.path()));
    }

    #[test]
    fn test_drop_removes_directory_with_contents() {
        let parent = tempfile::TempDir::new().unwrap();
        let area = WorkingArea::acquire(parent.path()).unwrap();
        let path = area.path().to_path_buf();
        std::fs::write(area.join("input.tex"), "x").unwrap();
        std::fs::create_dir(area.join("nested")).unwrap();

        drop(area);

        assert!(!path.exists());
    }

    #[test]
    fn test_close_removes_directory() {
        let parent = tempfile::TempDir::new().unwrap();
        let area = WorkingArea::acquire(parent.path()).unwrap();
        let path = area.path().to_path_buf();

        area.close().unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn test_removed_on_panic() {
        let parent = tempfile::TempDir::new().unwrap();
        let parent_path = parent.path().to_path_buf();

        let result = std::panic::catch_unwind(move || {
            let area = WorkingArea::acquire(&parent_path).unwrap();
            std::fs::write(area.join("input.tex"), "x").unwrap();
            panic!("conversion blew up");
        });

        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(parent.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_acquire_creates_missing_parent() {
        let parent = tempfile::TempDir::new().unwrap();
        let nested = parent.path().join("a/b");
        let area = WorkingArea::acquire(&nested).unwrap();
        assert!(area.path().starts_with(&nested));
    }
}
