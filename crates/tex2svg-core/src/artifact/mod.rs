//! Artifact lifecycle: finished SVGs waiting in a scratch directory for download
//!
//! Every artifact is owned by exactly one session. A session's artifact is
//! deleted exactly once: when a newer conversion supersedes it, when it is
//! downloaded, when the session expires, or when the server shuts down.
//! Deletion failures are logged and swallowed so they never block a request.

use chrono::{Duration, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::error::Result;
use crate::session::{SessionId, SessionStore};

/// File extension of stored artifacts
pub const ARTIFACT_EXTENSION: &str = "svg";

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    scratch_dir: PathBuf,
    sessions: SessionStore,
}

impl ArtifactStore {
    pub fn new(scratch_dir: impl Into<PathBuf>, sessions: SessionStore) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            sessions,
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Write `content` to a fresh `<uuid>.svg` in the scratch directory
    pub fn store(&self, content: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.scratch_dir)?;

        let path = self
            .scratch_dir
            .join(format!("{}.{}", Uuid::new_v4(), ARTIFACT_EXTENSION));
        fs::write(&path, content)?;

        info!("stored artifact {} ({} bytes)", path.display(), content.len());
        Ok(path)
    }

    /// Record `path` as the session's artifact.
    ///
    /// Call [`ArtifactStore::supersede`] first; an entry still present here
    /// means a concurrent request from the same session won the race, and its
    /// file is deleted rather than orphaned.
    pub fn attach(&self, session: SessionId, path: PathBuf) {
        if let Some(previous) = self.sessions.insert(session, path) {
            debug!("session {} replaced an unsuperseded artifact", session);
            remove_artifact(&previous.artifact);
        }
    }

    /// Delete the session's previous artifact, if any, and clear the reference
    pub fn supersede(&self, session: SessionId) {
        if let Some(entry) = self.sessions.remove(&session) {
            debug!("superseding artifact {}", entry.artifact.display());
            remove_artifact(&entry.artifact);
        }
    }

    /// The session's artifact path, if it still exists on disk
    pub fn claim(&self, session: SessionId) -> Option<PathBuf> {
        let entry = self.sessions.get(&session)?;
        if entry.artifact.is_file() {
            Some(entry.artifact)
        } else {
            None
        }
    }

    /// Delete a previously claimed artifact.
    ///
    /// The session reference is cleared only while it still points at
    /// `claimed`; a newer conversion attached during the download survives.
    pub fn release(&self, session: SessionId, claimed: &Path) {
        if self.sessions.remove_if_artifact(&session, claimed).is_none() {
            debug!("session {} moved on from {}", session, claimed.display());
        }
        debug!("releasing artifact {}", claimed.display());
        remove_artifact(claimed);
    }

    /// Release every session older than `ttl`; returns how many were removed
    pub fn sweep_expired(&self, ttl: std::time::Duration) -> usize {
        // A ttl too large to represent never expires anything
        let Some(cutoff) = Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_sub_signed(ttl))
        else {
            return 0;
        };

        let expired = self.sessions.drain_older_than(cutoff);
        for (_, entry) in &expired {
            remove_artifact(&entry.artifact);
        }

        if !expired.is_empty() {
            info!("expired {} session artifact(s)", expired.len());
        }
        expired.len()
    }

    /// Release every session
    pub fn purge_all(&self) -> usize {
        let all = self.sessions.drain();
        for (_, entry) in &all {
            remove_artifact(&entry.artifact);
        }
        all.len()
    }
}

/// Delete an artifact file, logging instead of propagating failures
fn remove_artifact(path: &Path) {
    if !path.exists() {
        return;
    }
    if let Err(e) = fs::remove_file(path) {
        error!("Error removing file {}: {}", path.display(), e);
    }
}
