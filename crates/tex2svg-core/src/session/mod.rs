//! Server-side session map: session id → pending artifact path

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Opaque 128-bit session identifier held by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub artifact: PathBuf,
    pub created_at: DateTime<Utc>,
}

/// Shared, cheaply cloneable session map
///
/// The lock protects the map itself; callers keep the one-artifact-per-session
/// invariant by superseding before attaching.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<SessionId, SessionEntry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &SessionId) -> Option<SessionEntry> {
        self.inner.read().get(id).cloned()
    }

    /// Point the session at `artifact`, returning the entry it replaced
    pub fn insert(&self, id: SessionId, artifact: PathBuf) -> Option<SessionEntry> {
        let entry = SessionEntry {
            artifact,
            created_at: Utc::now(),
        };
        self.inner.write().insert(id, entry)
    }

    pub fn remove(&self, id: &SessionId) -> Option<SessionEntry> {
        self.inner.write().remove(id)
    }

    /// Remove the entry only while it still points at `artifact`
    pub fn remove_if_artifact(&self, id: &SessionId, artifact: &Path) -> Option<SessionEntry> {
        let mut map = self.inner.write();
        match map.get(id) {
            Some(entry) if entry.artifact == artifact => map.remove(id),
            _ => None,
        }
    }

    /// Remove and return every entry created before `cutoff`
    pub fn drain_older_than(&self, cutoff: DateTime<Utc>) -> Vec<(SessionId, SessionEntry)> {
        let mut map = self.inner.write();
        let expired: Vec<SessionId> = map
            .iter()
            .filter(|(_, entry)| entry.created_at < cutoff)
            .map(|(id, _)| *id)
            .collect();

        expired
            .into_iter()
            .filter_map(|id| map.remove(&id).map(|entry| (id, entry)))
            .collect()
    }

    pub fn drain(&self) -> Vec<(SessionId, SessionEntry)> {
        self.inner.write().drain().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
