//! Session snapshot stores.
//!
//! The simulation never depends on a store: callers persist the client view
//! after a turn and may look it up again by session id. Store failures are
//! reported to the caller and never touch session state.

use sim_runtime::SessionView;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    /// Ids become file names, so only `[A-Za-z0-9_-]` is accepted.
    #[error("invalid session id {0:?}")]
    InvalidId(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

/// Persist/load collaborator keyed by session id.
pub trait SessionStore: Send + Sync {
    fn persist(&self, view: &SessionView) -> Result<(), StoreError>;
    /// `Ok(None)` when nothing was stored under `id`.
    fn load(&self, id: &str) -> Result<Option<SessionView>, StoreError>;
}

/// Default directory for on-disk snapshots.
pub fn default_store_dir() -> &'static str {
    "./saves/sessions"
}

fn check_id(id: &str) -> Result<(), StoreError> {
    let ok = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidId(id.to_string()))
    }
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    views: Mutex<HashMap<String, SessionView>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.views.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemoryStore {
    fn persist(&self, view: &SessionView) -> Result<(), StoreError> {
        check_id(&view.session_id)?;
        let mut views = self.views.lock().map_err(|_| StoreError::Poisoned)?;
        views.insert(view.session_id.clone(), view.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<SessionView>, StoreError> {
        check_id(id)?;
        let views = self.views.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(views.get(id).cloned())
    }
}

/// One pretty-printed JSON file per session under a directory.
#[derive(Clone, Debug)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    /// Creates `root` when missing.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        check_id(id)?;
        Ok(self.root.join(format!("{id}.json")))
    }
}

impl SessionStore for JsonDirStore {
    fn persist(&self, view: &SessionView) -> Result<(), StoreError> {
        let path = self.path_for(&view.session_id)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(view)?)?;
        std::fs::rename(&tmp, &path)?;
        debug!(session = %view.session_id, path = %path.display(), "snapshot written");
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<SessionView>, StoreError> {
        let path = self.path_for(id)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Persist and swallow the failure with a warning. Returns whether the write
/// was acknowledged.
pub fn persist_best_effort(store: &dyn SessionStore, view: &SessionView) -> bool {
    match store.persist(view) {
        Ok(()) => true,
        Err(error) => {
            warn!(session = %view.session_id, %error, "session snapshot not persisted");
            false
        }
    }
}
