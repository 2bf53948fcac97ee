use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AccessError, AccessResult};

use super::principal::User;

/// Well-known storage key for the persisted session record.
pub const SESSION_KEY: &str = "erp_user";

/// On-disk envelope. `issued_at` is metadata only; restoring a session
/// reproduces exactly the `User` that was stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionRecord {
    user: User,
    issued_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Slot {
    user: Option<User>,
    /// Set once a write fails; from then on the store is in-memory only and
    /// `load` stops re-reading (stale) disk state.
    degraded: bool,
}

/// The single session slot: at most one authenticated `User`, durable across
/// process restarts. One store per process instance; a server deployment
/// would hold one store per authenticated connection instead.
pub struct SessionStore {
    path: PathBuf,
    slot: RwLock<Slot>,
}

impl SessionStore {
    /// Open the store against a directory, restoring any persisted session.
    /// Malformed or absent storage yields an empty slot, never an error.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(format!("{SESSION_KEY}.json"));
        let user = read_record(&path);
        Self { path, slot: RwLock::new(Slot { user, degraded: false }) }
    }

    /// Re-read the persisted record and refresh the slot. This is the second
    /// edge into the authenticated state: no credential re-validation, and no
    /// expiry check, the record stays valid until an explicit logout.
    pub fn load(&self) -> Option<User> {
        let mut slot = self.slot.write();
        if !slot.degraded {
            slot.user = read_record(&self.path);
        }
        slot.user.clone()
    }

    /// Replace the session and persist it before returning. On a failed
    /// write the in-memory session is still installed, the store degrades to
    /// in-memory only and the failure surfaces once to the caller.
    pub fn set(&self, user: User) -> AccessResult<()> {
        let record = SessionRecord { user: user.clone(), issued_at: Utc::now() };
        let mut slot = self.slot.write();
        slot.user = Some(user);
        match persist(&self.path, &record) {
            Ok(()) => {
                slot.degraded = false;
                info!("session.set user={} persisted", record.user.id);
                Ok(())
            }
            Err(e) => {
                slot.degraded = true;
                warn!("session.set user={} falling back to in-memory only: {e:#}", record.user.id);
                Err(AccessError::session(format!("could not persist session: {e}")))
            }
        }
    }

    /// Empty the slot and remove the persisted record. The in-memory session
    /// is gone even when removal fails; a missing file counts as success.
    pub fn clear(&self) -> AccessResult<()> {
        let mut slot = self.slot.write();
        slot.user = None;
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("session.clear removed record");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!("session.clear could not remove record: {e}");
                Err(AccessError::session(format!("could not remove session record: {e}")))
            }
        }
    }

    /// Read-only view of the slot.
    pub fn current(&self) -> Option<User> {
        self.slot.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.slot.read().user.is_some()
    }

    pub fn is_degraded(&self) -> bool {
        self.slot.read().degraded
    }
}

fn read_record(path: &Path) -> Option<User> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<SessionRecord>(&raw) {
        Ok(record) => Some(record.user),
        Err(e) => {
            warn!("session.load discarding malformed record at {}: {e}", path.display());
            None
        }
    }
}

fn persist(path: &Path, record: &SessionRecord) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let raw = serde_json::to_string_pretty(record)?;
    fs::write(path, raw).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
