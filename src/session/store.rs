use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::warn;

use crate::error::{AppError, AppResult};

use super::record::{Session, StoredUser};

/// File name of the persisted record under the state directory.
pub const SESSION_FILE: &str = "user.json";

/// Owns the persisted session record. One instance is constructed at startup
/// and handed to every consumer (credential decorator, route guard,
/// lifecycle); nothing else reads or writes the underlying file. Reads always
/// go to the file so a login or logout earlier in the process is observed by
/// the next guard evaluation.
pub struct SessionStore {
    path: PathBuf,
    // Serialises writers within the process. Each read/write is a single
    // whole-file operation.
    write_lock: Mutex<()>,
}

impl SessionStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(SESSION_FILE),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current session, or `None` when logged out. Unreadable or
    /// shape-invalid data is treated as absent AND the record is deleted, so
    /// garbage state can never lock the user out; no error escapes here.
    pub fn load(&self) -> Option<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("session record unreadable ({}); clearing", e);
                self.clear();
                return None;
            }
        };
        match serde_json::from_str::<StoredUser>(&raw) {
            Ok(stored) => Some(Session::from(stored)),
            Err(e) => {
                warn!("session record unparsable ({}); clearing", e);
                self.clear();
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> AppResult<()> {
        let _g = self.write_lock.lock();
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| AppError::internal("state_dir".to_string(), e.to_string()))?;
        }
        let body = serde_json::to_string_pretty(&StoredUser::from(session))
            .map_err(|e| AppError::internal("session_encode".to_string(), e.to_string()))?;
        fs::write(&self.path, body)
            .map_err(|e| AppError::internal("session_write".to_string(), e.to_string()))?;
        Ok(())
    }

    /// Remove the persisted record. Always succeeds locally; a missing file
    /// is already the desired state.
    pub fn clear(&self) {
        let _g = self.write_lock.lock();
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to clear session record: {}", e);
            }
        }
    }
}
