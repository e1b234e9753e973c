//! Persisted session record under `<config-dir>/tgpt/config.txt`.
//!
//! The record is a single `chat:<id>` line holding the conversation token
//! from the last persisted turn. Absence of the record is the normal
//! first-run state and is never surfaced as an error.

use crate::error::SessionError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Subdirectory under the platform config dir holding our state.
const APP_SUBDIR: &str = "tgpt";
/// File name of the session record.
const RECORD_FILE: &str = "config.txt";
/// Key prefix on the record line.
const RECORD_KEY: &str = "chat";

/// Result of a `forget` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgetOutcome {
    /// A session record existed and was deleted.
    Removed,
    /// No record was present; nothing to do.
    NothingToForget,
}

/// Filesystem-backed storage for the current session identifier.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Directory containing the record file (`<config-dir>/tgpt`).
    dir: PathBuf,
}

impl SessionStore {
    /// Open a store rooted under the given base config directory.
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: config_dir.as_ref().join(APP_SUBDIR),
        }
    }

    /// Open a store under the platform config dir, when one is available.
    ///
    /// `None` means session persistence is unavailable for this environment;
    /// callers degrade to stateless turns rather than failing.
    pub fn open_default() -> Option<Self> {
        dirs::config_dir().map(Self::new)
    }

    fn record_path(&self) -> PathBuf {
        self.dir.join(RECORD_FILE)
    }

    /// Load the persisted session identifier, if a valid record exists.
    ///
    /// Any I/O failure or malformed content reads as "no session"; a fresh
    /// start is always a safe interpretation.
    pub fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(self.record_path()).ok()?;
        let (key, id) = raw.trim().split_once(':')?;
        if key != RECORD_KEY || id.is_empty() {
            debug!(target: "tgpt::session", "ignoring malformed session record");
            return None;
        }
        debug!(target: "tgpt::session", id, "loaded session record");
        Some(id.to_string())
    }

    /// Persist `session_id`, overwriting any previous record.
    ///
    /// The line is written whole to a sibling temp file and renamed into
    /// place so a crash mid-write cannot leave a torn record behind.
    pub fn save(&self, session_id: &str) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.record_path();
        let tmp_path = path.with_extension("txt.tmp");
        fs::write(&tmp_path, format!("{RECORD_KEY}:{session_id}\n"))?;
        fs::rename(&tmp_path, &path)?;
        debug!(target: "tgpt::session", session_id, "saved session record");
        Ok(())
    }

    /// Delete the session record.
    pub fn forget(&self) -> Result<ForgetOutcome, SessionError> {
        match fs::remove_file(self.record_path()) {
            Ok(()) => Ok(ForgetOutcome::Removed),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(ForgetOutcome::NothingToForget)
            }
            Err(e) => Err(e.into()),
        }
    }
}
