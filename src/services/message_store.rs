//! File-backed message store.
//!
//! The entire board lives in a single JSON document. Nothing is cached
//! between calls; every operation reconstructs state from disk. Appends
//! serialize against other writers with an exclusive advisory lock on the
//! backing file, held across the whole read-modify-write cycle. Reads are
//! unlocked and tolerate torn or stale data per [`ChatLog::parse_or_empty`].

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use fs2::FileExt;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::{ChatLog, Message};

/// Handle over the backing file. Cheap to clone; holds no open file
/// descriptors between operations.
#[derive(Debug, Clone)]
pub struct MessageStore {
    path: PathBuf,
}

impl MessageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty backing file if none exists yet. Called once at
    /// startup; appends also cope with a missing file on their own.
    pub fn ensure_exists(&self) -> AppResult<()> {
        if self.path.exists() {
            return Ok(());
        }
        let body = serde_json::to_string_pretty(&ChatLog::default())
            .map_err(|e| AppError::Storage(e.to_string()))?;
        std::fs::write(&self.path, body)
            .map_err(|e| AppError::Storage(format!("create {}: {e}", self.path.display())))?;
        debug!(path = %self.path.display(), "created empty chat log");
        Ok(())
    }

    /// Returns every message sorted ascending by id. Never fails: a
    /// missing, unreadable, or structurally invalid file yields an empty
    /// log. Runs unlocked; a read torn by a concurrent writer degrades
    /// the same way.
    pub fn list(&self) -> ChatLog {
        let mut log = match std::fs::read_to_string(&self.path) {
            Ok(raw) => ChatLog::parse_or_empty(&raw),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(error = %e, path = %self.path.display(), "chat log unreadable, returning empty");
                }
                ChatLog::default()
            }
        };
        // stable sort: equal ids (which uniqueness should rule out) keep
        // their on-disk relative order
        log.messages.sort_by_key(|m| m.id);
        log
    }

    /// Appends one message and persists the full replacement document.
    ///
    /// Rejects text that is empty after trimming, without touching the
    /// file. Lock or write failures surface as [`AppError::Storage`]; the
    /// caller must learn the append did not durably happen. No retries.
    pub fn append(&self, raw_text: &str, user_id: &str) -> AppResult<Message> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(AppError::EmptyMessage);
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| AppError::Storage(format!("open {}: {e}", self.path.display())))?;

        file.lock_exclusive()
            .map_err(|e| AppError::Storage(format!("lock {}: {e}", self.path.display())))?;

        let result = self.append_locked(&mut file, text, user_id);

        if let Err(e) = FileExt::unlock(&file) {
            warn!(error = %e, path = %self.path.display(), "failed to release chat log lock");
        }
        result
    }

    fn append_locked(&self, file: &mut File, text: &str, user_id: &str) -> AppResult<Message> {
        let mut raw = String::new();
        file.read_to_string(&mut raw)
            .map_err(|e| AppError::Storage(format!("read {}: {e}", self.path.display())))?;

        let mut log = ChatLog::parse_or_empty(&raw);
        let entry = Message {
            id: log.next_id(),
            user: user_id.to_string(),
            message: text.to_string(),
            timestamp: Utc::now(),
        };
        log.messages.push(entry.clone());

        let body = serde_json::to_string_pretty(&log)
            .map_err(|e| AppError::Storage(e.to_string()))?;

        file.seek(SeekFrom::Start(0))
            .map_err(|e| AppError::Storage(e.to_string()))?;
        file.set_len(0)
            .map_err(|e| AppError::Storage(format!("truncate {}: {e}", self.path.display())))?;
        file.write_all(body.as_bytes())
            .map_err(|e| AppError::Storage(format!("write {}: {e}", self.path.display())))?;
        file.flush()
            .map_err(|e| AppError::Storage(format!("flush {}: {e}", self.path.display())))?;

        Ok(entry)
    }
}
