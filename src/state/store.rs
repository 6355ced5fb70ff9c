//! Cursor store implementation
//!
//! Provides file-based cursor persistence with atomic writes.

use super::types::CursorState;
use crate::error::{Error, Result};
use crate::types::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Persists the final cursor of each operation
#[derive(Debug, Clone)]
pub struct CursorStore {
    path: PathBuf,
    state: Arc<RwLock<CursorState>>,
}

impl CursorStore {
    /// Create an in-memory store (no file persistence)
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            state: Arc::new(RwLock::new(CursorState::new())),
        }
    }

    /// Open a store backed by `path`, loading existing state if present
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| Error::state(format!("Failed to read state file: {e}")))?;
            serde_json::from_str(&contents)
                .map_err(|e| Error::state(format!("Failed to parse state file: {e}")))?
        } else {
            CursorState::new()
        };

        Ok(Self {
            path,
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Saved cursor for an operation
    pub async fn get_cursor(&self, operation: &str) -> Option<Cursor> {
        self.state.read().await.get_cursor(operation).cloned()
    }

    /// Record where an operation stopped and save
    pub async fn set_cursor(&self, operation: &str, cursor: Option<Cursor>) -> Result<()> {
        self.state.write().await.set_cursor(operation, cursor);
        self.save().await
    }

    /// Snapshot of all saved cursors
    pub async fn snapshot(&self) -> CursorState {
        self.state.read().await.clone()
    }

    /// Drop every saved cursor and save
    pub async fn clear(&self) -> Result<()> {
        *self.state.write().await = CursorState::new();
        self.save().await
    }

    /// Drop the saved cursor of one operation and save
    pub async fn clear_operation(&self, operation: &str) -> Result<()> {
        self.state.write().await.set_cursor(operation, None);
        self.save().await
    }

    /// Write the current state to the backing file
    pub async fn save(&self) -> Result<()> {
        if self.is_in_memory() {
            return Ok(());
        }

        let contents = {
            let state = self.state.read().await;
            serde_json::to_string_pretty(&*state)
                .map_err(|e| Error::state(format!("Failed to serialize state: {e}")))?
        };

        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::state(format!("Failed to write state file: {e}")))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::state(format!("Failed to rename state file: {e}")))?;

        debug!(path = %self.path.display(), "Saved cursor state");
        Ok(())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if using in-memory mode
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str().is_empty()
    }
}
