//! Saved cursor state
//!
//! Serialized to JSON and persisted between runs.

use crate::types::Cursor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Saved cursors for every operation that stopped with more pages pending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorState {
    /// Cursor per operation name
    #[serde(default)]
    pub operations: BTreeMap<String, Cursor>,
}

impl CursorState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the saved cursor for an operation
    pub fn get_cursor(&self, operation: &str) -> Option<&Cursor> {
        self.operations.get(operation)
    }

    /// Record where an operation stopped
    ///
    /// `None` means the operation ran to the end, so the entry is dropped.
    pub fn set_cursor(&mut self, operation: &str, cursor: Option<Cursor>) {
        match cursor {
            Some(cursor) => {
                self.operations.insert(operation.to_string(), cursor);
            }
            None => {
                self.operations.remove(operation);
            }
        }
    }

    /// Check if nothing is saved
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
