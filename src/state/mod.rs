//! State management module
//!
//! Remembers the cursor a run ended on so a later invocation can pick up
//! where it stopped.
//!
//! # Overview
//!
//! The state module provides:
//! - `CursorState` - Saved cursors keyed by operation name
//! - `CursorStore` - File-based persistence with atomic writes

mod store;
mod types;

pub use store::CursorStore;
pub use types::CursorState;
