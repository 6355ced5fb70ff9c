// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pagewalk
//!
//! Cursor-driven auto-pagination for list and describe operations.
//!
//! A paginated operation returns one page per call plus an opaque cursor.
//! [`PageIterator`] keeps calling it, feeding each cursor back, until the
//! cursor runs out, a single page was asked for, or an item limit is hit.
//!
//! ## Features
//!
//! - **Auto pagination**: follows cursors until the service stops returning one
//! - **Manual paging**: one page per run, with the cursor handed back to the caller
//! - **Item limits**: page size is clamped to the remaining budget
//! - **Late failures**: an error after delivered pages ends a limited run softly
//! - **Output selection**: whole responses, a named field, or a parameter echo
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagewalk::{load_operation, HttpOperation, IteratorConfig, JsonRequest, PageIterator};
//!
//! #[tokio::main]
//! async fn main() -> pagewalk::Result<()> {
//!     let def = load_operation("operations/list-volumes.yaml")?;
//!     let invoker = HttpOperation::from_definition(&def)?;
//!     let config = IteratorConfig::default().with_emit_limit(100);
//!
//!     let mut iter = PageIterator::new(JsonRequest::from_definition(&def), invoker, config)?;
//!     while let Some(page) = iter.next_page().await {
//!         let page = page?;
//!         println!("{} items", page.items().len());
//!     }
//!
//!     println!("next token: {:?}", iter.outcome().final_cursor);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                          CLI                              │
//! │   invoke / validate / cursor     (clap, tracing)          │
//! └───────────────────────────────────────────────────────────┘
//!          │                 │                   │
//! ┌────────┴──────┬──────────┴──────────┬────────┴───────────┐
//! │    Loader     │     Pagination      │   Output / State   │
//! ├───────────────┼─────────────────────┼────────────────────┤
//! │ YAML defs     │ PageIterator        │ OutputSelector     │
//! │ validation    │ emit limit, modes   │ OutputWriter       │
//! │               │ late failure policy │ CursorStore        │
//! └───────────────┴──────────┬──────────┴────────────────────┘
//!                            │
//!              ┌─────────────┴─────────────┐
//!              │  Operation  →  HTTP       │
//!              │  JsonRequest, reqwest     │
//!              └───────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Page iterator and its seams
pub mod pagination;

/// Output selection and writing
pub mod output;

/// Single-attempt HTTP client
pub mod http;

/// JSON operations over HTTP
pub mod operation;

/// YAML loader for operation definitions
pub mod loader;

/// Saved cursors
pub mod state;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, PageFailure, Result};
pub use types::*;

// Re-export commonly used types
pub use loader::{load_operation, load_operation_from_str, OperationDefinition};
pub use operation::{HttpOperation, JsonRequest, JsonResponse};
pub use output::{OutputFormat, OutputSelector, OutputWriter};
pub use pagination::{
    IterationMode, IteratorConfig, OperationInvoker, PageControl, PageIterator, PageRequest,
    PageResponse, PageSink, RunOutcome, StopReason,
};
pub use state::CursorStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
