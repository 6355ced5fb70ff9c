//! YAML Loader module
//!
//! Parse operation definitions from YAML files.
//!
//! # Overview
//!
//! The loader module provides:
//! - `OperationDefinition` - Declarative description of one paginated call
//! - `PaginationDefinition` - Cursor and page-size field mapping
//! - YAML parsing with validation

mod parser;
mod types;

pub use parser::{load_operation, load_operation_from_str};
pub use types::{OperationDefinition, PaginationDefinition};
