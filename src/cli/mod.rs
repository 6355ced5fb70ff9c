//! CLI module
//!
//! Command-line interface for running paginated operations.
//!
//! # Commands
//!
//! - `invoke` - Run an operation, following cursors until done
//! - `validate` - Check an operation definition
//! - `cursor` - Show or clear saved cursors

mod commands;
mod runner;

pub use commands::{Cli, Commands, CursorAction, InvokeArgs};
pub use runner::Runner;
