//! Output module
//!
//! Projects each page through an output selector and writes the results.
//!
//! # Overview
//!
//! - `OutputSelector` - what to emit per page: the whole response, one named
//!   field, or the value of a request parameter
//! - `OutputWriter` - line-oriented JSON output

mod selector;
mod writer;

pub use selector::OutputSelector;
pub use writer::{OutputFormat, OutputWriter};
