//! Operation module
//!
//! JSON adapters that let the page iterator drive a described HTTP operation.
//!
//! # Overview
//!
//! - `JsonRequest` - bound parameters plus the cursor and page-size field names
//! - `JsonResponse` - response body plus the cursor and items paths
//! - `HttpOperation` - the operation invoker, one HTTP call per page

mod invoker;
mod types;

pub use invoker::HttpOperation;
pub use types::{JsonRequest, JsonResponse};
