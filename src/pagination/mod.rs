//! Pagination module
//!
//! Cursor-driven auto-pagination with emit-limit accounting.
//!
//! # Overview
//!
//! A [`PageIterator`] repeatedly invokes one remote list operation through an
//! [`OperationInvoker`], threading the continuation cursor from each response
//! into the next request. It stops when the cursor runs out, when the
//! optional emit limit is used up, after a single page in manual mode, or
//! when the [`PageSink`] asks it to.
//!
//! Failures follow a fixed policy: an error on the first page, or on any
//! page of a run without an emit limit, fails the run with the invoker's
//! error untouched. An error on a later page of a run with an emit limit
//! ends the run successfully with the pages already delivered.

mod iterator;
mod types;

pub use iterator::{PageIterator, PageResult};
pub use types::{
    IterationMode, IteratorConfig, IteratorState, OperationInvoker, PageCollector, PageControl,
    PageRequest, PageResponse, PageSink, RunOutcome, StopReason,
};
