//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by the page iterator:
//! the request/response seams, the invoker and sink collaborators, the
//! immutable run configuration and the terminal outcome.

use crate::error::{Error, Result};
use crate::types::Cursor;
use async_trait::async_trait;
use std::fmt;

// ============================================================================
// Request / Response seams
// ============================================================================

/// A request value whose continuation cursor can be set between pages
pub trait PageRequest {
    /// Set (or clear, with `None`) the continuation cursor field
    fn set_cursor(&mut self, cursor: Option<&Cursor>);

    /// Set the page-size field
    ///
    /// Requests without a page-size field keep the default no-op.
    fn set_page_size(&mut self, _size: u32) {}
}

/// A response value exposing its continuation cursor and item count
pub trait PageResponse {
    /// Cursor for the next page; `None` when the listing is exhausted
    fn next_cursor(&self) -> Option<Cursor>;

    /// Number of items contained in this page
    fn item_count(&self) -> usize;
}

// ============================================================================
// Collaborators
// ============================================================================

/// Performs exactly one remote call for a request
///
/// The iterator awaits each call before issuing the next one and never
/// calls `invoke` concurrently. Timeouts and retries, if any, belong to the
/// implementation.
#[async_trait]
pub trait OperationInvoker<Req: Sync>: Send + Sync {
    /// Page type returned by the operation
    type Response: PageResponse + Send;
    /// Error type returned by the operation
    type Error: fmt::Display + Send;

    /// Invoke the operation once
    async fn invoke(&self, request: &Req) -> std::result::Result<Self::Response, Self::Error>;
}

#[async_trait]
impl<Req, T> OperationInvoker<Req> for &T
where
    Req: Sync,
    T: OperationInvoker<Req> + ?Sized,
{
    type Response = T::Response;
    type Error = T::Error;

    async fn invoke(&self, request: &Req) -> std::result::Result<Self::Response, Self::Error> {
        (**self).invoke(request).await
    }
}

/// Whether the sink wants further pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageControl {
    /// Keep requesting pages
    #[default]
    Continue,
    /// Stop after this page
    Stop,
}

impl PageControl {
    /// Check if the sink asked to stop
    pub fn is_stop(&self) -> bool {
        matches!(self, Self::Stop)
    }
}

/// Consumes pages as they are produced
pub trait PageSink<Resp> {
    /// Receive one page; called in server order, once per page
    fn on_page(&mut self, page: &Resp) -> PageControl;
}

impl<Resp, F> PageSink<Resp> for F
where
    F: FnMut(&Resp) -> PageControl,
{
    fn on_page(&mut self, page: &Resp) -> PageControl {
        self(page)
    }
}

/// Sink that keeps a copy of every page
#[derive(Debug, Clone)]
pub struct PageCollector<Resp> {
    pages: Vec<Resp>,
}

impl<Resp> Default for PageCollector<Resp> {
    fn default() -> Self {
        Self { pages: Vec::new() }
    }
}

impl<Resp> PageCollector<Resp> {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages collected so far
    pub fn pages(&self) -> &[Resp] {
        &self.pages
    }

    /// Take the collected pages
    pub fn into_pages(self) -> Vec<Resp> {
        self.pages
    }
}

impl<Resp: Clone> PageSink<Resp> for PageCollector<Resp> {
    fn on_page(&mut self, page: &Resp) -> PageControl {
        self.pages.push(page.clone());
        PageControl::Continue
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// How many pages a run may fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IterationMode {
    /// Follow cursors until the listing or the emit limit is exhausted
    #[default]
    AutoPaginate,
    /// Fetch exactly one page and hand its cursor back to the caller
    ManualSinglePage,
}

impl IterationMode {
    /// Pick the mode for a run
    ///
    /// A caller-supplied starting cursor means the caller is paging by hand.
    pub fn resolve(no_auto_iteration: bool, starting_cursor: Option<&Cursor>) -> Self {
        if no_auto_iteration || starting_cursor.is_some() {
            Self::ManualSinglePage
        } else {
            Self::AutoPaginate
        }
    }

    /// Check if this is auto pagination
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::AutoPaginate)
    }
}

/// Immutable configuration for one page iterator run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IteratorConfig {
    /// Cursor for the first request
    pub starting_cursor: Option<Cursor>,
    /// Cap on the total number of items to retrieve
    pub emit_limit: Option<u64>,
    /// Iteration mode, fixed for the whole run
    pub mode: IterationMode,
    /// Largest page size the service accepts
    pub max_page_size: Option<u32>,
}

impl IteratorConfig {
    /// Create a new iterator config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting cursor
    #[must_use]
    pub fn with_starting_cursor(mut self, cursor: Option<Cursor>) -> Self {
        self.starting_cursor = cursor;
        self
    }

    /// Set the emit limit
    #[must_use]
    pub fn with_emit_limit(mut self, limit: u64) -> Self {
        self.emit_limit = Some(limit);
        self
    }

    /// Set the iteration mode
    #[must_use]
    pub fn with_mode(mut self, mode: IterationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the service's maximum page size
    #[must_use]
    pub fn with_max_page_size(mut self, size: u32) -> Self {
        self.max_page_size = Some(size);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.emit_limit == Some(0) {
            return Err(Error::invalid_value(
                "emit_limit",
                "must be at least 1 when set",
            ));
        }
        if self.max_page_size == Some(0) {
            return Err(Error::invalid_value(
                "max_page_size",
                "must be at least 1 when set",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Run state and outcome
// ============================================================================

/// Lifecycle of a page iterator run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IteratorState {
    /// No request issued yet
    #[default]
    NotStarted,
    /// A request is in flight
    AwaitingPage,
    /// A page was returned and is being handed to the caller
    Emitting,
    /// The run is over; no further requests will be made
    Terminated,
}

/// Why a run stopped requesting pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The last page returned no cursor
    CursorExhausted,
    /// Manual mode fetched its single page
    SinglePage,
    /// The emit limit was used up
    EmitLimitReached,
    /// The sink asked to stop
    SinkStopped,
    /// A later page failed while an emit limit was set; earlier pages stand
    LateFailure {
        /// Display text of the swallowed error
        message: String,
    },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CursorExhausted => f.write_str("no more pages"),
            Self::SinglePage => f.write_str("single page requested"),
            Self::EmitLimitReached => f.write_str("item limit reached"),
            Self::SinkStopped => f.write_str("stopped by consumer"),
            Self::LateFailure { message } => write!(f, "stopped after error: {message}"),
        }
    }
}

/// Successful terminal outcome of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Cursor to resume from, if the listing was not exhausted
    pub final_cursor: Option<Cursor>,
    /// Pages delivered to the sink
    pub pages: usize,
    /// Items contained in the delivered pages
    pub items: u64,
    /// Emit limit budget left; negative when the last page overshot it
    pub remaining_limit: Option<i64>,
    /// Why the run stopped
    pub stop: StopReason,
}

impl RunOutcome {
    /// False only when a late failure cut the run short
    pub fn is_complete(&self) -> bool {
        !matches!(self.stop, StopReason::LateFailure { .. })
    }

    /// Whether the service reported more pages after the last delivered one
    pub fn has_more(&self) -> bool {
        self.final_cursor.is_some()
    }
}
