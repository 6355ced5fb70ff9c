//! Page iterator
//!
//! Drives a paginated operation: sets the cursor on the request, clamps the
//! page size to the remaining emit limit, invokes the operation and decides
//! after every page whether another request is due.

use super::types::{
    IterationMode, IteratorConfig, IteratorState, OperationInvoker, PageRequest, PageResponse,
    PageSink, RunOutcome, StopReason,
};
use crate::error::{PageFailure, Result};
use crate::types::Cursor;
use futures::Stream;
use tracing::{debug, info, warn};

/// Result of one page step
pub type PageResult<I, Req> = std::result::Result<
    <I as OperationInvoker<Req>>::Response,
    PageFailure<<I as OperationInvoker<Req>>::Error>,
>;

/// Cursor-driven page iterator over a single logical operation
///
/// Owns the request and all loop state for one run. Pages are fetched
/// strictly one after another because every request depends on the cursor
/// returned by the previous response.
pub struct PageIterator<Req, I> {
    request: Req,
    invoker: I,
    config: IteratorConfig,
    state: IteratorState,
    cursor: Option<Cursor>,
    remaining: Option<i64>,
    pages: usize,
    items: u64,
    stop: Option<StopReason>,
}

impl<Req, I> PageIterator<Req, I>
where
    Req: PageRequest + Send + Sync,
    I: OperationInvoker<Req>,
{
    /// Create an iterator for a freshly built request
    pub fn new(request: Req, invoker: I, config: IteratorConfig) -> Result<Self> {
        config.validate()?;

        let cursor = config.starting_cursor.clone();
        let remaining = config
            .emit_limit
            .map(|limit| i64::try_from(limit).unwrap_or(i64::MAX));

        Ok(Self {
            request,
            invoker,
            config,
            state: IteratorState::NotStarted,
            cursor,
            remaining,
            pages: 0,
            items: 0,
            stop: None,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> IteratorState {
        self.state
    }

    /// Cursor the next request would carry
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Remaining emit limit budget
    pub fn remaining(&self) -> Option<i64> {
        self.remaining
    }

    /// The request as last sent
    pub fn request(&self) -> &Req {
        &self.request
    }

    /// The run configuration
    pub fn config(&self) -> &IteratorConfig {
        &self.config
    }

    /// Fetch the next page
    ///
    /// Returns `None` once the run has terminated, including after a late
    /// failure that was absorbed under an emit limit. An error is returned at
    /// most once; the iterator is terminated afterwards.
    pub async fn next_page(&mut self) -> Option<PageResult<I, Req>> {
        match self.state {
            IteratorState::Terminated => return None,
            IteratorState::Emitting if self.stop.is_some() => {
                self.state = IteratorState::Terminated;
                return None;
            }
            _ => {}
        }

        self.state = IteratorState::AwaitingPage;
        self.request.set_cursor(self.cursor.as_ref());
        if let Some(remaining) = self.remaining {
            let size = clamp_page_size(self.config.max_page_size, remaining);
            self.request.set_page_size(size);
        }

        let page_number = self.pages + 1;
        debug!(
            page = page_number,
            cursor = self.cursor.as_ref().map(Cursor::as_str),
            remaining = self.remaining,
            "Requesting page"
        );

        match self.invoker.invoke(&self.request).await {
            Ok(response) => {
                self.state = IteratorState::Emitting;
                self.record_page(&response);
                self.stop = self.termination();
                Some(Ok(response))
            }
            Err(err) => {
                self.state = IteratorState::Terminated;
                if self.pages == 0 || self.remaining.is_none() {
                    return Some(Err(PageFailure::new(err, page_number, self.pages)));
                }

                warn!(
                    page = page_number,
                    pages_delivered = self.pages,
                    error = %err,
                    "Page request failed under an item limit; keeping earlier pages"
                );
                self.stop = Some(StopReason::LateFailure {
                    message: err.to_string(),
                });
                None
            }
        }
    }

    /// Drive the run to completion, handing every page to `sink`
    ///
    /// The sink may return [`super::PageControl::Stop`] to end the run
    /// between pages.
    pub async fn run<S>(
        mut self,
        sink: &mut S,
    ) -> std::result::Result<RunOutcome, PageFailure<I::Error>>
    where
        S: PageSink<I::Response>,
    {
        while let Some(page) = self.next_page().await {
            let page = page?;
            if sink.on_page(&page).is_stop() {
                if self.stop.is_none() {
                    self.stop = Some(StopReason::SinkStopped);
                }
                self.state = IteratorState::Terminated;
                break;
            }
        }

        let outcome = self.outcome();
        info!(
            pages = outcome.pages,
            items = outcome.items,
            has_more = outcome.has_more(),
            stop = %outcome.stop,
            "Pagination finished"
        );
        Ok(outcome)
    }

    /// Turn the iterator into a lazy stream of pages
    ///
    /// Nothing is requested until the stream is polled. The stream ends after
    /// the last page, or after yielding a terminal error.
    pub fn into_stream(self) -> impl Stream<Item = PageResult<I, Req>> {
        futures::stream::unfold(self, |mut iter| async move {
            let page = iter.next_page().await?;
            Some((page, iter))
        })
    }

    /// Outcome of the run so far
    ///
    /// Meaningful once [`Self::next_page`] has returned `None`.
    pub fn outcome(&self) -> RunOutcome {
        RunOutcome {
            final_cursor: self.cursor.clone(),
            pages: self.pages,
            items: self.items,
            remaining_limit: self.remaining,
            stop: self.stop.clone().unwrap_or(StopReason::CursorExhausted),
        }
    }

    fn record_page(&mut self, response: &I::Response) {
        let count = response.item_count();
        self.pages += 1;
        self.items += count as u64;
        self.cursor = response.next_cursor();
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(i64::try_from(count).unwrap_or(i64::MAX));
        }

        debug!(
            page = self.pages,
            items = count,
            next_cursor = self.cursor.as_ref().map(Cursor::as_str),
            "Received page"
        );
    }

    /// Decide whether the page just received was the last one
    fn termination(&self) -> Option<StopReason> {
        if self.cursor.is_none() {
            return Some(StopReason::CursorExhausted);
        }
        if self.config.mode == IterationMode::ManualSinglePage {
            return Some(StopReason::SinglePage);
        }
        match self.remaining {
            Some(remaining) if remaining <= 0 => Some(StopReason::EmitLimitReached),
            _ => None,
        }
    }
}

/// Page size for the next request: the remaining budget, capped by the
/// service maximum
pub(crate) fn clamp_page_size(max_page_size: Option<u32>, remaining: i64) -> u32 {
    let remaining = u32::try_from(remaining.max(1)).unwrap_or(u32::MAX);
    max_page_size.map_or(remaining, |max| max.min(remaining))
}

impl<Req, I> std::fmt::Debug for PageIterator<Req, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageIterator")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("cursor", &self.cursor)
            .field("remaining", &self.remaining)
            .field("pages", &self.pages)
            .finish_non_exhaustive()
    }
}
