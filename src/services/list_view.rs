//! Query controller for one server-paginated list view.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::errors::FetchError;
use crate::models::pagination::{page_tokens, PageMeta, PageToken};
use crate::models::query::ListQuery;
use crate::transport::ListSource;

/// Published state of one list view.
struct ViewState<T> {
    query: ListQuery,
    items: Vec<T>,
    meta: Option<PageMeta>,
    loading: bool,
}

/// Query controller for one list view.
///
/// Owns the view's [`ListQuery`] together with the latest published page.
/// Every query mutation schedules a fresh fetch on the runtime. When fetches
/// overlap, only the most recently issued one may touch the published state:
/// the previous in-flight task is aborted as soon as it is superseded, and a
/// sequence check on apply catches the window where an aborted task has
/// already produced its result.
///
/// Dropping the view aborts any outstanding fetch, so a torn-down view never
/// applies a late response.
pub struct ListView<T, S> {
    source: Arc<S>,
    state: Arc<Mutex<ViewState<T>>>,
    issued: Arc<AtomicU64>,
    timeout: Option<Duration>,
    inflight: Option<JoinHandle<()>>,
}

impl<T, S> ListView<T, S>
where
    T: Send + 'static,
    S: ListSource<T> + 'static,
{
    /// Controller with default query state (page 1, default page size).
    pub fn new(source: S) -> Self {
        Self::with_query(source, ListQuery::new())
    }

    pub fn with_query(source: S, query: ListQuery) -> Self {
        Self {
            source: Arc::new(source),
            state: Arc::new(Mutex::new(ViewState {
                query,
                items: Vec::new(),
                meta: None,
                loading: false,
            })),
            issued: Arc::new(AtomicU64::new(0)),
            timeout: None,
            inflight: None,
        }
    }

    /// Apply a per-fetch timeout around the data source. A timed-out fetch
    /// is handled like any other fetch failure.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Jump to a page and refetch. Pages are 1-based; once the page count is
    /// known it upper-bounds the jump.
    pub fn set_page(&mut self, page: u32) {
        {
            let mut state = self.lock();
            state.query.set_page(page);
            let known_pages = state.meta.as_ref().map(|meta| meta.total_pages);
            if let Some(total_pages) = known_pages {
                state.query.clamp_page(total_pages);
            }
        }
        self.spawn_fetch();
    }

    /// Change the page size and refetch.
    pub fn set_per_page(&mut self, per_page: u32) {
        self.lock().query.set_per_page(per_page);
        self.spawn_fetch();
    }

    /// Set one filter value and refetch from page 1.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.lock().query.set_filter(key, value);
        self.spawn_fetch();
    }

    /// Drop one filter and refetch from page 1.
    pub fn remove_filter(&mut self, key: &str) {
        self.lock().query.remove_filter(key);
        self.spawn_fetch();
    }

    /// Clear every filter and refetch from page 1.
    pub fn reset_filters(&mut self) {
        self.lock().query.reset_filters();
        self.spawn_fetch();
    }

    /// Refetch the current page without changing the query.
    pub fn refresh(&mut self) {
        self.spawn_fetch();
    }

    /// Wait for the in-flight fetch, if any, to finish applying.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.inflight.take() {
            // A join error here means the task was superseded and aborted,
            // which by definition left nothing to apply.
            let _ = handle.await;
        }
    }

    pub fn page(&self) -> u32 {
        self.lock().query.page()
    }

    pub fn per_page(&self) -> u32 {
        self.lock().query.per_page()
    }

    pub fn filters(&self) -> BTreeMap<String, String> {
        self.lock().query.filters().clone()
    }

    pub fn loading(&self) -> bool {
        self.lock().loading
    }

    pub fn total_items(&self) -> u64 {
        self.lock().meta.as_ref().map_or(0, |meta| meta.total)
    }

    pub fn total_pages(&self) -> u32 {
        self.lock().meta.as_ref().map_or(1, |meta| meta.total_pages)
    }

    pub fn meta(&self) -> Option<PageMeta> {
        self.lock().meta.clone()
    }

    /// Page-selector tokens for the current state.
    pub fn tokens(&self) -> Vec<PageToken> {
        let state = self.lock();
        let total_pages = state.meta.as_ref().map_or(1, |meta| meta.total_pages);
        page_tokens(state.query.page(), total_pages)
    }

    /// Clone of the currently published records.
    pub fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.lock().items.clone()
    }

    /// Read the published records in place.
    pub fn with_items<R>(&self, reader: impl FnOnce(&[T]) -> R) -> R {
        reader(&self.lock().items)
    }

    fn lock(&self) -> MutexGuard<'_, ViewState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn spawn_fetch(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }

        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let request = {
            let mut state = self.lock();
            state.loading = true;
            state.query.to_request()
        };

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let issued = Arc::clone(&self.issued);
        let timeout = self.timeout;

        self.inflight = Some(tokio::spawn(async move {
            let result = match timeout {
                Some(limit) => match tokio::time::timeout(limit, source.fetch_page(request)).await
                {
                    Ok(result) => result,
                    Err(_) => Err(FetchError::Timeout),
                },
                None => source.fetch_page(request).await,
            };

            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            if seq != issued.load(Ordering::SeqCst) {
                // A newer request owns the view now, including the loading
                // flag; this response is stale and must leave no trace.
                tracing::debug!(seq, "discarding superseded page response");
                return;
            }

            state.loading = false;
            match result {
                Ok(page) => {
                    state.query.clamp_page(page.meta.total_pages);
                    state.items = page.items;
                    state.meta = Some(page.meta);
                }
                Err(err) => {
                    // The view degrades to an empty list; the previous meta
                    // is deliberately kept stale until the next success.
                    tracing::warn!(error = %err, "page fetch failed");
                    state.items.clear();
                }
            }
        }));
    }
}

impl<T, S> Drop for ListView<T, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
    }
}
