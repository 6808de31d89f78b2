//! Personnel table state: debounced search, stale-response filtering and a
//! per-parameter result cache
//!
//! The controller is synchronous; the event loop asks it what to fetch,
//! runs the fetch on the runtime, and hands the result back with the
//! parameters it was issued for. Only a result whose parameters equal the
//! current ones is applied; anything else is a superseded request and is
//! dropped.

use crate::store::{DataStore, ListResult};
use shared::models::{Empleado, ListParams, ParamChange};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Delay between the last keystroke and the search being committed
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Rows requested per page by the table view
pub const TABLE_PAGE_SIZE: u32 = 100;

const MAX_CACHED_PAGES: usize = 64;

pub struct ListController {
    params: ListParams,
    search_input: String,
    debounce_deadline: Option<Instant>,
    loading: bool,
    view: ListResult,
    cache: HashMap<ListParams, ListResult>,
}

impl ListController {
    pub fn new(params: ListParams) -> Self {
        Self {
            search_input: params.search.clone(),
            params,
            debounce_deadline: None,
            loading: false,
            view: ListResult::default(),
            cache: HashMap::new(),
        }
    }

    // ========== Accessors ==========

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    /// Raw text of the search box
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// True while a keystroke is waiting out the debounce window
    pub fn searching(&self) -> bool {
        self.debounce_deadline.is_some()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn rows(&self) -> &[Empleado] {
        &self.view.data
    }

    pub fn count(&self) -> Option<u64> {
        self.view.count
    }

    pub fn error(&self) -> Option<&str> {
        self.view.error.as_deref()
    }

    /// When the pending search commits, for the event loop's timer
    pub fn deadline(&self) -> Option<Instant> {
        self.debounce_deadline
    }

    pub fn total_pages(&self) -> Option<u32> {
        let count = self.view.count?;
        let size = u64::from(self.params.page_size.max(1));
        Some(count.div_ceil(size).max(1) as u32)
    }

    // ========== Input ==========

    /// Keystroke in the search box; restarts the debounce window
    pub fn type_search(&mut self, text: impl Into<String>) {
        self.search_input = text.into();
        self.debounce_deadline = Some(Instant::now() + SEARCH_DEBOUNCE);
    }

    /// Commit the pending search once its window has elapsed
    ///
    /// Returns the parameters to fetch when the committed search changed
    /// the query.
    pub fn tick(&mut self) -> Option<ListParams> {
        let deadline = self.debounce_deadline?;
        if Instant::now() < deadline {
            return None;
        }
        self.debounce_deadline = None;
        let term = self.search_input.trim().to_string();
        self.commit(ParamChange::Search(term))
    }

    /// Apply a filter, sort, page or clear change immediately
    ///
    /// Returns the parameters to fetch if anything changed.
    pub fn change(&mut self, change: ParamChange) -> Option<ListParams> {
        match &change {
            ParamChange::Search(term) => {
                self.search_input = term.clone();
                self.debounce_deadline = None;
            }
            ParamChange::ClearAll => {
                self.search_input.clear();
                self.debounce_deadline = None;
            }
            _ => {}
        }
        self.commit(change)
    }

    fn commit(&mut self, change: ParamChange) -> Option<ListParams> {
        let next = self.params.apply(change);
        if next == self.params {
            return None;
        }
        self.params = next;
        Some(self.begin_fetch())
    }

    // ========== Fetch lifecycle ==========

    /// Mark a fetch for the current parameters as outstanding
    ///
    /// A cached result for the same parameters is shown right away; the
    /// fetch still goes out to refresh it.
    pub fn begin_fetch(&mut self) -> ListParams {
        self.loading = true;
        if let Some(cached) = self.cache.get(&self.params) {
            self.view = cached.clone();
        }
        self.params.clone()
    }

    /// Same parameters again, after an error
    pub fn retry(&mut self) -> ListParams {
        self.view.error = None;
        self.begin_fetch()
    }

    /// Hand back a finished fetch; returns whether it was applied
    pub fn complete(&mut self, issued_for: &ListParams, result: ListResult) -> bool {
        if issued_for != &self.params {
            tracing::debug!(page = issued_for.page, "Dropping superseded list response");
            return false;
        }
        self.loading = false;
        if result.is_ok() {
            if self.cache.len() >= MAX_CACHED_PAGES {
                self.cache.clear();
            }
            self.cache.insert(issued_for.clone(), result.clone());
        }
        self.view = result;
        true
    }

    pub fn dismiss_error(&mut self) {
        self.view.error = None;
    }

    /// Drop every cached page (after an insert, for instance)
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }
}

/// Run one fetch and pair the result with the parameters it answers
pub async fn fetch(store: &dyn DataStore, params: ListParams) -> (ListParams, ListResult) {
    let result = store.list(&params).await;
    (params, result)
}
