//! List-query state: page, page size, and the active filter set.

use std::collections::BTreeMap;

/// Page sizes the console offers.
pub const PER_PAGE_CHOICES: [u32; 4] = [10, 25, 50, 100];

/// Page size for a freshly mounted view.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Client-side query state for one list view.
///
/// Owned by a single view: created with defaults at mount, mutated only by
/// user-initiated handlers, discarded at unmount. Any filter mutation snaps
/// the page back to 1 so a narrowed result set cannot leave the view
/// stranded on an out-of-range page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    per_page: u32,
    filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            filters: BTreeMap::new(),
        }
    }

    pub fn with_per_page(per_page: u32) -> Self {
        let mut query = Self::new();
        query.set_per_page(per_page);
        query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Move to another page. Pages are 1-based; zero is snapped to 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Change the page size. Values outside [`PER_PAGE_CHOICES`] are ignored.
    ///
    /// The current page is intentionally left alone here; the controller
    /// clamps it against the page count after the next successful fetch, so
    /// a shrunken result set cannot strand the view beyond the last page.
    pub fn set_per_page(&mut self, per_page: u32) {
        if PER_PAGE_CHOICES.contains(&per_page) {
            self.per_page = per_page;
        } else {
            tracing::debug!(per_page, "ignoring page size outside the allowed set");
        }
    }

    /// Merge one filter entry and reset to the first page.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.filters.insert(key.into(), value.into());
        self.page = 1;
    }

    /// Drop one filter entry and reset to the first page.
    pub fn remove_filter(&mut self, key: &str) {
        self.filters.remove(key);
        self.page = 1;
    }

    /// Clear every filter and reset to the first page.
    pub fn reset_filters(&mut self) {
        self.filters.clear();
        self.page = 1;
    }

    /// Pull the page back into range once the page count is known.
    pub(crate) fn clamp_page(&mut self, total_pages: u32) {
        self.page = self.page.min(total_pages.max(1));
    }

    /// Snapshot this state as an outgoing page request.
    ///
    /// Filter entries whose value is blank after trimming are omitted
    /// entirely, never serialized as empty strings.
    pub fn to_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            limit: self.per_page,
            filters: self
                .filters
                .iter()
                .filter(|(_, value)| !value.trim().is_empty())
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }
}

/// Owned snapshot of a query, as handed to a data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    pub filters: BTreeMap<String, String>,
}

impl PageRequest {
    /// Query-string pairs: `page`, `limit`, then filters in key order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(2 + self.filters.len());
        pairs.push(("page".to_string(), self.page.to_string()));
        pairs.push(("limit".to_string(), self.limit.to_string()));
        for (key, value) in &self.filters {
            pairs.push((key.clone(), value.clone()));
        }
        pairs
    }
}
