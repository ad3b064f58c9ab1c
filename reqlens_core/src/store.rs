//! In-memory store for the fetched request list and the current selection
//!
//! The store is the only mutable shared state of the client: list-fetch
//! completions replace `items` wholesale (stale summaries are discarded,
//! never merged), filter passes replace only the derived subset, and
//! selection records the active id. Entries are never mutated in place.

use crate::filter::filter_requests;
use crate::model::TransactionSummary;
use std::borrow::Cow;

#[derive(Debug, Default)]
pub struct TransactionStore {
    items: Vec<TransactionSummary>,
    /// `None` means the view is the unfiltered list itself
    filtered: Option<Vec<TransactionSummary>>,
    active_id: Option<String>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full list and reset the view to it
    pub fn set_items(&mut self, items: Vec<TransactionSummary>) {
        self.items = items;
        self.filtered = None;
    }

    /// Recompute the derived subset from a free-text query
    pub fn apply_filter(&mut self, query: &str) {
        self.filtered = match filter_requests(&self.items, query) {
            Cow::Borrowed(_) => None,
            Cow::Owned(subset) => Some(subset),
        };
    }

    /// Record which row is selected
    pub fn set_active(&mut self, id: Option<String>) {
        self.active_id = id;
    }

    pub fn items(&self) -> &[TransactionSummary] {
        &self.items
    }

    /// The current view subset; the unfiltered list itself when no filter
    /// is in effect
    pub fn visible(&self) -> &[TransactionSummary] {
        self.filtered.as_deref().unwrap_or(&self.items)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn is_filtered(&self) -> bool {
        self.filtered.is_some()
    }
}
