//! Free-text filtering over the captured-request list
//!
//! Every whitespace-separated query token must appear as a case-insensitive
//! substring of an item's searchable text (AND semantics). Filtering is pure
//! and order-preserving; an empty query short-circuits to the full list
//! without a filter pass.

use crate::model::TransactionSummary;
use std::borrow::Cow;

/// Apply a free-text query to the full list.
///
/// Returns `Cow::Borrowed` for an empty or whitespace-only query (the list
/// itself, not a copy) and an owned subsequence otherwise.
pub fn filter_requests<'a>(
    items: &'a [TransactionSummary],
    query: &str,
) -> Cow<'a, [TransactionSummary]> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Cow::Borrowed(items);
    }

    let tokens: Vec<&str> = query.split_whitespace().collect();
    let retained: Vec<TransactionSummary> = items
        .iter()
        .filter(|item| {
            let hay = searchable_text(item);
            tokens.iter().all(|t| hay.contains(t))
        })
        .cloned()
        .collect();
    Cow::Owned(retained)
}

/// Lower-cased join of every field the filter can match against.
/// Missing fields contribute an empty string, never a wildcard.
fn searchable_text(item: &TransactionSummary) -> String {
    let fields = [
        item.method.as_str(),
        item.host.as_str(),
        item.path.as_str(),
        item.query.as_str(),
        item.ip.as_str(),
        item.content_type.as_str(),
        item.user_agent.as_deref().unwrap_or(""),
        item.request_id.as_str(),
    ];
    fields.join(" ").to_lowercase()
}
