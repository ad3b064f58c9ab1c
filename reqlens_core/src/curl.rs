//! Reconstruction of a replayable curl command from a captured transaction
//!
//! Every interpolated value is single-quote escaped before it reaches the
//! command string; the output is meant to be pasted into a shell verbatim.

use crate::model::TransactionDetail;
use crate::sections::allow_body_for_method;

/// Headers the replaying client regenerates itself; re-sending them would
/// conflict with the reconstructed request
const SKIPPED_HEADERS: [&str; 2] = ["host", "content-length"];

/// Build a shell command that replays the captured request via curl.
///
/// Multi-valued headers emit one `-H` flag per value. The body flag is
/// emitted only for body-typical methods with a non-empty captured preview.
pub fn build_curl(detail: &TransactionDetail) -> String {
    let mut parts = vec![
        "curl".to_string(),
        "-X".to_string(),
        detail.method.clone(),
        shell_quote_single(&detail.url()),
    ];

    for (name, values) in detail.header.iter() {
        if SKIPPED_HEADERS.contains(&name.to_lowercase().as_str()) {
            continue;
        }
        for value in values {
            parts.push("-H".to_string());
            parts.push(shell_quote_single(&format!("{}: {}", name, value)));
        }
    }

    if allow_body_for_method(&detail.method)
        && detail.body_size > 0
        && !detail.body_preview.is_empty()
    {
        parts.push("--data-raw".to_string());
        parts.push(shell_quote_single(&detail.body_preview));
    }

    parts.join(" ")
}

/// Wrap a value in single quotes, replacing each embedded single quote with
/// `'\''` (close the quote, emit an escaped literal quote, reopen)
pub fn shell_quote_single(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
