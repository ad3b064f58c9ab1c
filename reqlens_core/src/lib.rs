//! Reqlens Core - Data and view model for the HTTP traffic inspector
//!
//! This crate holds the client-side logic shared by every frontend: the wire
//! model for captured transactions, the in-memory store and filter engine
//! behind the request list, the detail-section assembler, the JSON
//! highlighter, and the curl command reconstructor. It performs no I/O; the
//! CLI crate owns fetching and rendering.

pub mod curl;
pub mod filter;
pub mod highlight;
pub mod model;
pub mod sections;
pub mod store;

pub use curl::build_curl;
pub use filter::filter_requests;
pub use highlight::{highlight_json, pretty_or_raw, Highlighted, JsonToken, TokenKind};
pub use model::{format_bytes, TransactionDetail, TransactionSummary, ValueMap};
pub use sections::{assemble_sections, Section, SectionAction, SectionContent};
pub use store::TransactionStore;
