//! Remote search support
//!
//! When a widget has a remote endpoint, every non-empty query produces a
//! [`RemoteRequest`]. The host runs it through a [`RemoteSource`] (usually
//! on a worker thread via [`spawn_fetch`]) and hands the [`RemoteCompletion`]
//! back to the widget, which discards stale responses and [`merge`]s the rest.
//!
//! # Wire format
//!
//! ```text
//! GET <ajax_url>?term=<url-encoded query>
//!
//! { "results": [ { "id": 1, "text": "Red" }, ... ] }
//! ```

pub mod error;
mod merge;
mod sequence;
mod source;
mod types;
mod worker;

pub use error::RemoteError;
pub use merge::{MergeOutcome, ScrollTarget, merge};
pub use sequence::RequestSequencer;
pub use source::{HttpSource, RemoteSource};
pub use types::{RemoteCompletion, RemoteEntry, RemoteRequest, parse_response};
pub use worker::spawn_fetch;
