//! Remote search wire types

use super::error::RemoteError;
use crate::options::OptionId;
use serde::Deserialize;

/// One option returned by a remote search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    /// Option id
    pub id: OptionId,
    /// Option label
    pub label: String,
}

impl RemoteEntry {
    /// Create an entry
    #[must_use]
    pub fn new(id: impl Into<OptionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A remote search the host should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRequest {
    /// Sequence number; only the latest issued one is accepted back
    pub seq: u64,
    /// Search term sent as `?term=`
    pub term: String,
}

/// A finished remote search, ready to hand back to the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCompletion {
    /// Sequence number of the originating request
    pub seq: u64,
    /// Entries or the failure
    pub result: Result<Vec<RemoteEntry>, RemoteError>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: OptionId,
    text: String,
}

/// Decode a `{ "results": [{ "id": .., "text": .. }] }` body
///
/// # Errors
///
/// Returns `RemoteError::MalformedResponse` for anything else.
pub fn parse_response(body: &str) -> Result<Vec<RemoteEntry>, RemoteError> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| RemoteError::MalformedResponse(e.to_string()))?;

    Ok(response
        .results
        .into_iter()
        .map(|r| RemoteEntry {
            id: r.id,
            label: r.text,
        })
        .collect())
}
