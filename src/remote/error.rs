//! Remote search error types

use thiserror::Error;

/// Errors from a remote search request
///
/// Both variants are handled the same way: the failure is logged, the merge
/// for that response is skipped and the store stays as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The request failed or returned a non-success status
    #[error("Remote request failed: {0}")]
    TransportFailure(String),

    /// The response body does not have the expected shape
    #[error("Malformed remote response: {0}")]
    MalformedResponse(String),
}
