//! Remote search sources
//!
//! A source performs one blocking search. Hosts run it off the UI thread
//! (see [`super::spawn_fetch`]) and hand the result back to the widget.

use super::error::RemoteError;
use super::types::{RemoteEntry, parse_response};
use crate::config::WidgetConfig;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Backend that answers remote searches
pub trait RemoteSource: Send + Sync {
    /// Search for `term`
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::TransportFailure` if the request fails and
    /// `RemoteError::MalformedResponse` if the body cannot be decoded.
    fn fetch(&self, term: &str) -> Result<Vec<RemoteEntry>, RemoteError>;
}

/// HTTP source issuing `GET <url>?term=<query>`
#[derive(Clone)]
pub struct HttpSource {
    agent: ureq::Agent,
    url: String,
}

impl fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSource").field("url", &self.url).finish()
    }
}

impl HttpSource {
    /// Create a source for an endpoint
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();

        Self {
            agent: ureq::Agent::new_with_config(config),
            url: url.into(),
        }
    }

    /// Create a source from the widget configuration, if remote mode is on
    #[must_use]
    pub fn from_config(config: &WidgetConfig) -> Option<Self> {
        if !config.remote_enabled() {
            return None;
        }
        let url = config.ajax_url.as_deref()?.trim();
        Some(Self::new(
            url,
            Duration::from_secs(config.request_timeout_secs),
        ))
    }

    /// Endpoint URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RemoteSource for HttpSource {
    fn fetch(&self, term: &str) -> Result<Vec<RemoteEntry>, RemoteError> {
        debug!(url = %self.url, term, "fetching remote results");

        let mut response = self
            .agent
            .get(&self.url)
            .query("term", term)
            .call()
            .map_err(|e| RemoteError::TransportFailure(format!("http get: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::TransportFailure(format!("http status {status}")));
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| RemoteError::TransportFailure(format!("read body: {e}")))?;

        parse_response(&body)
    }
}
