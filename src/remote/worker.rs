//! Fire-and-forget fetch worker

use super::source::RemoteSource;
use super::types::{RemoteCompletion, RemoteRequest};
use std::io;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use tracing::trace;

/// Run one remote search on a worker thread
///
/// The completion is sent over `sender`; if the receiving side is gone the
/// result is dropped.
///
/// # Errors
///
/// Returns an `io::Error` if the thread cannot be spawned.
pub fn spawn_fetch(
    source: Arc<dyn RemoteSource>,
    request: RemoteRequest,
    sender: Sender<RemoteCompletion>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("multipick-fetch-{}", request.seq))
        .spawn(move || {
            let result = source.fetch(&request.term);
            if sender
                .send(RemoteCompletion {
                    seq: request.seq,
                    result,
                })
                .is_err()
            {
                trace!(seq = request.seq, "completion receiver dropped");
            }
        })
}
