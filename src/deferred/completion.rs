//! Completion handle for callback-style producers.

use std::fmt;

use tokio::sync::oneshot;

use crate::error::{RouteError, RouteResult};

/// Handed to a callback-style producer; reports its outcome exactly once.
///
/// Every reporting method consumes the handle. Dropping it unreported resolves
/// the owning [`Deferred`](super::Deferred) with [`RouteError::Abandoned`].
pub struct Completion<T> {
    tx: oneshot::Sender<RouteResult<T>>,
}

impl<T> Completion<T> {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<RouteResult<T>>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Report an outcome.
    pub fn complete(self, outcome: RouteResult<T>) {
        if self.tx.send(outcome).is_err() {
            tracing::trace!("deferred value dropped before its producer completed");
        }
    }

    /// Report success.
    pub fn resolve(self, value: T) {
        self.complete(Ok(value));
    }

    /// Report failure.
    pub fn fail(self, error: impl Into<Box<dyn std::error::Error + Send + Sync>>) {
        self.complete(Err(RouteError::producer(error)));
    }
}

impl<T> fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}
