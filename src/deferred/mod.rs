//! Deferred values.
//!
//! # Data Flow
//! ```text
//! producer (async fn / callback + Completion)
//!     → Deferred::new / Deferred::from_callback (lazy, nothing runs yet)
//!     → first resolve(): producer invoked, outcome memoized
//!     → later resolve(): memoized outcome replayed
//! ```
//!
//! # Design Decisions
//! - Backed by a shared future: concurrent first-time consumers all wait on the
//!   single in-flight resolution, the producer never runs twice
//! - Errors are memoized exactly like values
//! - Synchronicity is a field of the wrapper, observable without forcing resolution

pub mod completion;

pub use completion::Completion;

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt, Shared};

use crate::error::{RouteError, RouteResult};
use crate::observability::metrics;

const UNRESOLVED: u8 = 0;
const SYNC: u8 = 1;
const ASYNC: u8 = 2;

/// A value obtainable exactly once, synchronously or asynchronously, then memoized.
pub struct Deferred<T> {
    inner: Shared<BoxFuture<'static, RouteResult<T>>>,
    /// How the first consumption went: not yet, immediately, or after suspending.
    timing: Arc<AtomicU8>,
}

impl<T> Deferred<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// A deferred value that is already known.
    pub fn ready(value: T) -> Self {
        Self::settled(Ok(value))
    }

    fn settled(outcome: RouteResult<T>) -> Self {
        let inner = future::ready(outcome).boxed().shared();
        // Polling once stores the outcome so `peek` sees it.
        let _ = inner.clone().now_or_never();
        Self {
            inner,
            timing: Arc::new(AtomicU8::new(SYNC)),
        }
    }

    /// Wrap an async producer. It is not invoked until the first [`resolve`](Self::resolve).
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = RouteResult<T>> + Send + 'static,
    {
        Self::from_future(async move { producer().await })
    }

    /// Wrap a callback-style producer that reports through a [`Completion`].
    pub fn from_callback<F>(producer: F) -> Self
    where
        F: FnOnce(Completion<T>) + Send + 'static,
    {
        Self::new(move || {
            let (completion, outcome) = Completion::channel();
            producer(completion);
            async move { outcome.await.unwrap_or(Err(RouteError::Abandoned)) }
        })
    }

    /// Wrap a lazy future.
    pub fn from_future<Fut>(fut: Fut) -> Self
    where
        Fut: Future<Output = RouteResult<T>> + Send + 'static,
    {
        Self::lazy(async move {
            metrics::record_deferred_resolution();
            fut.await
        })
    }

    fn lazy<Fut>(fut: Fut) -> Self
    where
        Fut: Future<Output = RouteResult<T>> + Send + 'static,
    {
        Self {
            inner: fut.boxed().shared(),
            timing: Arc::new(AtomicU8::new(UNRESOLVED)),
        }
    }

    /// A deferred value derived from this one. Shares this one's producer; an already
    /// settled outcome is carried over without waiting.
    pub fn map<U, F>(self, f: F) -> Deferred<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        if let Some(outcome) = self.peek() {
            return Deferred::settled(outcome.clone().map(f));
        }
        Deferred::lazy(async move { self.resolve().await.map(f) })
    }

    /// Obtain the value, invoking the producer on first use only.
    pub async fn resolve(&self) -> RouteResult<T> {
        let mut pending = self.inner.clone();
        let mut first_poll = true;
        std::future::poll_fn(|cx| {
            let poll = pending.poll_unpin(cx);
            if first_poll {
                first_poll = false;
                self.record_timing(if poll.is_ready() { SYNC } else { ASYNC });
            }
            poll
        })
        .await
    }

    /// The memoized outcome, if resolution has finished. Never invokes the producer.
    pub fn peek(&self) -> Option<&RouteResult<T>> {
        self.inner.peek()
    }

    /// The memoized value, if resolution finished successfully.
    pub fn value(&self) -> Option<&T> {
        self.peek().and_then(|outcome| outcome.as_ref().ok())
    }

    /// True once resolution has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        self.peek().is_some()
    }

    /// True if the first consumption completed without suspending.
    pub fn is_sync(&self) -> bool {
        self.timing.load(Ordering::Acquire) == SYNC
    }

    /// True if both handles share the same underlying resolution.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.inner.ptr_eq(&other.inner)
    }

    fn record_timing(&self, timing: u8) {
        // Only the first consumption decides.
        let _ = self
            .timing
            .compare_exchange(UNRESOLVED, timing, Ordering::AcqRel, Ordering::Acquire);
    }
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            timing: Arc::clone(&self.timing),
        }
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timing = match self.timing.load(Ordering::Acquire) {
            SYNC => "sync",
            ASYNC => "async",
            _ => "unresolved",
        };
        f.debug_struct("Deferred").field("timing", &timing).finish()
    }
}
