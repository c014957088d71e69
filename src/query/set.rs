//! Named query sets.
//!
//! # Responsibilities
//! - Run several named queries against the same routes
//! - Hand out the ready results immediately
//! - Wait for the pending ones together, reporting the first failure by name

use std::collections::BTreeMap;

use futures_util::future::try_join_all;

use crate::deferred::Deferred;
use crate::error::RouteResult;
use crate::query::{FlatRoute, Query, QueryResult};
use crate::routing::node::RouteNode;
use crate::routing::normalize::{normalize, RouteInput};

/// Queries keyed by the name their results are exposed under.
#[derive(Debug, Clone, Default)]
pub struct QuerySet {
    queries: BTreeMap<String, Query>,
}

impl QuerySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, query: Query) -> Self {
        self.insert(name, query);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, query: Query) {
        self.queries.insert(name.into(), query);
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Query)> {
        self.queries.iter().map(|(name, query)| (name.as_str(), query))
    }

    /// Run every query against route input.
    pub fn run(&self, input: impl Into<RouteInput>) -> QuerySetResult {
        let routes: Vec<RouteNode> = normalize(input);
        QuerySetResult::collect(
            self.queries
                .iter()
                .map(|(name, query)| (name.clone(), query.run_normalized(&routes))),
        )
    }
}

/// Results of a [`QuerySet`]: the ready part, and what is still pending.
#[derive(Debug, Default)]
pub struct QuerySetResult {
    ready: BTreeMap<String, Vec<FlatRoute>>,
    pending: Vec<(String, Deferred<Vec<FlatRoute>>)>,
}

impl QuerySetResult {
    pub(crate) fn collect(results: impl IntoIterator<Item = (String, QueryResult)>) -> Self {
        let mut set = Self::default();
        for (name, result) in results {
            match result {
                QueryResult::Ready(routes) => {
                    set.ready.insert(name, routes);
                }
                QueryResult::Pending(pending) => set.pending.push((name, pending)),
            }
        }
        set
    }

    /// Results that were available without waiting.
    pub fn ready(&self) -> &BTreeMap<String, Vec<FlatRoute>> {
        &self.ready
    }

    pub fn pending_names(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Wait for every pending query and merge all results.
    pub async fn complete(self) -> RouteResult<BTreeMap<String, Vec<FlatRoute>>> {
        let Self { mut ready, pending } = self;

        let resolved = try_join_all(pending.into_iter().map(|(name, routes)| async move {
            match routes.resolve().await {
                Ok(routes) => Ok((name, routes)),
                Err(e) => Err(e.in_query(name)),
            }
        }))
        .await?;

        ready.extend(resolved);
        Ok(ready)
    }
}
