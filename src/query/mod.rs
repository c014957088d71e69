//! Query subsystem.
//!
//! # Data Flow
//! ```text
//! query(prefix, routes)
//!     → normalize (list of roots)
//!     → sync::probe (already synchronous on the prefix's branch?)
//!         yes → flatten.rs directly → filter full_path by prefix → QueryResult::Ready
//!         no  → sync::Synchronizer → flatten.rs → same filter → QueryResult::Pending
//! ```
//!
//! # Design Decisions
//! - Both paths produce the same records; callers only see ready vs. pending
//! - A pending result is a `Deferred`, so it can be shared and awaited by many callers
//! - `Query` is prefix-bound and reusable against any route input
//! - `parents` of a ready result are the nodes as given; those of a pending result are
//!   the synchronized nodes, whose child lists no longer hold off-prefix siblings

pub mod flatten;
pub mod set;

pub use flatten::{flatten, FlatRoute};
pub use set::{QuerySet, QuerySetResult};

use std::fmt;
use std::future::IntoFuture;
use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt};

use crate::config::schema::SyncConfig;
use crate::deferred::Deferred;
use crate::error::RouteResult;
use crate::observability::metrics;
use crate::routing::node::RouteNode;
use crate::routing::normalize::{normalize, RouteInput};
use crate::sync::{is_synchronous, Synchronizer};

/// Outcome of a query: available now, or once the routes have been synchronized.
pub enum QueryResult {
    Ready(Vec<FlatRoute>),
    Pending(Deferred<Vec<FlatRoute>>),
}

impl QueryResult {
    pub fn is_ready(&self) -> bool {
        matches!(self, QueryResult::Ready(_))
    }

    /// The routes, if they were available without waiting.
    pub fn ready(self) -> Option<Vec<FlatRoute>> {
        match self {
            QueryResult::Ready(routes) => Some(routes),
            QueryResult::Pending(_) => None,
        }
    }

    /// Wait for the routes.
    pub async fn resolve(self) -> RouteResult<Vec<FlatRoute>> {
        match self {
            QueryResult::Ready(routes) => Ok(routes),
            QueryResult::Pending(pending) => pending.resolve().await,
        }
    }
}

impl IntoFuture for QueryResult {
    type Output = RouteResult<Vec<FlatRoute>>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            QueryResult::Ready(routes) => future::ready(Ok(routes)).boxed(),
            QueryResult::Pending(pending) => async move { pending.resolve().await }.boxed(),
        }
    }
}

impl fmt::Debug for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryResult::Ready(routes) => f.debug_tuple("Ready").field(&routes.len()).finish(),
            QueryResult::Pending(pending) => f.debug_tuple("Pending").field(pending).finish(),
        }
    }
}

/// A query for the leaf routes under a path prefix.
#[derive(Debug, Clone)]
pub struct Query {
    prefix: Arc<str>,
    /// Unset means the caller's settings apply (defaults, or a registry's `sync` section).
    sync: Option<SyncConfig>,
}

impl Query {
    pub fn new(prefix: impl Into<Arc<str>>) -> Self {
        Self {
            prefix: prefix.into(),
            sync: None,
        }
    }

    pub fn with_config(mut self, sync: SyncConfig) -> Self {
        self.sync = Some(sync);
        self
    }

    /// Settings attached with [`with_config`](Self::with_config), if any.
    pub fn config(&self) -> Option<&SyncConfig> {
        self.sync.as_ref()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Run the query against route input.
    pub fn run(&self, input: impl Into<RouteInput>) -> QueryResult {
        self.run_normalized(&normalize(input))
    }

    pub(crate) fn run_normalized(&self, routes: &[RouteNode]) -> QueryResult {
        if is_synchronous(&self.prefix, routes) {
            metrics::record_query("sync");
            tracing::debug!(prefix = %self.prefix, "routes already synchronous, flattening in place");
            return QueryResult::Ready(flatten_with_prefix(&self.prefix, routes));
        }

        metrics::record_query("async");
        tracing::debug!(prefix = %self.prefix, "routes have pending fields, synchronizing");
        let prefix = Arc::clone(&self.prefix);
        let sync = self.sync.clone().unwrap_or_default();
        let synchronized = Synchronizer::from_config(Arc::clone(&prefix), &sync)
            .synchronize_routes("", routes);

        QueryResult::Pending(Deferred::from_future(async move {
            let routes = synchronized.resolve().await?;
            Ok(flatten_with_prefix(&prefix, &routes))
        }))
    }
}

/// Leaf routes of `input` whose full path starts with `prefix`.
pub fn query(prefix: &str, input: impl Into<RouteInput>) -> QueryResult {
    Query::new(prefix).run(input)
}

fn flatten_with_prefix(prefix: &str, routes: &[RouteNode]) -> Vec<FlatRoute> {
    flatten(routes)
        .into_iter()
        .filter(|route| route.full_path.starts_with(prefix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::node::Component;

    fn later(name: &'static str) -> Deferred<Component> {
        Deferred::new(move || async move {
            tokio::task::yield_now().await;
            Ok(Component::from(name))
        })
    }

    fn scenario(about: RouteNode) -> RouteNode {
        RouteNode::at("/")
            .with_index_route(RouteNode::new().with_component("D"))
            .with_child(about)
            .with_child(
                RouteNode::at("inbox")
                    .with_index_route(RouteNode::new().with_component("M"))
                    .with_child(RouteNode::at("settings").with_component("S")),
            )
    }

    fn full_paths(routes: &[FlatRoute]) -> Vec<&str> {
        routes.iter().map(|r| r.full_path.as_str()).collect()
    }

    #[test]
    fn test_synchronous_routes_are_ready() {
        let root = scenario(RouteNode::at("about").with_component("A"));
        let routes = query("", root.clone()).ready().unwrap();

        assert_eq!(full_paths(&routes), ["/", "/about", "/inbox", "/inbox/settings"]);
        let inbox = root.child_routes().unwrap()[1].clone();
        assert_eq!(*routes[0].parents[0], root);
        assert_eq!(routes[1].parents.len(), 1);
        assert_eq!(routes[2].parents.len(), 2);
        assert_eq!(*routes[3].parents[1], inbox);
    }

    #[tokio::test]
    async fn test_async_routes_match_sync_result() {
        let sync = query("", scenario(RouteNode::at("about").with_component("A")))
            .ready()
            .unwrap();

        let pending = query("", scenario(RouteNode::at("about").with_deferred_component(later("A"))));
        assert!(!pending.is_ready());
        let resolved = pending.await.unwrap();

        assert_eq!(resolved, sync);
    }

    #[tokio::test]
    async fn test_prefix_filter() {
        let routes = query("/inbox", scenario(RouteNode::at("about").with_component("A")))
            .resolve()
            .await
            .unwrap();
        assert_eq!(full_paths(&routes), ["/inbox", "/inbox/settings"]);

        let routes = query("/inbox", scenario(RouteNode::at("about").with_deferred_component(later("A"))))
            .resolve()
            .await
            .unwrap();
        assert_eq!(full_paths(&routes), ["/inbox", "/inbox/settings"]);
    }

    #[tokio::test]
    async fn test_off_branch_pending_fields_do_not_force_sync() {
        let result = query("/inbox", scenario(RouteNode::at("about").with_deferred_component(later("A"))));
        assert!(result.is_ready());
    }
}
