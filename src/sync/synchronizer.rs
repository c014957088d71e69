//! Route synchronization: resolving every deferred field of a route tree.
//!
//! # Responsibilities
//! - Resolve `component`, `components`, `indexRoute` and `childRoutes` of each node
//! - Recurse into index and child routes using the node's absolute path as parent prefix
//! - Drop child routes outside the filter prefix before resolving them
//!
//! # Design Decisions
//! - The four fields of a node resolve concurrently; the node completes when all four do
//! - First error wins; siblings still in flight are dropped and nothing is merged
//! - Sibling results keep input order regardless of completion order

use std::sync::Arc;

use futures_util::future::{try_join4, try_join_all, BoxFuture, FutureExt};

use crate::config::schema::{EmptyChildRoutes, SyncConfig};
use crate::deferred::Deferred;
use crate::error::{FieldKind, RouteResult};
use crate::routing::node::{Field, RouteList, RouteNode, SyncRouteNode};
use crate::routing::normalize::{normalize, RouteInput};
use crate::routing::path::{join, matches_prefix};

/// Resolves route trees, scoped to a filter prefix.
#[derive(Debug, Clone)]
pub struct Synchronizer {
    filter: Arc<str>,
    empty_child_routes: EmptyChildRoutes,
}

impl Synchronizer {
    /// Create a synchronizer keeping only routes on the branch of `filter`.
    pub fn new(filter: impl Into<Arc<str>>) -> Self {
        Self {
            filter: filter.into(),
            empty_child_routes: EmptyChildRoutes::default(),
        }
    }

    pub fn from_config(filter: impl Into<Arc<str>>, config: &SyncConfig) -> Self {
        Self::new(filter).with_empty_child_routes(config.empty_child_routes)
    }

    pub fn with_empty_child_routes(mut self, policy: EmptyChildRoutes) -> Self {
        self.empty_child_routes = policy;
        self
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Synchronize a single node whose parent sits at `parent_path`.
    pub fn synchronize_route(&self, parent_path: &str, node: &RouteNode) -> Deferred<SyncRouteNode> {
        Deferred::from_future(self.route_future(parent_path.to_string(), node.clone()))
    }

    /// Synchronize sibling nodes under `parent_path`, dropping those outside the filter.
    pub fn synchronize_routes(
        &self,
        parent_path: &str,
        nodes: &[RouteNode],
    ) -> Deferred<Vec<SyncRouteNode>> {
        Deferred::from_future(self.routes_future(parent_path.to_string(), nodes.to_vec()))
    }

    fn route_future(
        &self,
        parent_path: String,
        node: RouteNode,
    ) -> BoxFuture<'static, RouteResult<SyncRouteNode>> {
        let this = self.clone();
        async move { this.sync_node(&parent_path, node).await }.boxed()
    }

    fn routes_future(
        &self,
        parent_path: String,
        nodes: Vec<RouteNode>,
    ) -> BoxFuture<'static, RouteResult<Vec<SyncRouteNode>>> {
        let this = self.clone();
        async move {
            let matched: Vec<_> = nodes
                .into_iter()
                .filter(|node| {
                    let path = join(&parent_path, node.segment());
                    let keep = matches_prefix(&this.filter, &path);
                    if !keep {
                        tracing::trace!(path = %path, filter = %this.filter, "pruning route outside filter");
                    }
                    keep
                })
                .collect();

            try_join_all(
                matched
                    .into_iter()
                    .map(|node| this.route_future(parent_path.clone(), node)),
            )
            .await
        }
        .boxed()
    }

    async fn sync_node(&self, parent_path: &str, node: RouteNode) -> RouteResult<SyncRouteNode> {
        let path = join(parent_path, node.segment());
        let RouteNode {
            path: segment,
            component,
            components,
            index_route,
            child_routes,
            redirect,
            meta,
        } = node;

        let (component, components, index_route, child_routes) = try_join4(
            resolve_field(component, &path, FieldKind::Component),
            resolve_field(components, &path, FieldKind::Components),
            self.resolve_index_route(index_route, &path),
            self.resolve_child_routes(child_routes, &path),
        )
        .await?;

        tracing::trace!(path = %path, "route synchronized");
        Ok(RouteNode {
            path: segment,
            component,
            components,
            index_route,
            child_routes,
            redirect,
            meta,
        })
    }

    async fn resolve_index_route(
        &self,
        field: Option<Arc<Field<RouteNode>>>,
        path: &str,
    ) -> RouteResult<Option<Arc<Field<RouteNode>>>> {
        let index = match field.map(Arc::unwrap_or_clone) {
            None => return Ok(None),
            Some(Field::Resolved(index)) => index,
            Some(Field::Deferred(deferred)) => deferred
                .resolve()
                .await
                .map_err(|e| e.in_field(path, FieldKind::IndexRoute))?,
        };

        let index = self.route_future(path.to_string(), index).await?;
        Ok(Some(Arc::new(Field::Resolved(index))))
    }

    async fn resolve_child_routes(
        &self,
        field: Option<Field<RouteList>>,
        path: &str,
    ) -> RouteResult<Option<Field<RouteList>>> {
        let children = match field {
            None => return Ok(None),
            Some(Field::Resolved(children)) => children,
            Some(Field::Deferred(deferred)) => deferred
                .resolve()
                .await
                .map_err(|e| e.in_field(path, FieldKind::ChildRoutes))?,
        };

        let children = self.routes_future(path.to_string(), children.to_vec()).await?;
        if children.is_empty() && self.empty_child_routes == EmptyChildRoutes::Omit {
            return Ok(None);
        }
        Ok(Some(Field::Resolved(children.into())))
    }
}

async fn resolve_field<T>(
    field: Option<Field<T>>,
    path: &str,
    kind: FieldKind,
) -> RouteResult<Option<Field<T>>>
where
    T: Clone + Send + Sync + 'static,
{
    match field {
        None => Ok(None),
        Some(Field::Resolved(value)) => Ok(Some(Field::Resolved(value))),
        Some(Field::Deferred(deferred)) => deferred
            .resolve()
            .await
            .map(|value| Some(Field::Resolved(value)))
            .map_err(|e| e.in_field(path, kind)),
    }
}

/// Synchronize route input, keeping only routes on the branch of `prefix`.
pub fn synchronize(prefix: &str, input: impl Into<RouteInput>) -> Deferred<Vec<SyncRouteNode>> {
    Synchronizer::new(prefix).synchronize_routes("", &normalize(input))
}
