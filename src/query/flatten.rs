//! Flattening a synchronous route tree into leaf routes.

use std::ops::Deref;
use std::sync::Arc;

use crate::observability::metrics;
use crate::routing::node::{RouteNode, SyncRouteNode};
use crate::routing::path::join_all;

/// A leaf route with its fully-qualified path and ancestor chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRoute {
    /// Every ancestor's path segment joined with the leaf's own.
    pub full_path: String,
    /// Root-to-parent chain, excluding the leaf.
    pub parents: Vec<Arc<SyncRouteNode>>,
    /// The leaf's own fields.
    pub route: SyncRouteNode,
}

impl Deref for FlatRoute {
    type Target = SyncRouteNode;

    fn deref(&self) -> &Self::Target {
        &self.route
    }
}

/// Flatten routes depth-first, left to right, into one record per leaf.
///
/// Reads only fields that are already available; never resolves anything.
pub fn flatten(routes: &[SyncRouteNode]) -> Vec<FlatRoute> {
    let mut flat = Vec::new();
    for route in routes {
        flatten_route(&[], route, &mut flat);
    }
    metrics::record_flattened(flat.len());
    flat
}

fn flatten_route(parents: &[Arc<SyncRouteNode>], route: &SyncRouteNode, out: &mut Vec<FlatRoute>) {
    if route.is_leaf() {
        let full_path = join_all(
            parents
                .iter()
                .map(|parent| parent.path.as_deref())
                .chain(std::iter::once(route.path.as_deref())),
        );
        out.push(FlatRoute {
            full_path,
            parents: parents.to_vec(),
            route: route.clone(),
        });
        return;
    }

    let mut lineage = parents.to_vec();
    lineage.push(Arc::new(route.clone()));

    if let Some(index) = route.index_route() {
        flatten_route(&lineage, index, out);
    }
    for child in route.child_routes().unwrap_or_default() {
        flatten_route(&lineage, child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::node::Component;

    fn mailbox() -> Vec<RouteNode> {
        vec![RouteNode::at("/")
            .with_component("App")
            .with_index_route(RouteNode::new().with_component("Dashboard"))
            .with_child(RouteNode::at("about").with_component("About"))
            .with_child(
                RouteNode::at("inbox")
                    .with_component("Inbox")
                    .with_index_route(RouteNode::new().with_component("Messages"))
                    .with_child(RouteNode::at("settings").with_component("Settings"))
                    .with_child(RouteNode::redirect("messages/:id", "/messages/:id")),
            )
            .with_child(
                RouteNode::new()
                    .with_component("Inbox")
                    .with_child(RouteNode::at("messages/:id").with_component("Message")),
            )]
    }

    fn parent_components(route: &FlatRoute) -> Vec<&str> {
        route
            .parents
            .iter()
            .filter_map(|parent| parent.component())
            .map(Component::name)
            .collect()
    }

    #[test]
    fn test_flatten_mailbox() {
        let flat = flatten(&mailbox());

        let paths: Vec<_> = flat.iter().map(|r| r.full_path.as_str()).collect();
        assert_eq!(
            paths,
            ["/", "/about", "/inbox", "/inbox/settings", "/inbox/messages/:id", "/messages/:id"]
        );

        let components: Vec<_> = flat.iter().map(|r| r.component().map(Component::name)).collect();
        assert_eq!(
            components,
            [
                Some("Dashboard"),
                Some("About"),
                Some("Messages"),
                Some("Settings"),
                None,
                Some("Message")
            ]
        );

        assert_eq!(parent_components(&flat[0]), ["App"]);
        assert_eq!(parent_components(&flat[1]), ["App"]);
        assert_eq!(parent_components(&flat[2]), ["App", "Inbox"]);
        assert_eq!(parent_components(&flat[5]), ["App", "Inbox"]);
        assert!(flat[4].redirect.is_some());
    }

    #[test]
    fn test_parents_share_the_input_subtrees() {
        let routes = mailbox();
        let flat = flatten(&routes);
        let root_children = routes[0].child_routes().unwrap();
        for route in &flat {
            assert!(std::ptr::eq(route.parents[0].child_routes().unwrap(), root_children));
        }
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let routes = mailbox();
        assert_eq!(flatten(&routes), flatten(&routes));
    }

    #[test]
    fn test_empty_children_make_a_leaf() {
        let flat = flatten(&[RouteNode::at("/").with_child(RouteNode::at("drafts").with_children(Vec::new()))]);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].full_path, "/drafts");
        assert_eq!(flat[0].parents.len(), 1);
    }

    #[test]
    fn test_pathless_root_leaf() {
        let flat = flatten(&[RouteNode::new().with_component("NotFound")]);
        assert_eq!(flat[0].full_path, "");
        assert!(flat[0].parents.is_empty());
    }

    #[test]
    fn test_leaf_keeps_metadata() {
        let flat = flatten(&[RouteNode::at("about").with_meta("title", "About")]);
        assert_eq!(flat[0].full_path, "/about");
        assert_eq!(flat[0].meta.get("title").and_then(|v| v.as_str()), Some("About"));
    }
}
