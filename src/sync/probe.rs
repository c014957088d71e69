//! Synchronicity probing.
//!
//! Decides, without invoking any producer, whether the part of a route tree on
//! the branch of a filter prefix can be flattened as-is.

use crate::routing::node::RouteNode;
use crate::routing::path::{join, matches_prefix};

/// True if every root in `routes` is synchronous with respect to `filter`.
pub fn is_synchronous(filter: &str, routes: &[RouteNode]) -> bool {
    routes.iter().all(|route| probe(filter, "", route))
}

/// True if `route`, sitting under `parent_path`, is synchronous with respect to `filter`.
///
/// Routes off the filter's branch are vacuously synchronous. Otherwise no field
/// may be pending, and the index route and every child must be synchronous too.
/// A deferred field that already settled successfully counts as resolved.
pub fn is_route_synchronous(filter: &str, parent_path: &str, route: &RouteNode) -> bool {
    probe(filter, parent_path, route)
}

fn probe(filter: &str, parent_path: &str, route: &RouteNode) -> bool {
    let path = join(parent_path, route.segment());
    if !matches_prefix(filter, &path) {
        return true;
    }
    if route.has_pending_fields() {
        return false;
    }

    route
        .index_route()
        .map_or(true, |index| probe(filter, &path, index))
        && route
            .child_routes()
            .unwrap_or_default()
            .iter()
            .all(|child| probe(filter, &path, child))
}
