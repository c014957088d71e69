//! Route-table building: turning route input into a list of [`RouteNode`]s.
//!
//! # Responsibilities
//! - Accept a single root or a list of roots
//! - Parse the plain JSON shorthand (`path`, `component`, `indexRoute`, `childRoutes`, ...)
//!
//! # Design Decisions
//! - Pure and synchronous; JSON cannot express producers, so parsed routes are fully resolved
//! - Keys the shorthand does not know are kept as route metadata

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::routing::node::{Component, RouteNode};

/// Route input: one root or several.
#[derive(Debug, Clone)]
pub enum RouteInput {
    One(RouteNode),
    Many(Vec<RouteNode>),
}

impl From<RouteNode> for RouteInput {
    fn from(node: RouteNode) -> Self {
        RouteInput::One(node)
    }
}

impl From<Vec<RouteNode>> for RouteInput {
    fn from(nodes: Vec<RouteNode>) -> Self {
        RouteInput::Many(nodes)
    }
}

impl From<&[RouteNode]> for RouteInput {
    fn from(nodes: &[RouteNode]) -> Self {
        RouteInput::Many(nodes.to_vec())
    }
}

/// Expand route input into the list form every other stage consumes.
pub fn normalize(input: impl Into<RouteInput>) -> Vec<RouteNode> {
    match input.into() {
        RouteInput::One(node) => vec![node],
        RouteInput::Many(nodes) => nodes,
    }
}

/// Errors from parsing a route description.
#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("invalid route description: {0}")]
    Json(#[from] serde_json::Error),
}

/// Plain route shorthand, as found in JSON route tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescription {
    pub path: Option<String>,
    pub component: Option<String>,
    pub components: Option<BTreeMap<String, String>>,
    pub index_route: Option<Box<RouteDescription>>,
    #[serde(alias = "children")]
    pub child_routes: Option<Vec<RouteDescription>>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DescriptionInput {
    Many(Vec<RouteDescription>),
    One(Box<RouteDescription>),
}

impl From<RouteDescription> for RouteNode {
    fn from(desc: RouteDescription) -> Self {
        let RouteDescription {
            path,
            component,
            components,
            index_route,
            child_routes,
            from,
            to,
            mut meta,
        } = desc;

        let mut node = match (from, to) {
            (Some(from), Some(to)) => RouteNode::redirect(from, to),
            (from, to) => {
                // A half-specified redirect is just metadata.
                if let Some(from) = from {
                    meta.insert("from".to_string(), Value::String(from));
                }
                if let Some(to) = to {
                    meta.insert("to".to_string(), Value::String(to));
                }
                RouteNode::new()
            }
        };

        if path.is_some() {
            node.path = path;
        }
        if let Some(component) = component {
            node = node.with_component(component);
        }
        if let Some(components) = components {
            node = node.with_components(
                components
                    .into_iter()
                    .map(|(outlet, name)| (outlet, Component::from(name)))
                    .collect(),
            );
        }
        if let Some(index) = index_route {
            node = node.with_index_route((*index).into());
        }
        if let Some(children) = child_routes {
            node = node.with_children(children.into_iter().map(RouteNode::from).collect());
        }
        node.meta = meta;
        node
    }
}

/// Parse a JSON route table: either a single route object or an array of them.
pub fn parse_routes(json: &str) -> Result<Vec<RouteNode>, DescriptionError> {
    let routes = match serde_json::from_str::<DescriptionInput>(json)? {
        DescriptionInput::One(route) => vec![RouteNode::from(*route)],
        DescriptionInput::Many(routes) => routes.into_iter().map(RouteNode::from).collect(),
    };
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAILBOX: &str = r#"
    {
        "path": "/",
        "component": "App",
        "indexRoute": { "component": "Dashboard" },
        "childRoutes": [
            { "path": "about", "component": "About", "title": "About us" },
            {
                "path": "inbox",
                "component": "Inbox",
                "indexRoute": { "component": "Messages" },
                "children": [
                    { "path": "settings", "components": { "main": "Settings", "sidebar": "Nav" } },
                    { "from": "messages/:id", "to": "/messages/:id" }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_normalize_accepts_one_or_many() {
        assert_eq!(normalize(RouteNode::at("/")).len(), 1);
        assert_eq!(normalize(vec![RouteNode::at("a"), RouteNode::at("b")]).len(), 2);
    }

    #[test]
    fn test_parse_single_root() {
        let routes = parse_routes(MAILBOX).unwrap();
        assert_eq!(routes.len(), 1);

        let root = &routes[0];
        assert_eq!(root.path.as_deref(), Some("/"));
        assert_eq!(root.component().map(Component::name), Some("App"));
        assert_eq!(
            root.index_route().and_then(RouteNode::component).map(Component::name),
            Some("Dashboard")
        );

        let children = root.child_routes().unwrap();
        assert_eq!(children[0].meta.get("title"), Some(&Value::from("About us")));

        let inbox_children = children[1].child_routes().unwrap();
        let outlets = inbox_children[0].components().unwrap();
        assert_eq!(outlets.get("sidebar").map(Component::name), Some("Nav"));

        let redirect = &inbox_children[1];
        assert_eq!(redirect.path.as_deref(), Some("messages/:id"));
        assert_eq!(redirect.redirect.as_ref().map(|r| r.to.as_str()), Some("/messages/:id"));
        assert!(redirect.meta.is_empty());
    }

    #[test]
    fn test_parse_list_and_half_redirect() {
        let routes = parse_routes(r#"[{ "path": "a" }, { "path": "b", "to": "/c" }]"#).unwrap();
        assert_eq!(routes.len(), 2);
        assert!(routes[1].redirect.is_none());
        assert_eq!(routes[1].meta.get("to"), Some(&Value::from("/c")));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_routes("42"), Err(DescriptionError::Json(_))));
    }
}
