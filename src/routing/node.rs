//! Route tree node types.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::deferred::Deferred;
use crate::error::RouteResult;

/// Opaque handle to whatever renders a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Component(Arc<str>);

impl Component {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Component {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Component {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named outlets: outlet name → component.
pub type NamedComponents = BTreeMap<String, Component>;

/// Path rewrite performed by a redirect leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub from: String,
    pub to: String,
}

/// A route field that is either known or still to be produced.
#[derive(Debug, Clone)]
pub enum Field<T> {
    Resolved(T),
    Deferred(Deferred<T>),
}

impl<T> Field<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// The value if it can be read without waiting: resolved, or deferred and
    /// already settled successfully.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Field::Resolved(value) => Some(value),
            Field::Deferred(deferred) => deferred.value(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready().is_some()
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Field::Deferred(_))
    }

    /// Obtain the value, consuming the deferred producer if needed.
    pub async fn resolve(&self) -> RouteResult<T> {
        match self {
            Field::Resolved(value) => Ok(value.clone()),
            Field::Deferred(deferred) => deferred.resolve().await,
        }
    }
}

/// Compares by value: a settled deferred equals a resolved field holding the same value.
impl<T> PartialEq for Field<T>
where
    T: PartialEq + Clone + Send + Sync + 'static,
{
    fn eq(&self, other: &Self) -> bool {
        match (self.ready(), other.ready()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => match (self, other) {
                (Field::Deferred(a), Field::Deferred(b)) => a.ptr_eq(b),
                _ => false,
            },
            _ => false,
        }
    }
}

impl<T> From<Deferred<T>> for Field<T> {
    fn from(deferred: Deferred<T>) -> Self {
        Field::Deferred(deferred)
    }
}

/// One node of a route tree.
///
/// Resolvable fields hold either the value or a [`Deferred`] producing it. After
/// synchronization every present field is [`Field::Resolved`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteNode {
    /// Path segment relative to the parent. Absent for grouping nodes.
    pub path: Option<String>,
    pub component: Option<Field<Component>>,
    pub components: Option<Field<NamedComponents>>,
    pub index_route: Option<Arc<Field<RouteNode>>>,
    pub child_routes: Option<Field<RouteList>>,
    pub redirect: Option<Redirect>,
    /// Arbitrary extra fields, carried through untouched.
    pub meta: Map<String, Value>,
}

/// Child routes. Shared, so cloning a node never copies its subtree.
pub type RouteList = Arc<[RouteNode]>;

/// A node whose deferred fields have all been resolved.
pub type SyncRouteNode = RouteNode;

impl RouteNode {
    /// An empty grouping node.
    pub fn new() -> Self {
        Self::default()
    }

    /// A node with the given path segment.
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// A redirect leaf. Its path is the redirect source.
    pub fn redirect(from: impl Into<String>, to: impl Into<String>) -> Self {
        let from = from.into();
        Self {
            path: Some(from.clone()),
            redirect: Some(Redirect {
                from,
                to: to.into(),
            }),
            ..Self::default()
        }
    }

    pub fn with_component(mut self, component: impl Into<Component>) -> Self {
        self.component = Some(Field::Resolved(component.into()));
        self
    }

    pub fn with_deferred_component(mut self, component: Deferred<Component>) -> Self {
        self.component = Some(Field::Deferred(component));
        self
    }

    pub fn with_components(mut self, components: NamedComponents) -> Self {
        self.components = Some(Field::Resolved(components));
        self
    }

    pub fn with_deferred_components(mut self, components: Deferred<NamedComponents>) -> Self {
        self.components = Some(Field::Deferred(components));
        self
    }

    pub fn with_index_route(mut self, index: RouteNode) -> Self {
        self.index_route = Some(Arc::new(Field::Resolved(index)));
        self
    }

    pub fn with_deferred_index_route(mut self, index: Deferred<RouteNode>) -> Self {
        self.index_route = Some(Arc::new(Field::Deferred(index)));
        self
    }

    /// Append a resolved child. Replaces a deferred child list.
    pub fn with_child(mut self, child: RouteNode) -> Self {
        let mut children = match self.child_routes.take() {
            Some(Field::Resolved(children)) => children.to_vec(),
            _ => Vec::new(),
        };
        children.push(child);
        self.child_routes = Some(Field::Resolved(children.into()));
        self
    }

    pub fn with_children(mut self, children: Vec<RouteNode>) -> Self {
        self.child_routes = Some(Field::Resolved(children.into()));
        self
    }

    pub fn with_deferred_children(mut self, children: Deferred<Vec<RouteNode>>) -> Self {
        self.child_routes = Some(Field::Deferred(children.map(RouteList::from)));
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// The path segment, or `""` for grouping nodes.
    pub fn segment(&self) -> &str {
        self.path.as_deref().unwrap_or("")
    }

    pub fn component(&self) -> Option<&Component> {
        self.component.as_ref().and_then(Field::ready)
    }

    pub fn components(&self) -> Option<&NamedComponents> {
        self.components.as_ref().and_then(Field::ready)
    }

    pub fn index_route(&self) -> Option<&RouteNode> {
        self.index_route.as_deref().and_then(Field::ready)
    }

    pub fn child_routes(&self) -> Option<&[RouteNode]> {
        self.child_routes
            .as_ref()
            .and_then(Field::ready)
            .map(|children| &children[..])
    }

    /// True if any resolvable field cannot be read without waiting.
    pub fn has_pending_fields(&self) -> bool {
        self.component.as_ref().is_some_and(|f| !f.is_ready())
            || self.components.as_ref().is_some_and(|f| !f.is_ready())
            || self.index_route.as_deref().is_some_and(|f| !f.is_ready())
            || self.child_routes.as_ref().is_some_and(|f| !f.is_ready())
    }

    /// No index route and no non-empty child list.
    pub fn is_leaf(&self) -> bool {
        self.index_route().is_none() && self.child_routes().map_or(true, <[RouteNode]>::is_empty)
    }
}
