//! Error types shared by every stage of route resolution.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type RouteResult<T> = Result<T, RouteError>;

/// The resolvable fields of a route node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Component,
    Components,
    IndexRoute,
    ChildRoutes,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Component => "component",
            FieldKind::Components => "components",
            FieldKind::IndexRoute => "indexRoute",
            FieldKind::ChildRoutes => "childRoutes",
        };
        f.write_str(name)
    }
}

/// Errors produced while resolving deferred route fields.
///
/// Cloneable so a memoized failure can be handed to every consumer of a
/// [`Deferred`](crate::deferred::Deferred).
#[derive(Debug, Clone, Error)]
pub enum RouteError {
    /// A producer reported failure.
    #[error("producer failed: {0}")]
    Producer(Arc<dyn std::error::Error + Send + Sync>),

    /// A callback-style producer dropped its completion handle without reporting.
    #[error("producer dropped its completion handle without reporting a result")]
    Abandoned,

    /// A deferred field of the route at `path` failed to resolve.
    #[error("failed to resolve `{field}` of route `{path}`: {source}")]
    Field {
        path: String,
        field: FieldKind,
        #[source]
        source: Box<RouteError>,
    },

    /// A named query of a query set failed.
    #[error("query `{name}` failed: {source}")]
    Query {
        name: String,
        #[source]
        source: Box<RouteError>,
    },
}

impl RouteError {
    /// Wrap an arbitrary producer failure.
    pub fn producer(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        RouteError::Producer(Arc::from(error.into()))
    }

    pub(crate) fn in_field(self, path: &str, field: FieldKind) -> Self {
        RouteError::Field {
            path: path.to_string(),
            field,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_query(self, name: impl Into<String>) -> Self {
        RouteError::Query {
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all field and query context stripped.
    pub fn root_cause(&self) -> &RouteError {
        match self {
            RouteError::Field { source, .. } | RouteError::Query { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }
}
