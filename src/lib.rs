//! Route synchronization and flattening.
//!
//! Route trees may carry fields that are only available after an asynchronous step
//! (a lazily loaded component, child list or index route). This crate resolves those
//! fields on demand, only along the branch a query asks about, and flattens the
//! result into one record per leaf route with its full path and ancestor chain.
//!
//! ```text
//! RouteNode tree → query(prefix)
//!     → already synchronous?  → QueryResult::Ready(Vec<FlatRoute>)
//!     → otherwise             → QueryResult::Pending(Deferred<Vec<FlatRoute>>)
//! ```

pub mod config;
pub mod deferred;
pub mod error;
pub mod observability;
pub mod query;
pub mod registry;
pub mod routing;
pub mod sync;

pub use config::schema::EngineConfig;
pub use deferred::{Completion, Deferred};
pub use error::{FieldKind, RouteError, RouteResult};
pub use query::{flatten, query, FlatRoute, Query, QueryResult, QuerySet, QuerySetResult};
pub use registry::RouteRegistry;
pub use routing::{parse_routes, Component, Field, Redirect, RouteInput, RouteNode, SyncRouteNode};
pub use sync::{is_synchronous, synchronize, Synchronizer};
