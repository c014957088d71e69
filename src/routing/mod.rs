//! Route tree model.
//!
//! # Data Flow
//! ```text
//! Route input (RouteNode tree, list of roots, or JSON shorthand)
//!     → normalize.rs (list of root RouteNodes)
//!     → node.rs (RouteNode / Field: resolved or deferred per field)
//!     → path.rs (absolute paths via join, scoping via matches_prefix)
//! ```
//!
//! # Design Decisions
//! - Each resolvable field is a tagged union (`Field::Resolved` | `Field::Deferred`),
//!   so a node can never hold both forms of the same field
//! - Extra route metadata is an open JSON map carried verbatim
//! - Nodes are plain values; synchronization produces new nodes instead of mutating

pub mod node;
pub mod normalize;
pub mod path;

pub use node::{Component, Field, NamedComponents, Redirect, RouteList, RouteNode, SyncRouteNode};
pub use normalize::{normalize, parse_routes, DescriptionError, RouteDescription, RouteInput};
pub use path::{join, matches_prefix};
