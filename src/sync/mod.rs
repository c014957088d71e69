//! Synchronization subsystem.
//!
//! # Data Flow
//! ```text
//! RouteNode[] + filter prefix
//!     → probe.rs (already synchronous on the filter's branch? no side effects)
//!     → synchronizer.rs (resolve deferred fields, recurse, prune off-branch children)
//!     → Deferred<SyncRouteNode[]>
//! ```
//!
//! # Design Decisions
//! - Prober and synchronizer walk the same shape and use the same prefix rule
//! - Pruning only ever removes subtrees whose leaves could not pass the final
//!   prefix filter, so it never changes query results
//! - Resolution is cooperative: one task, concurrent branches, join barriers per node

pub mod probe;
pub mod synchronizer;

pub use probe::{is_route_synchronous, is_synchronous};
pub use synchronizer::{synchronize, Synchronizer};
