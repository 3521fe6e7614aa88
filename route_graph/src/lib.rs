//! A routing graph built from hand-drawn street polylines.
//!
//! Streets are drawn independently, so they cross without sharing points, nearly touch at their
//! ends, and the properties being routed between sit beside the streets rather than on them. This
//! crate turns that loose collection into one connected graph:
//!
//! 1. `make` builds nodes and edges from every street, splices in junctions wherever two streets
//!    cross, and optionally snaps nodes onto nearby edges.
//! 2. The canonical graph is cached behind an `Arc` and never mutated after it's built.
//! 3. Each query forks a private `QueryGraph`, attaches its origin and destination, and runs A*.
//!
//! `Router` ties these together on top of the street and property repositories.

#[macro_use]
extern crate log;

mod attach;
mod cache;
mod error;
mod graph;
mod ids;
mod inspect;
pub mod make;
mod pathfind;
mod raw;
mod router;

pub use crate::attach::QueryGraph;
pub use crate::cache::GraphCache;
pub use crate::error::RouteError;
pub use crate::graph::{GraphEdge, GraphNode, StreetGraph};
pub use crate::ids::{NodeID, PropertyID, StreetID};
pub use crate::inspect::{EdgeSnapshot, GraphSnapshot, NodeSnapshot};
pub use crate::make::{build_graph, GraphOptions};
pub use crate::pathfind::astar;
pub use crate::raw::{RawProperty, RawStreet, RawStreetNode};
pub use crate::router::{
    find_path_on, PathResult, PropertyPath, PropertyRepository, RouteEndpoint, Router,
    RouterConfig, StreetRepository,
};

/// Projections landing this close to either end of an edge (as a fraction of its length) resolve
/// to that endpoint instead of splitting the edge.
pub const ENDPOINT_EPSILON: f64 = 1e-6;
