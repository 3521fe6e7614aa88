use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use abstutil::Timer;
use geom::{Distance, LonLat};

use crate::{
    astar, build_graph, GraphCache, GraphOptions, GraphSnapshot, NodeID, PropertyID, RawProperty,
    RawStreet, RouteError, StreetGraph,
};

/// Where street geometry comes from. Read in full on every rebuild.
pub trait StreetRepository {
    fn all_streets(&self) -> Result<Vec<RawStreet>>;
}

/// Where query endpoints come from. `Ok(None)` means there's no such property.
pub trait PropertyRepository {
    fn get_property(&self, id: PropertyID) -> Result<Option<RawProperty>>;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// How long a built graph is served before the streets are read again
    pub cache_ttl_seconds: f64,
    pub graph: GraphOptions,
}

impl Default for RouterConfig {
    fn default() -> RouterConfig {
        RouterConfig {
            cache_ttl_seconds: 60.0,
            graph: GraphOptions::default(),
        }
    }
}

impl RouterConfig {
    /// Zero or negative means rebuild on every query.
    pub fn cache_ttl(&self) -> Duration {
        if self.cache_ttl_seconds.is_nan() || self.cache_ttl_seconds <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(self.cache_ttl_seconds).unwrap_or(Duration::MAX)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub found: bool,
    /// Coordinates of every node along the path, including both attached ends
    pub path_nodes: Vec<LonLat>,
    pub node_ids: Vec<NodeID>,
    pub total_cost: Distance,
}

impl PathResult {
    fn not_found() -> PathResult {
        PathResult {
            found: false,
            path_nodes: Vec::new(),
            node_ids: Vec::new(),
            total_cost: Distance::ZERO,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteEndpoint {
    pub id: PropertyID,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&RawProperty> for RouteEndpoint {
    fn from(property: &RawProperty) -> RouteEndpoint {
        RouteEndpoint {
            id: property.id,
            latitude: property.latitude,
            longitude: property.longitude,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyPath {
    pub from: RouteEndpoint,
    pub to: RouteEndpoint,
    pub path: PathResult,
}

/// Answers routing queries over whatever the street repository currently holds. Safe to share
/// between threads if the repositories are.
pub struct Router<S, P> {
    streets: S,
    properties: P,
    config: RouterConfig,
    cache: GraphCache,
}

impl<S: StreetRepository, P: PropertyRepository> Router<S, P> {
    pub fn new(streets: S, properties: P, config: RouterConfig) -> Router<S, P> {
        let cache = GraphCache::new(config.cache_ttl());
        debug!("Routing graph will be rebuilt every {:?}", cache.ttl());
        Router {
            streets,
            properties,
            config,
            cache,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The shared graph, built from the street repository if the cached one is missing or stale.
    pub fn canonical_graph(&self) -> Result<Arc<StreetGraph>> {
        self.cache.get_or_build(Instant::now(), || {
            let streets = self
                .streets
                .all_streets()
                .context("couldn't read streets to build the routing graph")?;
            let mut timer = Timer::new("build routing graph");
            let graph = build_graph(&streets, &self.config.graph, &mut timer);
            timer.done();
            Ok(graph)
        })
    }

    pub fn find_path(&self, from: LonLat, to: LonLat) -> Result<PathResult> {
        for pt in [from, to] {
            if !pt.is_valid() {
                return Err(RouteError::InvalidCoordinate(pt).into());
            }
        }
        let graph = self.canonical_graph()?;
        Ok(find_path_on(&graph, from, to))
    }

    pub fn find_path_between_properties(
        &self,
        from: PropertyID,
        to: PropertyID,
    ) -> Result<PropertyPath> {
        let from = self.get_property(from)?;
        let to = self.get_property(to)?;
        let path = self.find_path(from.pt(), to.pt())?;
        Ok(PropertyPath {
            from: RouteEndpoint::from(&from),
            to: RouteEndpoint::from(&to),
            path,
        })
    }

    pub fn inspect_graph(&self) -> Result<GraphSnapshot> {
        Ok(self.canonical_graph()?.snapshot())
    }

    /// The next query rebuilds the graph, regardless of the TTL.
    pub fn invalidate_cache(&self) {
        info!("Routing graph cache invalidated");
        self.cache.invalidate();
    }

    fn get_property(&self, id: PropertyID) -> Result<RawProperty> {
        let property = self
            .properties
            .get_property(id)
            .with_context(|| format!("couldn't look up {}", id))?;
        Ok(property.ok_or(RouteError::PropertyNotFound(id))?)
    }
}

/// Routes between two arbitrary points on a private copy of `graph`. The graph itself is never
/// modified.
pub fn find_path_on(graph: &StreetGraph, from: LonLat, to: LonLat) -> PathResult {
    if !from.is_valid() || !to.is_valid() {
        warn!("Can't route from {} to {}", from, to);
        return PathResult::not_found();
    }
    let mut query = graph.fork();
    let (start, goal) = match (query.attach(from), query.attach(to)) {
        (Some(start), Some(goal)) => (start, goal),
        _ => {
            debug!("Can't route from {} to {} on an empty graph", from, to);
            return PathResult::not_found();
        }
    };

    let (total_cost, node_ids) = match astar(query.graph(), start, goal) {
        Some(pair) => pair,
        None => {
            debug!("No route from {} to {}", start, goal);
            return PathResult::not_found();
        }
    };
    let path_nodes = node_ids
        .iter()
        .filter_map(|id| query.graph().get_node(*id).map(|n| n.pt))
        .collect();
    PathResult {
        found: true,
        path_nodes,
        node_ids,
        total_cost,
    }
}
