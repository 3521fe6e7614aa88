use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde::{Deserialize, Serialize};

use geom::{Distance, LonLat};

use crate::StreetGraph;

/// Everything in a routing graph, flattened for debugging and visualization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<NodeSnapshot>,
    /// Each undirected edge appears once
    pub edges: Vec<EdgeSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Only set for points drawn on a street, not synthetic junctions
    pub street: Option<usize>,
    pub sequence: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub from: String,
    pub to: String,
    pub cost: Distance,
    #[serde(skip)]
    line: Option<(LonLat, LonLat)>,
}

impl StreetGraph {
    pub fn snapshot(&self) -> GraphSnapshot {
        let nodes: Vec<NodeSnapshot> = self
            .all_nodes()
            .map(|node| NodeSnapshot {
                id: node.id.to_string(),
                latitude: node.pt.y(),
                longitude: node.pt.x(),
                street: node.street().map(|s| s.0),
                sequence: node.seq(),
            })
            .collect();
        let edges: Vec<EdgeSnapshot> = self
            .all_edges()
            .into_iter()
            .map(|edge| EdgeSnapshot {
                from: edge.n1.to_string(),
                to: edge.n2.to_string(),
                cost: edge.cost,
                line: Some((edge.line.pt1(), edge.line.pt2())),
            })
            .collect();
        GraphSnapshot {
            node_count: nodes.len(),
            edge_count: edges.len(),
            nodes,
            edges,
        }
    }
}

impl GraphSnapshot {
    /// One LineString per edge and one Point per node. Edges read back from JSON have lost their
    /// geometry, so they're looked up from the node list.
    pub fn to_geojson(&self) -> FeatureCollection {
        let mut features = Vec::new();

        for edge in &self.edges {
            let (pt1, pt2) = match edge.line.or_else(|| self.edge_endpoints(edge)) {
                Some(pair) => pair,
                None => {
                    warn!("Edge {} - {} refers to a missing node", edge.from, edge.to);
                    continue;
                }
            };
            let mut feature = Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::LineString(vec![
                    vec![pt1.x(), pt1.y()],
                    vec![pt2.x(), pt2.y()],
                ]))),
                id: None,
                properties: None,
                foreign_members: None,
            };
            feature.set_property("type", "edge");
            feature.set_property("from", edge.from.clone());
            feature.set_property("to", edge.to.clone());
            feature.set_property("cost", edge.cost.inner_meters());
            features.push(feature);
        }

        for node in &self.nodes {
            let mut feature = Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![
                    node.longitude,
                    node.latitude,
                ]))),
                id: None,
                properties: None,
                foreign_members: None,
            };
            feature.set_property("type", "node");
            feature.set_property("id", node.id.clone());
            if let Some(street) = node.street {
                feature.set_property("street", street);
            }
            if let Some(sequence) = node.sequence {
                feature.set_property("sequence", sequence);
            }
            features.push(feature);
        }

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    fn edge_endpoints(&self, edge: &EdgeSnapshot) -> Option<(LonLat, LonLat)> {
        let find = |id: &str| {
            self.nodes
                .iter()
                .find(|n| n.id == id)
                .map(|n| LonLat::new(n.longitude, n.latitude))
        };
        Some((find(&edge.from)?, find(&edge.to)?))
    }
}
