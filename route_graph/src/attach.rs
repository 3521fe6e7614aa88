use geom::LonLat;

use crate::{NodeID, StreetGraph, ENDPOINT_EPSILON};

/// A private copy of the canonical graph for one query. Origins and destinations get attached by
/// mutating this copy; the canonical graph is never touched.
#[derive(Clone, Debug)]
pub struct QueryGraph {
    graph: StreetGraph,
    attachments: usize,
}

impl StreetGraph {
    /// Deep-copies the graph so a query can mutate it freely.
    pub fn fork(&self) -> QueryGraph {
        QueryGraph {
            graph: self.clone(),
            attachments: 0,
        }
    }
}

impl QueryGraph {
    pub fn graph(&self) -> &StreetGraph {
        &self.graph
    }

    /// Finds the best way into the graph from an arbitrary point, and returns the node to start or
    /// end a path at.
    ///
    /// The closest node by great-circle distance is the baseline. If the point projects onto some
    /// edge even closer than that, the projection wins: landing on an endpoint just uses that
    /// endpoint, and landing in the interior splits the edge with a new attachment node. Returns
    /// None only if the graph is empty.
    pub fn attach(&mut self, pt: LonLat) -> Option<NodeID> {
        let (closest_node, mut best_dist) = self.graph.closest_node(pt)?;

        let mut best_edge = None;
        for edge in self.graph.all_edges() {
            let proj = edge.line.project(pt);
            if proj.dist < best_dist {
                best_dist = proj.dist;
                best_edge = Some((edge, proj));
            }
        }

        let (edge, proj) = match best_edge {
            Some(pair) => pair,
            None => {
                debug!("Attaching {} to the closest node {}", pt, closest_node);
                return Some(closest_node);
            }
        };
        if proj.t <= ENDPOINT_EPSILON {
            debug!("Attaching {} to the edge endpoint {}", pt, edge.n1);
            return Some(edge.n1);
        }
        if proj.t >= 1.0 - ENDPOINT_EPSILON {
            debug!("Attaching {} to the edge endpoint {}", pt, edge.n2);
            return Some(edge.n2);
        }

        self.attachments += 1;
        let id = NodeID::Attachment(self.attachments);
        debug!(
            "Attaching {} by splitting {} - {} with {}",
            pt, edge.n1, edge.n2, id
        );
        self.graph.upsert_node(id, proj.pt);
        self.graph.split_edge(edge.n1, edge.n2, id);
        Some(id)
    }
}
