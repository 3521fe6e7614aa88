use abstutil::Timer;
use geom::{Distance, LonLat};

use crate::{GraphEdge, GraphNode, NodeID, StreetGraph, ENDPOINT_EPSILON};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SnapResults {
    /// Nodes collapsed into the endpoint of a nearby edge
    pub merged: usize,
    /// Edges split to run through a nearby node
    pub split: usize,
}

struct SnapCandidate {
    edge: GraphEdge,
    pt: LonLat,
    dist: Distance,
    merge_into: Option<NodeID>,
}

/// Compensates for imprecise drawing. Every node within `threshold` of an edge it isn't already
/// connected to gets pulled onto the closest such edge. If that spot is one of the edge's
/// endpoints, the node merges into the endpoint. Otherwise the node moves onto the edge, and the
/// edge is split to pass through it.
///
/// The graph changes shape after every snap, so edges are recalculated for each node.
pub fn snap_nodes_to_edges(
    graph: &mut StreetGraph,
    threshold: Distance,
    timer: &mut Timer,
) -> SnapResults {
    let mut results = SnapResults::default();
    if threshold <= Distance::ZERO {
        return results;
    }
    timer.start("snap nodes to edges");

    let ids: Vec<NodeID> = graph.all_nodes().map(|n| n.id).collect();
    for id in ids {
        let candidate = match graph.get_node(id) {
            Some(node) => find_snap_candidate(node, &graph.all_edges(), threshold),
            // Merged away already
            None => continue,
        };
        let candidate = match candidate {
            Some(c) => c,
            None => continue,
        };

        if let Some(target) = candidate.merge_into {
            debug!(
                "Merging {} into {}, {} away",
                id, target, candidate.dist
            );
            graph.merge_node_into(id, target);
            results.merged += 1;
        } else {
            debug!(
                "Snapping {} onto the edge {} - {}, {} away",
                id, candidate.edge.n1, candidate.edge.n2, candidate.dist
            );
            graph.move_node(id, candidate.pt);
            graph.split_edge(candidate.edge.n1, candidate.edge.n2, id);
            results.split += 1;
        }
    }

    timer.stop("snap nodes to edges");
    results
}

fn find_snap_candidate(
    node: &GraphNode,
    edges: &[GraphEdge],
    threshold: Distance,
) -> Option<SnapCandidate> {
    let mut best: Option<SnapCandidate> = None;
    for edge in edges {
        if edge.n1 == node.id
            || edge.n2 == node.id
            || node.neighbors.contains_key(&edge.n1)
            || node.neighbors.contains_key(&edge.n2)
        {
            continue;
        }

        let proj = edge.line.project(node.pt);
        if proj.dist >= threshold {
            continue;
        }
        if best.as_ref().map(|b| proj.dist < b.dist).unwrap_or(true) {
            let merge_into = if proj.t <= ENDPOINT_EPSILON {
                Some(edge.n1)
            } else if proj.t >= 1.0 - ENDPOINT_EPSILON {
                Some(edge.n2)
            } else {
                None
            };
            best = Some(SnapCandidate {
                edge: *edge,
                pt: proj.pt,
                dist: proj.dist,
                merge_into,
            });
        }
    }
    best
}
