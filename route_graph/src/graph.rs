use std::collections::BTreeMap;

use geom::{Distance, GPSLine, LonLat};

use crate::{NodeID, StreetID};

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub id: NodeID,
    pub pt: LonLat,
    /// Neighbor to the cost of the edge to it. Every entry is mirrored in the neighbor's map with
    /// the same cost.
    pub neighbors: BTreeMap<NodeID, Distance>,
}

impl GraphNode {
    /// Synthetic junctions and attachment points don't belong to any street.
    pub fn street(&self) -> Option<StreetID> {
        self.id.street()
    }

    pub fn seq(&self) -> Option<usize> {
        self.id.seq()
    }
}

/// One undirected edge, listed once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphEdge {
    pub n1: NodeID,
    pub n2: NodeID,
    pub cost: Distance,
    pub line: GPSLine,
}

/// An undirected weighted graph. Nothing here fails: operations referring to missing nodes quietly
/// do nothing, since the build passes are best-effort cleanup over messy geometry.
///
/// The canonical graph is shared as `Arc<StreetGraph>` and never mutated after it's built. To
/// change anything per query, `fork` it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StreetGraph {
    nodes: BTreeMap<NodeID, GraphNode>,
}

impl StreetGraph {
    pub fn new() -> StreetGraph {
        StreetGraph::default()
    }

    /// Inserts a node with no edges. If the ID already exists, leaves it alone and returns the
    /// existing node.
    pub fn upsert_node(&mut self, id: NodeID, pt: LonLat) -> &GraphNode {
        self.nodes.entry(id).or_insert_with(|| GraphNode {
            id,
            pt,
            neighbors: BTreeMap::new(),
        })
    }

    /// Connects two nodes in both directions, replacing any existing cost. No-op if either node is
    /// missing or both are the same node.
    pub fn add_bidirectional_edge(&mut self, n1: NodeID, n2: NodeID, cost: Distance) {
        if n1 == n2 || !self.nodes.contains_key(&n1) || !self.nodes.contains_key(&n2) {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&n1) {
            node.neighbors.insert(n2, cost);
        }
        if let Some(node) = self.nodes.get_mut(&n2) {
            node.neighbors.insert(n1, cost);
        }
    }

    /// Connects two nodes, with the cost being the great-circle distance between them.
    pub fn connect(&mut self, n1: NodeID, n2: NodeID) {
        if let (Some(a), Some(b)) = (self.nodes.get(&n1), self.nodes.get(&n2)) {
            let cost = a.pt.gps_dist(b.pt);
            self.add_bidirectional_edge(n1, n2, cost);
        }
    }

    pub fn remove_bidirectional_edge(&mut self, n1: NodeID, n2: NodeID) {
        if let Some(node) = self.nodes.get_mut(&n1) {
            node.neighbors.remove(&n2);
        }
        if let Some(node) = self.nodes.get_mut(&n2) {
            node.neighbors.remove(&n1);
        }
    }

    /// Removes the node and every edge touching it.
    pub fn delete_node(&mut self, id: NodeID) {
        let node = match self.nodes.remove(&id) {
            Some(node) => node,
            None => return,
        };
        for neighbor in node.neighbors.keys() {
            if let Some(other) = self.nodes.get_mut(neighbor) {
                other.neighbors.remove(&id);
            }
        }
    }

    /// Moves a node and recalculates the cost of every edge touching it.
    pub fn move_node(&mut self, id: NodeID, pt: LonLat) {
        let neighbors: Vec<NodeID> = match self.nodes.get_mut(&id) {
            Some(node) => {
                node.pt = pt;
                node.neighbors.keys().cloned().collect()
            }
            None => return,
        };
        for neighbor in neighbors {
            self.connect(id, neighbor);
        }
    }

    /// Moves all of `src`'s edges onto `dst`, then deletes `src`. Costs are recalculated from
    /// `dst`'s position.
    pub fn merge_node_into(&mut self, src: NodeID, dst: NodeID) {
        if src == dst || !self.nodes.contains_key(&dst) {
            return;
        }
        let neighbors: Vec<NodeID> = match self.nodes.get(&src) {
            Some(node) => node.neighbors.keys().cloned().collect(),
            None => return,
        };
        for neighbor in neighbors {
            if neighbor != dst {
                self.connect(dst, neighbor);
            }
        }
        self.delete_node(src);
    }

    /// Replaces the edge between `n1` and `n2` with two edges through `middle`.
    pub fn split_edge(&mut self, n1: NodeID, n2: NodeID, middle: NodeID) {
        self.remove_bidirectional_edge(n1, n2);
        self.connect(middle, n1);
        self.connect(middle, n2);
    }

    pub fn get_node(&self, id: NodeID) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeID) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn cost(&self, n1: NodeID, n2: NodeID) -> Option<Distance> {
        self.nodes.get(&n1)?.neighbors.get(&n2).cloned()
    }

    pub fn all_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Each undirected edge is stored on both endpoints, so this is half the total adjacency.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.neighbors.len()).sum::<usize>() / 2
    }

    /// Every edge once, with `n1 < n2`. This is recalculated from scratch each time; callers that
    /// mutate the graph should call it again afterwards.
    pub fn all_edges(&self) -> Vec<GraphEdge> {
        let mut edges = Vec::new();
        for node in self.nodes.values() {
            for (neighbor, cost) in node.neighbors.range(node.id..) {
                if *neighbor == node.id {
                    continue;
                }
                if let Some(other) = self.nodes.get(neighbor) {
                    edges.push(GraphEdge {
                        n1: node.id,
                        n2: other.id,
                        cost: *cost,
                        line: GPSLine::new(node.pt, other.pt),
                    });
                }
            }
        }
        edges
    }

    /// The node closest to `pt` by great-circle distance.
    pub fn closest_node(&self, pt: LonLat) -> Option<(NodeID, Distance)> {
        self.nodes
            .values()
            .map(|n| (n.id, n.pt.gps_dist(pt)))
            .min_by_key(|(_, dist)| *dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn street_node(street: usize, seq: usize) -> NodeID {
        NodeID::Street {
            street: StreetID(street),
            seq,
        }
    }

    fn triangle() -> StreetGraph {
        let mut graph = StreetGraph::new();
        let a = street_node(1, 0);
        let b = street_node(1, 1);
        let c = street_node(1, 2);
        graph.upsert_node(a, LonLat::new(0.0, 0.0));
        graph.upsert_node(b, LonLat::new(0.001, 0.0));
        graph.upsert_node(c, LonLat::new(0.001, 0.001));
        graph.connect(a, b);
        graph.connect(b, c);
        graph.connect(c, a);
        graph
    }

    fn assert_symmetric(graph: &StreetGraph) {
        for node in graph.all_nodes() {
            for (neighbor, cost) in &node.neighbors {
                assert_eq!(graph.cost(*neighbor, node.id), Some(*cost));
            }
        }
    }

    #[test]
    fn upsert_is_idempotent() {
        let mut graph = StreetGraph::new();
        let id = street_node(1, 0);
        graph.upsert_node(id, LonLat::new(1.0, 2.0));
        let existing = graph.upsert_node(id, LonLat::new(3.0, 4.0));
        assert_eq!(existing.pt, LonLat::new(1.0, 2.0));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn edges_are_symmetric() {
        let graph = triangle();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.all_edges().len(), 3);
        assert_symmetric(&graph);
    }

    #[test]
    fn missing_nodes_are_ignored() {
        let mut graph = triangle();
        let ghost = NodeID::Junction(99);
        graph.add_bidirectional_edge(street_node(1, 0), ghost, Distance::meters(5.0));
        graph.remove_bidirectional_edge(ghost, street_node(1, 0));
        graph.delete_node(ghost);
        graph.merge_node_into(ghost, street_node(1, 0));
        graph.move_node(ghost, LonLat::new(5.0, 5.0));
        graph.add_bidirectional_edge(street_node(1, 0), street_node(1, 0), Distance::ZERO);
        assert_eq!(graph, triangle());
    }

    #[test]
    fn delete_leaves_no_dangling_neighbors() {
        let mut graph = triangle();
        graph.delete_node(street_node(1, 1));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        for node in graph.all_nodes() {
            assert!(!node.neighbors.contains_key(&street_node(1, 1)));
        }
    }

    #[test]
    fn clone_is_deep() {
        let original = triangle();
        let before: Vec<GraphEdge> = original.all_edges();

        let mut copy = original.clone();
        copy.delete_node(street_node(1, 0));
        copy.move_node(street_node(1, 1), LonLat::new(0.5, 0.5));
        copy.upsert_node(NodeID::Attachment(1), LonLat::new(0.0, 0.0));

        assert_eq!(original.node_count(), 3);
        assert_eq!(original.edge_count(), 3);
        assert_eq!(original.all_edges(), before);
    }

    #[test]
    fn merge_rehomes_edges() {
        let mut graph = triangle();
        let d = street_node(2, 0);
        graph.upsert_node(d, LonLat::new(0.0, 0.001));
        graph.connect(d, street_node(1, 0));

        // Collapse node 0 into node 1
        graph.merge_node_into(street_node(1, 0), street_node(1, 1));
        assert!(!graph.contains(street_node(1, 0)));
        assert!(graph.cost(d, street_node(1, 1)).is_some());
        assert!(graph.cost(street_node(1, 2), street_node(1, 1)).is_some());
        // No self-loop from the edge that used to connect the two
        assert_eq!(graph.cost(street_node(1, 1), street_node(1, 1)), None);
        assert_symmetric(&graph);
    }

    #[test]
    fn split_preserves_length_along_a_line() {
        let mut graph = StreetGraph::new();
        let a = street_node(1, 0);
        let b = street_node(1, 1);
        graph.upsert_node(a, LonLat::new(0.0, 0.0));
        graph.upsert_node(b, LonLat::new(0.002, 0.0));
        graph.connect(a, b);
        let original = graph.cost(a, b).unwrap();

        let mid = NodeID::Junction(1);
        graph.upsert_node(mid, LonLat::new(0.0005, 0.0));
        graph.split_edge(a, b, mid);
        assert_eq!(graph.cost(a, b), None);
        let sum = graph.cost(a, mid).unwrap() + graph.cost(mid, b).unwrap();
        assert!(sum.approx_eq(original, 1e-6));
        assert_symmetric(&graph);
    }

    #[test]
    fn closest_node() {
        let graph = triangle();
        assert_eq!(
            graph.closest_node(LonLat::new(0.0011, 0.0009)).map(|(id, _)| id),
            Some(street_node(1, 2))
        );
        assert_eq!(StreetGraph::new().closest_node(LonLat::new(0.0, 0.0)), None);
    }
}
