//! Turns raw street records into a `StreetGraph`. Passes run in order and mutate the graph in
//! place; nothing else can see it until `build_graph` returns.

mod intersections;
mod snap;

use serde::{Deserialize, Serialize};

use abstutil::{prettyprint_usize, Timer};
use geom::{Distance, GPSLine};

use crate::{NodeID, RawStreet, RawStreetNode, StreetGraph, StreetID};

pub use self::intersections::add_intersection_nodes;
pub use self::snap::{snap_nodes_to_edges, SnapResults};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Nodes closer than this to an edge they're not connected to get snapped onto it. Zero
    /// disables snapping.
    pub snap_threshold: Distance,
}

impl Default for GraphOptions {
    fn default() -> GraphOptions {
        GraphOptions {
            snap_threshold: Distance::ZERO,
        }
    }
}

/// A piece of a street between two consecutive drawn points. Only lives during the build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub street: StreetID,
    pub n1: NodeID,
    pub n2: NodeID,
    pub line: GPSLine,
}

impl Segment {
    fn shares_endpoint(&self, other: &Segment) -> bool {
        self.n1 == other.n1 || self.n1 == other.n2 || self.n2 == other.n1 || self.n2 == other.n2
    }
}

pub fn build_graph(streets: &[RawStreet], opts: &GraphOptions, timer: &mut Timer) -> StreetGraph {
    timer.start("build routing graph");

    let (mut graph, segments) = add_streets(streets, timer);
    let junctions = add_intersection_nodes(&mut graph, &segments, timer);
    if opts.snap_threshold > Distance::ZERO {
        let results = snap_nodes_to_edges(&mut graph, opts.snap_threshold, timer);
        info!(
            "Snapping within {} merged {} nodes and split {} edges",
            opts.snap_threshold,
            prettyprint_usize(results.merged),
            prettyprint_usize(results.split)
        );
    }

    info!(
        "Routing graph from {} streets has {} nodes ({} junctions) and {} edges",
        prettyprint_usize(streets.len()),
        prettyprint_usize(graph.node_count()),
        prettyprint_usize(junctions),
        prettyprint_usize(graph.edge_count())
    );
    timer.stop("build routing graph");
    graph
}

/// One node per drawn point and one edge per consecutive pair. Also returns every segment, for the
/// intersection pass.
pub fn add_streets(streets: &[RawStreet], timer: &mut Timer) -> (StreetGraph, Vec<Segment>) {
    timer.start("add streets");
    let mut graph = StreetGraph::new();
    let mut segments = Vec::new();

    for street in streets {
        let mut nodes: Vec<RawStreetNode> = street
            .nodes
            .iter()
            .filter(|n| {
                if n.pt().is_valid() {
                    true
                } else {
                    warn!(
                        "Skipping point {} of {}, it has a bad coordinate {}",
                        n.sequence,
                        street.id,
                        n.pt()
                    );
                    false
                }
            })
            .cloned()
            .collect();
        nodes.sort_by_key(|n| n.sequence);
        nodes.dedup_by_key(|n| n.sequence);
        if nodes.len() < 2 {
            timer.note(format!(
                "{} has fewer than 2 usable points, skipping it",
                street.id
            ));
            continue;
        }

        for n in &nodes {
            graph.upsert_node(
                NodeID::Street {
                    street: street.id,
                    seq: n.sequence,
                },
                n.pt(),
            );
        }

        for pair in nodes.windows(2) {
            let n1 = NodeID::Street {
                street: street.id,
                seq: pair[0].sequence,
            };
            let n2 = NodeID::Street {
                street: street.id,
                seq: pair[1].sequence,
            };
            let line = GPSLine::new(pair[0].pt(), pair[1].pt());
            graph.add_bidirectional_edge(n1, n2, line.length());
            segments.push(Segment {
                street: street.id,
                n1,
                n2,
                line,
            });
        }
    }

    timer.stop("add streets");
    (graph, segments)
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    use super::*;

    fn node(street: usize, seq: usize) -> NodeID {
        NodeID::Street {
            street: StreetID(street),
            seq,
        }
    }

    #[test]
    fn consecutive_points_get_one_edge() {
        let street = RawStreet::from_lon_lats(
            StreetID(1),
            "Main",
            &[(0.0, 0.0), (0.001, 0.0), (0.001, 0.001), (0.002, 0.002)],
        );
        let graph = build_graph(
            &[street.clone()],
            &GraphOptions::default(),
            &mut Timer::throwaway(),
        );
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        for pair in street.nodes.windows(2) {
            let n1 = node(1, pair[0].sequence);
            let n2 = node(1, pair[1].sequence);
            let expected = pair[0].pt().gps_dist(pair[1].pt());
            assert_eq!(graph.cost(n1, n2), Some(expected));
            assert_eq!(graph.cost(n2, n1), Some(expected));
        }
    }

    #[test]
    fn sorts_by_sequence() {
        let mut street = RawStreet::from_lon_lats(
            StreetID(3),
            "Shuffled",
            &[(0.0, 0.0), (0.001, 0.0), (0.002, 0.0)],
        );
        street.nodes.reverse();
        let graph = build_graph(&[street], &GraphOptions::default(), &mut Timer::throwaway());
        assert!(graph.cost(node(3, 0), node(3, 1)).is_some());
        assert!(graph.cost(node(3, 1), node(3, 2)).is_some());
        assert_eq!(graph.cost(node(3, 0), node(3, 2)), None);
    }

    #[test]
    fn degenerate_streets_contribute_nothing() {
        let single = RawStreet::from_lon_lats(StreetID(1), "Stub", &[(0.0, 0.0)]);
        let empty = RawStreet::from_lon_lats(StreetID(2), "Empty", &[]);
        let mut broken = RawStreet::from_lon_lats(
            StreetID(3),
            "Broken",
            &[(0.01, 0.01), (f64::NAN, 0.02)],
        );
        broken.nodes[1].latitude = f64::INFINITY;
        // Finite, but nowhere on Earth
        let typo = RawStreet::from_lon_lats(
            StreetID(4),
            "Typo",
            &[(0.0, 1e200), (0.001, -1e200), (200.0, 0.0)],
        );
        let graph = build_graph(
            &[single, empty, broken, typo],
            &GraphOptions::default(),
            &mut Timer::throwaway(),
        );
        assert!(graph.is_empty());
    }

    #[test]
    fn zero_length_segments_dont_break_the_build() {
        let street = RawStreet::from_lon_lats(
            StreetID(1),
            "Doubled",
            &[(0.0, 0.0), (0.0, 0.0), (0.001, 0.0)],
        );
        let crossing = RawStreet::from_lon_lats(
            StreetID(2),
            "Crossing",
            &[(0.0005, -0.001), (0.0005, 0.001)],
        );
        let graph = build_graph(
            &[street, crossing],
            &GraphOptions::default(),
            &mut Timer::throwaway(),
        );
        assert_eq!(graph.cost(node(1, 0), node(1, 1)), Some(Distance::ZERO));
        assert!(graph.contains(NodeID::Junction(1)));
    }

    #[test]
    fn random_networks_stay_symmetric() {
        let mut rng = XorShiftRng::seed_from_u64(42);
        let mut streets = Vec::new();
        for id in 0..20 {
            let mut pts = Vec::new();
            for _ in 0..rng.gen_range(2..6) {
                pts.push((rng.gen_range(0.0..0.01), rng.gen_range(0.0..0.01)));
            }
            streets.push(RawStreet::from_lon_lats(StreetID(id), "Random", &pts));
        }
        let graph = build_graph(
            &streets,
            &GraphOptions {
                snap_threshold: Distance::meters(20.0),
            },
            &mut Timer::throwaway(),
        );

        let mut adjacency = 0;
        for n in graph.all_nodes() {
            for (neighbor, cost) in &n.neighbors {
                adjacency += 1;
                assert_eq!(graph.cost(*neighbor, n.id), Some(*cost));
                assert!(*cost >= Distance::ZERO);
                let other = graph.get_node(*neighbor).unwrap();
                let expected = n.pt.gps_dist(other.pt);
                assert!(cost.approx_eq(expected, 1e-6));
            }
        }
        assert_eq!(adjacency, 2 * graph.edge_count());
    }

    #[test]
    fn options_from_partial_json() {
        let opts: GraphOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, GraphOptions::default());
        let opts: GraphOptions = serde_json::from_str(r#"{"snap_threshold": 7.5}"#).unwrap();
        assert_eq!(opts.snap_threshold, Distance::meters(7.5));
    }
}
