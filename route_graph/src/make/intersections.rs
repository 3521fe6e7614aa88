use std::collections::{BTreeMap, HashMap};

use abstutil::{prettyprint_usize, Timer};
use geom::{Distance, HashableLonLat, LonLat};

use super::Segment;
use crate::{NodeID, StreetGraph};

/// Where one segment gets crossed
struct Crossing {
    junction: HashableLonLat,
    percent_along: f64,
}

/// Finds every place where two segments cross strictly inside both of them, without sharing a
/// drawn point, and splices a junction node in there. Every segment that's crossed loses its
/// original edge and is rebuilt as a chain through its junctions, in order.
///
/// Three or more segments crossing at the same spot share one junction. Parallel and collinear
/// overlaps are skipped, so two streets drawn along the same path stay unconnected.
///
/// This checks all pairs of segments. Returns the number of junctions created.
pub fn add_intersection_nodes(
    graph: &mut StreetGraph,
    segments: &[Segment],
    timer: &mut Timer,
) -> usize {
    timer.start("add intersection nodes");

    let mut crossings_per_segment: BTreeMap<usize, Vec<Crossing>> = BTreeMap::new();
    let mut junctions: HashMap<HashableLonLat, NodeID> = HashMap::new();

    for (idx1, seg1) in segments.iter().enumerate() {
        if seg1.line.length() == Distance::ZERO {
            continue;
        }
        for (idx2, seg2) in segments.iter().enumerate().skip(idx1 + 1) {
            if seg1.shares_endpoint(seg2) || seg2.line.length() == Distance::ZERO {
                continue;
            }
            let pt = match seg1.line.intersection(&seg2.line) {
                Some(pt) => pt,
                None => continue,
            };
            if is_endpoint(seg1, pt) || is_endpoint(seg2, pt) {
                continue;
            }

            let percent1 = seg1.line.percent_along(pt);
            let percent2 = seg2.line.percent_along(pt);
            if !is_interior(percent1) || !is_interior(percent2) {
                continue;
            }

            let key = pt.to_hashable();
            if !junctions.contains_key(&key) {
                let id = NodeID::Junction(junctions.len() + 1);
                graph.upsert_node(id, pt);
                junctions.insert(key, id);
            }

            crossings_per_segment
                .entry(idx1)
                .or_insert_with(Vec::new)
                .push(Crossing {
                    junction: key,
                    percent_along: percent1,
                });
            crossings_per_segment
                .entry(idx2)
                .or_insert_with(Vec::new)
                .push(Crossing {
                    junction: key,
                    percent_along: percent2,
                });
        }
    }

    for (idx, mut crossings) in crossings_per_segment {
        let seg = &segments[idx];
        crossings.sort_by(|a, b| a.percent_along.total_cmp(&b.percent_along));
        // The same junction shows up once per other segment crossing here
        crossings.dedup_by_key(|c| c.junction);

        graph.remove_bidirectional_edge(seg.n1, seg.n2);
        let mut prev = seg.n1;
        for crossing in crossings {
            if let Some(junction) = junctions.get(&crossing.junction) {
                graph.connect(prev, *junction);
                prev = *junction;
            }
        }
        graph.connect(prev, seg.n2);
    }

    timer.note(format!(
        "Added {} junctions where streets cross",
        prettyprint_usize(junctions.len())
    ));
    timer.stop("add intersection nodes");
    junctions.len()
}

fn is_endpoint(seg: &Segment, pt: LonLat) -> bool {
    pt.approx_eq(seg.line.pt1()) || pt.approx_eq(seg.line.pt2())
}

fn is_interior(percent: f64) -> bool {
    percent > 0.0 && percent < 1.0
}
