use std::collections::{BinaryHeap, HashMap};

use abstutil::PriorityQueueItem;
use geom::Distance;

use crate::{NodeID, StreetGraph};

/// A* from `start` to `goal`, using the great-circle distance to the goal as the heuristic. Edge
/// costs are great-circle distances too, so the heuristic never overestimates.
///
/// Returns the total cost and every node along the path, including both ends. None means the two
/// nodes are in different connected components (or don't exist).
pub fn astar(graph: &StreetGraph, start: NodeID, goal: NodeID) -> Option<(Distance, Vec<NodeID>)> {
    let goal_pt = graph.get_node(goal)?.pt;
    if !graph.contains(start) {
        return None;
    }
    if start == goal {
        return Some((Distance::ZERO, vec![start]));
    }

    let heuristic = |id: NodeID| -> Distance {
        graph
            .get_node(id)
            .map(|n| n.pt.gps_dist(goal_pt))
            .unwrap_or(Distance::ZERO)
    };

    // Missing entries are infinitely far
    let mut cost_so_far: HashMap<NodeID, Distance> = HashMap::new();
    let mut backrefs: HashMap<NodeID, NodeID> = HashMap::new();
    let mut queue: BinaryHeap<PriorityQueueItem<Distance, NodeID>> = BinaryHeap::new();

    cost_so_far.insert(start, Distance::ZERO);
    queue.push(PriorityQueueItem::new(heuristic(start), start));

    while let Some(PriorityQueueItem { cost, value }) = queue.pop() {
        let current = value;
        let current_cost = cost_so_far[&current];
        // A cheaper route here was found after this entry was queued
        if cost > current_cost + heuristic(current) {
            continue;
        }

        if current == goal {
            let mut path = vec![goal];
            let mut at = goal;
            while let Some(prev) = backrefs.get(&at) {
                path.push(*prev);
                at = *prev;
            }
            path.reverse();
            return Some((current_cost, path));
        }

        let node = match graph.get_node(current) {
            Some(node) => node,
            None => continue,
        };
        for (next, edge_cost) in &node.neighbors {
            let next_cost = current_cost + *edge_cost;
            if cost_so_far
                .get(next)
                .map(|existing| next_cost < *existing)
                .unwrap_or(true)
            {
                cost_so_far.insert(*next, next_cost);
                backrefs.insert(*next, current);
                queue.push(PriorityQueueItem::new(next_cost + heuristic(*next), *next));
            }
        }
    }

    None
}
