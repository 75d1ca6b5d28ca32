//! Breadth-first path search over the network graph.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::domain::{BusId, RouteId, StopId};

use super::graph::AdjacencyMap;

/// One ride between adjacent stops on a specific bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: StopId,
    pub to: StopId,
    pub route: RouteId,
    pub bus: BusId,
}

/// Find a path with the fewest segments from `start` to `end`.
///
/// Returns `Some(vec![])` when `start == end`, and `None` when `end` cannot
/// be reached (or not within `max_hops` segments). Among equally short
/// paths, the one found first in edge enumeration order wins.
///
/// A stop is marked visited when it is dequeued, so it may sit in the
/// queue more than once; only its first dequeued path is extended.
pub fn find_path(
    graph: &AdjacencyMap,
    start: StopId,
    end: StopId,
    max_hops: Option<usize>,
) -> Option<Vec<Segment>> {
    let mut visited: HashSet<StopId> = HashSet::new();
    let mut queue: VecDeque<(StopId, Vec<Segment>)> = VecDeque::new();
    queue.push_back((start, Vec::new()));

    while let Some((stop, path)) = queue.pop_front() {
        if stop == end {
            return Some(path);
        }
        if !visited.insert(stop) {
            continue;
        }
        if max_hops.is_some_and(|max| path.len() >= max) {
            continue;
        }

        trace!(stop = %stop, hops = path.len(), "BFS expanding stop");

        for edge in graph.edges_from(stop) {
            if visited.contains(&edge.to) {
                continue;
            }
            let mut next = path.clone();
            next.push(Segment {
                from: stop,
                to: edge.to,
                route: edge.route,
                bus: edge.bus,
            });
            queue.push_back((edge.to, next));
        }
    }

    None
}
