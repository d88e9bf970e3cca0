/*
Single-source shortest paths over the relationship graph, backed by the
indexed min-heap so that a frontier node's estimate can be revised in place
with decrease_key instead of re-pushing stale entries.

The durable graph is borrowed immutably; all traversal scratch (distances,
parents, settled flags, the frontier) lives in a per-run context, so
back-to-back queries need no reset step and cannot leak state into each
other.
*/

use crate::error::Error;
use crate::graph::{Graph, NodeId};
use crate::indexed_heap::IndexedMinHeap;

const INFINITY: u64 = u64::MAX;

/// Result of one single-source run: distances and parent back-pointers.
/// Only settled nodes report a distance; after a full run every reachable
/// node is settled.
#[derive(Debug)]
pub struct ShortestPaths {
    source: NodeId,
    dist: Vec<u64>,
    parent: Vec<Option<NodeId>>,
    settled: Vec<bool>,
}

impl ShortestPaths {
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Shortest distance from the source, or `None` if `id` never settled
    /// (unreachable, or cut off by an early-exit run).
    pub fn distance(&self, id: NodeId) -> Option<u64> {
        self.settled[id].then(|| self.dist[id])
    }

    /// The node sequence source..=id along a shortest path, walked back
    /// through the parent pointers. `None` when `id` never settled.
    pub fn path_to(&self, id: NodeId) -> Option<Vec<NodeId>> {
        self.distance(id)?;
        let mut path = vec![id];
        let mut cur = id;
        while let Some(p) = self.parent[cur] {
            path.push(p);
            cur = p;
        }
        path.reverse();
        Some(path)
    }
}

struct Traversal<'g> {
    graph: &'g Graph,
    dist: Vec<u64>,
    parent: Vec<Option<NodeId>>,
    settled: Vec<bool>,
    frontier: IndexedMinHeap,
}

impl<'g> Traversal<'g> {
    fn new(graph: &'g Graph, source: NodeId) -> Self {
        let n = graph.len();
        let mut traversal = Self {
            graph,
            dist: vec![INFINITY; n],
            parent: vec![None; n],
            settled: vec![false; n],
            frontier: IndexedMinHeap::with_universe(n),
        };
        traversal.dist[source] = 0;
        traversal
    }

    /// Settles `v` and relaxes its edges. `dist[v]` is final at this point.
    fn visit(&mut self, v: NodeId) {
        self.settled[v] = true;
        let d = self.dist[v];
        for edge in self.graph.neighbors(v) {
            let x = edge.to;
            if self.settled[x] {
                continue;
            }
            // A sum at or past the sentinel has no representable distance;
            // the edge contributes nothing rather than a wrapped value.
            let candidate = match d.checked_add(edge.weight) {
                Some(c) if c != INFINITY => c,
                _ => continue,
            };
            if !self.frontier.contains(x) {
                self.dist[x] = candidate;
                self.parent[x] = Some(v);
                self.frontier.insert(x, candidate);
            } else if candidate < self.dist[x] {
                self.dist[x] = candidate;
                self.parent[x] = Some(v);
                self.frontier.decrease_key(x, candidate);
            }
        }
    }

    fn run(mut self, source: NodeId, stop_at: Option<NodeId>) -> ShortestPaths {
        self.visit(source);
        if stop_at != Some(source) {
            while let Some((v, _)) = self.frontier.pop() {
                if stop_at == Some(v) {
                    // The popped estimate is final; no need to relax further.
                    self.settled[v] = true;
                    break;
                }
                self.visit(v);
            }
        }
        ShortestPaths {
            source,
            dist: self.dist,
            parent: self.parent,
            settled: self.settled,
        }
    }
}

/// Runs to frontier exhaustion: every node reachable from `source` settles.
pub fn shortest_paths(graph: &Graph, source: NodeId) -> ShortestPaths {
    Traversal::new(graph, source).run(source, None)
}

/// Stops as soon as `target` settles. Distances of other nodes may still be
/// tentative, so only query the target on the result.
pub fn shortest_paths_to(graph: &Graph, source: NodeId, target: NodeId) -> ShortestPaths {
    Traversal::new(graph, source).run(source, Some(target))
}

/// Id for a declared member; a name no declaration introduced is an error
/// rather than an implicitly created isolated node.
pub fn resolve(graph: &Graph, name: &str) -> Result<NodeId, Error> {
    graph
        .node_id(name)
        .ok_or_else(|| Error::UnknownMember(name.to_string()))
}

/// Shortest distance between two declared members by name. `Ok(None)` means
/// the two sit in different components.
pub fn shortest_distance(graph: &Graph, from: &str, to: &str) -> Result<Option<u64>, Error> {
    let source = resolve(graph, from)?;
    let target = resolve(graph, to)?;
    Ok(shortest_paths_to(graph, source, target).distance(target))
}
