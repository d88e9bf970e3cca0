/*
Durable relationship graph: an insertion-ordered node arena plus a name
index. Edges are undirected and stored symmetrically, one record in each
endpoint's adjacency list carrying the same weight.

Nodes are created on first reference by a declaration (either endpoint of
an edge). Queries look names up without creating anything, so an unknown
name surfaces to the caller instead of materializing an isolated node.
*/

use fnv::FnvHashMap;

pub type NodeId = usize;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub to: NodeId,
    pub weight: u64,
}

#[derive(Debug)]
struct Node {
    name: String,
    edges: Vec<Edge>,
}

#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    name_to_id: FnvHashMap<String, NodeId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        0..self.nodes.len()
    }

    /// Id for `name`, creating the node on first reference.
    pub fn intern(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            name: name.to_string(),
            edges: Vec::new(),
        });
        self.name_to_id.insert(name.to_string(), id);
        id
    }

    /// Id for `name` if a declaration ever introduced it.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.name_to_id.get(name).copied()
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id].name
    }

    pub fn neighbors(&self, id: NodeId) -> &[Edge] {
        &self.nodes[id].edges
    }

    /// Total number of adjacency records (twice the declaration count).
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    /// Adds an undirected edge, creating either endpoint if absent.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: u64) {
        let u = self.intern(a);
        let v = self.intern(b);
        self.nodes[u].edges.push(Edge { to: v, weight });
        self.nodes[v].edges.push(Edge { to: u, weight });
    }
}
