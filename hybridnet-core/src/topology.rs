//! Random hybrid topologies: typed nodes plus a spanning tree and a handful of
//! extra links, so every node is reachable from node 0.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{DisplayBounds, GeneratorConfig};

pub type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Quantum,
    Classical,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Quantum => "quantum",
            NodeKind::Classical => "classical",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn distance_to(&self, other: &Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Position,
    /// Display flag only; always false on classical nodes.
    pub entangled: bool,
}

impl Node {
    pub fn is_quantum(&self) -> bool {
        self.kind == NodeKind::Quantum
    }
}

/// Link kind is derived from the endpoints, never chosen.
pub type EdgeKind = NodeKind;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
    /// Opacity hint in `[0.5, 1.0)`.
    pub quality: f64,
}

impl Edge {
    /// Orientation-free identity of the link.
    pub fn key(&self) -> (NodeId, NodeId) {
        edge_key(self.from, self.to)
    }

    pub fn touches(&self, id: NodeId) -> bool {
        self.from == id || self.to == id
    }
}

fn edge_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    (a.min(b), a.max(b))
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Topology {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn quantum_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_quantum()).count()
    }

    pub fn classical_count(&self) -> usize {
        self.node_count() - self.quantum_count()
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        let key = edge_key(a, b);
        self.edges.iter().any(|e| e.key() == key)
    }

    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().filter_map(move |e| {
            if e.from == id {
                Some(e.to)
            } else if e.to == id {
                Some(e.from)
            } else {
                None
            }
        })
    }

    /// Breadth-first walk from node 0. An empty topology counts as connected.
    pub fn is_connected(&self) -> bool {
        if self.nodes.is_empty() {
            return true;
        }
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            adjacency[edge.from].push(edge.to);
            adjacency[edge.to].push(edge.from);
        }
        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        let mut reached = 1;
        while let Some(current) = queue.pop_front() {
            for &next in &adjacency[current] {
                if !seen[next] {
                    seen[next] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }
        reached == self.nodes.len()
    }
}

pub struct TopologyGenerator {
    config: GeneratorConfig,
}

impl TopologyGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Build a fresh topology with `quantum_count` quantum nodes (ids first)
    /// followed by `classical_count` classical ones.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        quantum_count: usize,
        classical_count: usize,
    ) -> Topology {
        let Some(total) = quantum_count.checked_add(classical_count) else {
            warn!(quantum_count, classical_count, "node total overflows, generating nothing");
            return Topology::default();
        };
        let nodes: Vec<Node> = (0..total)
            .map(|id| {
                let kind = if id < quantum_count {
                    NodeKind::Quantum
                } else {
                    NodeKind::Classical
                };
                Node {
                    id,
                    kind,
                    position: random_position(rng, &self.config.bounds),
                    entangled: kind == NodeKind::Quantum && rng.gen_bool(0.5),
                }
            })
            .collect();

        if nodes.is_empty() {
            return Topology::default();
        }

        let mut edges = Vec::with_capacity(total + self.extra_edge_budget(total));
        let mut keys = HashSet::with_capacity(edges.capacity());

        let mut connected: Vec<NodeId> = Vec::with_capacity(total);
        connected.push(0);
        for id in 1..total {
            let anchor = connected[rng.gen_range(0..connected.len())];
            keys.insert(edge_key(anchor, id));
            edges.push(link(rng, &nodes, anchor, id));
            connected.push(id);
        }

        let budget = self.extra_edge_budget(total);
        let mut skipped = 0usize;
        for _ in 0..budget {
            let from = rng.gen_range(0..total);
            let to = rng.gen_range(0..total);
            if from == to || !keys.insert(edge_key(from, to)) {
                skipped += 1;
                continue;
            }
            edges.push(link(rng, &nodes, from, to));
        }
        debug!(
            nodes = total,
            edges = edges.len(),
            extra_budget = budget,
            extra_skipped = skipped,
            "topology generated"
        );

        Topology { nodes, edges }
    }

    fn extra_edge_budget(&self, total: usize) -> usize {
        (total as f64 * self.config.extra_edge_ratio.max(0.0)).floor() as usize
    }
}

impl Default for TopologyGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

fn random_position<R: Rng + ?Sized>(rng: &mut R, bounds: &DisplayBounds) -> Position {
    Position {
        x: bounds.origin_x + rng.gen::<f64>() * bounds.width,
        y: bounds.origin_y + rng.gen::<f64>() * bounds.height,
    }
}

fn link<R: Rng + ?Sized>(rng: &mut R, nodes: &[Node], from: NodeId, to: NodeId) -> Edge {
    let kind = if nodes[from].is_quantum() && nodes[to].is_quantum() {
        EdgeKind::Quantum
    } else {
        EdgeKind::Classical
    };
    Edge {
        from,
        to,
        kind,
        quality: 0.5 + rng.gen::<f64>() * 0.5,
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;

    fn generate(seed: u64, quantum: usize, classical: usize) -> Topology {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        TopologyGenerator::default().generate(&mut rng, quantum, classical)
    }

    #[test]
    fn overflowing_node_total_yields_empty_topology() {
        let topology = generate(3, usize::MAX, 1);
        assert!(topology.is_empty());
        assert_eq!(topology.edge_count(), 0);
    }

    #[test]
    fn spanning_tree_then_extras() {
        let topology = generate(7, 6, 6);
        assert_eq!(topology.node_count(), 12);
        // 11 tree edges plus at most floor(12 * 0.3) = 3 extras.
        assert!((11..=14).contains(&topology.edge_count()));
        assert!(topology.is_connected());
    }

    #[test]
    fn tree_edges_attach_to_earlier_ids() {
        let topology = generate(11, 4, 9);
        for (idx, edge) in topology.edges.iter().take(12).enumerate() {
            assert_eq!(edge.to, idx + 1);
            assert!(edge.from < edge.to);
        }
    }

    #[test]
    fn positions_stay_inside_bounds() {
        let bounds = DisplayBounds::default();
        let topology = generate(3, 20, 20);
        for node in &topology.nodes {
            assert!(node.position.x >= bounds.origin_x);
            assert!(node.position.x < bounds.origin_x + bounds.width);
            assert!(node.position.y >= bounds.origin_y);
            assert!(node.position.y < bounds.origin_y + bounds.height);
        }
    }

    #[test]
    fn classical_nodes_never_entangled() {
        let topology = generate(5, 0, 25);
        assert!(topology.nodes.iter().all(|n| !n.entangled));
        assert_eq!(topology.quantum_count(), 0);
    }

    #[test]
    fn empty_and_single_node_topologies() {
        let empty = generate(1, 0, 0);
        assert!(empty.is_empty());
        assert!(empty.edges.is_empty());
        assert!(empty.is_connected());

        let single = generate(1, 1, 0);
        assert_eq!(single.node_count(), 1);
        assert!(single.edges.is_empty());
    }

    #[test]
    fn zero_ratio_yields_plain_tree() {
        let generator = TopologyGenerator::new(GeneratorConfig {
            extra_edge_ratio: 0.0,
            ..GeneratorConfig::default()
        });
        let mut rng = ChaCha20Rng::seed_from_u64(99);
        let topology = generator.generate(&mut rng, 10, 10);
        assert_eq!(topology.edge_count(), 19);
    }

    #[test]
    fn neighbors_and_has_edge_ignore_orientation() {
        let topology = generate(21, 3, 3);
        let edge = topology.edges[0].clone();
        assert!(topology.has_edge(edge.to, edge.from));
        assert!(topology.neighbors(edge.from).any(|n| n == edge.to));
        assert!(!topology.has_edge(edge.from, edge.from));
    }

    #[test]
    fn disconnected_graph_is_detected() {
        let mut topology = generate(2, 3, 3);
        topology.edges.retain(|e| !e.touches(5));
        assert!(!topology.is_connected());
    }
}
