use std::collections::HashSet;

use hybridnet_core::{EdgeKind, NodeKind, Topology, TopologyGenerator};

fn generate(quantum: usize, classical: usize) -> Topology {
    TopologyGenerator::default().generate(&mut rand::thread_rng(), quantum, classical)
}

#[test]
fn node_counts_kinds_and_connectivity_hold() {
    for (quantum, classical) in [(0, 1), (1, 0), (1, 1), (6, 6), (0, 12), (17, 3), (40, 60)] {
        for _ in 0..20 {
            let topology = generate(quantum, classical);
            assert_eq!(topology.node_count(), quantum + classical);
            for (idx, node) in topology.nodes.iter().enumerate() {
                assert_eq!(node.id, idx);
                let expected = if idx < quantum {
                    NodeKind::Quantum
                } else {
                    NodeKind::Classical
                };
                assert_eq!(node.kind, expected);
            }
            assert!(
                topology.is_connected(),
                "({quantum}, {classical}) produced a disconnected graph"
            );
        }
    }
}

#[test]
fn edges_are_unique_and_typed_by_endpoints() {
    for _ in 0..50 {
        let topology = generate(8, 7);
        let mut seen = HashSet::new();
        for edge in &topology.edges {
            assert_ne!(edge.from, edge.to, "self loop");
            assert!(seen.insert(edge.key()), "duplicate edge {:?}", edge.key());
            let both_quantum =
                topology.nodes[edge.from].is_quantum() && topology.nodes[edge.to].is_quantum();
            assert_eq!(edge.kind == EdgeKind::Quantum, both_quantum);
            assert!((0.5..1.0).contains(&edge.quality));
        }
        let n = topology.node_count();
        assert!(topology.edge_count() >= n - 1);
        assert!(topology.edge_count() <= n - 1 + (n as f64 * 0.3).floor() as usize);
    }
}

#[test]
fn empty_request_yields_empty_topology() {
    let topology = generate(0, 0);
    assert!(topology.nodes.is_empty());
    assert!(topology.edges.is_empty());
}

#[test]
fn entanglement_appears_only_on_quantum_nodes() {
    let mut entangled = 0;
    for _ in 0..20 {
        let topology = generate(10, 10);
        for node in &topology.nodes {
            if node.entangled {
                assert!(node.is_quantum());
                entangled += 1;
            }
        }
    }
    // 200 fair coin flips; hitting zero or all is not a realistic outcome.
    assert!(entangled > 0 && entangled < 200);
}
