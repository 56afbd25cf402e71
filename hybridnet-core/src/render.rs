//! Drawing-target-agnostic projection of a topology: links become rotated
//! bars anchored at their `from` node, nodes become labelled discs.

use serde::Serialize;

use crate::topology::{Node, NodeKind, Position, Topology};

pub const QUANTUM_COLOR: &str = "#00ffff";
pub const CLASSICAL_COLOR: &str = "#ffffff";
pub const ENTANGLED_COLOR: &str = "#ff00ff";
pub const NODE_DIAMETER: f64 = 20.0;
pub const EDGE_THICKNESS: f64 = 2.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeSprite {
    pub from: usize,
    pub to: usize,
    pub origin: Position,
    pub length: f64,
    pub angle_deg: f64,
    pub thickness: f64,
    pub color: &'static str,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeSprite {
    pub id: usize,
    pub center: Position,
    /// Top-left corner of the disc's bounding box.
    pub corner: Position,
    pub diameter: f64,
    pub fill: &'static str,
    pub border: &'static str,
    pub glow_px: f64,
    pub label: String,
    pub tooltip: String,
}

impl NodeSprite {
    fn from_node(node: &Node) -> Self {
        let radius = NODE_DIAMETER / 2.0;
        let (fill, border, glow_px) = match node.kind {
            NodeKind::Quantum if node.entangled => (ENTANGLED_COLOR, QUANTUM_COLOR, 10.0),
            NodeKind::Quantum => (QUANTUM_COLOR, QUANTUM_COLOR, 10.0),
            NodeKind::Classical => (CLASSICAL_COLOR, CLASSICAL_COLOR, 5.0),
        };
        let mut tooltip = format!("Node {} ({})", node.id, node.kind);
        if node.entangled {
            tooltip.push_str(" - Entangled");
        }
        Self {
            id: node.id,
            center: node.position,
            corner: Position {
                x: node.position.x - radius,
                y: node.position.y - radius,
            },
            diameter: NODE_DIAMETER,
            fill,
            border,
            glow_px,
            label: node.id.to_string(),
            tooltip,
        }
    }
}

/// Edges come first so a painter drawing in order puts them behind nodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderScene {
    pub edges: Vec<EdgeSprite>,
    pub nodes: Vec<NodeSprite>,
}

impl RenderScene {
    pub fn project(topology: &Topology) -> Self {
        let edges = topology
            .edges
            .iter()
            .filter_map(|edge| {
                let from = topology.node(edge.from)?.position;
                let to = topology.node(edge.to)?.position;
                Some(EdgeSprite {
                    from: edge.from,
                    to: edge.to,
                    origin: from,
                    length: from.distance_to(&to),
                    angle_deg: (to.y - from.y).atan2(to.x - from.x).to_degrees(),
                    thickness: EDGE_THICKNESS,
                    color: match edge.kind {
                        NodeKind::Quantum => QUANTUM_COLOR,
                        NodeKind::Classical => CLASSICAL_COLOR,
                    },
                    opacity: edge.quality,
                })
            })
            .collect();
        let nodes = topology.nodes.iter().map(NodeSprite::from_node).collect();
        Self { edges, nodes }
    }
}
