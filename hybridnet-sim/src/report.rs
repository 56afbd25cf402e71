//! Text and JSON renderings of a session for the terminal.

use hybridnet_core::{NetworkInputs, NetworkSession, NetworkStats, RenderScene};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub inputs: NetworkInputs,
    pub stats: NetworkStats,
    pub labels: StatLabels,
    /// Newest first.
    pub log: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<RenderScene>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatLabels {
    pub total_nodes: String,
    pub total_connections: String,
    pub success_rate: String,
    pub avg_latency: String,
}

impl From<&NetworkStats> for StatLabels {
    fn from(stats: &NetworkStats) -> Self {
        Self {
            total_nodes: stats.total_nodes.to_string(),
            total_connections: stats.total_connections.to_string(),
            success_rate: stats.success_rate_label(),
            avg_latency: stats.avg_latency_label(),
        }
    }
}

impl SessionReport {
    pub fn capture(session: &NetworkSession, inputs: NetworkInputs, with_scene: bool) -> Self {
        Self {
            inputs,
            stats: session.stats().clone(),
            labels: StatLabels::from(session.stats()),
            log: session.log().lines(),
            scene: if with_scene { session.scene() } else { None },
        }
    }
}

pub fn stats_lines(stats: &NetworkStats) -> Vec<String> {
    stats
        .cards()
        .into_iter()
        .map(|(label, value)| format!("{label:>17}: {value}"))
        .collect()
}

pub fn log_lines(session: &NetworkSession) -> Vec<String> {
    let lines = session.log().lines();
    if lines.is_empty() {
        return vec![
            "No simulation results yet. Generate a network and run simulation to see results."
                .into(),
        ];
    }
    lines
}

/// One line per node and per link, links first like the drawing order.
pub fn scene_lines(scene: &RenderScene) -> Vec<String> {
    let mut lines = Vec::with_capacity(scene.edges.len() + scene.nodes.len());
    for edge in &scene.edges {
        lines.push(format!(
            "link {:>3} -> {:<3} len={:>6.1} angle={:>7.1}° color={} opacity={:.2}",
            edge.from, edge.to, edge.length, edge.angle_deg, edge.color, edge.opacity
        ));
    }
    for node in &scene.nodes {
        lines.push(format!(
            "node {:>3} at ({:>5.1}, {:>5.1}) fill={} {}",
            node.label, node.center.x, node.center.y, node.fill, node.tooltip
        ));
    }
    lines
}
