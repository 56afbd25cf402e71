use serde::Serialize;

use crate::{simulator::SimulationRun, topology::Topology};

/// Round half away from zero to one decimal place.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The four display counters. Rate and latency stay `None` until a
/// simulation lands, which is the "0%" / "0ms" zero state.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NetworkStats {
    pub total_nodes: usize,
    pub total_connections: usize,
    pub success_rate: Option<f64>,
    pub avg_latency_ms: Option<f64>,
}

impl NetworkStats {
    /// Fresh counters for a newly generated topology.
    pub fn for_topology(topology: &Topology) -> Self {
        Self {
            total_nodes: topology.node_count(),
            total_connections: topology.edge_count(),
            success_rate: None,
            avg_latency_ms: None,
        }
    }

    /// Fold a run's aggregates in; node and connection counts are left alone.
    pub fn apply_run(&mut self, run: &SimulationRun) {
        self.success_rate = Some(run.success_rate());
        self.avg_latency_ms = Some(run.avg_latency_ms());
    }

    pub fn reset_results(&mut self) {
        self.success_rate = None;
        self.avg_latency_ms = None;
    }

    pub fn success_rate_label(&self) -> String {
        match self.success_rate {
            Some(rate) => format!("{rate:.1}%"),
            None => "0%".into(),
        }
    }

    pub fn avg_latency_label(&self) -> String {
        match self.avg_latency_ms {
            Some(latency) => format!("{latency:.1}ms"),
            None => "0ms".into(),
        }
    }

    /// Label/value pairs in display order.
    pub fn cards(&self) -> [(&'static str, String); 4] {
        [
            ("Total Nodes", self.total_nodes.to_string()),
            ("Total Connections", self.total_connections.to_string()),
            ("Success Rate", self.success_rate_label()),
            ("Avg Latency", self.avg_latency_label()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round_tenth(12.34), 12.3);
        assert_eq!(round_tenth(12.36), 12.4);
        assert_eq!(round_tenth(0.0), 0.0);
        assert_eq!(round_tenth(100.0), 100.0);
    }

    #[test]
    fn zero_state_labels() {
        let stats = NetworkStats::default();
        assert_eq!(stats.success_rate_label(), "0%");
        assert_eq!(stats.avg_latency_label(), "0ms");
    }

    #[test]
    fn populated_labels_keep_one_decimal() {
        let stats = NetworkStats {
            total_nodes: 12,
            total_connections: 14,
            success_rate: Some(90.0),
            avg_latency_ms: Some(61.4),
        };
        let cards = stats.cards();
        assert_eq!(cards[0], ("Total Nodes", "12".to_string()));
        assert_eq!(cards[2].1, "90.0%");
        assert_eq!(cards[3].1, "61.4ms");
    }
}
