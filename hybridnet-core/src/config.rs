use serde::{Deserialize, Serialize};

/// Rectangle node positions are drawn from: x in `[origin_x, origin_x + width)`,
/// y in `[origin_y, origin_y + height)`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct DisplayBounds {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for DisplayBounds {
    fn default() -> Self {
        Self {
            origin_x: 50.0,
            origin_y: 50.0,
            width: 400.0,
            height: 300.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct GeneratorConfig {
    pub bounds: DisplayBounds,
    /// Extra edges attempted after the spanning tree, as a fraction of node count.
    pub extra_edge_ratio: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            bounds: DisplayBounds::default(),
            extra_edge_ratio: 0.3,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct SimulatorConfig {
    pub trials: u32,
    pub latency_floor_ms: f64,
    pub latency_span_ms: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            trials: 10,
            latency_floor_ms: 10.0,
            latency_span_ms: 100.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct LogConfig {
    pub capacity: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { capacity: 10 }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ProbeConfig {
    pub delay_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { delay_ms: 1_000 }
    }
}

/// Everything a [`crate::NetworkSession`] needs besides telemetry.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct SessionConfig {
    pub generator: GeneratorConfig,
    pub simulator: SimulatorConfig,
    pub log: LogConfig,
    pub probe: ProbeConfig,
}
