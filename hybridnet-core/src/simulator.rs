//! Monte-carlo transmission test over an existing topology.
//!
//! Each trial draws a source and destination uniformly over all node ids. A
//! trial that draws the same node twice is dropped rather than redrawn, so the
//! attempted count may fall below the configured trial count and the
//! aggregates are computed over attempted trials only.

use std::fmt;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::{
    config::SimulatorConfig,
    stats::round_tenth,
    topology::{NodeId, Topology},
};

/// Per-run loss and swap probabilities.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TransmissionParams {
    pub qubit_loss_rate: f64,
    /// Carried for symmetry with the input form; the success draw ignores it.
    pub swap_success_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trial {
    /// 1-based position among all drawn trials, skipped ones included.
    pub ordinal: u32,
    pub from: NodeId,
    pub to: NodeId,
    pub succeeded: bool,
    pub latency_ms: f64,
}

impl fmt::Display for Trial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transmission {}: Node {} → Node {} {} ({:.1}ms)",
            self.ordinal,
            self.from,
            self.to,
            if self.succeeded { "SUCCESS" } else { "FAILED" },
            self.latency_ms
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationRun {
    pub params: TransmissionParams,
    /// Number of draws, attempted or not.
    pub drawn: u32,
    /// Attempted trials in draw order.
    pub trials: Vec<Trial>,
    pub skipped: u32,
}

impl SimulationRun {
    pub fn attempted(&self) -> usize {
        self.trials.len()
    }

    pub fn successful(&self) -> usize {
        self.trials.iter().filter(|t| t.succeeded).count()
    }

    pub fn total_latency_ms(&self) -> f64 {
        self.trials.iter().map(|t| t.latency_ms).sum()
    }

    /// Percentage of attempted trials that succeeded, rounded to a tenth.
    /// Zero when nothing was attempted.
    pub fn success_rate(&self) -> f64 {
        if self.trials.is_empty() {
            return 0.0;
        }
        round_tenth(100.0 * self.successful() as f64 / self.attempted() as f64)
    }

    /// Mean latency over attempted trials, rounded to a tenth.
    pub fn avg_latency_ms(&self) -> f64 {
        if self.trials.is_empty() {
            return 0.0;
        }
        round_tenth(self.total_latency_ms() / self.attempted() as f64)
    }

    pub fn summary(&self) -> String {
        format!(
            "Simulation completed: {:.1}% success rate, {:.1}ms average latency",
            self.success_rate(),
            self.avg_latency_ms()
        )
    }
}

pub struct TransmissionSimulator {
    config: SimulatorConfig,
}

impl TransmissionSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    pub fn simulate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        topology: &Topology,
        params: TransmissionParams,
    ) -> SimulationRun {
        let node_count = topology.node_count();
        let mut trials = Vec::with_capacity(self.config.trials as usize);
        let mut skipped = 0u32;

        for ordinal in 1..=self.config.trials {
            if node_count == 0 {
                skipped += 1;
                continue;
            }
            let from = rng.gen_range(0..node_count);
            let to = rng.gen_range(0..node_count);
            if from == to {
                skipped += 1;
                continue;
            }
            let succeeded = rng.gen::<f64>() > params.qubit_loss_rate;
            let latency_ms =
                self.config.latency_floor_ms + rng.gen::<f64>() * self.config.latency_span_ms;
            trials.push(Trial {
                ordinal,
                from,
                to,
                succeeded,
                latency_ms,
            });
        }

        debug!(
            drawn = self.config.trials,
            attempted = trials.len(),
            skipped,
            "transmission trials finished"
        );

        SimulationRun {
            params,
            drawn: self.config.trials,
            trials,
            skipped,
        }
    }
}

impl Default for TransmissionSimulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}
