//! Owned session state: current topology, display counters, event log and
//! telemetry, plus the four actions a shell can trigger.
//!
//! # Example
//! ```
//! use hybridnet_core::{NetworkInputs, NetworkSession, SessionConfig};
//! use hybridnet_telemetry::{TelemetryConfig, TelemetryHandle};
//!
//! let telemetry = TelemetryHandle::from_config(TelemetryConfig::sample("doc"));
//! let mut session = NetworkSession::new(SessionConfig::default(), telemetry);
//! let inputs = NetworkInputs::default();
//!
//! assert!(session.simulate(&inputs).is_err());
//! session.generate(&inputs).unwrap();
//! let run = session.simulate(&inputs).unwrap();
//! assert!(run.attempted() <= 10);
//! assert_eq!(session.stats().total_nodes, 12);
//! ```

use std::time::Duration;

use hybridnet_telemetry::TelemetryHandle;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{info, warn};

use crate::{
    config::SessionConfig,
    error::{SessionError, SessionResult},
    input::NetworkInputs,
    log::SharedLog,
    probe::{ProbeHandle, ScalabilityProbe},
    render::RenderScene,
    simulator::{SimulationRun, TransmissionParams, TransmissionSimulator},
    stats::NetworkStats,
    topology::{Topology, TopologyGenerator},
};

pub const CLEARED_MESSAGE: &str = "Results cleared";

pub struct NetworkSession {
    generator: TopologyGenerator,
    simulator: TransmissionSimulator,
    probe: ScalabilityProbe,
    topology: Option<Topology>,
    stats: NetworkStats,
    log: SharedLog,
    telemetry: TelemetryHandle,
    rng: ChaCha20Rng,
}

impl NetworkSession {
    pub fn new(config: SessionConfig, telemetry: TelemetryHandle) -> Self {
        Self {
            generator: TopologyGenerator::new(config.generator),
            simulator: TransmissionSimulator::new(config.simulator),
            probe: ScalabilityProbe::new(Duration::from_millis(config.probe.delay_ms)),
            topology: None,
            stats: NetworkStats::default(),
            log: SharedLog::new(config.log.capacity),
            telemetry,
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn topology(&self) -> Option<&Topology> {
        self.topology.as_ref()
    }

    pub fn stats(&self) -> &NetworkStats {
        &self.stats
    }

    pub fn log(&self) -> &SharedLog {
        &self.log
    }

    pub fn telemetry(&self) -> &TelemetryHandle {
        &self.telemetry
    }

    pub fn scene(&self) -> Option<RenderScene> {
        self.topology.as_ref().map(RenderScene::project)
    }

    /// Replace the current topology with a freshly generated one and reset
    /// the counters to match it.
    pub fn generate(&mut self, inputs: &NetworkInputs) -> SessionResult<&Topology> {
        let topology = self.generator.generate(
            &mut self.rng,
            inputs.quantum_count,
            inputs.classical_count,
        );
        self.telemetry.record_counter("generate.runs", 1)?;
        self.telemetry
            .record_counter("generate.nodes", topology.node_count() as u64)?;
        self.telemetry
            .record_counter("generate.edges", topology.edge_count() as u64)?;

        let message = format!(
            "Generated network with {} nodes ({} quantum, {} classical) and {} connections",
            topology.node_count(),
            inputs.quantum_count,
            inputs.classical_count,
            topology.edge_count()
        );
        info!(
            nodes = topology.node_count(),
            edges = topology.edge_count(),
            "network generated"
        );
        self.stats = NetworkStats::for_topology(&topology);
        self.log.push(message);
        Ok(self.topology.insert(topology))
    }

    /// Run one batch of transmission trials against the stored topology.
    pub fn simulate(&mut self, inputs: &NetworkInputs) -> SessionResult<SimulationRun> {
        let topology = require_topology(&self.topology, "simulation")?;
        let params = TransmissionParams {
            qubit_loss_rate: inputs.qubit_loss_rate,
            swap_success_rate: inputs.swap_success_rate,
        };
        let run = self.simulator.simulate(&mut self.rng, topology, params);

        self.telemetry.record_counter("simulate.runs", 1)?;
        self.telemetry
            .record_counter("simulate.attempted", run.attempted() as u64)?;
        self.telemetry
            .record_counter("simulate.success", run.successful() as u64)?;
        self.telemetry
            .record_counter("simulate.skipped", u64::from(run.skipped))?;
        for trial in &run.trials {
            self.telemetry
                .record_latency_ms("simulate.latency_ms", trial.latency_ms);
        }

        self.log
            .extend(run.trials.iter().map(ToString::to_string).chain([run.summary()]));
        self.stats.apply_run(&run);
        info!(
            attempted = run.attempted(),
            successful = run.successful(),
            success_rate = run.success_rate(),
            avg_latency_ms = run.avg_latency_ms(),
            "simulation completed"
        );
        Ok(run)
    }

    /// Empty the log and zero the result counters. Node and connection
    /// counts survive when a topology exists.
    pub fn clear(&mut self) {
        self.log.clear();
        self.stats.reset_results();
        self.log.push(CLEARED_MESSAGE);
        info!("results cleared");
    }

    /// Start the placeholder scalability diagnostic. Must be called from
    /// within a Tokio runtime.
    pub fn scalability_probe(&self) -> SessionResult<ProbeHandle> {
        require_topology(&self.topology, "scalability test")?;
        let handle = self.probe.launch(&self.log)?;
        self.telemetry.record_counter("probe.runs", 1)?;
        Ok(handle)
    }
}

fn require_topology<'a>(
    topology: &'a Option<Topology>,
    action: &'static str,
) -> SessionResult<&'a Topology> {
    topology.as_ref().ok_or_else(|| {
        warn!(action, "no topology generated yet");
        SessionError::MissingTopology { action }
    })
}

#[cfg(test)]
mod tests {
    use hybridnet_telemetry::TelemetryConfig;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::probe::{PROBE_FINDINGS, PROBE_STARTED};

    fn session() -> NetworkSession {
        NetworkSession::new(
            SessionConfig::default(),
            TelemetryHandle::from_config(TelemetryConfig::sample("session")),
        )
    }

    #[test]
    fn generate_sets_counts_and_logs() {
        let mut session = session();
        let inputs = NetworkInputs {
            quantum_count: 3,
            classical_count: 4,
            ..NetworkInputs::default()
        };
        let edges = session.generate(&inputs).unwrap().edge_count();
        assert_eq!(session.stats().total_nodes, 7);
        assert_eq!(session.stats().total_connections, edges);
        assert_eq!(session.stats().success_rate_label(), "0%");
        assert_eq!(
            session.log().messages(),
            vec![format!(
                "Generated network with 7 nodes (3 quantum, 4 classical) and {edges} connections"
            )]
        );
    }

    #[test]
    fn simulate_logs_each_attempt_and_summary() {
        let mut session = session();
        let inputs = NetworkInputs::default();
        session.generate(&inputs).unwrap();
        let run = session.simulate(&inputs).unwrap();

        let messages = session.log().messages();
        assert_eq!(messages[0], run.summary());
        assert_eq!(messages.len(), (run.attempted() + 2).min(10));
        assert_eq!(session.stats().success_rate, Some(run.success_rate()));
        assert_eq!(session.stats().avg_latency_ms, Some(run.avg_latency_ms()));

        let snapshot = session.telemetry().flush();
        assert_eq!(snapshot.counter("hybridnet.simulate.runs"), 1);
        assert_eq!(
            snapshot.counter("hybridnet.simulate.attempted"),
            run.attempted() as u64
        );
    }

    #[test]
    fn simulate_without_topology_changes_nothing() {
        let mut session = session();
        let err = session.simulate(&NetworkInputs::default()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::MissingTopology {
                action: "simulation"
            }
        ));
        assert_eq!(err.notice(), "Please generate a network first!");
        assert_eq!(session.stats(), &NetworkStats::default());
        assert!(session.log().is_empty());
    }

    #[test]
    fn clear_without_topology_zeroes_everything() {
        let mut session = session();
        session.clear();
        assert_eq!(session.stats(), &NetworkStats::default());
        assert_eq!(session.log().messages(), vec![CLEARED_MESSAGE]);
    }

    #[test]
    fn probe_without_topology_is_rejected() {
        let session = session();
        let err = session.scalability_probe().unwrap_err();
        assert!(matches!(err, SessionError::MissingTopology { .. }));
        assert!(session.log().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn probe_appends_canned_findings() {
        let mut session = session();
        session.generate(&NetworkInputs::default()).unwrap();
        let handle = session.scalability_probe().unwrap();
        assert_eq!(session.log().messages()[0], PROBE_STARTED);
        handle.completed().await;
        let messages = session.log().messages();
        assert_eq!(messages[0], PROBE_FINDINGS[1]);
        assert_eq!(messages[1], PROBE_FINDINGS[0]);
    }
}
