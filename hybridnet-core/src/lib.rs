//! HybridNet core: synthetic hybrid quantum/classical network playground.
//!
//! The crate generates random, always-connected topologies of quantum and
//! classical nodes, runs a small monte-carlo transmission test against them,
//! and keeps the display counters plus a bounded event log in a single owned
//! [`NetworkSession`]. Nothing here models real quantum physics: entanglement
//! is a coin-flip display flag and the swap success rate is accepted but
//! unused. Rendering is left to a shell, which consumes [`RenderScene`].

pub mod config;
pub mod error;
pub mod input;
pub mod log;
pub mod probe;
pub mod render;
pub mod session;
pub mod simulator;
pub mod stats;
pub mod topology;

pub use config::{
    DisplayBounds, GeneratorConfig, LogConfig, ProbeConfig, SessionConfig, SimulatorConfig,
};
pub use error::{SessionError, SessionResult};
pub use input::{InputField, InputFields, NetworkInputs};
pub use log::{EventLog, LogEntry, SharedLog};
pub use probe::{ProbeHandle, ScalabilityProbe};
pub use render::{EdgeSprite, NodeSprite, RenderScene};
pub use session::NetworkSession;
pub use simulator::{SimulationRun, TransmissionParams, TransmissionSimulator, Trial};
pub use stats::NetworkStats;
pub use topology::{Edge, EdgeKind, Node, NodeId, NodeKind, Position, Topology, TopologyGenerator};
