use hybridnet_telemetry::TelemetryError;
use thiserror::Error;

pub type SessionResult<T> = Result<T, SessionError>;

/// Error surface for session operations. Malformed inputs never show up here:
/// they are replaced by defaults while parsing.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("please generate a network first ({action} needs a topology)")]
    MissingTopology { action: &'static str },
    #[error("scalability probe needs a running tokio runtime")]
    ProbeRuntime,
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

impl SessionError {
    /// Short notice suitable for showing to the user verbatim.
    pub fn notice(&self) -> &'static str {
        match self {
            SessionError::MissingTopology { .. } => "Please generate a network first!",
            SessionError::ProbeRuntime => "Scalability test unavailable without a runtime",
            SessionError::Telemetry(_) => "Telemetry counters overflowed",
        }
    }
}
