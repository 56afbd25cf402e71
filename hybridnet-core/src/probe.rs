//! Placeholder scalability diagnostic. Nothing is measured: after a fixed
//! delay two canned findings are appended to the shared log.

use std::time::Duration;

use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{info, warn};

use crate::{
    error::{SessionError, SessionResult},
    log::SharedLog,
};

pub const PROBE_STARTED: &str = "Running scalability test...";
pub const PROBE_FINDINGS: [&str; 2] = [
    "Scalability test: Network performance degrades with >50 nodes",
    "Bottleneck identified: Quantum entanglement swapping overhead",
];

/// Fire-and-forget handle for the deferred append. Dropping it does not
/// cancel the task; awaiting it waits for the findings to land.
#[derive(Debug)]
pub struct ProbeHandle {
    task: JoinHandle<()>,
    delay: Duration,
}

impl ProbeHandle {
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the task; `false` when it ended without appending the
    /// findings.
    pub async fn completed(self) -> bool {
        match self.task.await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "scalability probe task did not complete");
                false
            }
        }
    }
}

pub struct ScalabilityProbe {
    delay: Duration,
}

impl ScalabilityProbe {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Log the start line now and schedule the findings on the current Tokio
    /// runtime.
    pub fn launch(&self, log: &SharedLog) -> SessionResult<ProbeHandle> {
        let runtime = Handle::try_current().map_err(|_| SessionError::ProbeRuntime)?;
        log.push(PROBE_STARTED);
        let delay = self.delay;
        let log = log.clone();
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            log.extend(PROBE_FINDINGS);
            info!(delay_ms = delay.as_millis() as u64, "scalability probe findings appended");
        });
        Ok(ProbeHandle { task, delay })
    }
}
