//! Periodic telemetry drain for long-running shells.

use hybridnet_telemetry::{TelemetryHandle, TelemetrySnapshot};
use tokio::task::JoinHandle;
use tracing::debug;

/// Flush `telemetry` every `flush_interval` and hand each non-empty snapshot
/// to `on_flush`. Must be called inside a Tokio runtime; abort the returned
/// handle to stop.
pub fn spawn_flusher<F>(telemetry: TelemetryHandle, mut on_flush: F) -> JoinHandle<()>
where
    F: FnMut(TelemetrySnapshot) + Send + 'static,
{
    let period = telemetry.flush_interval();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // First tick fires immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let snapshot = telemetry.flush();
            if snapshot.is_empty() {
                continue;
            }
            debug!(counters = snapshot.counters.len(), "periodic telemetry flush");
            on_flush(snapshot);
        }
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hybridnet_telemetry::TelemetryConfig;
    use tokio::sync::mpsc;

    use super::*;

    fn telemetry(flush_interval_ms: u64) -> TelemetryHandle {
        TelemetryHandle::from_config(TelemetryConfig {
            flush_interval_ms,
            ..TelemetryConfig::sample("flusher")
        })
    }

    #[tokio::test(start_paused = true)]
    async fn drains_on_the_configured_cadence() {
        let telemetry = telemetry(500);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = spawn_flusher(telemetry.clone(), move |snapshot| {
            let _ = tx.send(snapshot);
        });

        telemetry.record_counter("generate.runs", 1).unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;
        let snapshot = rx.try_recv().unwrap();
        assert_eq!(snapshot.counter("hybridnet.generate.runs"), 1);
        assert!(telemetry.flush().is_empty());
        task.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn quiet_periods_are_skipped() {
        let telemetry = telemetry(100);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = spawn_flusher(telemetry.clone(), move |snapshot| {
            let _ = tx.send(snapshot);
        });

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert!(rx.try_recv().is_err());

        telemetry.record_latency_ms("simulate.latency_ms", 12.5);
        tokio::time::sleep(Duration::from_millis(100)).await;
        let snapshot = rx.try_recv().unwrap();
        assert_eq!(snapshot.mean_latency_ms("hybridnet.simulate.latency_ms"), Some(12.5));
        task.abort();
    }
}
