//! In-memory telemetry facade for the hybridnet session. Counters and latency
//! samples accumulate behind a cloneable handle and are drained into a
//! snapshot on flush, so tests can assert instrumentation without exporters.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    sync::Arc,
    time::{Duration, SystemTime},
};
use thiserror::Error;

#[cfg(any(
    all(feature = "dev", feature = "test"),
    all(feature = "dev", feature = "prod"),
    all(feature = "test", feature = "prod")
))]
compile_error!(
    "Only one of the `dev`, `test`, or `prod` features may be enabled for hybridnet-telemetry."
);

#[cfg(feature = "dev")]
const DEFAULT_FLUSH_MS: u64 = 1_000;
#[cfg(feature = "test")]
const DEFAULT_FLUSH_MS: u64 = 500;
#[cfg(feature = "prod")]
const DEFAULT_FLUSH_MS: u64 = 5_000;
#[cfg(not(any(feature = "dev", feature = "test", feature = "prod")))]
const DEFAULT_FLUSH_MS: u64 = 5_000;

fn default_flush_interval_ms() -> u64 {
    DEFAULT_FLUSH_MS
}

fn default_namespace() -> String {
    "hybridnet".into()
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TelemetryConfig {
    /// Prefix attached to every metric name (`<namespace>.<metric>`).
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Flush cadence in milliseconds.
    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,
    /// Global labels appended to every snapshot.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            flush_interval_ms: default_flush_interval_ms(),
            labels: BTreeMap::new(),
        }
    }
}

impl TelemetryConfig {
    pub fn sample(component: &str) -> Self {
        Self {
            labels: BTreeMap::from([("component".into(), component.to_owned())]),
            ..Self::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("counter overflow for metric {0}")]
    CounterOverflow(String),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    pub timestamp: SystemTime,
    pub labels: BTreeMap<String, String>,
    pub counters: BTreeMap<String, u64>,
    pub latencies_ms: BTreeMap<String, Vec<f64>>,
}

impl TelemetrySnapshot {
    /// True when nothing was recorded since the previous flush.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty() && self.latencies_ms.is_empty()
    }

    /// Counter value, zero when the metric was never recorded.
    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or_default()
    }

    pub fn mean_latency_ms(&self, name: &str) -> Option<f64> {
        let samples = self.latencies_ms.get(name)?;
        if samples.is_empty() {
            return None;
        }
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }
}

#[derive(Default)]
struct TelemetryState {
    counters: BTreeMap<String, u64>,
    latencies_ms: BTreeMap<String, Vec<f64>>,
}

#[derive(Clone)]
pub struct TelemetryHandle {
    config: TelemetryConfig,
    state: Arc<Mutex<TelemetryState>>,
}

impl TelemetryHandle {
    pub fn from_config(config: TelemetryConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(TelemetryState::default())),
        }
    }

    fn metric(&self, name: &str) -> String {
        if self.config.namespace.is_empty() {
            name.to_owned()
        } else {
            format!("{}.{}", self.config.namespace, name)
        }
    }

    pub fn record_counter(&self, name: &str, delta: u64) -> Result<(), TelemetryError> {
        let metric = self.metric(name);
        let mut guard = self.state.lock();
        let entry = guard.counters.entry(metric.clone()).or_default();
        *entry = entry
            .checked_add(delta)
            .ok_or(TelemetryError::CounterOverflow(metric))?;
        Ok(())
    }

    pub fn record_latency_ms(&self, name: &str, value: f64) {
        let metric = self.metric(name);
        self.state
            .lock()
            .latencies_ms
            .entry(metric)
            .or_default()
            .push(value);
    }

    pub fn flush(&self) -> TelemetrySnapshot {
        let mut guard = self.state.lock();
        TelemetrySnapshot {
            timestamp: SystemTime::now(),
            labels: self.config.labels.clone(),
            counters: std::mem::take(&mut guard.counters),
            latencies_ms: std::mem::take(&mut guard.latencies_ms),
        }
    }

    /// Cadence for periodic flushes; never shorter than a millisecond.
    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.config.flush_interval_ms.max(1))
    }

    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }
}
