use hybridnet_telemetry::{TelemetryConfig, TelemetryHandle};

fn main() {
    let telemetry = TelemetryHandle::from_config(TelemetryConfig::sample("demo"));

    for _ in 0..3 {
        telemetry
            .record_counter("simulate.attempted", 1)
            .expect("within u64 range");
    }
    telemetry.record_latency_ms("simulate.latency_ms", 42.0);
    telemetry.record_latency_ms("simulate.latency_ms", 54.5);

    let snapshot = telemetry.flush();
    println!(
        "[hybridnet-telemetry] counters={:?} latencies={:?}",
        snapshot.counters, snapshot.latencies_ms
    );
}
