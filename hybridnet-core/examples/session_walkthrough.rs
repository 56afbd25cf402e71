use hybridnet_core::{InputField, InputFields, NetworkSession, SessionConfig};
use hybridnet_telemetry::{TelemetryConfig, TelemetryHandle};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let telemetry = TelemetryHandle::from_config(TelemetryConfig::sample("walkthrough"));
    let mut session = NetworkSession::new(SessionConfig::default(), telemetry.clone());

    let mut form = InputFields::default();
    form.set(InputField::QuantumNodes, "8");
    form.set(InputField::ClassicalNodes, "five");
    form.set(InputField::QubitLossRate, "0.2");
    let inputs = form.parse();

    if let Err(err) = session.simulate(&inputs) {
        println!("notice: {}", err.notice());
    }

    let topology = session.generate(&inputs).expect("generation is total");
    println!(
        "topology: {} nodes ({} quantum) / {} links, connected={}",
        topology.node_count(),
        topology.quantum_count(),
        topology.edge_count(),
        topology.is_connected()
    );

    for _ in 0..3 {
        let run = session.simulate(&inputs).expect("topology exists");
        println!("{} (attempted {}/{})", run.summary(), run.attempted(), run.drawn);
    }

    let probe = session.scalability_probe().expect("topology exists");
    probe.completed().await;

    for (label, value) in session.stats().cards() {
        println!("{label:>18}: {value}");
    }
    for line in session.log().lines() {
        println!("  {line}");
    }

    let snapshot = telemetry.flush();
    println!("telemetry counters={:?}", snapshot.counters);
}
