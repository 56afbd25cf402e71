use hybridnet_core::{InputField, NetworkSession};
use hybridnet_sim::config::Config;
use hybridnet_sim::report::SessionReport;
use hybridnet_sim::shell::{script, Command, Reply, Shell};
use hybridnet_telemetry::TelemetryHandle;

fn shell_from(config: &Config) -> (Shell, TelemetryHandle) {
    let telemetry = TelemetryHandle::from_config(config.telemetry.clone());
    let session = NetworkSession::new(config.session(), telemetry.clone());
    (Shell::new(session, config.inputs.clone()), telemetry)
}

#[tokio::test(start_paused = true)]
async fn scripted_run_fills_stats_log_and_telemetry() {
    let config = Config::sample();
    let (mut shell, telemetry) = shell_from(&config);
    for command in script(3, true, false) {
        assert!(matches!(shell.execute(command).unwrap(), Reply::Lines(_)));
    }
    shell.settle().await;

    let session = shell.session();
    assert_eq!(session.stats().total_nodes, 12);
    assert!(session.stats().success_rate.is_some());
    assert_eq!(session.log().len(), 10);
    let newest = session.log().messages();
    assert_eq!(
        newest[0],
        "Bottleneck identified: Quantum entanglement swapping overhead"
    );
    assert_eq!(
        newest[1],
        "Scalability test: Network performance degrades with >50 nodes"
    );

    let snapshot = telemetry.flush();
    assert_eq!(snapshot.counter("hybridnet.generate.runs"), 1);
    assert_eq!(snapshot.counter("hybridnet.simulate.runs"), 3);
    assert_eq!(snapshot.counter("hybridnet.probe.runs"), 1);
}

#[test]
fn clear_resets_the_json_labels() {
    let (mut shell, _) = shell_from(&Config::sample());
    shell
        .execute(Command::Set(InputField::QuantumNodes, "3".into()))
        .unwrap();
    for command in script(2, false, true) {
        shell.execute(command).unwrap();
    }
    let report = SessionReport::capture(shell.session(), shell.form().parse(), false);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["labels"]["totalNodes"], "9");
    assert_eq!(json["labels"]["successRate"], "0%");
    assert_eq!(json["labels"]["avgLatency"], "0ms");
    assert!(json["log"][0].as_str().unwrap().ends_with("Results cleared"));
    assert_eq!(json["inputs"]["quantum_count"], 3);
}
