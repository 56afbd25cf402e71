use hybridnet_core::NetworkSession;
use hybridnet_sim::config::Config;
use hybridnet_sim::report::{stats_lines, SessionReport};
use hybridnet_sim::shell::{Command, Reply, Shell};
use hybridnet_telemetry::TelemetryHandle;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cfg = Config::sample();
    let telemetry = TelemetryHandle::from_config(cfg.telemetry.clone());
    let session = NetworkSession::new(cfg.session(), telemetry.clone());
    let mut shell = Shell::new(session, cfg.inputs.clone());

    for line in ["simulate", "set quantum 9", "set loss 0.3", "generate", "simulate", "probe"] {
        let command: Command = line.parse().expect("known command");
        if let Reply::Lines(reply) = shell.execute(command).expect("session accepts command") {
            for text in reply {
                println!("[hybridnet-sim] {line:>14} -> {text}");
            }
        }
    }
    shell.settle().await;

    for line in stats_lines(shell.session().stats()) {
        println!("{line}");
    }
    let report = SessionReport::capture(shell.session(), shell.form().parse(), false);
    println!("{}", serde_json::to_string(&report).expect("report serializes"));
    println!("[hybridnet-sim] counters={:?}", telemetry.flush().counters);
}
