use std::path::Path;

use hybridnet_core::NetworkInputs;
use hybridnet_sim::config::{load_config, parse_config, Config, ConfigError, ConfigFormat};
use pretty_assertions::assert_eq;

#[test]
fn shipped_toml_matches_defaults() {
    let config = load_config(
        Some(Path::new("configs/hybridnet-sim.toml")),
        ConfigFormat::Auto,
    )
    .unwrap();
    assert_eq!(config.session(), Config::sample().session());
    assert_eq!(config.inputs.parse(), NetworkInputs::default());
    assert_eq!(config.telemetry.namespace, "hybridnet-sim");
}

#[test]
fn shipped_yaml_overrides_everything() {
    let config = load_config(
        Some(Path::new("configs/hybridnet-sim.yaml")),
        ConfigFormat::Auto,
    )
    .unwrap();
    let inputs = config.inputs.parse();
    assert_eq!(inputs.quantum_count, 10);
    assert_eq!(inputs.classical_count, 4);
    assert_eq!(inputs.qubit_loss_rate, 0.2);
    assert_eq!(config.generator.bounds.width, 800.0);
    assert_eq!(config.simulator.trials, 25);
    assert_eq!(config.log.capacity, 20);
    assert_eq!(config.probe.delay_ms, 250);
    assert_eq!(config.telemetry.labels["profile"], "lab");
}

#[test]
fn explicit_format_wins_over_extension() {
    let err = load_config(
        Some(Path::new("configs/hybridnet-sim.toml")),
        ConfigFormat::Yaml,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Parse {
            format: ConfigFormat::Yaml,
            ..
        }
    ));
}

#[test]
fn garbage_form_text_is_kept_raw() {
    let config = parse_config(
        "[inputs]\nquantum-nodes = \"many\"\nqubit-loss-rate = \"1.5\"\n",
        ConfigFormat::Toml,
    )
    .unwrap();
    config.validate().unwrap();
    assert_eq!(config.inputs.quantum_nodes.as_deref(), Some("many"));
    assert_eq!(config.inputs.parse(), NetworkInputs::default());
}
