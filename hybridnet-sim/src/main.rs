use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::Result;
use hybridnet_core::{InputFields, NetworkSession};
use hybridnet_sim::config::{load_config, ConfigFormat};
use hybridnet_sim::flusher::spawn_flusher;
use hybridnet_sim::report::{log_lines, stats_lines, SessionReport};
use hybridnet_sim::shell::{script, Command, Reply, Shell};
use hybridnet_telemetry::TelemetryHandle;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(any(
    all(feature = "dev", feature = "test"),
    all(feature = "dev", feature = "prod"),
    all(feature = "test", feature = "prod")
))]
compile_error!(
    "Only one of the `dev`, `test`, or `prod` features may be enabled for hybridnet-sim."
);

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "hybridnet-sim",
    version,
    about = "Generate hybrid quantum/classical topologies and run transmission tests"
)]
struct Cli {
    /// Path to configuration file (TOML or YAML). Built-in defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Explicit configuration format override.
    #[arg(long, value_enum, default_value_t = ConfigFormat::Auto)]
    config_format: ConfigFormat,
    /// Quantum node count, as typed; unparseable values fall back to 6.
    #[arg(long, allow_hyphen_values = true)]
    quantum_nodes: Option<String>,
    /// Classical node count, as typed; unparseable values fall back to 6.
    #[arg(long, allow_hyphen_values = true)]
    classical_nodes: Option<String>,
    /// Qubit loss rate in [0, 1]; anything else falls back to 0.05.
    #[arg(long, allow_hyphen_values = true)]
    qubit_loss: Option<String>,
    /// Swap success rate in [0, 1]; accepted but not used by the simulator.
    #[arg(long, allow_hyphen_values = true)]
    swap_success: Option<String>,
    /// Number of simulation runs after generating the network.
    #[arg(long, default_value_t = 1)]
    runs: u16,
    /// Schedule the scalability probe and wait for its findings.
    #[arg(long)]
    probe: bool,
    /// Clear the results before reporting.
    #[arg(long)]
    clear: bool,
    /// Report format for scripted runs.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
    /// Include the render scene in JSON reports.
    #[arg(long)]
    scene: bool,
    /// Print the telemetry snapshot before exiting. In interactive mode the
    /// counters are also drained and logged every flush interval.
    #[arg(long)]
    telemetry: bool,
    /// Read commands from stdin instead of running the scripted sequence.
    #[arg(long)]
    interactive: bool,
}

impl Cli {
    fn form_overrides(&self) -> InputFields {
        InputFields {
            quantum_nodes: self.quantum_nodes.clone(),
            classical_nodes: self.classical_nodes.clone(),
            qubit_loss_rate: self.qubit_loss.clone(),
            swap_success_rate: self.swap_success.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.config_format)?;
    let mut form = config.inputs.clone();
    form.merge(&cli.form_overrides());

    let telemetry = TelemetryHandle::from_config(config.telemetry.clone());
    let session = NetworkSession::new(config.session(), telemetry.clone());
    let mut shell = Shell::new(session, form);
    info!(
        namespace = telemetry.namespace(),
        interactive = cli.interactive,
        "hybridnet-sim starting"
    );

    if cli.interactive {
        let flusher = cli.telemetry.then(|| {
            spawn_flusher(telemetry.clone(), |snapshot| {
                match serde_json::to_string(&snapshot) {
                    Ok(json) => info!(snapshot = %json, "telemetry"),
                    Err(err) => warn!(error = %err, "telemetry snapshot not serializable"),
                }
            })
        });
        let outcome = interactive(&mut shell).await;
        if let Some(flusher) = flusher {
            flusher.abort();
        }
        outcome?;
    } else {
        // JSON mode keeps stdout for the report alone.
        for command in script(cli.runs, cli.probe, cli.clear) {
            if let Reply::Lines(lines) = shell.execute(command)? {
                for line in lines {
                    match cli.output {
                        OutputFormat::Text => println!("{line}"),
                        OutputFormat::Json => info!("{line}"),
                    }
                }
            }
            if cli.probe {
                shell.settle().await;
            }
        }
        report(&shell, cli.output, cli.scene)?;
    }

    if cli.telemetry {
        let snapshot = telemetry.flush();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}

fn report(shell: &Shell, output: OutputFormat, with_scene: bool) -> Result<()> {
    let session = shell.session();
    match output {
        OutputFormat::Text => {
            for line in stats_lines(session.stats()) {
                println!("{line}");
            }
            println!();
            for line in log_lines(session) {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            let report = SessionReport::capture(session, shell.form().parse(), with_scene);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

async fn interactive(shell: &mut Shell) -> Result<()> {
    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();
    stdout.write_all(b"hybridnet> ").await?;
    stdout.flush().await?;
    while let Some(line) = lines.next_line().await? {
        if !line.trim().is_empty() {
            match line.parse::<Command>() {
                Ok(command) => match shell.execute(command)? {
                    Reply::Lines(reply) => {
                        for text in reply {
                            stdout.write_all(format!("{text}\n").as_bytes()).await?;
                        }
                    }
                    Reply::Quit => break,
                },
                Err(err) => stdout.write_all(format!("{err}\n").as_bytes()).await?,
            }
        }
        stdout.write_all(b"hybridnet> ").await?;
        stdout.flush().await?;
    }
    shell.settle().await;
    Ok(())
}
