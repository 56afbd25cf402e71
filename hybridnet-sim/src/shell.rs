//! Presentation shell around a [`NetworkSession`]: keeps the raw form fields,
//! turns commands into session actions and renders the replies as lines.

use std::str::FromStr;

use hybridnet_core::{
    input::UnknownField, InputField, InputFields, NetworkSession, ProbeHandle, SessionError,
};
use hybridnet_telemetry::TelemetryError;
use thiserror::Error;
use tracing::debug;

use crate::report::{log_lines, scene_lines, stats_lines};

pub const HELP: &str = "commands: generate | simulate | probe | clear | set <field> <value> | \
stats | log | scene | inputs | help | quit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Generate,
    Simulate,
    Probe,
    Clear,
    Set(InputField, String),
    Stats,
    Log,
    Scene,
    Inputs,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("usage: set <field> <value>")]
    SetUsage,
    #[error(transparent)]
    Field(#[from] UnknownField),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().ok_or(CommandError::Empty)?;
        let command = match verb.to_ascii_lowercase().as_str() {
            "generate" | "gen" => Command::Generate,
            "simulate" | "sim" | "run" => Command::Simulate,
            "probe" | "scalability" => Command::Probe,
            "clear" => Command::Clear,
            "stats" => Command::Stats,
            "log" => Command::Log,
            "scene" => Command::Scene,
            "inputs" => Command::Inputs,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "set" => {
                let field = parts.next().ok_or(CommandError::SetUsage)?.parse()?;
                let value = parts.collect::<Vec<_>>().join(" ");
                if value.is_empty() {
                    return Err(CommandError::SetUsage);
                }
                Command::Set(field, value)
            }
            other => return Err(CommandError::Unknown(other.to_owned())),
        };
        Ok(command)
    }
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Session(SessionError),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Lines(Vec<String>),
    Quit,
}

pub struct Shell {
    session: NetworkSession,
    form: InputFields,
    probes: Vec<ProbeHandle>,
}

impl Shell {
    pub fn new(session: NetworkSession, form: InputFields) -> Self {
        Self {
            session,
            form,
            probes: Vec::new(),
        }
    }

    pub fn session(&self) -> &NetworkSession {
        &self.session
    }

    pub fn form(&self) -> &InputFields {
        &self.form
    }

    /// Run one command. A missing topology comes back as a notice line, not
    /// an error.
    pub fn execute(&mut self, command: Command) -> Result<Reply, ShellError> {
        debug!(?command, "shell command");
        let lines = match command {
            Command::Generate => {
                let inputs = self.form.parse();
                self.session.generate(&inputs).map_err(session_error)?;
                self.latest_log(1)
            }
            Command::Simulate => {
                let inputs = self.form.parse();
                match self.session.simulate(&inputs) {
                    Ok(run) => {
                        let mut lines = vec![run.summary()];
                        lines.push(format!(
                            "attempted {} of {} transmissions ({} skipped as same-node)",
                            run.attempted(),
                            run.drawn,
                            run.skipped
                        ));
                        lines
                    }
                    Err(err) => notice(err)?,
                }
            }
            Command::Probe => match self.session.scalability_probe() {
                Ok(handle) => {
                    let delay = handle.delay();
                    self.probes.push(handle);
                    vec![format!(
                        "scalability test scheduled; findings in {}ms",
                        delay.as_millis()
                    )]
                }
                Err(err) => notice(err)?,
            },
            Command::Clear => {
                self.session.clear();
                self.latest_log(1)
            }
            Command::Set(field, value) => {
                self.form.set(field, value);
                self.input_lines()
            }
            Command::Stats => stats_lines(self.session.stats()),
            Command::Log => log_lines(&self.session),
            Command::Scene => match self.session.scene() {
                Some(scene) => scene_lines(&scene),
                None => notice(SessionError::MissingTopology { action: "scene" })?,
            },
            Command::Inputs => self.input_lines(),
            Command::Help => vec![HELP.to_owned()],
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Lines(lines))
    }

    /// Wait for every scheduled probe to append its findings.
    pub async fn settle(&mut self) {
        for handle in self.probes.drain(..) {
            handle.completed().await;
        }
    }

    fn latest_log(&self, count: usize) -> Vec<String> {
        self.session.log().lines().into_iter().take(count).collect()
    }

    fn input_lines(&self) -> Vec<String> {
        let inputs = self.form.parse();
        vec![
            format!("{}: {}", InputField::QuantumNodes, inputs.quantum_count),
            format!("{}: {}", InputField::ClassicalNodes, inputs.classical_count),
            format!("{}: {}", InputField::QubitLossRate, inputs.qubit_loss_rate),
            format!("{}: {}", InputField::SwapSuccessRate, inputs.swap_success_rate),
        ]
    }
}

/// Command sequence for a non-interactive run: one generation, `runs`
/// simulations, then the optional probe and clear.
pub fn script(runs: u16, probe: bool, clear: bool) -> Vec<Command> {
    let mut commands = vec![Command::Generate];
    commands.extend((0..runs).map(|_| Command::Simulate));
    if probe {
        commands.push(Command::Probe);
    }
    if clear {
        commands.push(Command::Clear);
    }
    commands
}

fn session_error(err: SessionError) -> ShellError {
    match err {
        SessionError::Telemetry(inner) => ShellError::Telemetry(inner),
        other => ShellError::Session(other),
    }
}

fn notice(err: SessionError) -> Result<Vec<String>, ShellError> {
    match err {
        SessionError::MissingTopology { .. } | SessionError::ProbeRuntime => {
            Ok(vec![format!("! {}", err.notice())])
        }
        other => Err(session_error(other)),
    }
}
