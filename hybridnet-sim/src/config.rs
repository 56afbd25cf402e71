use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use hybridnet_core::{
    GeneratorConfig, InputFields, LogConfig, ProbeConfig, SessionConfig, SimulatorConfig,
};
use hybridnet_telemetry::TelemetryConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ConfigFormat {
    Auto,
    Toml,
    Yaml,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {format:?} config: {details}")]
    Parse {
        format: ConfigFormat,
        details: String,
    },
    #[error("configuration invalid: {0}")]
    Validation(String),
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Raw text for the four form fields; parsed defensively at action time.
    pub inputs: InputFields,
    pub generator: GeneratorConfig,
    pub simulator: SimulatorConfig,
    pub log: LogConfig,
    pub probe: ProbeConfig,
    pub telemetry: TelemetryConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = &self.generator.bounds;
        if !(bounds.width.is_finite() && bounds.width > 0.0)
            || !(bounds.height.is_finite() && bounds.height > 0.0)
        {
            return Err(ConfigError::Validation(
                "display bounds must have positive width and height".into(),
            ));
        }
        if !(bounds.origin_x.is_finite() && bounds.origin_y.is_finite()) {
            return Err(ConfigError::Validation(
                "display origin must be finite".into(),
            ));
        }
        let ratio = self.generator.extra_edge_ratio;
        if !ratio.is_finite() || ratio < 0.0 {
            return Err(ConfigError::Validation(
                "extra edge ratio must be a non-negative number".into(),
            ));
        }
        if self.simulator.trials == 0 {
            return Err(ConfigError::Validation(
                "simulator trials must be greater than zero".into(),
            ));
        }
        let floor = self.simulator.latency_floor_ms;
        let span = self.simulator.latency_span_ms;
        if !(floor.is_finite() && floor >= 0.0) || !(span.is_finite() && span >= 0.0) {
            return Err(ConfigError::Validation(
                "latency floor and span must be non-negative".into(),
            ));
        }
        if self.telemetry.flush_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "telemetry flush interval must be greater than zero".into(),
            ));
        }
        if self.log.capacity == 0 {
            return Err(ConfigError::Validation(
                "log capacity must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            generator: self.generator.clone(),
            simulator: self.simulator.clone(),
            log: self.log.clone(),
            probe: self.probe.clone(),
        }
    }

    pub fn sample() -> Self {
        Self {
            telemetry: TelemetryConfig::sample("hybridnet-sim"),
            ..Self::default()
        }
    }
}

/// Load and validate a config file; without a path the built-in defaults
/// apply.
pub fn load_config(path: Option<&Path>, format: ConfigFormat) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Ok(Config::sample());
    };
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&contents, resolve_format(path, format))?;
    config.validate()?;
    Ok(config)
}

pub fn parse_config(contents: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
    match format {
        ConfigFormat::Toml | ConfigFormat::Auto => {
            toml::from_str(contents).map_err(|err| ConfigError::Parse {
                format: ConfigFormat::Toml,
                details: err.to_string(),
            })
        }
        ConfigFormat::Yaml => serde_yaml::from_str(contents).map_err(|err| ConfigError::Parse {
            format,
            details: err.to_string(),
        }),
    }
}

fn resolve_format(path: &Path, format: ConfigFormat) -> ConfigFormat {
    match format {
        ConfigFormat::Auto => match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => ConfigFormat::Toml,
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Toml,
        },
        _ => format,
    }
}
