//! Defensive parsing of the four free-form text inputs a shell collects.
//!
//! Anything that does not parse cleanly falls back to the documented default;
//! malformed input is never surfaced as an error.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_QUANTUM_NODES: usize = 6;
pub const DEFAULT_CLASSICAL_NODES: usize = 6;
pub const DEFAULT_QUBIT_LOSS_RATE: f64 = 0.05;
pub const DEFAULT_SWAP_SUCCESS_RATE: f64 = 0.9;

/// Parsed, always-valid inputs for one generate or simulate call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NetworkInputs {
    pub quantum_count: usize,
    pub classical_count: usize,
    pub qubit_loss_rate: f64,
    /// Accepted for parity with the input form; no computation reads it.
    pub swap_success_rate: f64,
}

impl Default for NetworkInputs {
    fn default() -> Self {
        Self {
            quantum_count: DEFAULT_QUANTUM_NODES,
            classical_count: DEFAULT_CLASSICAL_NODES,
            qubit_loss_rate: DEFAULT_QUBIT_LOSS_RATE,
            swap_success_rate: DEFAULT_SWAP_SUCCESS_RATE,
        }
    }
}

/// Raw text of the input form, exactly as typed.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct InputFields {
    pub quantum_nodes: Option<String>,
    pub classical_nodes: Option<String>,
    pub qubit_loss_rate: Option<String>,
    pub swap_success_rate: Option<String>,
}

impl InputFields {
    /// Parse every field. Counts whose sum does not fit in a `usize` are
    /// treated as malformed and both fall back to their defaults.
    pub fn parse(&self) -> NetworkInputs {
        let quantum_count = parse_count(self.quantum_nodes.as_deref(), DEFAULT_QUANTUM_NODES);
        let classical_count =
            parse_count(self.classical_nodes.as_deref(), DEFAULT_CLASSICAL_NODES);
        let (quantum_count, classical_count) = match quantum_count.checked_add(classical_count) {
            Some(_) => (quantum_count, classical_count),
            None => {
                debug!(
                    quantum_count,
                    classical_count, "node counts overflow, using defaults"
                );
                (DEFAULT_QUANTUM_NODES, DEFAULT_CLASSICAL_NODES)
            }
        };
        NetworkInputs {
            quantum_count,
            classical_count,
            qubit_loss_rate: parse_rate(self.qubit_loss_rate.as_deref(), DEFAULT_QUBIT_LOSS_RATE),
            swap_success_rate: parse_rate(
                self.swap_success_rate.as_deref(),
                DEFAULT_SWAP_SUCCESS_RATE,
            ),
        }
    }

    pub fn set(&mut self, field: InputField, value: impl Into<String>) {
        let slot = match field {
            InputField::QuantumNodes => &mut self.quantum_nodes,
            InputField::ClassicalNodes => &mut self.classical_nodes,
            InputField::QubitLossRate => &mut self.qubit_loss_rate,
            InputField::SwapSuccessRate => &mut self.swap_success_rate,
        };
        *slot = Some(value.into());
    }

    /// Overlay every field that is present in `other`.
    pub fn merge(&mut self, other: &InputFields) {
        for (field, value) in other.present() {
            self.set(field, value);
        }
    }

    fn present(&self) -> Vec<(InputField, String)> {
        [
            (InputField::QuantumNodes, &self.quantum_nodes),
            (InputField::ClassicalNodes, &self.classical_nodes),
            (InputField::QubitLossRate, &self.qubit_loss_rate),
            (InputField::SwapSuccessRate, &self.swap_success_rate),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.clone().map(|v| (field, v)))
        .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputField {
    QuantumNodes,
    ClassicalNodes,
    QubitLossRate,
    SwapSuccessRate,
}

impl InputField {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::QuantumNodes => "quantum-nodes",
            InputField::ClassicalNodes => "classical-nodes",
            InputField::QubitLossRate => "qubit-loss-rate",
            InputField::SwapSuccessRate => "swap-success-rate",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown input field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for InputField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quantum" | "quantum-nodes" | "quantumnodes" => Ok(InputField::QuantumNodes),
            "classical" | "classical-nodes" | "classicalnodes" => Ok(InputField::ClassicalNodes),
            "loss" | "qubit-loss" | "qubit-loss-rate" | "qubitloss" => {
                Ok(InputField::QubitLossRate)
            }
            "swap" | "swap-success" | "swap-success-rate" | "swapsuccess" => {
                Ok(InputField::SwapSuccessRate)
            }
            other => Err(UnknownField(other.to_owned())),
        }
    }
}

/// Non-negative integer count; absent, negative, fractional or garbage text
/// yields `default`.
pub fn parse_count(text: Option<&str>, default: usize) -> usize {
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        Some(raw) => raw.parse::<usize>().unwrap_or_else(|_| {
            debug!(input = raw, default, "count input rejected, using default");
            default
        }),
        None => default,
    }
}

/// Probability in `[0, 1]`; anything else yields `default`.
pub fn parse_rate(text: Option<&str>, default: f64) -> f64 {
    let Some(raw) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return default;
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && (0.0..=1.0).contains(&value) => value,
        _ => {
            debug!(input = raw, default, "rate input rejected, using default");
            default
        }
    }
}
