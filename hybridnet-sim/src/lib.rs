//! Library surface for the `hybridnet-sim` binary.
//!
//! The config loader, the command shell and the report renderers live here so
//! integration tests and runnable examples can drive them without going
//! through stdin.

pub mod config;
pub mod flusher;
pub mod report;
pub mod shell;
