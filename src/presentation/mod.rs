//! Presentation Layer
//!
//! CLI argument parsing (via clap). Wiring and output live in the binary.

pub mod cli;

pub use cli::{Cli, Commands};
