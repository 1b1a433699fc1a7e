//! Common test utilities for stagehand integration and CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project directory plus a runner for the binary
//! - `RecordingRunner` / `RecordingSink` / `ScriptedPrompter`: in-process
//!   doubles for the ports
//! - Fixtures: reusable configuration content

#![allow(dead_code)]

pub mod env;
pub mod fixtures;
pub mod recording;

pub use env::*;
pub use fixtures::*;
pub use recording::*;
