//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all process and terminal I/O.
//!
//! ## Structure
//!
//! - `events/` - Console and NDJSON event sinks
//! - `process` - Local and SSH command runners
//! - `prompt` - Operator prompts

pub mod events;
pub mod process;
pub mod prompt;

pub use events::{ConsoleEventSink, JsonEventSink};
pub use process::{DryRunRunner, SystemRunner};
pub use prompt::{terminal_prompter, DialoguerPrompter, LinePrompter};
