//! Domain layer
//!
//! The deployment context, precondition checks, typed command builders and
//! the ports the application layer talks through.

pub mod command;
pub mod context;
pub mod ports;
pub mod preconditions;
pub mod tools;

pub use command::{shell_quote, CommandSpec};
pub use context::{AltRemote, DeploymentContext, Environment, Field, RemotePaths};
pub use preconditions::{confirm_branch, require, BranchGate};
