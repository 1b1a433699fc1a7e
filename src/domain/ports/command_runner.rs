//! CommandRunner port - abstraction over subprocess execution
//!
//! Implementations:
//! - `SystemRunner` - local processes and `ssh` for remote hosts
//! - `DryRunRunner` - executes nothing
//! - recording runners in tests

use std::fmt;

use crate::domain::command::CommandSpec;
use crate::error::DeployResult;

/// A host reachable over SSH
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteHost {
    /// `user@host`
    pub destination: String,
    pub forward_agent: bool,
}

/// Where a command runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Local,
    Remote(RemoteHost),
}

impl Target {
    pub fn remote(destination: impl Into<String>, forward_agent: bool) -> Self {
        Target::Remote(RemoteHost {
            destination: destination.into(),
            forward_agent,
        })
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Target::Local)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Local => f.write_str("localhost"),
            Target::Remote(host) => f.write_str(&host.destination),
        }
    }
}

/// Runs commands to completion, blocking.
///
/// A non-zero exit is returned as `DeployError::CommandFailed`; a command that
/// cannot be started as `DeployError::Spawn`.
pub trait CommandRunner {
    fn run(&self, target: &Target, command: &CommandSpec) -> DeployResult<()>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, target: &Target, command: &CommandSpec) -> DeployResult<()> {
        (**self).run(target, command)
    }
}
