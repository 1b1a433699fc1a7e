//! Process-backed command runners
//!
//! `SystemRunner` runs local commands directly and remote commands through
//! `ssh`. Child stdio is inherited so tool output reaches the operator
//! unchanged.

use std::io;
use std::process::{Command, Stdio};

use crate::domain::command::CommandSpec;
use crate::domain::ports::{CommandRunner, RemoteHost, Target};
use crate::error::{DeployError, DeployResult};

/// Runs commands on this machine or over SSH
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    stdout_to_stderr: bool,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send child stdout to our stderr (keeps `--json` output parseable)
    pub fn with_stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.stdout_to_stderr = enabled;
        self
    }

    /// Arguments passed to `ssh` for a remote command
    pub fn ssh_args(host: &RemoteHost, command: &CommandSpec) -> Vec<String> {
        let mut args = Vec::with_capacity(4);
        if host.forward_agent {
            args.push("-A".to_string());
        }
        args.push(host.destination.clone());
        args.push("--".to_string());
        args.push(command.to_shell());
        args
    }

    fn build(&self, target: &Target, command: &CommandSpec) -> Command {
        let mut cmd = match target {
            Target::Local => {
                let mut cmd = Command::new(command.program());
                cmd.args(command.get_args());
                if let Some(dir) = command.cwd() {
                    cmd.current_dir(dir);
                }
                cmd
            }
            Target::Remote(host) => {
                let mut cmd = Command::new("ssh");
                cmd.args(Self::ssh_args(host, command));
                cmd
            }
        };

        if self.stdout_to_stderr {
            cmd.stdout(Stdio::from(io::stderr()));
        }
        cmd
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, target: &Target, command: &CommandSpec) -> DeployResult<()> {
        let program = match target {
            Target::Local => command.program().to_string(),
            Target::Remote(_) => "ssh".to_string(),
        };

        let status = self
            .build(target, command)
            .status()
            .map_err(|source| DeployError::Spawn { program, source })?;

        if status.success() {
            Ok(())
        } else {
            Err(DeployError::CommandFailed {
                command: command.to_shell(),
                target: target.to_string(),
                code: status.code(),
            })
        }
    }
}

/// Reports nothing and runs nothing; used by `--dry-run`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&self, _target: &Target, _command: &CommandSpec) -> DeployResult<()> {
        Ok(())
    }
}
