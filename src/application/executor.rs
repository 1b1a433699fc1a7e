//! Command execution with event reporting

use crate::domain::command::CommandSpec;
use crate::domain::ports::{CommandRunner, DeployEvent, DeployEventSink, Target};
use crate::error::DeployResult;

/// Pairs a `CommandRunner` with the sink that reports what it runs.
#[derive(Clone, Copy)]
pub struct Executor<'a> {
    runner: &'a dyn CommandRunner,
    events: &'a dyn DeployEventSink,
}

impl<'a> Executor<'a> {
    pub fn new(runner: &'a dyn CommandRunner, events: &'a dyn DeployEventSink) -> Self {
        Self { runner, events }
    }

    pub fn events(&self) -> &'a dyn DeployEventSink {
        self.events
    }

    pub fn emit(&self, event: DeployEvent) {
        self.events.on_event(event);
    }

    /// Run a command; any failure is returned to the caller.
    pub fn run(&self, target: &Target, command: &CommandSpec) -> DeployResult<()> {
        self.emit(DeployEvent::CommandStarted {
            target: target.clone(),
            command: command.to_shell(),
        });
        self.runner.run(target, command)
    }

    /// Run a command, downgrading failure to a warning event.
    ///
    /// Returns whether the command succeeded.
    pub fn run_best_effort(&self, target: &Target, command: &CommandSpec) -> bool {
        match self.run(target, command) {
            Ok(()) => true,
            Err(e) => {
                self.emit(DeployEvent::CommandWarning {
                    target: target.clone(),
                    command: command.to_shell(),
                    error: e.to_string(),
                });
                false
            }
        }
    }
}
