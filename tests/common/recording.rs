//! Recording doubles for the command runner, event sink and prompter ports.

use std::cell::RefCell;
use std::collections::VecDeque;

use stagehand::domain::command::CommandSpec;
use stagehand::{
    CommandRunner, DeployError, DeployEvent, DeployEventSink, DeployResult, Prompter, Stage,
    Target,
};

type FailWhen = Box<dyn Fn(&Target, &CommandSpec) -> bool>;

/// Records every command and fails the ones matching a predicate.
pub struct RecordingRunner {
    calls: RefCell<Vec<(Target, CommandSpec)>>,
    fail_when: FailWhen,
    exit_code: Option<i32>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::failing_when(|_, _| false)
    }

    pub fn failing_when(pred: impl Fn(&Target, &CommandSpec) -> bool + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_when: Box::new(pred),
            exit_code: Some(1),
        }
    }

    /// Exit code reported by failing commands
    pub fn with_exit_code(mut self, code: Option<i32>) -> Self {
        self.exit_code = code;
        self
    }

    pub fn calls(&self) -> Vec<(Target, CommandSpec)> {
        self.calls.borrow().clone()
    }

    /// `[target] command` for every recorded call
    pub fn lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(target, command)| format!("[{}] {}", target, command.to_shell()))
            .collect()
    }

    /// Recorded `s3cmd <verb>` invocations
    pub fn s3cmd(&self, verb: &str) -> Vec<CommandSpec> {
        self.calls
            .borrow()
            .iter()
            .map(|(_, command)| command)
            .filter(|c| c.program() == "s3cmd" && c.get_args().iter().any(|a| a == verb))
            .cloned()
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, target: &Target, command: &CommandSpec) -> DeployResult<()> {
        self.calls
            .borrow_mut()
            .push((target.clone(), command.clone()));

        if (self.fail_when)(target, command) {
            return Err(DeployError::CommandFailed {
                command: command.to_shell(),
                target: target.to_string(),
                code: self.exit_code,
            });
        }
        Ok(())
    }
}

/// Collects every event.
#[derive(Default)]
pub struct RecordingSink {
    events: RefCell<Vec<DeployEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<DeployEvent> {
        self.events.borrow().clone()
    }

    pub fn started_stages(&self) -> Vec<Stage> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                DeployEvent::StageStarted { stage } => Some(*stage),
                _ => None,
            })
            .collect()
    }

    pub fn skipped_stages(&self) -> Vec<Stage> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                DeployEvent::StageSkipped { stage, .. } => Some(*stage),
                _ => None,
            })
            .collect()
    }
}

impl DeployEventSink for RecordingSink {
    fn on_event(&self, event: DeployEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Replays canned answers, then falls back to the default.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Questions asked so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&self, message: &str, default: &str) -> std::io::Result<String> {
        self.asked.borrow_mut().push(message.to_string());
        let answer = self.answers.borrow_mut().pop_front().unwrap_or_default();
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }
}
