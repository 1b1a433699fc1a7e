//! Operator prompts
//!
//! `DialoguerPrompter` is used on a terminal. When stdin is piped the answer
//! is read as a plain line so scripted runs (`echo yes | stagehand deploy`)
//! behave the same as interactive ones.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use dialoguer::Input;
use is_terminal::IsTerminal;

use crate::domain::ports::Prompter;

/// Interactive text prompt on the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn prompt(&self, message: &str, default: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(message)
            .default(default.to_string())
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)
    }
}

/// Reads one line per question from any reader
pub struct LinePrompter<R> {
    reader: Mutex<R>,
}

impl<R: BufRead> LinePrompter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Mutex::new(reader),
        }
    }
}

impl<R: BufRead> Prompter for LinePrompter<R> {
    fn prompt(&self, message: &str, default: &str) -> io::Result<String> {
        eprint!("{} [{}] ", message, default);
        let _ = io::stderr().flush();

        let mut reader = self
            .reader
            .lock()
            .map_err(|_| io::Error::other("prompt reader poisoned"))?;
        let mut line = String::new();
        reader.read_line(&mut line)?;
        eprintln!();

        let answer = line.trim_end_matches(['\r', '\n']);
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer.to_string())
        }
    }
}

/// Prompter for this process: dialoguer on a terminal, stdin lines otherwise.
pub fn terminal_prompter() -> Box<dyn Prompter> {
    if io::stdin().is_terminal() {
        Box::new(DialoguerPrompter)
    } else {
        Box::new(LinePrompter::new(io::stdin().lock()))
    }
}
