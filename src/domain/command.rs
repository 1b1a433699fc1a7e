//! Command specifications
//!
//! A `CommandSpec` is a program, its arguments and an optional working
//! directory. Nothing is interpolated into a shell string until a command has
//! to cross an SSH boundary, and then every word is quoted.

use std::fmt;

/// A single external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    cwd: Option<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Build from an argv-style list; `None` for an empty list.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone()).args(args.iter().cloned()))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<String>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&str> {
        self.cwd.as_deref()
    }

    /// The command line as a POSIX shell would need it, `cd`-prefixed when a
    /// working directory is set.
    pub fn to_shell(&self) -> String {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(shell_quote(&self.program));
        words.extend(self.args.iter().map(|a| shell_quote(a)));
        let line = words.join(" ");

        match &self.cwd {
            Some(dir) => format!("cd {} && {}", shell_quote(dir), line),
            None => line,
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell())
    }
}

/// Quote a word for safe use in a POSIX shell command.
///
/// Words made only of characters the shell never interprets are returned
/// unchanged so logged command lines stay readable.
pub fn shell_quote(word: &str) -> String {
    let is_plain = !word.is_empty()
        && word.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | ':' | '=' | '@' | ',' | '+')
        });

    if is_plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', "'\\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_plain_words_unchanged() {
        assert_eq!(shell_quote("/home/ubuntu/apps"), "/home/ubuntu/apps");
        assert_eq!(
            shell_quote("--add-header=Cache-Control:max-age=5"),
            "--add-header=Cache-Control:max-age=5"
        );
        assert_eq!(shell_quote("s3://bucket/app/"), "s3://bucket/app/");
    }

    #[test]
    fn quote_path_with_space() {
        assert_eq!(shell_quote("/home/user/my file"), "'/home/user/my file'");
    }

    #[test]
    fn quote_single_quote() {
        assert_eq!(shell_quote("it's"), "'it'\\''s'");
    }

    #[test]
    fn quote_shell_metacharacters() {
        assert_eq!(shell_quote("a;rm -rf /"), "'a;rm -rf /'");
        assert_eq!(shell_quote("$HOME"), "'$HOME'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn to_shell_prefixes_cd() {
        let cmd = CommandSpec::new("git")
            .args(["fetch", "origin"])
            .current_dir("/srv/app/repository");
        assert_eq!(cmd.to_shell(), "cd /srv/app/repository && git fetch origin");
    }

    #[test]
    fn from_argv_splits_program() {
        let argv = vec!["node_modules/.bin/grunt".to_string(), "watch".to_string()];
        let cmd = CommandSpec::from_argv(&argv).unwrap();
        assert_eq!(cmd.program(), "node_modules/.bin/grunt");
        assert_eq!(cmd.get_args(), ["watch"]);
        assert!(CommandSpec::from_argv(&[]).is_none());
    }
}
