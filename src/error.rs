//! Error types for stagehand
//!
//! Library code returns `DeployError`; the binary wraps it in `anyhow`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stagehand operations
pub type DeployResult<T> = Result<T, DeployError>;

/// A required context field that was not set, plus the selectors that set it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    pub name: &'static str,
    pub provided_by: Vec<String>,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.name)?;
        if !self.provided_by.is_empty() {
            write!(f, " (set it with one of: {})", self.provided_by.join(", "))?;
        }
        Ok(())
    }
}

/// One bucket that could not be synchronized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketFailure {
    pub bucket: String,
    pub message: String,
    /// Exit code of the failed sync, when it ran to completion
    pub code: Option<i32>,
}

/// Main error type for deployment operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// Required context fields are unset
    #[error("missing required settings: {}", join_missing(.missing))]
    MissingPrecondition { missing: Vec<MissingField> },

    /// A command ran and exited unsuccessfully
    #[error("command failed on {target} ({}): {command}", describe_code(.code))]
    CommandFailed {
        command: String,
        target: String,
        code: Option<i32>,
    },

    /// A command could not be started at all
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// One or more bucket uploads failed (every bucket was attempted)
    #[error("upload failed for {} bucket(s): {}", .failures.len(), join_failures(.failures))]
    UploadFailed { failures: Vec<BucketFailure> },

    /// The user declined the production branch confirmation
    #[error("deployment aborted by user")]
    Aborted,

    /// Configuration file could not be parsed
    #[error("invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Configuration file does not exist
    #[error("configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// A route could not be rendered
    #[error("failed to render route '{rule}': {message}")]
    Render { rule: String, message: String },

    /// Filesystem error tied to a path
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DeployError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit code to propagate from a failed subprocess, if any.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            DeployError::CommandFailed { code, .. } => code.filter(|c| *c != 0),
            DeployError::UploadFailed { failures } => failures
                .iter()
                .find_map(|f| f.code.filter(|c| *c != 0)),
            _ => None,
        }
    }
}

fn join_missing(missing: &[MissingField]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_failures(failures: &[BucketFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.bucket, f.message))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {}", c),
        None => "terminated by signal".to_string(),
    }
}
