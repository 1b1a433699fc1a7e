//! Deploy Event Port
//!
//! Provides an observable interface for every operation stagehand runs.
//! Drives the console output, the `--json` event stream and test assertions.

use std::path::PathBuf;

use crate::domain::ports::Target;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Compile,
    Compress,
    Upload,
    RemoteSync,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Compile => "compile",
            Stage::Compress => "compress",
            Stage::Upload => "upload",
            Stage::RemoteSync => "remote_sync",
        }
    }
}

/// Event emitted during an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// A pipeline stage started
    StageStarted { stage: Stage },

    /// A pipeline stage was skipped
    StageSkipped { stage: Stage, reason: String },

    /// A command is about to run
    CommandStarted { target: Target, command: String },

    /// A command failed but the operation carries on
    CommandWarning {
        target: Target,
        command: String,
        error: String,
    },

    /// A route was written to disk
    PageRendered { rule: String, path: PathBuf },

    /// A file was gzipped into the output tree
    FileCompressed { path: PathBuf },

    /// A bucket finished synchronizing
    BucketSynced { bucket: String },

    /// A bucket failed to synchronize
    BucketFailed { bucket: String, error: String },

    /// Nothing to do for an operation
    Notice { message: String },

    /// Deploy completed
    Completed {
        pages_rendered: usize,
        files_compressed: usize,
        buckets_synced: usize,
        hosts_updated: usize,
    },
}

/// Trait for receiving deploy events
///
/// Implementations:
/// - ConsoleEventSink: human output on stderr
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait DeployEventSink {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}
