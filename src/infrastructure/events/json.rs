//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Name of the CLI command, repeated on every event
    command: String,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout(command: impl Into<String>) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(command: impl Into<String>, writer: W) -> Self {
        Self {
            command: command.into(),
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        let command = self.command.as_str();
        let json = match event {
            DeployEvent::StageStarted { stage } => serde_json::json!({
                "event": "stage_start",
                "command": command,
                "stage": stage.as_str(),
            }),

            DeployEvent::StageSkipped { stage, reason } => serde_json::json!({
                "event": "stage_skipped",
                "command": command,
                "stage": stage.as_str(),
                "reason": reason,
            }),

            DeployEvent::CommandStarted { target, command: line } => serde_json::json!({
                "event": "run",
                "command": command,
                "target": target.to_string(),
                "local": target.is_local(),
                "line": line,
            }),

            DeployEvent::CommandWarning {
                target,
                command: line,
                error,
            } => serde_json::json!({
                "event": "warning",
                "command": command,
                "target": target.to_string(),
                "line": line,
                "error": error,
            }),

            DeployEvent::PageRendered { rule, path } => serde_json::json!({
                "event": "page_rendered",
                "command": command,
                "rule": rule,
                "path": path.display().to_string(),
            }),

            DeployEvent::FileCompressed { path } => serde_json::json!({
                "event": "file_compressed",
                "command": command,
                "path": path.display().to_string(),
            }),

            DeployEvent::BucketSynced { bucket } => serde_json::json!({
                "event": "bucket_synced",
                "command": command,
                "bucket": bucket,
            }),

            DeployEvent::BucketFailed { bucket, error } => serde_json::json!({
                "event": "bucket_failed",
                "command": command,
                "bucket": bucket,
                "error": error,
            }),

            DeployEvent::Notice { message } => serde_json::json!({
                "event": "notice",
                "command": command,
                "message": message,
            }),

            DeployEvent::Completed {
                pages_rendered,
                files_compressed,
                buckets_synced,
                hosts_updated,
            } => serde_json::json!({
                "event": "complete",
                "command": command,
                "status": "success",
                "pages_rendered": pages_rendered,
                "files_compressed": files_compressed,
                "buckets_synced": buckets_synced,
                "hosts_updated": hosts_updated,
            }),
        };

        self.write_event(json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{Stage, Target};
    use std::sync::{Arc, Mutex};

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    buffer: buffer.clone(),
                },
                buffer,
            )
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<serde_json::Value> {
        String::from_utf8(buffer.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn json_sink_outputs_one_object_per_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer("deploy", writer);

        sink.on_event(DeployEvent::StageStarted {
            stage: Stage::Upload,
        });
        sink.on_event(DeployEvent::CommandStarted {
            target: Target::Local,
            command: "s3cmd sync gzip/ s3://b/app/".to_string(),
        });

        let events = lines(&buffer);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["event"], "stage_start");
        assert_eq!(events[0]["stage"], "upload");
        assert_eq!(events[1]["event"], "run");
        assert_eq!(events[1]["command"], "deploy");
        assert_eq!(events[1]["local"], true);
        assert_eq!(events[1]["line"], "s3cmd sync gzip/ s3://b/app/");
    }

    #[test]
    fn json_sink_outputs_complete_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer("deploy", writer);

        sink.on_event(DeployEvent::Completed {
            pages_rendered: 3,
            files_compressed: 7,
            buckets_synced: 2,
            hosts_updated: 0,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "complete");
        assert_eq!(events[0]["status"], "success");
        assert_eq!(events[0]["files_compressed"], 7);
        assert_eq!(events[0]["buckets_synced"], 2);
    }

    #[test]
    fn json_sink_reports_remote_target() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer("destroy", writer);

        sink.on_event(DeployEvent::CommandWarning {
            target: Target::remote("ubuntu@web1", true),
            command: "rm -rf /srv/app".to_string(),
            error: "exit code 1".to_string(),
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "warning");
        assert_eq!(events[0]["target"], "ubuntu@web1");
        assert_eq!(events[0]["local"], serde_json::Value::Null);
    }
}
