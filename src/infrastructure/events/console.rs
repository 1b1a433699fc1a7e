//! Console Event Sink
//!
//! Human-readable progress on stderr, in the `[host] run: command` shape
//! operators know from remote task runners.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::Stylize;

use crate::domain::ports::{DeployEvent, DeployEventSink};

/// Event sink that prints progress lines
pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    color: bool,
    verbose: bool,
}

impl ConsoleEventSink {
    /// Print to stderr
    pub fn stderr(color: bool, verbose: bool) -> Self {
        Self::with_writer(io::stderr(), color, verbose)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, color: bool, verbose: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            color,
            verbose,
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
            let _ = writer.flush();
        }
    }

    fn bold(&self, text: String) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text
        }
    }

    fn yellow(&self, text: String) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text
        }
    }

    fn red(&self, text: String) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text
        }
    }

    fn green(&self, text: String) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text
        }
    }

    /// Format an event, `None` when it is not shown at this verbosity
    pub fn format(&self, event: &DeployEvent) -> Option<String> {
        let text = match event {
            DeployEvent::StageStarted { stage } => {
                if !self.verbose {
                    return None;
                }
                self.bold(format!("==> {}", stage.as_str()))
            }
            DeployEvent::StageSkipped { stage, reason } => {
                if !self.verbose {
                    return None;
                }
                format!("==> {} skipped ({})", stage.as_str(), reason)
            }
            DeployEvent::CommandStarted { target, command } => {
                let verb = if target.is_local() { "local" } else { "run" };
                format!("[{}] {}: {}", target, verb, command)
            }
            DeployEvent::CommandWarning {
                target,
                command,
                error,
            } => self.yellow(format!("[{}] Warning: {} ({})", target, command, error)),
            DeployEvent::PageRendered { path, .. } => {
                format!("Rendering {}", path.display())
            }
            DeployEvent::FileCompressed { path } => {
                if !self.verbose {
                    return None;
                }
                format!("Compressed {}", path.display())
            }
            DeployEvent::BucketSynced { bucket } => {
                if !self.verbose {
                    return None;
                }
                format!("Synced {}", bucket)
            }
            DeployEvent::BucketFailed { bucket, error } => {
                self.red(format!("Upload to {} failed: {}", bucket, error))
            }
            DeployEvent::Notice { message } => message.clone(),
            DeployEvent::Completed {
                pages_rendered,
                files_compressed,
                buckets_synced,
                hosts_updated,
            } => self.green(format!(
                "Done. {} pages rendered, {} files compressed, {} buckets synced, {} hosts updated",
                pages_rendered, files_compressed, buckets_synced, hosts_updated
            )),
        };
        Some(text)
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        if let Some(text) = self.format(&event) {
            self.line(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{Stage, Target};
    use std::path::PathBuf;

    fn plain(verbose: bool) -> ConsoleEventSink {
        ConsoleEventSink::with_writer(io::sink(), false, verbose)
    }

    #[test]
    fn command_lines_name_the_target() {
        let sink = plain(false);
        assert_eq!(
            sink.format(&DeployEvent::CommandStarted {
                target: Target::Local,
                command: "node_modules/.bin/grunt".into(),
            })
            .unwrap(),
            "[localhost] local: node_modules/.bin/grunt"
        );
        assert_eq!(
            sink.format(&DeployEvent::CommandStarted {
                target: Target::remote("ubuntu@web1", true),
                command: "mkdir -p /home/ubuntu/apps/app".into(),
            })
            .unwrap(),
            "[ubuntu@web1] run: mkdir -p /home/ubuntu/apps/app"
        );
    }

    #[test]
    fn compressed_files_only_when_verbose() {
        let event = DeployEvent::FileCompressed {
            path: PathBuf::from("index.html"),
        };
        assert_eq!(plain(false).format(&event), None);
        assert_eq!(
            plain(true).format(&event).as_deref(),
            Some("Compressed index.html")
        );
    }

    #[test]
    fn stage_banner_and_summary() {
        let banner = DeployEvent::StageStarted {
            stage: Stage::RemoteSync,
        };
        assert_eq!(plain(false).format(&banner), None);
        assert_eq!(
            plain(true).format(&banner).as_deref(),
            Some("==> remote_sync")
        );

        let sink = plain(false);
        insta::assert_snapshot!(
            sink.format(&DeployEvent::Completed {
                pages_rendered: 2,
                files_compressed: 5,
                buckets_synced: 1,
                hosts_updated: 0,
            }).unwrap(),
            @"Done. 2 pages rendered, 5 files compressed, 1 buckets synced, 0 hosts updated"
        );
    }
}
