//! Deployment pipeline
//!
//! COMPILE -> COMPRESS -> UPLOAD, then REMOTE_SYNC when servers are enabled.
//! Each stage only starts once the previous one succeeded. The branch gate
//! runs before COMPILE so a declined confirmation has no side effects.

use std::fs;
use std::path::PathBuf;

use crate::domain::command::CommandSpec;
use crate::domain::context::{DeploymentContext, Field};
use crate::domain::ports::{DeployEvent, Prompter, Stage, Target};
use crate::domain::preconditions::{confirm_branch, require};
use crate::domain::tools::{S3Location, S3cmd};
use crate::error::{BucketFailure, DeployError, DeployResult};

use super::compress::gzip_tree;
use super::executor::Executor;
use super::provision::{sync_hosts, DEFAULT_REMOTE};
use super::render::{render_site, Site};

/// Options for one deploy run
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Git remote used by the remote sync stage
    pub remote: String,
    /// Rendered site root
    pub www: PathBuf,
    /// Gzipped tree that gets uploaded
    pub gzip_dir: PathBuf,
    /// Static asset build, run first in COMPILE
    pub assets_command: Option<CommandSpec>,
    /// External compressor; `None` selects the built-in gzip
    pub gzip_command: Option<CommandSpec>,
    /// Report commands without running them or touching local files
    pub dry_run: bool,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            www: PathBuf::from("www"),
            gzip_dir: PathBuf::from("gzip"),
            assets_command: None,
            gzip_command: None,
            dry_run: false,
        }
    }
}

/// What a deploy did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    pub pages_rendered: usize,
    pub files_compressed: usize,
    pub buckets_synced: Vec<String>,
    pub hosts_updated: usize,
    pub stages: Vec<Stage>,
}

/// Runs the deploy pipeline against one context
pub struct DeployUseCase<'a> {
    ctx: &'a DeploymentContext,
    exec: Executor<'a>,
    prompter: &'a dyn Prompter,
    site: Option<&'a dyn Site>,
}

impl<'a> DeployUseCase<'a> {
    pub fn new(
        ctx: &'a DeploymentContext,
        exec: Executor<'a>,
        prompter: &'a dyn Prompter,
    ) -> Self {
        Self {
            ctx,
            exec,
            prompter,
            site: None,
        }
    }

    /// Render this site into `www` during COMPILE
    pub fn with_site(mut self, site: &'a dyn Site) -> Self {
        self.site = Some(site);
        self
    }

    pub fn execute(&self, options: &DeployOptions) -> DeployResult<DeployReport> {
        require(self.ctx, &[Field::Settings, Field::Branch])?;
        confirm_branch(self.ctx, self.prompter)?;

        let mut report = DeployReport::default();

        self.start(Stage::Compile, &mut report);
        report.pages_rendered = self.compile(options)?;

        self.start(Stage::Compress, &mut report);
        report.files_compressed = self.compress(options)?;

        self.start(Stage::Upload, &mut report);
        report.buckets_synced = self.upload(options)?;

        if self.ctx.deploy_to_servers {
            self.start(Stage::RemoteSync, &mut report);
            report.hosts_updated = sync_hosts(self.ctx, &self.exec, &options.remote)?;
        } else {
            self.exec.emit(DeployEvent::StageSkipped {
                stage: Stage::RemoteSync,
                reason: "deploy_to_servers is off".to_string(),
            });
        }

        self.exec.emit(DeployEvent::Completed {
            pages_rendered: report.pages_rendered,
            files_compressed: report.files_compressed,
            buckets_synced: report.buckets_synced.len(),
            hosts_updated: report.hosts_updated,
        });

        Ok(report)
    }

    fn start(&self, stage: Stage, report: &mut DeployReport) {
        self.exec.emit(DeployEvent::StageStarted { stage });
        report.stages.push(stage);
    }

    fn compile(&self, options: &DeployOptions) -> DeployResult<usize> {
        if let Some(assets) = &options.assets_command {
            self.exec.run(&Target::Local, assets)?;
        }

        let Some(site) = self.site else {
            return Ok(0);
        };

        if options.dry_run {
            self.exec.emit(DeployEvent::Notice {
                message: format!("dry run: not rendering into {}", options.www.display()),
            });
            return Ok(0);
        }

        fs::create_dir_all(&options.www).map_err(|e| DeployError::io(&options.www, e))?;
        let pages = render_site(self.ctx, site, &options.www, self.exec.events())?;
        Ok(pages.len())
    }

    fn compress(&self, options: &DeployOptions) -> DeployResult<usize> {
        if let Some(command) = &options.gzip_command {
            self.exec.run(&Target::Local, command)?;
            return Ok(0);
        }

        if options.dry_run {
            self.exec.emit(DeployEvent::Notice {
                message: format!(
                    "dry run: not compressing {} into {}",
                    options.www.display(),
                    options.gzip_dir.display()
                ),
            });
            return Ok(0);
        }

        let files = gzip_tree(&options.www, &options.gzip_dir, self.exec.events())?;
        Ok(files.len())
    }

    /// Sync every bucket; failures are collected, never short-circuit.
    fn upload(&self, options: &DeployOptions) -> DeployResult<Vec<String>> {
        let local = options.gzip_dir.to_string_lossy();
        let mut synced = Vec::new();
        let mut failures = Vec::new();

        if self.ctx.buckets().is_empty() {
            self.exec.emit(DeployEvent::Notice {
                message: "no buckets configured; nothing uploaded".to_string(),
            });
        }

        for bucket in self.ctx.buckets() {
            let dest = S3Location::new(bucket.clone(), self.ctx.deployed_name.clone());
            let command = S3cmd::sync(&local, &dest, &self.ctx.cache_control);

            match self.exec.run(&Target::Local, &command) {
                Ok(()) => {
                    self.exec.emit(DeployEvent::BucketSynced {
                        bucket: bucket.clone(),
                    });
                    synced.push(bucket.clone());
                }
                Err(e) => {
                    self.exec.emit(DeployEvent::BucketFailed {
                        bucket: bucket.clone(),
                        error: e.to_string(),
                    });
                    failures.push(BucketFailure {
                        bucket: bucket.clone(),
                        message: e.to_string(),
                        code: e.exit_code(),
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(synced)
        } else {
            Err(DeployError::UploadFailed { failures })
        }
    }
}
