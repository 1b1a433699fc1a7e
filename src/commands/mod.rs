//! Command handlers
//!
//! Every handler opens a `Session`: configuration, the deployment context with
//! the CLI selectors applied, and the runner/event sink pair chosen by the
//! output flags.

pub mod assets;
pub mod deploy;
pub mod destroy;
pub mod gzip;
pub mod provision;
pub mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use stagehand::application::Executor;
use stagehand::config::{self, Config};
use stagehand::domain::command::CommandSpec;
use stagehand::infrastructure::{ConsoleEventSink, DryRunRunner, JsonEventSink, SystemRunner};
use stagehand::presentation::Cli;
use stagehand::{CommandRunner, DeployEventSink, DeploymentContext};

use crate::ui::output::print_config_warnings;

/// Everything one invocation needs
pub struct Session {
    pub config: Config,
    pub ctx: DeploymentContext,
    pub dry_run: bool,
    runner: Box<dyn CommandRunner>,
    events: Box<dyn DeployEventSink>,
}

impl Session {
    /// Load configuration and apply the CLI selectors.
    ///
    /// Relative paths in the configuration resolve against the directory
    /// holding the config file, so the process switches into it.
    pub fn open(cli: &Cli, color: bool) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let path = config::resolve_path(cli.config.as_deref(), &cwd);

        let (config, warnings) = config::load_with_warnings(&path)?;
        print_config_warnings(&warnings, cli.json);
        let config = config::with_env_overrides(config);

        if let Some(dir) = project_dir(&path) {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Failed to enter {}", dir.display()))?;
        }

        let mut ctx = DeploymentContext::from_config(&config);
        if let Some(env) = cli.env {
            ctx.select_environment(env, &config);
        }
        if let Some(branch) = &cli.branch {
            ctx.select_branch(branch.clone());
        }
        if cli.servers {
            ctx.deploy_to_servers = true;
        }

        let runner: Box<dyn CommandRunner> = if cli.dry_run {
            Box::new(DryRunRunner)
        } else {
            Box::new(SystemRunner::new().with_stdout_to_stderr(cli.json))
        };

        let events: Box<dyn DeployEventSink> = if cli.json {
            Box::new(JsonEventSink::stdout(cli.command.name()))
        } else {
            Box::new(ConsoleEventSink::stderr(color, cli.verbose))
        };

        Ok(Self {
            config,
            ctx,
            dry_run: cli.dry_run,
            runner,
            events,
        })
    }

    pub fn executor(&self) -> Executor<'_> {
        Executor::new(self.runner.as_ref(), self.events.as_ref())
    }

    pub fn www(&self) -> PathBuf {
        self.config.build.www.clone()
    }

    pub fn gzip_dir(&self) -> PathBuf {
        self.config.build.gzip_dir.clone()
    }

    pub fn assets_command(&self) -> Option<CommandSpec> {
        CommandSpec::from_argv(&self.config.build.assets)
    }

    pub fn watch_command(&self) -> Option<CommandSpec> {
        CommandSpec::from_argv(&self.config.build.watch)
    }

    pub fn gzip_command(&self) -> Option<CommandSpec> {
        CommandSpec::from_argv(&self.config.build.gzip)
    }
}

fn project_dir(config_path: &Path) -> Option<&Path> {
    config_path.parent().filter(|p| !p.as_os_str().is_empty())
}
