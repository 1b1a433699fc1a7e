//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Selectors (--env, --branch, --servers) are global and applied to the
//!   deployment context before the subcommand runs
//! - Output flags (--json, --verbose, --dry-run) are inherited by all subcommands

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::context::Environment;

/// Stagehand - provision hosts, render a static site and ship it to S3
#[derive(Parser, Debug)]
#[command(name = "stagehand")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example: stagehand --env staging --branch master deploy")]
pub struct Cli {
    /// Configuration file (default: ./stagehand.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Target environment
    #[arg(short, long, global = true, value_name = "ENV", value_parser = parse_environment)]
    pub env: Option<Environment>,

    /// Branch to deploy or check out
    #[arg(short, long, global = true, value_name = "NAME")]
    pub branch: Option<String>,

    /// Also update the application servers
    #[arg(long, global = true)]
    pub servers: bool,

    /// Print commands without running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Also print stage banners and per-file progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

fn parse_environment(value: &str) -> Result<Environment, String> {
    value.parse()
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create directories, virtualenv, clone, check out and install on every host
    Setup,

    /// Create the app directory on every host
    SetupDirectories,

    /// Create the virtualenv on every host
    SetupVirtualenv,

    /// Clone the repository on every host
    CloneRepo,

    /// Fetch, check out and pull the branch on every host
    Checkout {
        /// Git remote to pull from
        #[arg(default_value = "origin")]
        remote: String,
    },

    /// Install Python requirements into the virtualenv on every host
    InstallRequirements,

    /// Render every public route into the www directory
    Render,

    /// Build static assets
    Assets {
        /// Run the watch command instead (blocks)
        #[arg(long)]
        watch: bool,
    },

    /// Gzip the www directory
    Gzip,

    /// Compile, compress and upload; update servers when enabled
    Deploy {
        /// Git remote the servers pull from
        #[arg(default_value = "origin")]
        remote: String,
    },

    /// Remove the app from every bucket (and servers when enabled)
    Destroy,
}

impl Commands {
    /// Name used in event output
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Setup => "setup",
            Commands::SetupDirectories => "setup-directories",
            Commands::SetupVirtualenv => "setup-virtualenv",
            Commands::CloneRepo => "clone-repo",
            Commands::Checkout { .. } => "checkout",
            Commands::InstallRequirements => "install-requirements",
            Commands::Render => "render",
            Commands::Assets { .. } => "assets",
            Commands::Gzip => "gzip",
            Commands::Deploy { .. } => "deploy",
            Commands::Destroy => "destroy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_deploy_defaults() {
        let cli = Cli::try_parse_from(["stagehand", "deploy"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Deploy {
                remote: "origin".to_string()
            }
        );
        assert_eq!(cli.env, None);
        assert_eq!(cli.branch, None);
        assert!(!cli.servers);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_parse_selectors() {
        let cli = Cli::try_parse_from([
            "stagehand",
            "-e",
            "production",
            "--branch",
            "stable",
            "--servers",
            "deploy",
            "upstream",
        ])
        .unwrap();
        assert_eq!(cli.env, Some(Environment::Production));
        assert_eq!(cli.branch.as_deref(), Some("stable"));
        assert!(cli.servers);
        assert_eq!(
            cli.command,
            Commands::Deploy {
                remote: "upstream".to_string()
            }
        );
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["stagehand", "destroy", "--env", "staging", "--dry-run"]).unwrap();
        assert_eq!(cli.env, Some(Environment::Staging));
        assert!(cli.dry_run);
        assert_eq!(cli.command, Commands::Destroy);
    }

    #[test]
    fn test_cli_rejects_unknown_environment() {
        assert!(Cli::try_parse_from(["stagehand", "--env", "qa", "deploy"]).is_err());
    }

    #[test]
    fn test_cli_parse_checkout_and_assets() {
        let cli = Cli::try_parse_from(["stagehand", "checkout"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Checkout {
                remote: "origin".to_string()
            }
        );

        let cli = Cli::try_parse_from(["stagehand", "assets", "--watch"]).unwrap();
        assert_eq!(cli.command, Commands::Assets { watch: true });
    }

    #[test]
    fn test_cli_verbose_and_json() {
        let cli = Cli::try_parse_from(["stagehand", "-v", "--json", "render"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.json);
        assert_eq!(cli.command.name(), "render");
    }

    #[test]
    fn test_cli_verbose_is_a_switch() {
        let cli = Cli::try_parse_from(["stagehand", "render"]).unwrap();
        assert!(!cli.verbose);

        let cli = Cli::try_parse_from(["stagehand", "render", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["stagehand"]).is_err());
    }
}
