//! Stagehand CLI - provision hosts, render a static site and ship it to S3
//!
//! Usage: stagehand [--env <ENV>] [--branch <NAME>] <COMMAND>
//!
//! Commands:
//!   setup       Prepare every host (directories, virtualenv, clone, requirements)
//!   render      Render the site into www/
//!   deploy      Compile, compress, upload and optionally update servers
//!   destroy     Remove the deployment from buckets and servers

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use stagehand::presentation::{Cli, Commands};
use stagehand::DeployError;

mod commands;
mod ui;

use commands::Session;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let color = !cli.json && ui::terminal::stderr_supports_color();

    match run(&cli, color) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::error::print_error(&err, cli.json, color);
            ExitCode::from(exit_status(&err))
        }
    }
}

fn run(cli: &Cli, color: bool) -> Result<()> {
    let session = Session::open(cli, color)?;

    match &cli.command {
        Commands::Render => commands::render::cmd_render(&session),
        Commands::Assets { watch } => commands::assets::cmd_assets(&session, *watch),
        Commands::Gzip => commands::gzip::cmd_gzip(&session),
        Commands::Deploy { remote } => commands::deploy::cmd_deploy(&session, remote),
        Commands::Destroy => commands::destroy::cmd_destroy(&session),
        provisioning => commands::provision::cmd_provision(&session, provisioning),
    }
}

/// Exit status for a failed invocation: the failing subprocess's own code
/// when there is one, 1 otherwise.
fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<DeployError>()
        .and_then(DeployError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subprocess_exit_code_is_propagated() {
        let err = anyhow::Error::new(DeployError::CommandFailed {
            command: "s3cmd sync gzip/ s3://b/app/".into(),
            target: "localhost".into(),
            code: Some(12),
        });
        assert_eq!(exit_status(&err), 12);
    }

    #[test]
    fn other_errors_exit_with_one() {
        assert_eq!(exit_status(&anyhow::Error::new(DeployError::Aborted)), 1);
        assert_eq!(exit_status(&anyhow::anyhow!("boom")), 1);

        let signalled = anyhow::Error::new(DeployError::CommandFailed {
            command: "git pull".into(),
            target: "web1".into(),
            code: None,
        });
        assert_eq!(exit_status(&signalled), 1);
    }
}
