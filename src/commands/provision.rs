use anyhow::Result;

use stagehand::application::provision;
use stagehand::presentation::Commands;

use super::Session;

pub fn cmd_provision(session: &Session, command: &Commands) -> Result<()> {
    let ctx = &session.ctx;
    let exec = session.executor();

    match command {
        Commands::Setup => provision::setup(ctx, &exec)?,
        Commands::SetupDirectories => provision::setup_directories(ctx, &exec)?,
        Commands::SetupVirtualenv => provision::setup_virtualenv(ctx, &exec)?,
        Commands::CloneRepo => provision::clone_repo(ctx, &exec)?,
        Commands::Checkout { remote } => provision::checkout_latest(ctx, &exec, remote)?,
        Commands::InstallRequirements => provision::install_requirements(ctx, &exec)?,
        other => anyhow::bail!("'{}' is not a provisioning command", other.name()),
    }

    Ok(())
}
