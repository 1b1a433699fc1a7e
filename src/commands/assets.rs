use anyhow::Result;

use stagehand::application::run_assets;

use super::Session;

pub fn cmd_assets(session: &Session, watch: bool) -> Result<()> {
    let command = if watch {
        session.watch_command()
    } else {
        session.assets_command()
    };

    run_assets(&session.executor(), command.as_ref())?;
    Ok(())
}
