use std::path::Path;

use anyhow::Result;

use stagehand::application::{DeployOptions, DeployUseCase};
use stagehand::infrastructure::terminal_prompter;
use stagehand::TemplateSite;

use super::Session;

pub fn cmd_deploy(session: &Session, remote: &str) -> Result<()> {
    let options = DeployOptions {
        remote: remote.to_string(),
        www: session.www(),
        gzip_dir: session.gzip_dir(),
        assets_command: session.assets_command(),
        gzip_command: session.gzip_command(),
        dry_run: session.dry_run,
    };

    let site = if session.config.has_site() {
        Some(TemplateSite::from_config(
            &session.config,
            Path::new("."),
            &session.ctx,
        )?)
    } else {
        None
    };

    let prompter = terminal_prompter();
    let mut use_case = DeployUseCase::new(&session.ctx, session.executor(), prompter.as_ref());
    if let Some(site) = &site {
        use_case = use_case.with_site(site);
    }

    use_case.execute(&options)?;
    Ok(())
}
