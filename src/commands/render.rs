use std::path::Path;

use anyhow::{Context, Result};

use stagehand::application::render_site;
use stagehand::domain::preconditions::require;
use stagehand::{DeployEvent, Field, TemplateSite};

use super::Session;

pub fn cmd_render(session: &Session) -> Result<()> {
    let ctx = &session.ctx;
    require(ctx, &[Field::Settings, Field::Branch])?;

    let exec = session.executor();
    if !session.config.has_site() {
        exec.emit(DeployEvent::Notice {
            message: "no [site] routes configured; nothing to render".to_string(),
        });
        return Ok(());
    }

    let www = session.www();
    if session.dry_run {
        exec.emit(DeployEvent::Notice {
            message: format!("dry run: not rendering into {}", www.display()),
        });
        return Ok(());
    }

    let site = TemplateSite::from_config(&session.config, Path::new("."), ctx)?;
    std::fs::create_dir_all(&www).with_context(|| format!("Failed to create {}", www.display()))?;
    let pages = render_site(ctx, &site, &www, exec.events())?;

    exec.emit(DeployEvent::Notice {
        message: format!("Rendered {} pages into {}", pages.len(), www.display()),
    });
    Ok(())
}
