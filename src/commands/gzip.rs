use anyhow::Result;

use stagehand::application::gzip_tree;
use stagehand::{DeployEvent, Target};

use super::Session;

pub fn cmd_gzip(session: &Session) -> Result<()> {
    let exec = session.executor();

    if let Some(command) = session.gzip_command() {
        exec.run(&Target::Local, &command)?;
        return Ok(());
    }

    let (www, gzip_dir) = (session.www(), session.gzip_dir());
    if session.dry_run {
        exec.emit(DeployEvent::Notice {
            message: format!(
                "dry run: not compressing {} into {}",
                www.display(),
                gzip_dir.display()
            ),
        });
        return Ok(());
    }

    let files = gzip_tree(&www, &gzip_dir, exec.events())?;
    exec.emit(DeployEvent::Notice {
        message: format!("Compressed {} files into {}", files.len(), gzip_dir.display()),
    });
    Ok(())
}
