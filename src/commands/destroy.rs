use anyhow::Result;

use stagehand::application::destroy;
use stagehand::DeployEvent;

use super::Session;

pub fn cmd_destroy(session: &Session) -> Result<()> {
    let exec = session.executor();
    let report = destroy(&session.ctx, &exec)?;

    let message = if report.failed == 0 {
        format!("Removed {} locations", report.attempted)
    } else {
        format!(
            "Attempted {} deletes, {} failed (see warnings above)",
            report.attempted, report.failed
        )
    };
    exec.emit(DeployEvent::Notice { message });
    Ok(())
}
