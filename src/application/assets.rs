//! Local static-asset workflow

use crate::domain::command::CommandSpec;
use crate::domain::ports::{DeployEvent, Target};
use crate::error::DeployResult;

use super::executor::Executor;

/// Run the asset build (or watch) command locally. Blocks until it exits.
pub fn run_assets(exec: &Executor<'_>, command: Option<&CommandSpec>) -> DeployResult<()> {
    match command {
        Some(command) => exec.run(&Target::Local, command),
        None => {
            exec.emit(DeployEvent::Notice {
                message: "no asset command configured".to_string(),
            });
            Ok(())
        }
    }
}
