//! Teardown
//!
//! Best-effort removal of a deployment: every delete is attempted and
//! failures are reported as warnings. There is no confirmation prompt.

use crate::domain::command::CommandSpec;
use crate::domain::context::{DeploymentContext, Field};
use crate::domain::ports::Target;
use crate::domain::preconditions::require;
use crate::domain::tools::{S3Location, S3cmd, Shell};
use crate::error::DeployResult;

use super::executor::Executor;
use super::provision::remote_targets;

/// Outcome of a teardown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub attempted: usize,
    pub failed: usize,
}

/// Delete the app from every bucket (and the alt bucket), then from the
/// servers when `deploy_to_servers` is set.
pub fn destroy(ctx: &DeploymentContext, exec: &Executor<'_>) -> DeployResult<TeardownReport> {
    require(ctx, &[Field::Settings])?;

    let mut report = TeardownReport::default();
    let mut attempt = |target: &Target, command: CommandSpec| {
        report.attempted += 1;
        if !exec.run_best_effort(target, &command) {
            report.failed += 1;
        }
    };

    let buckets = ctx
        .buckets()
        .iter()
        .chain(ctx.alt_s3_bucket.iter());
    for bucket in buckets {
        let dest = S3Location::new(bucket.clone(), ctx.deployed_name.clone());
        attempt(&Target::Local, S3cmd::delete_recursive(&dest));
    }

    if ctx.deploy_to_servers {
        for target in remote_targets(ctx) {
            attempt(&target, Shell::rm_rf(&ctx.paths.base));
        }
    }

    Ok(report)
}
