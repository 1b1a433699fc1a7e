//! Remote provisioning
//!
//! Every routine runs its commands on each configured host in turn; a host's
//! whole sequence finishes before the next host starts. The first failing
//! command aborts the operation. Nothing is rolled back or retried.

use crate::domain::context::{DeploymentContext, Field};
use crate::domain::ports::{DeployEvent, Target};
use crate::domain::preconditions::require;
use crate::domain::tools::{Git, Pip, Shell, Virtualenv};
use crate::error::DeployResult;

use super::executor::Executor;

/// Default git remote for checkouts
pub const DEFAULT_REMOTE: &str = "origin";

/// SSH targets for every host of the selected environment
pub fn remote_targets(ctx: &DeploymentContext) -> Vec<Target> {
    ctx.host_list()
        .iter()
        .map(|host| Target::remote(ctx.ssh_destination(host), ctx.forward_agent))
        .collect()
}

fn for_each_host(
    ctx: &DeploymentContext,
    exec: &Executor<'_>,
    mut step: impl FnMut(&Target) -> DeployResult<()>,
) -> DeployResult<()> {
    let targets = remote_targets(ctx);
    if targets.is_empty() {
        exec.emit(DeployEvent::Notice {
            message: format!(
                "no hosts configured for {}",
                ctx.settings.map(|e| e.as_str()).unwrap_or("this environment")
            ),
        });
        return Ok(());
    }

    for target in &targets {
        step(target)?;
    }
    Ok(())
}

/// Full host setup: directories, virtualenv, clone, checkout, requirements.
pub fn setup(ctx: &DeploymentContext, exec: &Executor<'_>) -> DeployResult<()> {
    require(ctx, &[Field::Settings, Field::Branch, Field::RepoUrl])?;

    for_each_host(ctx, exec, |target| {
        setup_directories_on(ctx, exec, target)?;
        setup_virtualenv_on(ctx, exec, target)?;
        clone_repo_on(ctx, exec, target)?;
        checkout_latest_on(ctx, exec, target, DEFAULT_REMOTE)?;
        install_requirements_on(ctx, exec, target)
    })
}

/// Create the base deployment directory
pub fn setup_directories(ctx: &DeploymentContext, exec: &Executor<'_>) -> DeployResult<()> {
    require(ctx, &[Field::Settings])?;
    for_each_host(ctx, exec, |target| setup_directories_on(ctx, exec, target))
}

/// Build the isolated runtime environment
pub fn setup_virtualenv(ctx: &DeploymentContext, exec: &Executor<'_>) -> DeployResult<()> {
    require(ctx, &[Field::Settings])?;
    for_each_host(ctx, exec, |target| setup_virtualenv_on(ctx, exec, target))
}

/// Clone the source repository and register the mirror remote
pub fn clone_repo(ctx: &DeploymentContext, exec: &Executor<'_>) -> DeployResult<()> {
    require(ctx, &[Field::Settings, Field::RepoUrl])?;
    for_each_host(ctx, exec, |target| clone_repo_on(ctx, exec, target))
}

/// Fetch `remote` and move the checkout to the latest selected branch
pub fn checkout_latest(
    ctx: &DeploymentContext,
    exec: &Executor<'_>,
    remote: &str,
) -> DeployResult<()> {
    require(ctx, &[Field::Settings, Field::Branch])?;
    for_each_host(ctx, exec, |target| {
        checkout_latest_on(ctx, exec, target, remote)
    })
}

/// Install the declared requirements into the virtualenv
pub fn install_requirements(ctx: &DeploymentContext, exec: &Executor<'_>) -> DeployResult<()> {
    require(ctx, &[Field::Settings])?;
    for_each_host(ctx, exec, |target| install_requirements_on(ctx, exec, target))
}

fn setup_directories_on(
    ctx: &DeploymentContext,
    exec: &Executor<'_>,
    target: &Target,
) -> DeployResult<()> {
    exec.run(target, &Shell::mkdir_p(&ctx.paths.base))
}

fn setup_virtualenv_on(
    ctx: &DeploymentContext,
    exec: &Executor<'_>,
    target: &Target,
) -> DeployResult<()> {
    exec.run(
        target,
        &Virtualenv::create(&ctx.python, &ctx.paths.virtualenv),
    )
}

fn clone_repo_on(ctx: &DeploymentContext, exec: &Executor<'_>, target: &Target) -> DeployResult<()> {
    // require() has already checked repo_url
    let Some(url) = ctx.repo_url.as_deref() else {
        return Ok(());
    };
    exec.run(target, &Git::clone(url, &ctx.paths.repo))?;

    if let Some(alt) = &ctx.alt_repo {
        exec.run_best_effort(target, &Git::remote_add(&ctx.paths.repo, &alt.name, &alt.url));
    }
    Ok(())
}

fn checkout_latest_on(
    ctx: &DeploymentContext,
    exec: &Executor<'_>,
    target: &Target,
    remote: &str,
) -> DeployResult<()> {
    let branch = ctx.branch_name().unwrap_or_default();
    let repo = &ctx.paths.repo;

    exec.run(target, &Git::fetch(repo, remote))?;
    exec.run(target, &Git::checkout(repo, branch))?;
    exec.run(target, &Git::pull(repo, remote, branch))
}

fn install_requirements_on(
    ctx: &DeploymentContext,
    exec: &Executor<'_>,
    target: &Target,
) -> DeployResult<()> {
    let requirements = format!(
        "{}/{}",
        ctx.paths.repo.trim_end_matches('/'),
        ctx.requirements
    );
    exec.run(
        target,
        &Pip::install_requirements(&ctx.paths.virtualenv, &requirements),
    )
}

/// Checkout on every host, used by the deploy pipeline's remote sync stage.
/// Returns the number of hosts updated.
pub(crate) fn sync_hosts(
    ctx: &DeploymentContext,
    exec: &Executor<'_>,
    remote: &str,
) -> DeployResult<usize> {
    let mut updated = 0;
    for_each_host(ctx, exec, |target| {
        checkout_latest_on(ctx, exec, target, remote)?;
        updated += 1;
        Ok(())
    })?;
    Ok(updated)
}
