//! Precondition checks
//!
//! `require` is a pure presence check over the deployment context.
//! `confirm_branch` gates production deploys of anything but the stable branch
//! behind an explicit answer from the operator.

use crate::domain::context::{DeploymentContext, Environment, Field};
use crate::domain::ports::Prompter;
use crate::error::{DeployError, DeployResult, MissingField};

/// Answers accepted by the production branch gate. Matched case-sensitively.
pub const AFFIRMATIVE_ANSWERS: &[&str] = &["y", "Y", "yes", "Yes", "buzz off", "screw you"];

/// Answer assumed when the operator just presses enter.
pub const DEFAULT_ANSWER: &str = "Not at all";

/// Fail with every unset field in `fields`, in the order given.
pub fn require(ctx: &DeploymentContext, fields: &[Field]) -> DeployResult<()> {
    let missing: Vec<MissingField> = fields
        .iter()
        .filter(|field| !ctx.is_set(**field))
        .map(|field| MissingField {
            name: field.name(),
            provided_by: field.provided_by(),
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DeployError::MissingPrecondition { missing })
    }
}

/// Whether a deploy may proceed without asking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchGate {
    Allowed,
    NeedsConfirmation,
}

impl BranchGate {
    pub fn for_context(ctx: &DeploymentContext) -> Self {
        match (ctx.settings, ctx.branch_name()) {
            (Some(Environment::Production), Some(branch)) if branch != ctx.stable_branch => {
                BranchGate::NeedsConfirmation
            }
            _ => BranchGate::Allowed,
        }
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    AFFIRMATIVE_ANSWERS.contains(&answer)
}

/// Ask for confirmation when deploying a non-stable branch to production.
///
/// Returns `DeployError::Aborted` unless the answer is in
/// [`AFFIRMATIVE_ANSWERS`].
pub fn confirm_branch(ctx: &DeploymentContext, prompter: &dyn Prompter) -> DeployResult<()> {
    if BranchGate::for_context(ctx) == BranchGate::Allowed {
        return Ok(());
    }

    let message = format!(
        "You are trying to deploy the '{}' branch to production.\n\
         You should really only deploy a stable branch.\n\
         Do you know what you're doing?",
        ctx.branch_name().unwrap_or_default()
    );

    // An unreadable answer counts as a refusal.
    let answer = prompter
        .prompt(&message, DEFAULT_ANSWER)
        .unwrap_or_else(|_| DEFAULT_ANSWER.to_string());

    if is_affirmative(&answer) {
        Ok(())
    } else {
        Err(DeployError::Aborted)
    }
}
