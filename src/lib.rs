//! Stagehand - deployment automation for statically rendered web apps
//!
//! Stagehand provisions application servers over SSH, renders every public
//! route of a site to static files, gzips the result and synchronizes it to
//! one or more S3 buckets. Every operation runs against an explicit
//! [`DeploymentContext`] built from `stagehand.toml` and the CLI selectors.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{DeployOptions, DeployReport, DeployUseCase, Executor, Site, TemplateSite};
pub use config::{Config, ConfigWarning};
pub use domain::context::{DeploymentContext, Environment, Field};
pub use domain::ports::{CommandRunner, DeployEvent, DeployEventSink, Prompter, Stage, Target};
pub use error::{DeployError, DeployResult};
