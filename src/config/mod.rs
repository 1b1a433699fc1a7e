//! Configuration module for stagehand
//!
//! Precedence, highest first:
//! 1. CLI flags (`--env`, `--branch`, `--servers`)
//! 2. Environment variables (STAGEHAND_*)
//! 3. `stagehand.toml` (or the file given with `--config`)
//! 4. Built-in defaults

mod loader;
mod types;

pub use loader::{
    load_with_warnings, resolve_path, with_env_overrides, ConfigWarning, CONFIG_FILE_NAME,
};
pub use types::{
    BuildConfig, Config, EnvironmentConfig, ProjectConfig, RemoteConfig, RouteConfig, SiteConfig,
    StorageConfig,
};
