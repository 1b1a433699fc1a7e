//! Application layer - the operations stagehand exposes

pub mod assets;
pub mod compress;
pub mod deploy;
pub mod executor;
pub mod provision;
pub mod render;
pub mod site;
pub mod teardown;

pub use assets::run_assets;
pub use compress::gzip_tree;
pub use deploy::{DeployOptions, DeployReport, DeployUseCase};
pub use executor::Executor;
pub use provision::{
    checkout_latest, clone_repo, install_requirements, setup, setup_directories,
    setup_virtualenv, DEFAULT_REMOTE,
};
pub use render::{output_path, render_site, should_render, Route, Site};
pub use site::TemplateSite;
pub use teardown::{destroy, TeardownReport};
