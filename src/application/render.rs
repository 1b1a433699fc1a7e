//! Static site rendering
//!
//! Walks a site's route table, requests each public route in-process and
//! writes the body to a file that mirrors the route.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::context::{DeploymentContext, Field};
use crate::domain::ports::{DeployEvent, DeployEventSink};
use crate::domain::preconditions::require;
use crate::error::{DeployError, DeployResult};

/// Endpoint name of the framework's static-file handler
pub const STATIC_ENDPOINT: &str = "static";

/// Endpoints starting with this prefix are internal and never rendered
pub const PRIVATE_PREFIX: char = '_';

/// One entry of a route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// URL rule, e.g. `/` or `/about/` or `/data.json`
    pub rule: String,
    /// Handler name
    pub endpoint: String,
}

impl Route {
    pub fn new(rule: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// A web application that can be rendered without a server
pub trait Site {
    /// The route table, in iteration order
    fn routes(&self) -> Vec<Route>;

    /// Issue an in-process GET for `rule` and return the response body
    fn get(&self, rule: &str) -> DeployResult<Vec<u8>>;
}

/// Whether a route's endpoint produces a public page
pub fn should_render(endpoint: &str) -> bool {
    endpoint != STATIC_ENDPOINT && !endpoint.starts_with(PRIVATE_PREFIX)
}

/// Map a route rule to its output file under `root`.
///
/// `/foo/` maps to `<root>/foo/index.html`, `/foo` to `<root>/foo`.
pub fn output_path(root: &Path, rule: &str) -> PathBuf {
    let mut relative = rule.trim_start_matches('/').to_string();
    if rule.ends_with('/') {
        relative.push_str("index.html");
    }
    root.join(relative)
}

/// Render every public route of `site` under `output_root`.
///
/// Existing files are overwritten; parent directories must already exist.
/// The first failing request or write aborts the pass.
pub fn render_site(
    ctx: &DeploymentContext,
    site: &dyn Site,
    output_root: &Path,
    events: &dyn DeployEventSink,
) -> DeployResult<Vec<PathBuf>> {
    require(ctx, &[Field::Settings, Field::Branch])?;

    let mut written = Vec::new();
    for route in site.routes() {
        if !should_render(&route.endpoint) {
            continue;
        }

        let path = output_path(output_root, &route.rule);
        let body = site.get(&route.rule)?;
        fs::write(&path, body).map_err(|e| DeployError::io(&path, e))?;

        events.on_event(DeployEvent::PageRendered {
            rule: route.rule.clone(),
            path: path.clone(),
        });
        written.push(path);
    }

    Ok(written)
}
