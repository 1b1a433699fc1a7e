//! Template-backed site
//!
//! Implements `Site` for the route table declared in `[site]`: every route
//! renders a tera template with the deployment values plus `[site.context]`.

use std::error::Error as _;
use std::path::Path;

use tera::{Context, Tera};

use crate::config::{Config, RouteConfig};
use crate::domain::context::DeploymentContext;
use crate::error::{DeployError, DeployResult};

use super::render::{Route, Site};

pub struct TemplateSite {
    tera: Tera,
    routes: Vec<RouteConfig>,
    context: Context,
}

impl TemplateSite {
    /// Load templates from `site.templates` (relative to `base_dir`).
    pub fn from_config(
        config: &Config,
        base_dir: &Path,
        ctx: &DeploymentContext,
    ) -> DeployResult<Self> {
        let dir = base_dir.join(&config.site.templates);
        if !dir.is_dir() {
            return Err(DeployError::Config {
                path: dir,
                message: "site.templates is not a directory".to_string(),
            });
        }

        let glob = format!("{}/**/*", dir.display());
        let tera = Tera::new(&glob).map_err(|e| DeployError::Config {
            path: dir.clone(),
            message: describe(&e),
        })?;

        let mut context = Context::new();
        context.insert("project_name", &ctx.project_name);
        context.insert("deployed_name", &ctx.deployed_name);
        context.insert("settings", &ctx.settings.map(|e| e.as_str()));
        context.insert("branch", &ctx.branch);
        for (key, value) in &config.site.context {
            context.insert(key.as_str(), value);
        }

        Ok(Self {
            tera,
            routes: config.site.routes.clone(),
            context,
        })
    }
}

impl Site for TemplateSite {
    fn routes(&self) -> Vec<Route> {
        self.routes
            .iter()
            .map(|r| Route::new(r.rule.clone(), r.endpoint.clone()))
            .collect()
    }

    fn get(&self, rule: &str) -> DeployResult<Vec<u8>> {
        let route = self
            .routes
            .iter()
            .find(|r| r.rule == rule)
            .ok_or_else(|| DeployError::Render {
                rule: rule.to_string(),
                message: "no such route".to_string(),
            })?;

        let template = route.template.as_deref().ok_or_else(|| DeployError::Render {
            rule: rule.to_string(),
            message: format!("endpoint '{}' has no template", route.endpoint),
        })?;

        self.tera
            .render(template, &self.context)
            .map(String::into_bytes)
            .map_err(|e| DeployError::Render {
                rule: rule.to_string(),
                message: describe(&e),
            })
    }
}

/// Tera's top-level message is terse; append the source chain.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
