//! Reusable configuration fixtures.

use stagehand::config::Config;
use stagehand::{DeploymentContext, Environment};

/// A project with one staging bucket and two production buckets.
pub const PROJECT_CONFIG: &str = r#"
[project]
name = "election-map"
org = "newsapps"
alt_repo_url = "git@bitbucket.org:newsapps/election-map.git"

[staging]
buckets = ["stg-bucket"]
hosts = ["stage1.example.org"]

[production]
buckets = ["prod-a", "prod-b"]
hosts = ["web1.example.org", "web2.example.org"]

[storage]
alt_bucket = "old-apps"

[build]
assets = []
"#;

/// Same project, with a two-route template site.
pub const SITE_CONFIG: &str = r#"
[project]
name = "election-map"

[staging]
buckets = ["stg-bucket"]

[production]
buckets = ["prod-a"]

[build]
assets = []

[site]
templates = "templates"

[[site.routes]]
rule = "/"
endpoint = "index"
template = "index.html"

[[site.routes]]
rule = "/static/<path:filename>"
endpoint = "static"

[site.context]
title = "Election Map"
"#;

pub const INDEX_TEMPLATE: &str = "<h1>{{ title }}</h1><p>{{ settings }} on {{ branch }}</p>";

pub fn project_config() -> Config {
    Config::from_toml_str(PROJECT_CONFIG).expect("fixture config parses")
}

/// Context with the given selectors applied.
pub fn context(env: Option<Environment>, branch: Option<&str>) -> DeploymentContext {
    let config = project_config();
    let mut ctx = DeploymentContext::from_config(&config);
    if let Some(env) = env {
        ctx.select_environment(env, &config);
    }
    if let Some(branch) = branch {
        ctx.select_branch(branch);
    }
    ctx
}
