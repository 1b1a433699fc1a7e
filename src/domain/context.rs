//! Deployment context
//!
//! The resolved configuration for one invocation. Built from `Config`, then
//! completed by the environment and branch selectors before any action runs.

use std::fmt;
use std::str::FromStr;

use crate::config::Config;

/// Deployment target environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "unknown environment '{}' (expected staging or production)",
                other
            )),
        }
    }
}

/// Named context fields that operations can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Settings,
    Branch,
    S3Buckets,
    Hosts,
    RepoUrl,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Settings => "settings",
            Field::Branch => "branch",
            Field::S3Buckets => "s3_buckets",
            Field::Hosts => "hosts",
            Field::RepoUrl => "repo_url",
        }
    }

    /// The selectors (CLI options or config keys) that populate this field.
    pub fn provided_by(&self) -> Vec<String> {
        let selectors: &[&str] = match self {
            Field::Settings | Field::S3Buckets | Field::Hosts => {
                &["--env production", "--env staging"]
            }
            Field::Branch => &["--branch stable", "--branch master", "--branch <name>"],
            Field::RepoUrl => &["project.repo_url", "project.org"],
        };
        selectors.iter().map(|s| s.to_string()).collect()
    }
}

/// Remote filesystem layout of a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePaths {
    pub base: String,
    pub repo: String,
    pub virtualenv: String,
}

impl RemotePaths {
    pub fn under(base: impl Into<String>) -> Self {
        let base = base.into();
        let trimmed = base.trim_end_matches('/');
        Self {
            repo: format!("{}/repository", trimmed),
            virtualenv: format!("{}/virtualenv", trimmed),
            base,
        }
    }
}

/// Secondary git remote registered after cloning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AltRemote {
    pub name: String,
    pub url: String,
}

/// Everything one invocation needs to know about where and what to deploy
#[derive(Debug, Clone)]
pub struct DeploymentContext {
    pub project_name: String,
    pub deployed_name: String,
    pub settings: Option<Environment>,
    pub branch: Option<String>,
    pub user: String,
    pub python: String,
    pub paths: RemotePaths,
    pub requirements: String,
    pub repo_url: Option<String>,
    pub alt_repo: Option<AltRemote>,
    pub s3_buckets: Option<Vec<String>>,
    pub alt_s3_bucket: Option<String>,
    pub hosts: Option<Vec<String>>,
    pub deploy_to_servers: bool,
    pub stable_branch: String,
    pub forward_agent: bool,
    pub cache_control: String,
}

impl DeploymentContext {
    /// Static defaults from configuration; no environment or branch selected.
    pub fn from_config(config: &Config) -> Self {
        Self {
            project_name: config.project.name.clone(),
            deployed_name: config.deployed_name().to_string(),
            settings: None,
            branch: None,
            user: config.remote.user.clone(),
            python: config.remote.python.clone(),
            paths: RemotePaths::under(config.base_path()),
            requirements: config.remote.requirements.clone(),
            repo_url: config.repo_url(),
            alt_repo: config.project.alt_repo_url.as_ref().map(|url| AltRemote {
                name: config.project.alt_remote.clone(),
                url: url.clone(),
            }),
            s3_buckets: None,
            alt_s3_bucket: config.storage.alt_bucket.clone(),
            hosts: None,
            deploy_to_servers: config.remote.deploy_to_servers,
            stable_branch: config.project.stable_branch.clone(),
            forward_agent: config.remote.forward_agent,
            cache_control: config.storage.cache_control.clone(),
        }
    }

    /// Environment selector: sets `settings`, `s3_buckets` and `hosts`.
    pub fn select_environment(&mut self, env: Environment, config: &Config) {
        let env_config = config.environment(env);
        self.settings = Some(env);
        self.s3_buckets = Some(env_config.buckets.clone());
        self.hosts = Some(env_config.hosts.clone());
    }

    /// Branch selector
    pub fn select_branch(&mut self, branch: impl Into<String>) {
        self.branch = Some(branch.into());
    }

    pub fn is_set(&self, field: Field) -> bool {
        match field {
            Field::Settings => self.settings.is_some(),
            Field::Branch => self.branch.is_some(),
            Field::S3Buckets => self.s3_buckets.is_some(),
            Field::Hosts => self.hosts.is_some(),
            Field::RepoUrl => self.repo_url.is_some(),
        }
    }

    pub fn branch_name(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn buckets(&self) -> &[String] {
        self.s3_buckets.as_deref().unwrap_or(&[])
    }

    pub fn host_list(&self) -> &[String] {
        self.hosts.as_deref().unwrap_or(&[])
    }

    /// SSH destination for a host, `user@host` unless the host names a user.
    pub fn ssh_destination(&self, host: &str) -> String {
        if host.contains('@') {
            host.to_string()
        } else {
            format!("{}@{}", self.user, host)
        }
    }
}
