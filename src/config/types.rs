//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::context::Environment;
use crate::error::DeployResult;

use super::loader::{self, ConfigWarning};

/// Project identity and source repository
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    pub name: String,

    /// Name the app is published under (S3 prefix). Defaults to `name`.
    #[serde(default)]
    pub deployed_name: Option<String>,

    /// Organization used to derive `repo_url` when it is not given
    #[serde(default)]
    pub org: Option<String>,

    #[serde(default)]
    pub repo_url: Option<String>,

    #[serde(default)]
    pub alt_repo_url: Option<String>,

    #[serde(default = "default_alt_remote")]
    pub alt_remote: String,

    #[serde(default = "default_stable_branch")]
    pub stable_branch: String,
}

/// Remote host settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_python")]
    pub python: String,

    /// Base deployment path. Defaults to `/home/<user>/apps/<project>`.
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default = "default_true")]
    pub forward_agent: bool,

    #[serde(default)]
    pub deploy_to_servers: bool,

    #[serde(default = "default_requirements")]
    pub requirements: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            python: default_python(),
            path: None,
            forward_agent: true,
            deploy_to_servers: false,
            requirements: default_requirements(),
        }
    }
}

/// Buckets and hosts for one environment
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub buckets: Vec<String>,

    #[serde(default)]
    pub hosts: Vec<String>,
}

/// Object storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Secondary bucket cleaned up by `destroy`
    #[serde(default)]
    pub alt_bucket: Option<String>,

    #[serde(default = "default_cache_control")]
    pub cache_control: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            alt_bucket: None,
            cache_control: default_cache_control(),
        }
    }
}

/// Local build commands and directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_assets_command")]
    pub assets: Vec<String>,

    #[serde(default = "default_watch_command")]
    pub watch: Vec<String>,

    /// External compression command; empty selects the built-in gzip
    #[serde(default)]
    pub gzip: Vec<String>,

    #[serde(default = "default_www")]
    pub www: PathBuf,

    #[serde(default = "default_gzip_dir")]
    pub gzip_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            assets: default_assets_command(),
            watch: default_watch_command(),
            gzip: Vec::new(),
            www: default_www(),
            gzip_dir: default_gzip_dir(),
        }
    }
}

/// One entry in the site's route table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteConfig {
    pub rule: String,
    pub endpoint: String,
    #[serde(default)]
    pub template: Option<String>,
}

/// Template-backed site definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_templates")]
    pub templates: PathBuf,

    #[serde(default)]
    pub routes: Vec<RouteConfig>,

    #[serde(default)]
    pub context: BTreeMap<String, toml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            templates: default_templates(),
            routes: Vec::new(),
            context: BTreeMap::new(),
        }
    }
}

/// Root of `stagehand.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub project: ProjectConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub staging: EnvironmentConfig,

    #[serde(default)]
    pub production: EnvironmentConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub site: SiteConfig,
}

impl Config {
    /// Load configuration from a TOML file, ignoring warnings
    pub fn load(path: &Path) -> DeployResult<Self> {
        Self::load_with_warnings(path).map(|(config, _)| config)
    }

    /// Load configuration and collect non-fatal warnings (unknown keys)
    pub fn load_with_warnings(path: &Path) -> DeployResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Buckets and hosts for an environment
    pub fn environment(&self, env: Environment) -> &EnvironmentConfig {
        match env {
            Environment::Staging => &self.staging,
            Environment::Production => &self.production,
        }
    }

    pub fn deployed_name(&self) -> &str {
        self.project
            .deployed_name
            .as_deref()
            .unwrap_or(&self.project.name)
    }

    /// Repository URL, derived from `org` when not set explicitly
    pub fn repo_url(&self) -> Option<String> {
        self.project.repo_url.clone().or_else(|| {
            self.project
                .org
                .as_ref()
                .map(|org| format!("git@github.com:{}/{}.git", org, self.project.name))
        })
    }

    pub fn base_path(&self) -> String {
        self.remote.path.clone().unwrap_or_else(|| {
            format!("/home/{}/apps/{}", self.remote.user, self.project.name)
        })
    }

    pub fn has_site(&self) -> bool {
        !self.site.routes.is_empty()
    }
}

fn default_true() -> bool {
    true
}

fn default_alt_remote() -> String {
    "bitbucket".to_string()
}

fn default_stable_branch() -> String {
    "stable".to_string()
}

fn default_user() -> String {
    "ubuntu".to_string()
}

fn default_python() -> String {
    "python2.7".to_string()
}

fn default_requirements() -> String {
    "requirements.txt".to_string()
}

fn default_cache_control() -> String {
    "max-age=5".to_string()
}

fn default_assets_command() -> Vec<String> {
    vec!["node_modules/.bin/grunt".to_string()]
}

fn default_watch_command() -> Vec<String> {
    vec!["node_modules/.bin/grunt".to_string(), "watch".to_string()]
}

fn default_www() -> PathBuf {
    PathBuf::from("www")
}

fn default_gzip_dir() -> PathBuf {
    PathBuf::from("gzip")
}

fn default_templates() -> PathBuf {
    PathBuf::from("templates")
}
