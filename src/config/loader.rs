//! Configuration loading and environment overrides

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DeployError, DeployResult};

use super::types::Config;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "stagehand.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DeployResult<(Config, Vec<ConfigWarning>)> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DeployError::ConfigNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(DeployError::io(path, e)),
    };

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DeployError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if config.project.name.trim().is_empty() {
        return Err(DeployError::Config {
            path: path.to_path_buf(),
            message: "project.name must not be empty".to_string(),
        });
    }

    let warnings = unknown_paths
        .into_iter()
        // `[site.context]` is free-form
        .filter(|p| !p.starts_with("site.context"))
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the config path: explicit `--config`, else `stagehand.toml` in `cwd`.
pub fn resolve_path(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => cwd.join(CONFIG_FILE_NAME),
    }
}

/// Apply environment variable overrides (STAGEHAND_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub(crate) fn with_env_overrides_from(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    if let Some(user) = get_env("STAGEHAND_REMOTE_USER").filter(|u| !u.trim().is_empty()) {
        config.remote.user = user.trim().to_string();
    }

    if let Some(val) = get_env("STAGEHAND_DEPLOY_TO_SERVERS") {
        let val = val.trim().to_lowercase();
        config.remote.deploy_to_servers = val == "1" || val == "true";
    }

    if let Some(branch) = get_env("STAGEHAND_STABLE_BRANCH").filter(|b| !b.trim().is_empty()) {
        config.project.stable_branch = branch.trim().to_string();
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "project",
        "name",
        "deployed_name",
        "org",
        "repo_url",
        "alt_repo_url",
        "alt_remote",
        "stable_branch",
        "remote",
        "user",
        "python",
        "path",
        "forward_agent",
        "deploy_to_servers",
        "requirements",
        "staging",
        "production",
        "buckets",
        "hosts",
        "storage",
        "alt_bucket",
        "cache_control",
        "build",
        "assets",
        "watch",
        "gzip",
        "www",
        "gzip_dir",
        "site",
        "templates",
        "routes",
        "rule",
        "endpoint",
        "template",
        "context",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_key_finds_close_match() {
        assert_eq!(suggest_key("bucket"), Some("buckets".to_string()));
        assert_eq!(suggest_key("pyhton"), Some("python".to_string()));
        assert_eq!(suggest_key("completely_unrelated"), None);
    }

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("hosts", "hosts"), 0);
        assert_eq!(levenshtein("host", "hosts"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn resolve_path_prefers_explicit() {
        let cwd = Path::new("/work");
        assert_eq!(
            resolve_path(None, cwd),
            PathBuf::from("/work/stagehand.toml")
        );
        assert_eq!(
            resolve_path(Some(Path::new("deploy/site.toml")), cwd),
            PathBuf::from("/work/deploy/site.toml")
        );
        assert_eq!(
            resolve_path(Some(Path::new("/etc/site.toml")), cwd),
            PathBuf::from("/etc/site.toml")
        );
    }
}
