//! Typed builders for the external tools stagehand drives.

use std::fmt;

use super::command::CommandSpec;

/// Plain shell utilities on the remote host
pub struct Shell;

impl Shell {
    /// `mkdir -p`; succeeds when the directory already exists.
    pub fn mkdir_p(path: &str) -> CommandSpec {
        CommandSpec::new("mkdir").args(["-p", path])
    }

    pub fn rm_rf(path: &str) -> CommandSpec {
        CommandSpec::new("rm").args(["-rf", path])
    }
}

pub struct Virtualenv;

impl Virtualenv {
    pub fn create(python: &str, path: &str) -> CommandSpec {
        CommandSpec::new("virtualenv").args(["-p", python, path])
    }
}

pub struct Git;

impl Git {
    pub fn clone(url: &str, path: &str) -> CommandSpec {
        CommandSpec::new("git").args(["clone", url, path])
    }

    pub fn remote_add(repo: &str, name: &str, url: &str) -> CommandSpec {
        CommandSpec::new("git")
            .args(["remote", "add", name, url])
            .current_dir(repo)
    }

    pub fn fetch(repo: &str, remote: &str) -> CommandSpec {
        CommandSpec::new("git")
            .args(["fetch", remote])
            .current_dir(repo)
    }

    pub fn checkout(repo: &str, branch: &str) -> CommandSpec {
        CommandSpec::new("git")
            .args(["checkout", branch])
            .current_dir(repo)
    }

    pub fn pull(repo: &str, remote: &str, branch: &str) -> CommandSpec {
        CommandSpec::new("git")
            .args(["pull", remote, branch])
            .current_dir(repo)
    }
}

pub struct Pip;

impl Pip {
    /// `pip install -U -r <requirements>` using the virtualenv's own pip.
    pub fn install_requirements(virtualenv: &str, requirements: &str) -> CommandSpec {
        let pip = format!("{}/bin/pip", virtualenv.trim_end_matches('/'));
        CommandSpec::new(pip).args(["install", "-U", "-r", requirements])
    }
}

/// An `s3://bucket/prefix` location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Location {
    pub bucket: String,
    pub prefix: String,
}

impl S3Location {
    pub fn new(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    /// `s3://bucket/prefix/`, the form `s3cmd sync` treats as a directory.
    pub fn as_dir(&self) -> String {
        format!("{}/", self)
    }
}

impl fmt::Display for S3Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "s3://{}/{}",
            self.bucket,
            self.prefix.trim_matches('/')
        )
    }
}

pub struct S3cmd;

impl S3cmd {
    /// Public, recursive sync of a gzipped tree with caching headers.
    pub fn sync(local_dir: &str, dest: &S3Location, cache_control: &str) -> CommandSpec {
        let local = if local_dir.ends_with('/') {
            local_dir.to_string()
        } else {
            format!("{}/", local_dir)
        };

        CommandSpec::new("s3cmd").args([
            "-P".to_string(),
            format!("--add-header=Cache-Control:{}", cache_control),
            "--add-header=Content-encoding:gzip".to_string(),
            "--guess-mime-type".to_string(),
            "--recursive".to_string(),
            "sync".to_string(),
            local,
            dest.as_dir(),
        ])
    }

    pub fn delete_recursive(dest: &S3Location) -> CommandSpec {
        CommandSpec::new("s3cmd").args(["del".to_string(), "--recursive".to_string(), dest.to_string()])
    }
}
