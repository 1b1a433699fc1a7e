//! Test environment for running the stagehand binary in isolation.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Result of running a stagehand CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Temporary project directory holding a `stagehand.toml`.
pub struct TestEnv {
    pub project_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn with_config(toml: &str) -> Self {
        let env = Self::empty();
        env.write_project_file("stagehand.toml", toml);
        env
    }

    pub fn empty() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("Failed to create temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_stagehand")),
        }
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Run stagehand from the project root with empty stdin
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_stdin(args, "")
    }

    /// Run stagehand from the project root, feeding `stdin`
    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> TestResult {
        self.run_from(self.project_root.path(), args, stdin)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str], stdin: &str) -> TestResult {
        let mut child = Command::new(&self.bin)
            .current_dir(cwd)
            .args(args)
            .env("NO_COLOR", "1")
            .env_remove("STAGEHAND_REMOTE_USER")
            .env_remove("STAGEHAND_DEPLOY_TO_SERVERS")
            .env_remove("STAGEHAND_STABLE_BRANCH")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to execute stagehand");

        if let Some(mut input) = child.stdin.take() {
            input
                .write_all(stdin.as_bytes())
                .expect("Failed to write stdin");
        }

        let output = child.wait_with_output().expect("Failed to wait for stagehand");
        output_to_result(output)
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
