//! Isolated pnpm workspace for end-to-end tests.
//!
//! Provides `TestWorkspace` - a temp directory laid out like a pnpm
//! monorepo, plus helpers to run the depsync binary inside it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;
use tempfile::TempDir;

use super::fixtures::{root_manifest, WORKSPACE_YAML};

/// Result of running a depsync CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON, one value per non-empty line.
    pub fn json_events(&self) -> Vec<Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l)
                    .unwrap_or_else(|e| panic!("stdout line is not JSON ({e}): {l}"))
            })
            .collect()
    }
}

pub struct TestWorkspace {
    pub root: TempDir,
}

impl TestWorkspace {
    /// Empty workspace with `pnpm-workspace.yaml` and a root manifest.
    pub fn new() -> Self {
        let ws = Self {
            root: tempfile::tempdir().unwrap(),
        };
        ws.write("pnpm-workspace.yaml", WORKSPACE_YAML);
        ws.write_manifest(".", &root_manifest());
        ws
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    pub fn write_manifest(&self, dir: &str, manifest: &Value) {
        let rel = Path::new(dir).join("package.json");
        self.write(
            &rel.to_string_lossy(),
            &serde_json::to_string_pretty(manifest).unwrap(),
        );
    }

    /// Install `name` into `consumer/node_modules` as a copy of its manifest,
    /// the way pnpm lays out an injected dependency. Returns the install dir.
    pub fn install(&self, consumer: &str, name: &str, manifest: &Value) -> PathBuf {
        let dir = format!("{consumer}/node_modules/{name}");
        self.write_manifest(&dir, manifest);
        self.path(&dir)
    }

    fn command(&self, cwd: &Path, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_depsync"));
        cmd.args(args)
            .current_dir(cwd)
            .env("NO_COLOR", "1")
            .env_remove("NPM_CONFIG_WORKSPACE_DIR")
            .env_remove("npm_config_workspace_dir")
            .env_remove("RUST_LOG")
            .env_remove("DEPSYNC_MODE")
            .env_remove("DEPSYNC_DEBOUNCE_MS")
            .env_remove("DEPSYNC_CONCURRENCY")
            .env_remove("DEPSYNC_VERBOSITY");
        cmd
    }

    /// Run depsync from `cwd` (relative to the workspace root).
    pub fn run(&self, cwd: &str, args: &[&str]) -> TestResult {
        let output = self
            .command(&self.path(cwd), args)
            .output()
            .expect("Failed to run depsync");

        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Start depsync in the background with piped output.
    pub fn spawn(&self, cwd: &str, args: &[&str]) -> Child {
        self.command(&self.path(cwd), args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to start depsync")
    }
}

/// Poll `condition` until it holds or `timeout` elapses.
pub fn wait_for(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(25));
    }
    condition()
}

#[cfg(unix)]
pub fn same_inode(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    let (Ok(a), Ok(b)) = (fs::metadata(a), fs::metadata(b)) else {
        return false;
    };
    a.dev() == b.dev() && a.ino() == b.ino()
}
