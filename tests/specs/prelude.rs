//! Shared helpers for specs.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

/// `tandem` with no project: config lookup points at an empty directory.
pub fn cli() -> CliBuilder {
    CliBuilder::new().env("XDG_CONFIG_HOME", "/nonexistent/tandem-specs")
}

/// A scratch directory holding a config and the files it names.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    /// A project whose stages append their arguments to `generated.log` and
    /// `uploaded.log`; `generate_prefix` runs first in generate.
    pub fn with_stages(generate_prefix: &str) -> Self {
        let project = Self::empty();
        project.file("game/bin/game", "");
        project.file("input.txt", "");
        project.file(
            "tandem.toml",
            &format!(
                r#"
[locator]
method = "fixed_path"
path = "game/bin/game"

[input]
method = "file"
path = "input.txt"

[stages.generate]
command = ["sh", "-c", "{generate_prefix} echo gen '${{input}}' >> generated.log"]
cwd = "."

[stages.upload]
command = ["sh", "-c", "echo up '${{path}}' >> uploaded.log"]
cwd = "."

[notify]
method = "none"
"#
            ),
        );
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Contents of `rel`, or empty if it does not exist.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(rel)).unwrap_or_default()
    }

    /// `tandem` using this project's `tandem.toml`.
    pub fn tandem(&self) -> CliBuilder {
        CliBuilder::new()
            .env("TANDEM_CONFIG", self.dir.path().join("tandem.toml"))
            .current_dir(self.dir.path())
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    fn new() -> Self {
        let mut cmd = Command::cargo_bin("tandem").unwrap();
        cmd.env_remove("TANDEM_CONFIG")
            .env_remove("TANDEM_LOG_DIR")
            .env_remove("COLOR")
            .env("NO_COLOR", "1")
            .env("RUST_LOG", "warn");
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cmd.current_dir(dir);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    fn output(mut self) -> RunResult {
        RunResult { output: self.cmd.output().unwrap() }
    }

    /// Run and require exit code 0.
    pub fn passes(self) -> RunResult {
        self.exits_with(0)
    }

    /// Run and require any non-zero exit.
    pub fn fails(self) -> RunResult {
        let result = self.output();
        assert!(!result.output.status.success(), "expected failure\n{}", result.describe());
        result
    }

    pub fn exits_with(self, code: i32) -> RunResult {
        let result = self.output();
        assert_eq!(result.output.status.code(), Some(code), "\n{}", result.describe());
        result
    }
}

pub struct RunResult {
    output: Output,
}

impl RunResult {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout().contains(needle), "stdout lacks {needle:?}\n{}", self.describe());
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr().contains(needle), "stderr lacks {needle:?}\n{}", self.describe());
        self
    }

    fn describe(&self) -> String {
        format!("status: {}\nstdout:\n{}\nstderr:\n{}", self.output.status, self.stdout(), self.stderr())
    }
}
