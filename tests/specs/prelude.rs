//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Dashboard page with every phase present
pub const DASHBOARD_MANIFEST: &str = r#"
core = ["core"]
auth = ["session"]

[pages.dashboard]
app_entry = "dashboard-app"
units = ["charts", "table"]
optional = ["news"]
requires_auth = true

[pages.home]
app_entry = "home-app"
units = ["hero"]
"#;

/// A scratch directory holding a manifest and whatever the units write
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Project with `phasor.toml` set to `manifest`
    pub fn with_manifest(manifest: &str) -> Self {
        let project = Self::empty();
        project.file("phasor.toml", manifest);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(path)).unwrap_or_default()
    }

    /// The phasor binary, run from the project directory
    pub fn phasor(&self) -> CliBuilder {
        CliBuilder {
            cmd: {
                #[allow(deprecated)]
                let mut cmd = Command::cargo_bin("phasor").unwrap();
                cmd.current_dir(self.dir.path()).env("RUST_LOG", "warn");
                cmd
            },
        }
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> CliAssert {
        CliAssert {
            assert: self.cmd.assert().success(),
        }
    }

    pub fn fails(mut self) -> CliAssert {
        CliAssert {
            assert: self.cmd.assert().failure(),
        }
    }
}

pub struct CliAssert {
    assert: Assert,
}

impl CliAssert {
    pub fn stdout_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stdout(predicate::str::contains(expected)),
        }
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        Self {
            assert: self
                .assert
                .stdout(predicate::str::contains(unexpected).not()),
        }
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stderr(predicate::str::contains(expected)),
        }
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stdout).to_string()
    }
}
