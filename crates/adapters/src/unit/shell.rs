// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell command unit loader

use super::{UnitLoadError, UnitLoader};
use async_trait::async_trait;
use phasor_core::UnitId;
use std::path::PathBuf;

/// Placeholder replaced with the unit identifier in command templates
pub const UNIT_PLACEHOLDER: &str = "{unit}";

/// Loads a unit by running a shell command rendered from a template.
///
/// `{unit}` in the template is replaced with the unit id. The unit loads when
/// the command exits zero. The child is killed if the attempt is dropped,
/// e.g. on attempt timeout.
#[derive(Clone, Debug)]
pub struct ShellUnitLoader {
    template: String,
    cwd: Option<PathBuf>,
}

impl ShellUnitLoader {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            cwd: None,
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// The command line that loads `unit`
    pub fn render(&self, unit: &UnitId) -> String {
        self.template.replace(UNIT_PLACEHOLDER, unit.as_str())
    }
}

#[async_trait]
impl UnitLoader for ShellUnitLoader {
    async fn load(&self, unit: &UnitId) -> Result<(), UnitLoadError> {
        let command = self.render(unit);
        let mut cmd = tokio::process::Command::new("sh");
        cmd.arg("-c").arg(&command).kill_on_drop(true);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        let output = cmd
            .output()
            .await
            .map_err(|e| UnitLoadError::Spawn(e.to_string()))?;

        if output.status.success() {
            return Ok(());
        }

        Err(UnitLoadError::CommandFailed {
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
