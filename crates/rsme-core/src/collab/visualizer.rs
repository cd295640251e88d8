//! HTML generation via an external `source-map-explorer` executable.

use anyhow::{Context, Result};
use std::fs;
use std::process::Command;

use crate::config::VisualizerConfig;

const SCRIPT_FILE: &str = "bundle.js";
const MAP_FILE: &str = "bundle.js.map";

/// Turns a script and its source map into a self-contained HTML page.
pub trait Visualizer {
    fn render(&self, script: &[u8], source_map: &[u8]) -> Result<String>;
}

/// Runs `<command> <args...> bundle.js bundle.js.map --html` in a scratch
/// directory and returns its stdout.
#[derive(Debug, Clone)]
pub struct ExternalVisualizer {
    command: String,
    args: Vec<String>,
}

impl ExternalVisualizer {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl From<&VisualizerConfig> for ExternalVisualizer {
    fn from(cfg: &VisualizerConfig) -> Self {
        Self::new(cfg.command.clone(), cfg.args.clone())
    }
}

impl Visualizer for ExternalVisualizer {
    fn render(&self, script: &[u8], source_map: &[u8]) -> Result<String> {
        let scratch = tempfile::Builder::new()
            .prefix("rsme-")
            .tempdir()
            .context("create scratch dir")?;
        let script_path = scratch.path().join(SCRIPT_FILE);
        let map_path = scratch.path().join(MAP_FILE);
        fs::write(&script_path, script)
            .with_context(|| format!("write {}", script_path.display()))?;
        fs::write(&map_path, source_map)
            .with_context(|| format!("write {}", map_path.display()))?;

        tracing::debug!(command = %self.command, args = ?self.args, "running visualizer");
        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(&script_path)
            .arg(&map_path)
            .arg("--html")
            .current_dir(scratch.path())
            .output()
            .with_context(|| format!("run {}", self.command))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            );
        }

        let html = String::from_utf8(output.stdout)
            .with_context(|| format!("{} produced non-UTF-8 output", self.command))?;
        if html.trim().is_empty() {
            anyhow::bail!("{} produced no output", self.command);
        }
        Ok(html)
    }
}
