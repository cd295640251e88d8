//! Open a file in the user's default browser via the platform opener.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserLaunchError {
    #[error("unable to open web browser. {}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to open web browser. {}: opener exited with {status}", .path.display())]
    Exit { path: PathBuf, status: ExitStatus },
}

impl BrowserLaunchError {
    pub fn path(&self) -> &Path {
        match self {
            BrowserLaunchError::Spawn { path, .. } | BrowserLaunchError::Exit { path, .. } => path,
        }
    }
}

pub trait BrowserLauncher {
    fn open(&self, path: &Path) -> Result<(), BrowserLaunchError>;
}

/// Runs the configured opener, or `xdg-open` / `open` / `cmd /C start` by platform.
#[derive(Debug, Clone, Default)]
pub struct SystemBrowser {
    command: Option<String>,
}

impl SystemBrowser {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }

    fn command_for(&self, path: &Path) -> Command {
        if let Some(program) = &self.command {
            let mut cmd = Command::new(program);
            cmd.arg(path);
            return cmd;
        }
        platform_command(path)
    }
}

#[cfg(target_os = "macos")]
fn platform_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn platform_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}

impl BrowserLauncher for SystemBrowser {
    fn open(&self, path: &Path) -> Result<(), BrowserLaunchError> {
        let status = self
            .command_for(path)
            .status()
            .map_err(|source| BrowserLaunchError::Spawn {
                path: path.to_path_buf(),
                source,
            })?;
        if !status.success() {
            return Err(BrowserLaunchError::Exit {
                path: path.to_path_buf(),
                status,
            });
        }
        Ok(())
    }
}
