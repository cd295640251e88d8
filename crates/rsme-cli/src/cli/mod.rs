//! CLI: fetch a remote script and its source map, then open a visualization.

mod progress;

use anyhow::{Context, Result};
use clap::Parser;
use rsme_core::config::{self, RsmeConfig};
use rsme_core::pipeline::{self, Pipeline};
use std::path::PathBuf;

use progress::ConsoleProgress;

/// Top-level CLI for remote-source-map-explorer.
#[derive(Debug, Parser)]
#[command(name = "remote-source-map-explorer", version)]
#[command(
    about = "Fetch a remote JavaScript file and its sourcemap, and generate a source-map-explorer visualization",
    long_about = None
)]
pub struct Cli {
    /// Absolute HTTP/HTTPS URL of the JavaScript file.
    #[arg(value_name = "URL.JS")]
    pub url: String,

    /// Read configuration from this file instead of ~/.config/rsme/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.load_config().context("load configuration")?;
        tracing::debug!("loaded config: {:?}", cfg);

        let url = cli.url;
        let result = tokio::task::spawn_blocking(move || {
            Pipeline::from_config(&cfg)
                .with_progress(ConsoleProgress)
                .run(&url)
        })
        .await
        .context("pipeline task join")?;

        tracing::info!(code = pipeline::exit_code(&result), "run finished");
        let report = result?;
        if !report.browser_opened {
            println!("Visualization written to {}", report.artifact.display());
        }
        Ok(())
    }

    fn load_config(&self) -> Result<RsmeConfig> {
        match &self.config {
            Some(path) => config::load_from(path),
            None => config::load_or_init(),
        }
    }
}
