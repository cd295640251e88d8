//! Pipeline orchestrator.
//!
//! Strictly sequential: fetch script, locate its source map, fetch the map,
//! render HTML, persist it, open it in a browser. Every stage returns an
//! explicit result; the first failure ends the run.

mod error;
mod progress;

pub use error::{PipelineError, Stage};
pub use progress::{LogProgress, Progress, Step};

use std::path::PathBuf;
use url::Url;

use crate::collab::{
    ArtifactStore, BrowserLauncher, ExternalVisualizer, SystemBrowser, TempArtifactStore,
    Visualizer,
};
use crate::config::RsmeConfig;
use crate::fetch::{CurlFetcher, FetchOptions, Fetcher};
use crate::locate::{self, DEFAULT_TAIL_WINDOW};

/// Schemes accepted for the script URL argument.
const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub script_url: Url,
    pub map_url: Url,
    pub script_bytes: usize,
    pub map_bytes: usize,
    /// HTML file left on disk for the browser.
    pub artifact: PathBuf,
    /// False only when the browser is optional and failed to open.
    pub browser_opened: bool,
}

pub struct Pipeline {
    fetcher: Box<dyn Fetcher + Send>,
    visualizer: Box<dyn Visualizer + Send>,
    store: Box<dyn ArtifactStore + Send>,
    browser: Box<dyn BrowserLauncher + Send>,
    progress: Box<dyn Progress + Send>,
    tail_window: usize,
    browser_required: bool,
}

impl Pipeline {
    pub fn new(
        fetcher: impl Fetcher + Send + 'static,
        visualizer: impl Visualizer + Send + 'static,
        store: impl ArtifactStore + Send + 'static,
        browser: impl BrowserLauncher + Send + 'static,
    ) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            visualizer: Box::new(visualizer),
            store: Box::new(store),
            browser: Box::new(browser),
            progress: Box::new(LogProgress),
            tail_window: DEFAULT_TAIL_WINDOW,
            browser_required: true,
        }
    }

    /// Production wiring: curl fetcher, external visualizer, temp-dir store, system browser.
    pub fn from_config(cfg: &RsmeConfig) -> Self {
        Self::new(
            CurlFetcher::new(FetchOptions::from(&cfg.http)),
            ExternalVisualizer::from(&cfg.visualizer),
            TempArtifactStore::default(),
            SystemBrowser::new(cfg.browser.command.clone()),
        )
        .with_tail_window(cfg.locator.tail_window_bytes)
        .with_browser_required(cfg.browser.required)
    }

    pub fn with_progress(mut self, progress: impl Progress + Send + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    pub fn with_tail_window(mut self, bytes: usize) -> Self {
        self.tail_window = bytes;
        self
    }

    pub fn with_browser_required(mut self, required: bool) -> Self {
        self.browser_required = required;
        self
    }

    pub fn run(&self, raw_url: &str) -> Result<RunReport, PipelineError> {
        let script_url = parse_script_url(raw_url)?;

        self.progress.step(&Step::FetchingScript(script_url.clone()));
        let script = self
            .fetcher
            .fetch(&script_url)
            .map_err(|source| PipelineError::Fetch {
                stage: Stage::Script,
                source,
            })?;

        let map_url = locate::locate(&script, &script_url, self.tail_window).map_err(|source| {
            PipelineError::Locate {
                script_url: script_url.clone(),
                source,
            }
        })?;

        self.progress.step(&Step::FetchingMap(map_url.clone()));
        let source_map = self
            .fetcher
            .fetch(&map_url)
            .map_err(|source| PipelineError::Fetch {
                stage: Stage::SourceMap,
                source,
            })?;

        self.progress.step(&Step::GeneratingVisualization);
        let html = self
            .visualizer
            .render(&script, &source_map)
            .map_err(PipelineError::Visualize)?;
        let artifact = self.store.persist(&html).map_err(PipelineError::Persist)?;
        tracing::info!(path = %artifact.display(), "visualization written");

        self.progress.step(&Step::OpeningBrowser(artifact.clone()));
        let browser_opened = match self.browser.open(&artifact) {
            Ok(()) => true,
            Err(e) if !self.browser_required => {
                tracing::warn!("{}", e);
                false
            }
            Err(e) => return Err(e.into()),
        };

        self.progress.step(&Step::Done);
        Ok(RunReport {
            script_url,
            map_url,
            script_bytes: script.len(),
            map_bytes: source_map.len(),
            artifact,
            browser_opened,
        })
    }
}

/// Parses the CLI argument into an absolute http(s) URL.
pub fn parse_script_url(raw: &str) -> Result<Url, PipelineError> {
    let invalid = |reason: String| PipelineError::InvalidArgument {
        raw: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if !url.has_host() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

/// Process exit status for a run: 0 on success, 1 on any failure.
pub fn exit_code<T>(result: &Result<T, PipelineError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
