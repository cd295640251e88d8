//! Run-level error: which step failed, and why.

use std::fmt;
use std::io;
use thiserror::Error;
use url::Url;

use crate::collab::BrowserLaunchError;
use crate::fetch::FetchError;
use crate::locate::LocateError;

/// Which of the two fetches failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Script,
    SourceMap,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Script => write!(f, "script"),
            Stage::SourceMap => write!(f, "source map"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid URL: {raw} ({reason})")]
    InvalidArgument { raw: String, reason: String },
    #[error("fetching {stage} failed")]
    Fetch {
        stage: Stage,
        #[source]
        source: FetchError,
    },
    #[error("locating source map for {script_url} failed")]
    Locate {
        script_url: Url,
        #[source]
        source: LocateError,
    },
    #[error("generating visualization failed: {0:#}")]
    Visualize(anyhow::Error),
    #[error("writing visualization failed")]
    Persist(#[source] io::Error),
    #[error(transparent)]
    BrowserLaunch(#[from] BrowserLaunchError),
}

impl PipelineError {
    /// HTTP status when a fetch came back non-200.
    pub fn status_code(&self) -> Option<u32> {
        match self {
            PipelineError::Fetch { source, .. } => source.status_code(),
            _ => None,
        }
    }
}
