use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Major step about to start, reported so a user can see where a run stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    FetchingScript(Url),
    FetchingMap(Url),
    GeneratingVisualization,
    OpeningBrowser(PathBuf),
    Done,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::FetchingScript(url) | Step::FetchingMap(url) => write!(f, "Fetching {}...", url),
            Step::GeneratingVisualization => write!(f, "Generating visualization HTML..."),
            Step::OpeningBrowser(_) => write!(f, "Opening visualization in browser..."),
            Step::Done => write!(f, "All done, enjoy your visualization!"),
        }
    }
}

pub trait Progress {
    fn step(&self, step: &Step);
}

impl<F> Progress for F
where
    F: Fn(&Step),
{
    fn step(&self, step: &Step) {
        self(step)
    }
}

/// Reports steps to the tracing log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn step(&self, step: &Step) {
        tracing::info!("{}", step);
    }
}
