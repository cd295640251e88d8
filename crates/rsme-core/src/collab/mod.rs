//! Collaborators the pipeline hands its results to: HTML generation,
//! persisting the artifact, and opening it in a browser.

mod artifact;
mod browser;
mod visualizer;

pub use artifact::{ArtifactStore, TempArtifactStore};
pub use browser::{BrowserLaunchError, BrowserLauncher, SystemBrowser};
pub use visualizer::{ExternalVisualizer, Visualizer};
