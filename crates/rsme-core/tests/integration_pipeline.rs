//! Integration test: full pipeline over a local HTTP server with the real
//! curl fetcher and artifact store, and a stand-in visualizer.

mod common;

use common::static_server::{self, Route};
use rsme_core::collab::{SystemBrowser, TempArtifactStore, Visualizer};
use rsme_core::fetch::{CurlFetcher, FetchError};
use rsme_core::pipeline::{exit_code, Pipeline, PipelineError, Stage};
use std::path::Path;
use tempfile::tempdir;

const SCRIPT: &str = "!function(){console.log('hi')}();\n//# sourceMappingURL=../maps/app.js.map\n";
const MAP: &str = r#"{"version":3,"sources":["a.js"],"mappings":"AAAA"}"#;

/// Echoes its inputs so tests can check both buffers arrived intact.
struct EchoVisualizer;

impl Visualizer for EchoVisualizer {
    fn render(&self, script: &[u8], source_map: &[u8]) -> anyhow::Result<String> {
        Ok(format!(
            "<html><pre>{}</pre><pre>{}</pre></html>",
            String::from_utf8_lossy(script),
            String::from_utf8_lossy(source_map)
        ))
    }
}

fn pipeline(out: &Path, opener: &str) -> Pipeline {
    Pipeline::new(
        CurlFetcher::default(),
        EchoVisualizer,
        TempArtifactStore::in_dir(out),
        SystemBrowser::new(Some(opener.to_string())),
    )
}

fn html_files(dir: &Path) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("html"))
        .collect()
}

#[cfg(unix)]
#[test]
fn relative_map_fetched_and_artifact_written() {
    let server = static_server::start(vec![
        ("js/app.js", Route::gzip(SCRIPT)),
        ("maps/app.js.map", Route::ok(MAP)),
    ]);
    let out = tempdir().unwrap();
    let result = pipeline(out.path(), "true").run(&server.url("js/app.js"));
    assert_eq!(exit_code(&result), 0);
    let report = result.unwrap();

    assert_eq!(report.map_url.as_str(), server.url("maps/app.js.map"));
    assert_eq!(
        server.requested_paths(),
        vec!["/js/app.js".to_string(), "/maps/app.js.map".to_string()]
    );
    let html = std::fs::read_to_string(&report.artifact).unwrap();
    assert!(html.contains("console.log('hi')"));
    assert!(html.contains("\"mappings\":\"AAAA\""));
    assert!(report.browser_opened);
}

#[cfg(unix)]
#[test]
fn map_500_stops_after_two_fetches() {
    let server = static_server::start(vec![
        ("js/app.js", Route::ok(SCRIPT)),
        ("maps/app.js.map", Route::status(500)),
    ]);
    let out = tempdir().unwrap();
    let result = pipeline(out.path(), "true").run(&server.url("js/app.js"));
    assert_eq!(exit_code(&result), 1);
    match result.unwrap_err() {
        PipelineError::Fetch {
            stage: Stage::SourceMap,
            source: FetchError::BadStatus { code, .. },
        } => assert_eq!(code, 500),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(server.hits(), 2);
    assert!(html_files(out.path()).is_empty(), "no artifact expected");
}

#[cfg(unix)]
#[test]
fn browser_failure_exits_non_zero_with_artifact_on_disk() {
    let server = static_server::start(vec![
        ("js/app.js", Route::ok(SCRIPT)),
        ("maps/app.js.map", Route::ok(MAP)),
    ]);
    let out = tempdir().unwrap();
    let result = pipeline(out.path(), "false").run(&server.url("js/app.js"));
    assert_eq!(exit_code(&result), 1);
    assert!(matches!(result, Err(PipelineError::BrowserLaunch(_))));
    assert_eq!(server.hits(), 2);
    assert_eq!(html_files(out.path()).len(), 1);
}

#[test]
fn script_without_directive_fetches_once() {
    let server = static_server::start(vec![("js/app.js", Route::ok("var x = 1;\n"))]);
    let out = tempdir().unwrap();
    let err = pipeline(out.path(), "true")
        .run(&server.url("js/app.js"))
        .unwrap_err();
    assert!(matches!(err, PipelineError::Locate { .. }));
    assert!(format!("{:#}", anyhow::Error::new(err)).contains("sourceMappingURL not found"));
    assert_eq!(server.hits(), 1);
}
