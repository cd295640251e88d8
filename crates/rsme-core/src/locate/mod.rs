//! Source-map locator: find the `sourceMappingURL` directive in a script's
//! trailing bytes and resolve it to an absolute URL. No network access.

mod resolve;
mod scan;

pub use resolve::resolve_reference;
pub use scan::{find_source_mapping_url, SOURCE_MAPPING_URL_TOKEN};

use thiserror::Error;
use url::Url;

/// Default trailing window in bytes.
pub const DEFAULT_TAIL_WINDOW: usize = 4096;

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("sourceMappingURL not found")]
    NotFound,
    #[error("sourceMappingURL {reference:?} cannot be resolved")]
    Unresolvable {
        reference: String,
        #[source]
        source: url::ParseError,
    },
}

/// Finds the directive within the last `window` bytes of `body` and resolves
/// it against `script_url`.
pub fn locate(body: &[u8], script_url: &Url, window: usize) -> Result<Url, LocateError> {
    let raw = find_source_mapping_url(body, window).ok_or(LocateError::NotFound)?;
    tracing::debug!(reference = %raw, "found sourceMappingURL");
    resolve_reference(&raw, script_url)
}
