//! Resolve a raw reference against the script's URL.

use url::Url;

use super::LocateError;

/// Absolute references are returned as-is; anything else is joined onto `base`
/// with standard relative-reference resolution (`../`, `//host/...`, `?q`).
pub fn resolve_reference(raw: &str, base: &Url) -> Result<Url, LocateError> {
    let joined = match Url::parse(raw) {
        Ok(absolute) => Ok(absolute),
        Err(url::ParseError::RelativeUrlWithoutBase) => base.join(raw),
        Err(e) => Err(e),
    };
    joined.map_err(|source| LocateError::Unresolvable {
        reference: raw.to_string(),
        source,
    })
}
