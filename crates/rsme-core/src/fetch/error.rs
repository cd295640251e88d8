//! Fetch failure type: transport error vs. non-200 status.

use thiserror::Error;
use url::Url;

use super::classify::NetworkErrorKind;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported a transport failure (DNS, connect, TLS, timeout, ...).
    #[error("request to {url} failed ({kind})")]
    Network {
        url: Url,
        kind: NetworkErrorKind,
        #[source]
        source: curl::Error,
    },
    /// The server answered with something other than 200.
    #[error("request to {url} failed.\nStatus code: {code}")]
    BadStatus { url: Url, code: u32 },
}

impl FetchError {
    pub(crate) fn network(url: &Url, source: curl::Error) -> Self {
        FetchError::Network {
            url: url.clone(),
            kind: super::classify::classify_curl_error(&source),
            source,
        }
    }

    /// HTTP status code for `BadStatus`, `None` for transport errors.
    pub fn status_code(&self) -> Option<u32> {
        match self {
            FetchError::BadStatus { code, .. } => Some(*code),
            FetchError::Network { .. } => None,
        }
    }
}
