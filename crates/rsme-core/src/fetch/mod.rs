//! HTTP GET of a single absolute URL.
//!
//! Uses the curl crate (libcurl). Compressed responses are decoded
//! transparently, so callers always see the decoded body. There is no
//! retry: one failure is returned to the caller as-is.

mod classify;
mod error;

pub use classify::{classify_curl_error, NetworkErrorKind};
pub use error::FetchError;

use crate::config::HttpConfig;
use std::time::Duration;
use url::Url;

/// Status treated as success; anything else is `FetchError::BadStatus`.
const HTTP_OK: u32 = 200;

/// Retrieves the body of an absolute URL.
pub trait Fetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

/// Transport knobs for `CurlFetcher`.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_redirections: u32,
    pub user_agent: Option<String>,
}

impl From<&HttpConfig> for FetchOptions {
    fn from(cfg: &HttpConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout(),
            timeout: cfg.timeout(),
            max_redirections: cfg.max_redirections,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions::from(&HttpConfig::default())
    }
}

/// Blocking libcurl fetcher. Runs in the current thread; call from
/// `spawn_blocking` if used from async code.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: FetchOptions,
}

impl CurlFetcher {
    pub fn new(opts: FetchOptions) -> Self {
        Self { opts }
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        fetch(url, &self.opts)
    }
}

/// GETs `url` and returns the decoded body when the final status is 200.
pub fn fetch(url: &Url, opts: &FetchOptions) -> Result<Vec<u8>, FetchError> {
    let net = |e: curl::Error| FetchError::network(url, e);
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url.as_str()).map_err(net)?;
    easy.get(true).map_err(net)?;
    // Empty string: advertise every encoding libcurl was built with and decode it.
    easy.accept_encoding("").map_err(net)?;
    easy.follow_location(true).map_err(net)?;
    easy.max_redirections(opts.max_redirections).map_err(net)?;
    if let Some(agent) = &opts.user_agent {
        easy.useragent(agent).map_err(net)?;
    }
    easy.connect_timeout(opts.connect_timeout).map_err(net)?;
    easy.timeout(opts.timeout).map_err(net)?;

    tracing::debug!(url = %url, "GET");
    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(net)?;
        transfer.perform().map_err(net)?;
    }

    let code = easy.response_code().map_err(net)?;
    if code != HTTP_OK {
        tracing::warn!(url = %url, code, "unexpected HTTP status");
        return Err(FetchError::BadStatus {
            url: url.clone(),
            code,
        });
    }

    tracing::debug!(url = %url, bytes = body.len(), "fetched");
    Ok(body)
}
