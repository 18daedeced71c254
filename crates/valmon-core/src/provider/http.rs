//! HTTP source: a single non-cached GET.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use tracing::debug;

use crate::document::MetricsDocument;

use super::{LoadError, MetricsProvider};

/// Client options. No timeout unless one is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpOptions {
    pub timeout: Option<Duration>,
}

/// Fetches `metrics.json` from a URL.
pub struct HttpProvider {
    url: String,
    options: HttpOptions,
}

impl HttpProvider {
    pub fn new(url: impl Into<String>, options: HttpOptions) -> Self {
        Self {
            url: url.into(),
            options,
        }
    }

    fn client(&self) -> Result<Client, LoadError> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("valmon/", env!("CARGO_PKG_VERSION")));
        // reqwest's blocking client defaults to 30s; "no timeout" must be explicit
        builder = builder.timeout(self.options.timeout);
        builder.build().map_err(http_error)
    }
}

fn http_error(e: reqwest::Error) -> LoadError {
    LoadError::Http(e.to_string())
}

impl MetricsProvider for HttpProvider {
    fn label(&self) -> &str {
        &self.url
    }

    fn load(&self) -> Result<MetricsDocument, LoadError> {
        let resp = self.client()?.get(&self.url).send().map_err(http_error)?;
        let status = resp.status();
        debug!(url = %self.url, status = status.as_u16(), "metrics response");
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }
        let body = resp.bytes().map_err(http_error)?;
        Ok(MetricsDocument::from_slice(&body)?)
    }
}
