//! Metrics sources.
//!
//! A [`MetricsProvider`] performs exactly one read of the metrics document.
//! There is no retry and no refresh: the document is immutable once loaded.

mod file;
#[cfg(feature = "http")]
mod http;

pub use file::FileProvider;
#[cfg(feature = "http")]
pub use http::{HttpOptions, HttpProvider};

use tracing::{debug, warn};

use crate::document::MetricsDocument;

/// Error types that can occur while loading the metrics document.
#[derive(Debug)]
pub enum LoadError {
    /// I/O error reading a local file.
    Io(std::io::Error),
    /// Transport-level HTTP failure (DNS, connect, timeout, body read).
    Http(String),
    /// Server answered with a non-success status.
    Status(u16),
    /// Body is not a valid metrics document.
    Parse(serde_json::Error),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {}", e),
            LoadError::Http(msg) => write!(f, "HTTP error: {}", msg),
            LoadError::Status(code) => write!(f, "HTTP status {}", code),
            LoadError::Parse(e) => write!(f, "parse error: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::Http(_) | LoadError::Status(_) => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Parse(e)
    }
}

/// Abstraction for metrics document sources.
///
/// Object-safe; the binary holds a `Box<dyn MetricsProvider>` chosen by
/// [`provider_for`].
pub trait MetricsProvider {
    /// Human-readable source (path or URL) for the header and logs.
    fn label(&self) -> &str;

    /// Reads and parses the document once.
    fn load(&self) -> Result<MetricsDocument, LoadError>;
}

/// Returns true when `source` should be fetched over HTTP.
pub fn is_url(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Picks a provider for `source`: `http(s)://` URLs go over HTTP, anything
/// else is a file path.
#[cfg(feature = "http")]
pub fn provider_for(source: &str, options: HttpOptions) -> Box<dyn MetricsProvider> {
    if is_url(source) {
        Box::new(HttpProvider::new(source, options))
    } else {
        Box::new(FileProvider::new(source))
    }
}

/// Picks a provider for `source`. Built without HTTP support, so every
/// source is treated as a file path.
#[cfg(not(feature = "http"))]
pub fn provider_for(source: &str) -> Box<dyn MetricsProvider> {
    Box::new(FileProvider::new(source))
}

/// Loads the document, degrading to an empty one on failure.
///
/// The error is logged and handed back so the caller can surface it inline.
pub fn load_or_empty(provider: &dyn MetricsProvider) -> (MetricsDocument, Option<LoadError>) {
    match provider.load() {
        Ok(doc) => {
            debug!(
                source = provider.label(),
                validators = doc.validators.len(),
                "metrics loaded"
            );
            (doc, None)
        }
        Err(e) => {
            warn!(source = provider.label(), error = %e, "failed to load metrics, showing empty table");
            (MetricsDocument::default(), Some(e))
        }
    }
}
