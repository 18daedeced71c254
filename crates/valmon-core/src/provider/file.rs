//! Local file source.

use std::path::PathBuf;

use crate::document::MetricsDocument;

use super::{LoadError, MetricsProvider};

/// Reads `metrics.json` from disk.
pub struct FileProvider {
    path: PathBuf,
    label: String,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }
}

impl MetricsProvider for FileProvider {
    fn label(&self) -> &str {
        &self.label
    }

    fn load(&self) -> Result<MetricsDocument, LoadError> {
        let bytes = std::fs::read(&self.path)?;
        Ok(MetricsDocument::from_slice(&bytes)?)
    }
}
