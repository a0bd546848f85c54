//! Filesystem-backed locator.
//!
//! Resolves plain filesystem paths with no URL indirection. The cheap
//! variant to ask first in a prioritized chain.

use std::io::{BufReader, Read};
use std::path::Path;
use std::time::SystemTime;

use super::{
    directory_portion, open_file, require_path, strip_leading_separator, ResourceLocator,
    FALLBACK_MODIFIED,
};
use crate::error::LocateError;
use crate::wildcard;

/// Locator reading resources from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileLocator {
    path: String,
}

impl FileLocator {
    /// Creates a locator for a filesystem path. Fails only on an empty
    /// path; existence is checked when a stream is opened.
    pub fn new(path: impl Into<String>) -> Result<Self, LocateError> {
        let path = path.into();
        require_path(&path)?;
        Ok(FileLocator { path })
    }
}

impl ResourceLocator for FileLocator {
    fn path(&self) -> &str {
        &self.path
    }

    fn open_stream(&self) -> Result<Box<dyn Read + Send>, LocateError> {
        tracing::debug!(path = %self.path, "reading path");
        if wildcard::has_wildcard(&self.path) {
            let base = wildcard::pattern_base(&self.path);
            return wildcard::locate_stream(&self.path, Path::new(base));
        }
        let file = open_file(Path::new(&self.path), &self.path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn last_modified(&self) -> SystemTime {
        std::fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .unwrap_or(FALLBACK_MODIFIED)
    }

    fn create_relative(&self, relative: &str) -> Result<Box<dyn ResourceLocator>, LocateError> {
        let relative = strip_leading_separator(relative);
        let folder = directory_portion(&self.path);
        Ok(Box::new(FileLocator::new(format!("{folder}{relative}"))?))
    }
}
