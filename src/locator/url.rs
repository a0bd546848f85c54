//! URL-backed locator.
//!
//! Resolves `scheme://...` paths: `file` URLs open the underlying file
//! directly, anything else is fetched over HTTP via libcurl. In a
//! prioritized chain this variant is usually the last one asked.

use std::io::{self, BufReader, Cursor, Read};
use std::time::{Duration, SystemTime};

use url::Url;

use super::{open_file, require_path, strip_leading_separator, ResourceLocator, FALLBACK_MODIFIED};
use crate::error::LocateError;
use crate::wildcard;

/// Locator reading resources addressed by URL.
#[derive(Debug, Clone)]
pub struct UrlLocator {
    path: String,
}

impl UrlLocator {
    /// Creates a locator from a raw URL string.
    ///
    /// Only the empty-path invariant is checked here; URL syntax is
    /// validated when a stream is opened or a relative path resolved.
    pub fn new(path: impl Into<String>) -> Result<Self, LocateError> {
        let path = path.into();
        require_path(&path)?;
        Ok(UrlLocator { path })
    }

    /// Creates a locator from a parsed URL, keeping only its path
    /// component. Scheme and host are deliberately not retained:
    /// URL-built locators are addressed uniformly by path, like every
    /// other variant.
    pub fn from_url(url: &Url) -> Result<Self, LocateError> {
        UrlLocator::new(url.path())
    }

    fn parse(&self) -> Result<Url, LocateError> {
        Url::parse(&self.path).map_err(|e| LocateError::malformed(&self.path, e))
    }
}

impl ResourceLocator for UrlLocator {
    fn path(&self) -> &str {
        &self.path
    }

    fn open_stream(&self) -> Result<Box<dyn Read + Send>, LocateError> {
        tracing::debug!(path = %self.path, "reading path");
        if wildcard::has_wildcard(&self.path) {
            let dir = wildcard::pattern_base(&self.path);
            let dir_url =
                Url::parse(dir).map_err(|e| LocateError::malformed(&self.path, e))?;
            let base = dir_url.to_file_path().map_err(|_| {
                LocateError::malformed(&self.path, "URL does not map to a local directory")
            })?;
            return wildcard::locate_stream(&self.path, &base);
        }

        let url = self.parse()?;
        if url.scheme() == "file" {
            let target = url.to_file_path().map_err(|_| {
                LocateError::malformed(&self.path, "file URL does not map to a local path")
            })?;
            let file = open_file(&target, &self.path)?;
            return Ok(Box::new(BufReader::new(file)));
        }
        fetch(&url)
    }

    fn last_modified(&self) -> SystemTime {
        Url::parse(&self.path)
            .ok()
            .and_then(|url| url.to_file_path().ok())
            .and_then(|file| std::fs::metadata(file).ok())
            .and_then(|meta| meta.modified().ok())
            .unwrap_or(FALLBACK_MODIFIED)
    }

    fn create_relative(&self, relative: &str) -> Result<Box<dyn ResourceLocator>, LocateError> {
        let relative = strip_leading_separator(relative);
        let base = self.parse()?;
        let resolved = base
            .join(relative)
            .map_err(|e| LocateError::malformed(relative, e))?;
        Ok(Box::new(UrlLocator::new(resolved.to_string())?))
    }
}

/// Fetches the body of a non-file URL into memory in one blocking
/// transfer. Follows redirects; a non-2xx final status is an error.
fn fetch(url: &Url) -> Result<Box<dyn Read + Send>, LocateError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url.as_str()).map_err(transport)?;
    easy.follow_location(true).map_err(transport)?;
    easy.connect_timeout(Duration::from_secs(15)).map_err(transport)?;
    easy.timeout(Duration::from_secs(30)).map_err(transport)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(transport)?;
        transfer.perform().map_err(transport)?;
    }

    let code = easy.response_code().map_err(transport)?;
    if !(200..300).contains(&code) {
        return Err(LocateError::Http {
            url: url.to_string(),
            code,
        });
    }
    Ok(Box::new(Cursor::new(body)))
}

fn transport(e: curl::Error) -> LocateError {
    LocateError::Io(io::Error::new(io::ErrorKind::Other, e))
}
