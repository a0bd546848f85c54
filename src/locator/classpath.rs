//! Bundled-resource locator.
//!
//! Resolves `classpath:`-style identifiers against an ordered list of
//! bundle roots, the way a loader searches a resource path: the first
//! root containing the resource wins. Default roots are the running
//! executable's directory, then the current working directory, which
//! covers resources shipped next to the binary.

use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::time::SystemTime;

use super::{
    directory_portion, open_file, require_path, strip_leading_separator, ResourceLocator,
    FALLBACK_MODIFIED,
};
use crate::error::LocateError;
use crate::wildcard;

/// Prefix marking a path as a bundled-resource identifier. Optional:
/// a bare identifier resolves the same way.
pub const CLASSPATH_PREFIX: &str = "classpath:";

/// Locator reading resources bundled with the application.
#[derive(Debug, Clone)]
pub struct ClasspathLocator {
    path: String,
    roots: Vec<PathBuf>,
}

impl ClasspathLocator {
    /// Creates a locator with the default bundle roots.
    pub fn new(path: impl Into<String>) -> Result<Self, LocateError> {
        Self::with_roots(path, default_roots())
    }

    /// Creates a locator with an explicit ordered search path. Earlier
    /// roots shadow later ones.
    pub fn with_roots(path: impl Into<String>, roots: Vec<PathBuf>) -> Result<Self, LocateError> {
        let path = path.into();
        require_path(&path)?;
        Ok(ClasspathLocator { path, roots })
    }

    /// The identifier with the `classpath:` prefix and any leading `/`
    /// removed; what actually gets joined under each root.
    fn resource(&self) -> &str {
        let bare = self.path.strip_prefix(CLASSPATH_PREFIX).unwrap_or(&self.path);
        bare.strip_prefix('/').unwrap_or(bare)
    }
}

fn default_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            roots.push(dir.to_path_buf());
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    roots
}

impl ResourceLocator for ClasspathLocator {
    fn path(&self) -> &str {
        &self.path
    }

    fn open_stream(&self) -> Result<Box<dyn Read + Send>, LocateError> {
        tracing::debug!(path = %self.path, "reading path");
        let resource = self.resource();
        if resource.is_empty() {
            return Err(LocateError::malformed(&self.path, "identifier names no resource"));
        }

        if wildcard::has_wildcard(resource) {
            // First root whose expansion matches anything wins; a
            // malformed pattern fails identically everywhere and is
            // surfaced as such.
            let dir = wildcard::pattern_base(resource);
            for root in &self.roots {
                match wildcard::locate_stream(resource, &root.join(dir)) {
                    Ok(stream) => return Ok(stream),
                    Err(LocateError::NotFound { .. }) => continue,
                    Err(e) => return Err(e),
                }
            }
            return Err(LocateError::not_found(&self.path));
        }

        for root in &self.roots {
            let candidate = root.join(resource);
            if candidate.is_file() {
                let file = open_file(&candidate, &self.path)?;
                return Ok(Box::new(BufReader::new(file)));
            }
        }
        Err(LocateError::not_found(&self.path))
    }

    /// Bundled resources have no meaningful modification time.
    fn last_modified(&self) -> SystemTime {
        FALLBACK_MODIFIED
    }

    fn create_relative(&self, relative: &str) -> Result<Box<dyn ResourceLocator>, LocateError> {
        let relative = strip_leading_separator(relative);
        let folder = directory_portion(&self.path);
        Ok(Box::new(ClasspathLocator::with_roots(
            format!("{folder}{relative}"),
            self.roots.clone(),
        )?))
    }
}
