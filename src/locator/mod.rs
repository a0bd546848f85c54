//! The locator contract and its variants.
//!
//! A [`ResourceLocator`] turns the path it was constructed with into a
//! fresh byte stream on every open. Three variants exist, one per
//! addressing model: [`url::UrlLocator`] for `scheme://` paths,
//! [`file::FileLocator`] for plain filesystem paths, and
//! [`classpath::ClasspathLocator`] for bundled-resource identifiers.
//! Each variant independently decides whether it can serve a path;
//! picking which variant to ask first is the caller's policy.

pub mod classpath;
pub mod file;
pub mod url;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::SystemTime;

use crate::error::LocateError;

/// Timestamp returned by `last_modified` when the true modification
/// time cannot be determined.
pub const FALLBACK_MODIFIED: SystemTime = SystemTime::UNIX_EPOCH;

/// A resolver from one logical path to readable byte streams.
///
/// Implementations are immutable after construction, hold no open
/// handles between calls, and are safe to share across threads; every
/// `open_stream` produces an independent caller-owned stream with no
/// shared cursor or cache.
pub trait ResourceLocator: Send + Sync {
    /// The path this locator was constructed with.
    fn path(&self) -> &str;

    /// Opens a new stream positioned at the start of the resource
    /// content.
    ///
    /// For wildcard paths the stream is the concatenation of every
    /// matched resource, ordered lexicographically by matched path.
    fn open_stream(&self) -> Result<Box<dyn Read + Send>, LocateError>;

    /// Best-effort modification time of the underlying resource.
    ///
    /// Never fails: any error while determining the time is converted
    /// to [`FALLBACK_MODIFIED`].
    fn last_modified(&self) -> SystemTime;

    /// Resolves `relative` against this locator's path and returns a
    /// new locator of the same variant. At most one leading `/` is
    /// stripped from `relative` first, so `"/x"` and `"x"` resolve
    /// alike.
    fn create_relative(&self, relative: &str) -> Result<Box<dyn ResourceLocator>, LocateError>;

    /// True iff the resource can currently be opened. Opens and drops
    /// a probe stream; nothing is cached.
    fn exists(&self) -> bool {
        self.open_stream().is_ok()
    }
}

/// Strips at most one leading separator from a relative path.
pub(crate) fn strip_leading_separator(relative: &str) -> &str {
    relative.strip_prefix('/').unwrap_or(relative)
}

/// Rejects empty paths at construction time, per the locator invariant.
pub(crate) fn require_path(path: &str) -> Result<(), LocateError> {
    if path.is_empty() {
        return Err(LocateError::EmptyPath);
    }
    Ok(())
}

/// Directory portion of a path string: everything up to and including
/// the final `/`, empty when there is none.
pub(crate) fn directory_portion(path: &str) -> &str {
    match path.rfind('/') {
        Some(sep) => &path[..=sep],
        None => "",
    }
}

/// Opens a file, mapping an absent target to [`LocateError::NotFound`]
/// under the locator's logical path.
pub(crate) fn open_file(target: &Path, logical: &str) -> Result<File, LocateError> {
    File::open(target).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LocateError::not_found(logical),
        _ => LocateError::Io(e),
    })
}
