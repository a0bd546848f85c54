//! Uniform resource location.
//!
//! Resolves a logical path (a filesystem path, a `scheme://` URL, or a
//! `classpath:`-style bundled-resource identifier) to a readable byte
//! stream behind one contract, [`ResourceLocator`]. Paths may contain
//! glob-style wildcards, in which case a single open yields the
//! concatenation of every match in a stable order.
//!
//! Callers typically hold several locator variants in priority order
//! and take the stream from the first one that succeeds; that chain
//! policy lives outside this crate.

pub mod error;
pub mod locator;
pub mod wildcard;

pub use error::LocateError;
pub use locator::classpath::ClasspathLocator;
pub use locator::file::FileLocator;
pub use locator::url::UrlLocator;
pub use locator::{ResourceLocator, FALLBACK_MODIFIED};
