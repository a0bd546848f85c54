//! Wildcard pattern expansion.
//!
//! Expands glob-style patterns (`*`, `**`, `?`, `[...]`) against a base
//! directory and concatenates every matched file into one logical
//! stream. Matches are ordered lexicographically by full path so the
//! stream content is identical run-to-run regardless of directory
//! enumeration order.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::LocateError;

/// Tokens that mark a path as a wildcard pattern. `[` covers `[...]`
/// character classes; `*` covers `**` as well.
const WILDCARD_TOKENS: &[char] = &['*', '?', '['];

/// Returns true iff `path` contains a glob-style wildcard token.
pub fn has_wildcard(path: &str) -> bool {
    path.contains(WILDCARD_TOKENS)
}

/// The non-wildcard directory portion of `pattern`: everything up to
/// and including the last `/` that precedes the first wildcard token
/// (or the last `/` overall when there is none). Empty when the
/// pattern has no separator before its first wildcard.
pub fn pattern_base(pattern: &str) -> &str {
    let stop = pattern.find(WILDCARD_TOKENS).unwrap_or(pattern.len());
    match pattern[..stop].rfind('/') {
        Some(sep) => &pattern[..=sep],
        None => "",
    }
}

/// Expands `full_pattern` against the directory `base` and returns one
/// stream yielding the concatenation of every matched file's bytes.
///
/// Only the wildcard tail of the pattern (the portion past
/// [`pattern_base`]) is matched under `base`; the leading portion is
/// whatever addressing the calling locator used to find `base` and
/// appears only in error reports. Matched directories are skipped.
/// Zero matched files is [`LocateError::NotFound`].
pub fn locate_stream(
    full_pattern: &str,
    base: &Path,
) -> Result<Box<dyn Read + Send>, LocateError> {
    let tail = &full_pattern[pattern_base(full_pattern).len()..];
    let matches = expand(tail, base, full_pattern)?;
    tracing::debug!(
        pattern = full_pattern,
        matched = matches.len(),
        "expanded wildcard pattern"
    );
    Ok(Box::new(ConcatReader::new(matches)))
}

/// Globs `tail` under `base` and returns the matched files in
/// lexicographic order.
fn expand(tail: &str, base: &Path, full_pattern: &str) -> Result<Vec<PathBuf>, LocateError> {
    let glob_pattern = base.join(tail);
    let glob_pattern = glob_pattern
        .to_str()
        .ok_or_else(|| LocateError::malformed(full_pattern, "base directory is not valid UTF-8"))?;

    let entries =
        glob::glob(glob_pattern).map_err(|e| LocateError::malformed(full_pattern, e))?;

    let mut matches = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| LocateError::Io(e.into()))?;
        if path.is_file() {
            matches.push(path);
        }
    }
    matches.sort();

    if matches.is_empty() {
        return Err(LocateError::not_found(full_pattern));
    }
    Ok(matches)
}

/// Reader yielding the bytes of a list of files back-to-back, in order.
/// Files are opened lazily, one at a time, as the caller reads past
/// each boundary.
struct ConcatReader {
    remaining: std::vec::IntoIter<PathBuf>,
    current: Option<BufReader<File>>,
}

impl ConcatReader {
    fn new(paths: Vec<PathBuf>) -> Self {
        ConcatReader {
            remaining: paths.into_iter(),
            current: None,
        }
    }
}

impl Read for ConcatReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            match self.current.as_mut() {
                Some(reader) => {
                    let n = reader.read(buf)?;
                    if n > 0 {
                        return Ok(n);
                    }
                    // Current file exhausted; move to the next.
                    self.current = None;
                }
                None => match self.remaining.next() {
                    Some(path) => self.current = Some(BufReader::new(File::open(path)?)),
                    None => return Ok(0),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn wildcard_detection() {
        assert!(has_wildcard("res/*.js"));
        assert!(has_wildcard("res/**/*.css"));
        assert!(has_wildcard("file?.bin"));
        assert!(has_wildcard("res/[ab]core.js"));
        assert!(!has_wildcard("res/app.css"));
        assert!(!has_wildcard("/plain/absolute/path"));
        assert!(!has_wildcard(""));
    }

    #[test]
    fn pattern_base_splits_before_first_wildcard() {
        assert_eq!(pattern_base("file:///res/*.js"), "file:///res/");
        assert_eq!(pattern_base("res/**/x.js"), "res/");
        assert_eq!(pattern_base("res/sub/?.css"), "res/sub/");
        assert_eq!(pattern_base("*.js"), "");
        assert_eq!(pattern_base("res/app.css"), "res/");
    }

    #[test]
    fn concatenates_matches_in_lexicographic_order() {
        let dir = tempfile::tempdir().unwrap();
        // Written out of order on purpose.
        fs::write(dir.path().join("b.js"), "BBB").unwrap();
        fs::write(dir.path().join("a.js"), "AAA").unwrap();
        fs::write(dir.path().join("skip.txt"), "nope").unwrap();

        let mut stream = locate_stream("res/*.js", dir.path()).unwrap();
        let mut content = String::new();
        stream.read_to_string(&mut content).unwrap();
        assert_eq!(content, "AAABBB");
    }

    #[test]
    fn zero_matches_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = locate_stream("res/*.js", dir.path()).map(|_| ()).unwrap_err();
        assert!(matches!(err, LocateError::NotFound { .. }), "{err:?}");
    }

    #[test]
    fn recursive_pattern_descends_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("top.css"), "T").unwrap();
        fs::write(dir.path().join("sub").join("inner.css"), "I").unwrap();

        let mut stream = locate_stream("res/**/*.css", dir.path()).unwrap();
        let mut content = String::new();
        stream.read_to_string(&mut content).unwrap();
        // sub/inner.css sorts before top.css by full path.
        assert_eq!(content, "IT");
    }

    #[test]
    fn directories_matching_the_pattern_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("c.js")).unwrap();
        fs::write(dir.path().join("a.js"), "A").unwrap();

        let mut stream = locate_stream("*.js", dir.path()).unwrap();
        let mut content = String::new();
        stream.read_to_string(&mut content).unwrap();
        assert_eq!(content, "A");
    }

    #[test]
    fn unclosed_class_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let err = locate_stream("res/[ab.js", dir.path()).map(|_| ()).unwrap_err();
        assert!(matches!(err, LocateError::Malformed { .. }), "{err:?}");
    }
}
