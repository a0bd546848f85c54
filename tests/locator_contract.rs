//! Integration test: the locator contract exercised the way a caller
//! with a prioritized list of variants uses it: probe each variant in
//! order, take the first stream that opens, follow relative references
//! from the resource that was found.

use std::fs;
use std::io::Read;

use anyhow::Result;
use resloc::{ClasspathLocator, FileLocator, ResourceLocator, UrlLocator, FALLBACK_MODIFIED};
use tempfile::tempdir;
use url::Url;

fn read_all(locator: &dyn ResourceLocator) -> Result<String> {
    let mut content = String::new();
    locator.open_stream()?.read_to_string(&mut content)?;
    Ok(content)
}

#[test]
fn first_variant_that_serves_the_path_wins() -> Result<()> {
    let dir = tempdir()?;
    let target = dir.path().join("app.css");
    fs::write(&target, "served from disk")?;

    let candidates: Vec<Box<dyn ResourceLocator>> = vec![
        Box::new(ClasspathLocator::with_roots(
            "classpath:app.css",
            vec![dir.path().join("nowhere")],
        )?),
        Box::new(FileLocator::new(target.to_str().unwrap())?),
        Box::new(UrlLocator::new("https://example.invalid/app.css")?),
    ];

    let hit = candidates
        .iter()
        .find(|locator| locator.exists())
        .expect("one variant must serve the path");
    assert_eq!(read_all(hit.as_ref())?, "served from disk");
    Ok(())
}

#[test]
fn relative_references_stay_within_the_found_variant() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("util"))?;
    fs::write(dir.path().join("app.css"), "@import 'util/colors.css';")?;
    fs::write(dir.path().join("util/colors.css"), ":root { --c: #fff }")?;

    let base = Url::from_file_path(dir.path().join("app.css")).unwrap();
    let locator = UrlLocator::new(base.to_string())?;
    let colors = locator.create_relative("/util/colors.css")?;

    assert_eq!(read_all(colors.as_ref())?, ":root { --c: #fff }");
    assert_ne!(colors.last_modified(), FALLBACK_MODIFIED);
    Ok(())
}

#[test]
fn wildcard_stream_is_read_lazily_across_boundaries() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.js"), "aaaa")?;
    fs::write(dir.path().join("b.js"), "bbbb")?;

    let pattern = format!("{}/*.js", dir.path().to_str().unwrap());
    let locator = FileLocator::new(pattern)?;
    let mut stream = locator.open_stream()?;

    // Small reads must cross the file boundary without losing bytes.
    let mut total = Vec::new();
    let mut chunk = [0u8; 3];
    loop {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        total.extend_from_slice(&chunk[..n]);
    }
    assert_eq!(total, b"aaaabbbb");
    Ok(())
}

#[test]
fn last_modified_never_fails_even_for_garbage() {
    let garbage = UrlLocator::new("::::not::a::url::::").unwrap();
    assert_eq!(garbage.last_modified(), FALLBACK_MODIFIED);

    let absent = FileLocator::new("/definitely/not/here.css").unwrap();
    assert_eq!(absent.last_modified(), FALLBACK_MODIFIED);

    let bundled = ClasspathLocator::new("classpath:whatever.css").unwrap();
    assert_eq!(bundled.last_modified(), FALLBACK_MODIFIED);
}
