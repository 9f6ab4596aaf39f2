/// Image store: input folder scan and on-demand decode

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::config::ALLOWED_EXTENSIONS;
use crate::state::data::{CurrentImage, ImageEntry};

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// List the images directly inside `dir`, sorted by file name.
///
/// A missing or unreadable folder yields an empty list.
pub fn load_directory(dir: &Path) -> Vec<ImageEntry> {
    if !dir.is_dir() {
        log::warn!("⚠️  Input folder {} is missing or not a directory", dir.display());
        return Vec::new();
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("⚠️  Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let filename = entry.file_name().to_string_lossy().to_string();
        if has_allowed_extension(&filename) {
            entries.push(ImageEntry::new(filename));
        }
    }

    log::info!("🔍 Found {} images in {}", entries.len(), dir.display());
    entries
}

/// Case-insensitive check against the png/jpg/jpeg allow-list
pub fn has_allowed_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Decode `entry` from `dir` at full resolution as 8-bit RGB
pub fn load_current(dir: &Path, entry: &ImageEntry) -> Result<CurrentImage> {
    let path = dir.join(&entry.filename);

    let decoded = image::open(&path).map_err(|source| StoreError::Decode {
        path: path.clone(),
        source,
    })?;
    let pixels = decoded.into_rgb8();

    log::info!(
        "📷 Loaded {} ({}x{})",
        entry.filename,
        pixels.width(),
        pixels.height()
    );

    Ok(CurrentImage {
        entry: entry.clone(),
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;

    fn write_image(dir: &Path, name: &str, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([10, 20, 30]))
            .save(dir.join(name))
            .unwrap();
    }

    fn names(entries: &[ImageEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.filename.as_str()).collect()
    }

    #[test]
    fn test_extension_filter_is_case_insensitive() {
        assert!(has_allowed_extension("a.png"));
        assert!(has_allowed_extension("b.JPG"));
        assert!(has_allowed_extension("c.Jpeg"));
        assert!(!has_allowed_extension("d.gif"));
        assert!(!has_allowed_extension("png"));
        assert!(!has_allowed_extension("notes.txt"));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(load_directory(&tmp.path().join("nope")).is_empty());
    }

    #[test]
    fn test_directory_listing_filters_and_sorts() {
        let tmp = tempfile::tempdir().unwrap();
        write_image(tmp.path(), "b.jpg", 8, 8);
        write_image(tmp.path(), "a.png", 8, 8);
        fs::write(tmp.path().join("readme.txt"), "hi").unwrap();
        fs::write(tmp.path().join("C.PNG"), "not really a png").unwrap();
        fs::create_dir(tmp.path().join("nested.png")).unwrap();
        write_image(&tmp.path().join("nested.png"), "deep.png", 8, 8);

        let entries = load_directory(tmp.path());
        assert_eq!(names(&entries), vec!["C.PNG", "a.png", "b.jpg"]);
    }

    #[test]
    fn test_load_current_full_resolution_rgb() {
        let tmp = tempfile::tempdir().unwrap();
        write_image(tmp.path(), "a.png", 100, 80);

        let current = load_current(tmp.path(), &ImageEntry::new("a.png")).unwrap();
        assert_eq!((current.width(), current.height()), (100, 80));
        assert_eq!(current.pixels.get_pixel(5, 5), &Rgb([10, 20, 30]));
        assert_eq!(current.entry.filename, "a.png");
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("bad.png"), b"garbage").unwrap();

        let err = load_current(tmp.path(), &ImageEntry::new("bad.png")).unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
        assert!(err.to_string().contains("bad.png"));
    }
}
