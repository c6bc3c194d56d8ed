//! Source directory scanning.
//!
//! When the source is a directory, the driver processes every file in it
//! whose extension matches the configured filetype list. The scan is
//! non-recursive, case-insensitive on extensions, and sorted so batch runs
//! are deterministic.

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List the qualifying image files directly inside `dir`.
pub fn find_images(dir: &Path, filetypes: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(io::Error::other)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if matches_filetype(&path, filetypes) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

fn matches_filetype(path: &Path, filetypes: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    filetypes.iter().any(|t| t.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn finds_matching_files_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.jpg"), "").unwrap();
        fs::write(tmp.path().join("a.jpg"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();

        let images = find_images(tmp.path(), &types(&["jpg"])).unwrap();
        assert_eq!(
            images,
            [tmp.path().join("a.jpg"), tmp.path().join("b.jpg")]
        );
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("shot.JPG"), "").unwrap();

        let images = find_images(tmp.path(), &types(&["jpg"])).unwrap();
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn does_not_recurse_into_subdirectories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested/deep.jpg"), "").unwrap();
        fs::write(tmp.path().join("top.jpg"), "").unwrap();

        let images = find_images(tmp.path(), &types(&["jpg"])).unwrap();
        assert_eq!(images, [tmp.path().join("top.jpg")]);
    }

    #[test]
    fn files_without_extension_are_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("README"), "").unwrap();

        let images = find_images(tmp.path(), &types(&["jpg", "png"])).unwrap();
        assert!(images.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(find_images(Path::new("/nonexistent/dir"), &types(&["jpg"])).is_err());
    }
}
