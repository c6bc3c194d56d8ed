//! Output path resolution.
//!
//! Turns a (source, destination) pair plus output options into concrete,
//! non-colliding output paths for the main image and its derivatives, creating
//! any needed output directories along the way.
//!
//! Three destination shapes are handled:
//! - **Directory**: the output filename is `stem + append + extension`,
//!   derived from the explicit override if given, else the source filename.
//! - **Existing file**: an incrementing counter is appended to the
//!   destination's own stem (`photo1.jpg`, `photo2.jpg`, ...) until an unused
//!   name is found, so an existing file is never overwritten.
//! - **Fresh path**: used verbatim as the main output path.
//!
//! Derivative (thumbnail/resize) paths reuse the final main filename under
//! their configured subdirectories in all three branches.

use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

/// Inputs to [`resolve_outputs`].
#[derive(Debug, Clone)]
pub struct ResolveRequest<'a> {
    pub source: &'a Path,
    pub destination: &'a Path,
    /// Explicit base filename, overriding the one derived from `source`.
    /// Only consulted when the destination is a directory.
    pub explicit_name: Option<&'a str>,
    /// Appended to the stem when the destination is a directory.
    pub append: &'a str,
    /// Thumbnail subdirectory name, or `None` when thumbnails are disabled.
    pub thumbnail_dir: Option<&'a str>,
    /// Resize subdirectory name, or `None` when resizes are disabled.
    pub resize_dir: Option<&'a str>,
}

/// Resolved output paths for one source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub main: PathBuf,
    pub thumbnail: Option<PathBuf>,
    pub resize: Option<PathBuf>,
}

/// Split a filename into `(stem, extension)`.
///
/// The extension keeps its leading dot; names without one get the historical
/// `.JPG` default. Multi-dot names keep their full stem (`a.b.c` → `("a.b",
/// ".c")`) rather than truncating at the first dot.
pub fn split_filename(name: &str) -> (String, String) {
    let path = Path::new(name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_else(|| ".JPG".to_string());
    (stem, extension)
}

/// Resolve the main, thumbnail, and resize output paths for one source image.
///
/// Creates the destination directory tree and any requested derivative
/// subdirectories. Guarantee: the returned main path does not exist on disk
/// at resolution time (single-process model — concurrent writers are not
/// guarded against).
pub fn resolve_outputs(req: &ResolveRequest<'_>) -> ResolvedOutputs {
    let dest = req.destination;

    // Everything hangs off the directory the main output lands in.
    let base_dir = if dest.is_dir() {
        dest.to_path_buf()
    } else {
        match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    };
    create_dir_tolerant(&base_dir);

    let thumbnail_dir = req.thumbnail_dir.map(|name| {
        let dir = base_dir.join(name);
        create_dir_tolerant(&dir);
        dir
    });
    let resize_dir = req.resize_dir.map(|name| {
        let dir = base_dir.join(name);
        create_dir_tolerant(&dir);
        dir
    });

    let (main, filename) = if dest.is_dir() {
        let name = match req.explicit_name {
            Some(explicit) => explicit.to_string(),
            None => req.source.to_string_lossy().into_owned(),
        };
        let (stem, ext) = split_filename(&name);
        let filename = format!("{stem}{}{ext}", req.append);
        (dest.join(&filename), filename)
    } else if dest.is_file() {
        let (stem, ext) = split_filename(&dest.to_string_lossy());
        let mut counter = 1u32;
        loop {
            let candidate = format!("{stem}{counter}{ext}");
            let path = base_dir.join(&candidate);
            if !path.exists() {
                break (path, candidate);
            }
            counter += 1;
        }
    } else {
        // Fresh explicit filename: use it verbatim, derivatives share its name.
        let filename = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        (dest.to_path_buf(), filename)
    };

    ResolvedOutputs {
        thumbnail: thumbnail_dir.map(|d| d.join(&filename)),
        resize: resize_dir.map(|d| d.join(&filename)),
        main,
    }
}

/// Create a directory tree, tolerating failure.
///
/// Already-existing directories are fine; anything else is logged so the
/// later conversion failure has a traceable cause.
fn create_dir_tolerant(dir: &Path) {
    if let Err(e) = fs::create_dir_all(dir) {
        warn!("could not create {}: {e}", dir.display());
    }
}
