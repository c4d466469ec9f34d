//! Discovery of the source photos in a gallery directory.
//!
//! A gallery is one directory, read non-recursively:
//!
//! ```text
//! trip/
//! ├── gallery.toml         # optional config, ignored here
//! ├── beach.jpg            # source
//! ├── beach-thumb.jpg      # generated, skipped
//! ├── dunes.png            # source
//! ├── notes.txt            # not an image, skipped
//! ├── .hidden.jpg          # hidden, skipped
//! └── SHOUT.JPG            # extensions are case-sensitive, skipped
//! ```
//!
//! ## Ordering
//!
//! By default photos come back in the order the filesystem lists them. That
//! order drives index order and prev/next links, and it is whatever the OS
//! hands out: stable on a given filesystem, not portable across them.
//! [`SortOrder::Name`] trades that for a byte-wise file name sort.

use crate::naming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Extensions of the two gallery formats, matched exactly.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png"];

/// The extension of the only format that carries readable metadata.
pub const JPEG_EXTENSION: &str = "jpg";

/// Order in which a gallery's photos are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Directory listing order, as returned by the OS.
    #[default]
    Listing,
    /// File name order.
    Name,
}

/// List the source photos of `dir` in gallery order.
///
/// Keeps regular files with an [`IMAGE_EXTENSIONS`] extension whose names do
/// not carry a generated-file marker. Hidden files are skipped.
pub fn source_images(dir: &Path, order: SortOrder) -> Result<Vec<PathBuf>, ScanError> {
    let io_err = |source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if is_source_image(&path) {
            images.push(path);
        }
    }

    if order == SortOrder::Name {
        images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }

    tracing::debug!(dir = %dir.display(), count = images.len(), "found source images");
    Ok(images)
}

/// Whether `path` is a photo this tool should treat as a gallery source.
pub fn is_source_image(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    !name.starts_with('.') && has_image_extension(path) && !naming::is_generated(path) && path.is_file()
}

/// Whether the extension is exactly one of [`IMAGE_EXTENSIONS`].
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e))
}

/// Whether `path` names a JPEG by extension.
pub fn is_jpeg(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(JPEG_EXTENSION)
}

/// Title of a gallery: the base name of its directory.
///
/// Arguments like `.` or `photos/..` have no usable base name of their own,
/// so the canonical path is consulted for those.
pub fn gallery_title(dir: &Path) -> String {
    if let Some(name) = dir.file_name() {
        return name.to_string_lossy().to_string();
    }
    dir.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_default()
}
