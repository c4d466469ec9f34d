//! One gallery build, start to finish.
//!
//! ```text
//! directory ──▶ process (thumbnails) ──▶ generate (index) ──▶ generate (pages, optional)
//! ```
//!
//! Each stage lists the directory itself, so the stages share no state beyond
//! the resolved [`GalleryConfig`].

use crate::config::GalleryConfig;
use crate::generate::{self, GenerateError};
use crate::imaging::ImageBackend;
use crate::process::{self, ProcessError, ThumbnailOutcome};
use crate::scan;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Thumbnail generation failed: {0}")]
    Process(#[from] ProcessError),
    #[error("Page generation failed: {0}")]
    Generate(#[from] GenerateError),
}

/// Everything one build produced, for the console report.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryReport {
    pub title: String,
    pub thumbnails: Vec<ThumbnailOutcome>,
    pub index: PathBuf,
    /// Empty unless pages are enabled.
    pub pages: Vec<PathBuf>,
}

impl GalleryReport {
    pub fn failed_thumbnails(&self) -> usize {
        self.thumbnails.iter().filter(|t| !t.is_created()).count()
    }
}

/// Build the gallery in `dir`.
pub fn build_gallery(
    backend: &impl ImageBackend,
    dir: &Path,
    config: &GalleryConfig,
) -> Result<GalleryReport, BuildError> {
    tracing::info!(dir = %dir.display(), "building gallery");

    let thumbnails =
        process::generate_thumbnails(backend, dir, &config.geometry, config.order)?;
    let index = generate::write_index(dir, config)?;
    let pages = if config.pages {
        generate::write_pages(dir, config)?
    } else {
        Vec::new()
    };

    Ok(GalleryReport {
        title: scan::gallery_title(dir),
        thumbnails,
        index,
        pages,
    })
}
