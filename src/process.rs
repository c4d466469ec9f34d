//! Thumbnail generation.
//!
//! First stage of a gallery build. Every source image of the directory gets a
//! `-thumb` sibling made by the external converter:
//!
//! ```text
//! trip/
//! ├── beach.jpg
//! ├── beach-thumb.jpg      # written here
//! ├── dunes.png
//! └── dunes-thumb.png      # written here
//! ```
//!
//! There is no cache: every run converts every source again. A conversion
//! that fails (converter missing, non-zero exit) is logged and recorded in
//! the returned outcomes, and the remaining images are still processed.
//! Only a directory that cannot be listed stops the stage.

use crate::imaging::{Geometry, ImageBackend, create_thumbnail, plan_thumbnail};
use crate::scan::{self, ScanError, SortOrder};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// What happened to one source image.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailOutcome {
    pub source: PathBuf,
    pub thumbnail: PathBuf,
    pub status: ThumbnailStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ThumbnailStatus {
    Created,
    /// The converter failed; carries the rendered error.
    Failed(String),
}

impl ThumbnailOutcome {
    pub fn is_created(&self) -> bool {
        self.status == ThumbnailStatus::Created
    }
}

/// Create thumbnails for every source image of `dir`, in gallery order.
pub fn generate_thumbnails(
    backend: &impl ImageBackend,
    dir: &Path,
    geometry: &Geometry,
    order: SortOrder,
) -> Result<Vec<ThumbnailOutcome>, ProcessError> {
    let sources = scan::source_images(dir, order)?;
    let mut outcomes = Vec::with_capacity(sources.len());

    for source in sources {
        let outcome = match create_thumbnail(backend, &source, geometry) {
            Ok(thumbnail) => {
                tracing::info!(source = %source.display(), thumbnail = %thumbnail.display(), "created thumbnail");
                ThumbnailOutcome {
                    source,
                    thumbnail,
                    status: ThumbnailStatus::Created,
                }
            }
            Err(e) => {
                tracing::warn!(source = %source.display(), error = %e, "thumbnail failed");
                let thumbnail = plan_thumbnail(&source, geometry).output;
                ThumbnailOutcome {
                    source,
                    thumbnail,
                    status: ThumbnailStatus::Failed(e.to_string()),
                }
            }
        };
        outcomes.push(outcome);
    }

    Ok(outcomes)
}
