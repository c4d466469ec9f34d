//! High-level image operations.
//!
//! These functions work out where a thumbnail goes and hand the job to a
//! backend.

use super::backend::{BackendError, ImageBackend};
use super::params::{Geometry, ThumbnailParams};
use crate::naming::{self, THUMB_SUFFIX};
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Plan a thumbnail operation without executing it.
///
/// The thumbnail sits next to its source: `dir/p1.jpg` → `dir/p1-thumb.jpg`.
pub fn plan_thumbnail(source: &Path, geometry: &Geometry) -> ThumbnailParams {
    ThumbnailParams {
        source: source.to_path_buf(),
        output: naming::derive(source, THUMB_SUFFIX),
        geometry: geometry.clone(),
    }
}

/// Create the thumbnail for `source` and return its path.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    geometry: &Geometry,
) -> Result<PathBuf> {
    let params = plan_thumbnail(source, geometry);
    backend.thumbnail(&params)?;
    Ok(params.output)
}
