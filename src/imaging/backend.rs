//! Image conversion backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between thumbnail planning and the
//! program that actually touches pixels. The production implementation is
//! [`ImageMagickBackend`](super::imagemagick::ImageMagickBackend), which runs
//! an external converter. Tests use the recording `MockBackend` below.

use super::params::ThumbnailParams;
use std::path::Path;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{program} exited with {status}: {stderr}")]
    ConverterFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Trait for image conversion backends.
pub trait ImageBackend {
    /// Write a resized copy of `params.source` to `params.output`.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError>;
}

/// Lossy path-to-string used in log lines and recorded operations.
pub(crate) fn display_path(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
