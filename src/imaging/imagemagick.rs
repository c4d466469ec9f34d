//! Backend that shells out to an ImageMagick-compatible converter.
//!
//! Each thumbnail is one blocking invocation:
//!
//! ```text
//! convert <source> -resize <geometry> <output>
//! ```
//!
//! The output format follows the output extension, which is always the
//! source's. The child is waited for and its exit status checked, so a
//! missing binary or a rejected geometry comes back as a [`BackendError`]
//! instead of a thumbnail that silently never appears.

use super::backend::{BackendError, ImageBackend, display_path};
use super::params::ThumbnailParams;
use std::process::Command;

/// Converter program used when none is configured.
pub const DEFAULT_PROGRAM: &str = "convert";

pub struct ImageMagickBackend {
    program: String,
}

impl ImageMagickBackend {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The command that would run for `params`, without running it.
    pub fn command(&self, params: &ThumbnailParams) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg(&params.source)
            .arg("-resize")
            .arg(params.geometry.as_str())
            .arg(&params.output);
        command
    }
}

impl Default for ImageMagickBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for ImageMagickBackend {
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
        tracing::debug!(
            program = %self.program,
            source = %display_path(&params.source),
            output = %display_path(&params.output),
            geometry = %params.geometry,
            "running converter"
        );

        let output = self.command(params).output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(BackendError::ConverterFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
