//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how*. They sit between
//! [`operations`](super::operations), which decides which thumbnails to
//! create, and the [`backend`](super::backend), which runs the converter.
//! Swapping the backend for a mock in tests leaves the planning untouched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Thumbnail bounding box in the converter's `WIDTHxHEIGHT` notation.
///
/// The string is handed to the converter as-is. Fit-within semantics, `^`
/// or `!` modifiers and malformed values are all the converter's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Geometry(String);

impl Geometry {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self("210x150".to_string())
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Geometry {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Parameters for a thumbnail operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub geometry: Geometry,
}
