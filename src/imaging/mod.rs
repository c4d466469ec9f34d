//! Thumbnail creation through an external converter.
//!
//! | Piece | Role |
//! |---|---|
//! | **Parameters** | [`Geometry`], [`ThumbnailParams`]: what to produce |
//! | **Backend** | [`ImageBackend`] trait + [`ImageMagickBackend`] |
//! | **Operations** | plan and create a thumbnail next to its source |

pub mod backend;
pub mod imagemagick;
pub mod operations;
mod params;

pub use backend::{BackendError, ImageBackend};
pub use imagemagick::ImageMagickBackend;
pub use operations::{create_thumbnail, plan_thumbnail};
pub use params::{Geometry, ThumbnailParams};
