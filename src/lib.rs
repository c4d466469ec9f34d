//! # create_gallery
//!
//! Turns a directory of photos into the source files of a static gallery.
//! Your filesystem is the data source: every `.jpg` and `.png` directly
//! inside a directory becomes a gallery entry, and the tool writes
//! thumbnails, an index page and optional per-photo pages next to them for a
//! static-site generator to render.
//!
//! # Architecture: One Pass per Directory
//!
//! ```text
//! 1. Process   photos  →  *-thumb.*          (external converter, one run per photo)
//! 2. Index     photos  →  index.textile      (front matter + thumbnail list)
//! 3. Pages     photos  →  <name>.textile     (front matter with prev/next, optional)
//! ```
//!
//! Every stage lists the directory again and every run rewrites everything.
//! There is no manifest and no cache; the output is a pure function of the
//! directory contents, so a second run writes identical text.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists the source photos of a directory, in gallery order |
//! | [`process`] | Stage 1: thumbnails through the converter, failures recorded per photo |
//! | [`generate`] | Stages 2 and 3: index and detail pages, front matter via `serde_yaml`, HTML via Maud |
//! | [`pipeline`] | Runs the stages for one directory and returns a report |
//! | [`config`] | Layered `gallery.toml` loading, validation and merging |
//! | [`naming`] | Generated-file names (`-thumb`) and link construction |
//! | [`metadata`] | JPEG dimensions and EXIF capture data, rendered as HTML and YAML |
//! | [`imaging`] | Converter backend trait and the ImageMagick implementation |
//! | [`output`] | CLI output formatting of build reports |
//!
//! # Design Decisions
//!
//! ## External Converter
//!
//! Thumbnails are made by an ImageMagick-compatible program (`convert` by
//! default), run as `<program> <src> -resize <geometry> <dst>`. The geometry
//! is passed through untouched, so anything the converter understands works.
//! The call sits behind [`imaging::ImageBackend`] so tests can record
//! invocations instead of running a binary.
//!
//! ## Recoverable Conversion Failures
//!
//! A photo whose conversion fails is reported and skipped; the index and
//! pages are still written. An unreadable JPEG, on the other hand, stops the
//! run: its metadata is part of the generated text.
//!
//! ## Front Matter, Not Templates
//!
//! Layout belongs to the site generator. Generated files carry only a YAML
//! front-matter block naming a layout, plus (for the index) an HTML list of
//! thumbnails. The layout names and the text extension are configurable.

pub mod config;
pub mod generate;
pub mod imaging;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
