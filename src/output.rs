//! CLI output formatting for gallery builds.
//!
//! Output is **information-centric, not file-centric**. Each photo leads with
//! its position and file name; paths and per-stage status are indented
//! context lines under it.
//!
//! # Output Format
//!
//! ```text
//! trip (3 photos)
//!     001 beach.jpg
//!         Source: photos/trip/beach.jpg
//!         thumbnail: created
//!     002 dunes.png
//!         Source: photos/trip/dunes.png
//!         thumbnail: failed (convert exited with exit status: 1: ...)
//!         page: photos/trip/dunes.textile
//! Index → photos/trip/index.textile
//! 1 of 3 thumbnails failed
//! ```
//!
//! All formatting lives in pure `format_*` functions returning lines, which
//! the `print_*` wrappers write to stdout.

use crate::pipeline::GalleryReport;
use crate::process::ThumbnailStatus;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Gallery header: title with photo count.
///
/// ```text
/// trip (3 photos)
/// solo (1 photo)
/// ```
fn gallery_header(title: &str, count: usize) -> String {
    let noun = if count == 1 { "photo" } else { "photos" };
    format!("{} ({} {})", title, count, noun)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn thumbnail_status(status: &ThumbnailStatus) -> String {
    match status {
        ThumbnailStatus::Created => "created".to_string(),
        ThumbnailStatus::Failed(reason) => format!("failed ({})", reason),
    }
}

/// Format the report of one gallery build.
pub fn format_gallery_output(report: &GalleryReport) -> Vec<String> {
    let mut lines = vec![gallery_header(&report.title, report.thumbnails.len())];

    for (i, outcome) in report.thumbnails.iter().enumerate() {
        lines.push(format!(
            "{}{} {}",
            indent(1),
            format_index(i + 1),
            file_name(&outcome.source)
        ));
        lines.push(format!(
            "{}Source: {}",
            indent(2),
            outcome.source.display()
        ));
        lines.push(format!(
            "{}thumbnail: {}",
            indent(2),
            thumbnail_status(&outcome.status)
        ));
        if let Some(page) = report.pages.get(i) {
            lines.push(format!("{}page: {}", indent(2), page.display()));
        }
    }

    lines.push(format!("Index \u{2192} {}", report.index.display()));

    let failed = report.failed_thumbnails();
    if failed > 0 {
        lines.push(format!(
            "{} of {} thumbnails failed",
            failed,
            report.thumbnails.len()
        ));
    }

    lines
}

/// Print gallery build output to stdout.
pub fn print_gallery_output(report: &GalleryReport) {
    for line in format_gallery_output(report) {
        println!("{}", line);
    }
}

/// Message shown when no directory is given.
pub fn format_no_directories() -> Vec<String> {
    vec![
        "No gallery directories given; nothing to do.".to_string(),
        "Usage: create_gallery [--pages] [--url URL] [--geometry WxH] <directory> ...".to_string(),
        "Run `create_gallery --help` for all options.".to_string(),
    ]
}

pub fn print_no_directories() {
    for line in format_no_directories() {
        println!("{}", line);
    }
}
