//! Centralized filename conventions for generated files and links.
//!
//! Every file the tool writes lives next to the photo it was made from, so
//! generated files are told apart from source photos purely by name:
//!
//! - `sunset.jpg` → source photo
//! - `sunset-thumb.jpg` → thumbnail (see [`derive`])
//! - `sunset.textile` → detail page
//!
//! A base name containing `-thumb` or `-page` is treated as generated and is
//! never picked up as a source again. A real photo that happens to be called
//! `my-page-one.jpg` is therefore skipped too. That is the convention; no
//! manifest of generated files is kept.
//!
//! ## Links
//!
//! [`link`] turns a path into the string embedded in an `href`/`src`
//! attribute. Without a base URL the link is just the file name, which works
//! because every generated page sits in the same directory as its images.
//! With a base URL the directory component of the path is kept, so the
//! caller decides what that directory is relative to (see
//! [`strip_site_root`]).

use std::path::{Component, Path, PathBuf};

/// Substrings that mark a file as produced by this tool.
pub const GENERATED_MARKERS: &[&str] = &["-thumb", "-page"];

/// Suffix used for thumbnails (`photo.jpg` → `photo-thumb.jpg`).
pub const THUMB_SUFFIX: &str = "thumb";

/// Extension links to detail pages use once the site generator has rendered them.
pub const PAGE_EXTENSION: &str = "html";

/// Build a sibling path with `-suffix` appended to the file stem.
///
/// - `"a/photo.jpg", "thumb"` → `"a/photo-thumb.jpg"`
/// - `"photo", "page"` → `"photo-page"`
pub fn derive(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}-{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}-{}", stem, suffix),
    };
    path.with_file_name(name)
}

/// Whether a file was generated by this tool (its base name carries a marker).
pub fn is_generated(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    GENERATED_MARKERS.iter().any(|marker| name.contains(marker))
}

/// Link to `path` as embedded in generated markup.
///
/// When `want_page` is set the extension is swapped for [`PAGE_EXTENSION`],
/// pointing at the rendered detail page instead of the file itself.
pub fn link(base_url: &str, path: &Path, want_page: bool) -> String {
    link_with(base_url, path, want_page.then_some(PAGE_EXTENSION))
}

/// Same as [`link`], with the page extension chosen by the caller.
///
/// - empty `base_url`: the file name only
/// - otherwise: `base_url/dir/name`, exactly one slash between parts
///
/// Nothing is URL-encoded and `base_url` is used verbatim.
pub fn link_with(base_url: &str, path: &Path, page_extension: Option<&str>) -> String {
    let name = linked_name(path, page_extension);
    if base_url.is_empty() {
        return name;
    }

    let dir = path.parent().map(url_dir).unwrap_or_default();
    let base = base_url.trim_end_matches('/');
    if dir.is_empty() {
        format!("{}/{}", base, name)
    } else {
        format!("{}/{}/{}", base, dir, name)
    }
}

/// Make `path` relative to `site_root` when it lies beneath it.
///
/// Paths outside the root are returned unchanged.
pub fn strip_site_root(path: &Path, site_root: Option<&Path>) -> PathBuf {
    match site_root {
        Some(root) => path.strip_prefix(root).unwrap_or(path).to_path_buf(),
        None => path.to_path_buf(),
    }
}

fn linked_name(path: &Path, page_extension: Option<&str>) -> String {
    let file_name = path.file_name().map(Path::new).unwrap_or(Path::new(""));
    match page_extension {
        Some(ext) => file_name.with_extension(ext),
        None => file_name.to_path_buf(),
    }
    .to_string_lossy()
    .to_string()
}

/// Directory part of a link: `/`-joined normal components, no `.` or root.
fn url_dir(dir: &Path) -> String {
    dir.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
