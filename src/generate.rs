//! Index and detail page generation.
//!
//! Writes the text files a static-site generator turns into the gallery. Each
//! file starts with a YAML front-matter block naming its layout; the site
//! generator supplies the surrounding HTML.
//!
//! ## Generated Files
//!
//! ```text
//! trip/
//! ├── index.textile            # always: front matter + thumbnail list
//! ├── beach.textile            # with pages enabled, one per photo
//! └── dunes.textile
//! ```
//!
//! ## Index
//!
//! ```text
//! ---
//! title: trip
//! layout: gallery
//! ---
//! <ul class="gallery"><li><a href="beach.html"><img src="beach-thumb.jpg" alt="beach.jpg"></a><div class="caption">beach.jpg<div class="exif">…</div></div></li>…</ul>
//! ```
//!
//! ## Detail Pages
//!
//! Front matter only: the photo, its neighbours, its position and, for JPEGs,
//! its capture metadata.
//!
//! ```text
//! ---
//! title: dunes.png
//! layout: photo
//! img: dunes.png
//! prev: beach.html
//! gallery: trip
//! gallery_index: index.html
//! index: 2
//! total: 2
//! ---
//! ```
//!
//! ## Links
//!
//! Links are built by [`naming::link_with`]. With an empty base URL they are
//! bare file names, which resolve because every file of a gallery lives in
//! the same directory. With a base URL the photo's directory is included,
//! taken relative to `site_root` when one is configured.
//!
//! Output is a pure function of the directory contents, so a re-run writes
//! byte-identical files.

use crate::config::GalleryConfig;
use crate::metadata::{self, MetadataError, PhotoMetadata};
use crate::naming::{self, THUMB_SUFFIX};
use crate::scan::{self, ScanError};
use maud::{Markup, html};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("page for {} would overwrite the gallery index {}", .photo.display(), .page.display())]
    PageOverwritesIndex { photo: PathBuf, page: PathBuf },
    #[error("{} and {} would both write the page {}", .first.display(), .second.display(), .page.display())]
    DuplicatePage {
        first: PathBuf,
        second: PathBuf,
        page: PathBuf,
    },
}

/// One photo of the gallery, with the metadata its captions need.
#[derive(Debug, Clone)]
pub struct GalleryItem {
    pub path: PathBuf,
    pub metadata: Option<PhotoMetadata>,
}

impl GalleryItem {
    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

#[derive(Serialize)]
struct IndexFrontMatter<'a> {
    title: &'a str,
    layout: &'a str,
}

#[derive(Serialize)]
struct PageFrontMatter<'a> {
    title: String,
    layout: &'a str,
    img: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<String>,
    gallery: &'a str,
    gallery_index: String,
    index: usize,
    total: usize,
}

/// Read the gallery sequence of `dir` with each photo's metadata.
///
/// A `.jpg` that does not decode fails the whole gallery.
pub fn load_items(dir: &Path, config: &GalleryConfig) -> Result<Vec<GalleryItem>, GenerateError> {
    let mut items = Vec::new();
    for path in scan::source_images(dir, config.order)? {
        let metadata = metadata::read_metadata(&path)?;
        items.push(GalleryItem { path, metadata });
    }
    Ok(items)
}

/// Path as it appears in links: relative to `site_root` when one is set.
fn link_path(path: &Path, config: &GalleryConfig) -> PathBuf {
    let Some(root) = config.site_root.as_deref() else {
        return path.to_path_buf();
    };
    if path.starts_with(root) {
        return naming::strip_site_root(path, Some(root));
    }
    // Relative gallery argument against an absolute root, or the reverse.
    match (std::path::absolute(path), std::path::absolute(root)) {
        (Ok(abs_path), Ok(abs_root)) => naming::strip_site_root(&abs_path, Some(&abs_root)),
        _ => path.to_path_buf(),
    }
}

/// Link to the photo itself.
fn image_link(path: &Path, config: &GalleryConfig) -> String {
    naming::link_with(&config.url, &link_path(path, config), None)
}

/// Link to the rendered detail page of a photo.
fn page_link(path: &Path, config: &GalleryConfig) -> String {
    naming::link_with(
        &config.url,
        &link_path(path, config),
        Some(&config.output.page_extension),
    )
}

fn with_front_matter(front_matter: &str, body: &str) -> String {
    format!("---\n{front_matter}---\n{body}")
}

/// HTML list of thumbnails, one `li` per photo.
pub fn render_gallery_list(items: &[GalleryItem], config: &GalleryConfig) -> Markup {
    html! {
        ul.gallery {
            @for item in items {
                @let name = item.file_name();
                @let href = if config.pages {
                    page_link(&item.path, config)
                } else {
                    image_link(&item.path, config)
                };
                @let thumb = image_link(&naming::derive(&item.path, THUMB_SUFFIX), config);
                li {
                    a href=(href) {
                        img src=(thumb) alt=(name);
                    }
                    div.caption {
                        (name)
                        (metadata::html_block(item.metadata.as_ref()))
                    }
                }
            }
        }
    }
}

/// Full text of the index file.
pub fn render_index(
    title: &str,
    items: &[GalleryItem],
    config: &GalleryConfig,
) -> Result<String, GenerateError> {
    let front_matter = serde_yaml::to_string(&IndexFrontMatter {
        title,
        layout: &config.output.index_layout,
    })?;
    let body = render_gallery_list(items, config).into_string();
    Ok(with_front_matter(&front_matter, &format!("{body}\n")))
}

/// Full text of the detail page for `items[position]`.
pub fn render_page(
    title: &str,
    items: &[GalleryItem],
    position: usize,
    config: &GalleryConfig,
) -> Result<String, GenerateError> {
    let item = &items[position];
    let front_matter = serde_yaml::to_string(&PageFrontMatter {
        title: item.file_name(),
        layout: &config.output.page_layout,
        img: image_link(&item.path, config),
        prev: position
            .checked_sub(1)
            .map(|prev| page_link(&items[prev].path, config)),
        next: items
            .get(position + 1)
            .map(|next| page_link(&next.path, config)),
        gallery: title,
        gallery_index: config.gallery_index_link(),
        index: position + 1,
        total: items.len(),
    })?;
    let metadata = metadata::yaml_block(item.metadata.as_ref())?;
    Ok(with_front_matter(&format!("{front_matter}{metadata}"), ""))
}

/// Write `index.<text_extension>` for `dir` and return its path.
pub fn write_index(dir: &Path, config: &GalleryConfig) -> Result<PathBuf, GenerateError> {
    let items = load_items(dir, config)?;
    let title = scan::gallery_title(dir);
    let content = render_index(&title, &items, config)?;

    let path = dir.join(config.index_filename());
    fs::write(&path, content)?;
    tracing::info!(path = %path.display(), photos = items.len(), "wrote index");
    Ok(path)
}

/// Page path of every photo, in gallery order.
///
/// A page is the photo's stem with the text extension, so `index.png` would
/// land on the gallery index and `p.jpg`/`p.png` on the same page. Both are
/// errors, raised before any page is written.
pub fn page_paths(
    dir: &Path,
    items: &[GalleryItem],
    config: &GalleryConfig,
) -> Result<Vec<PathBuf>, GenerateError> {
    let index = dir.join(config.index_filename());
    let mut owners: HashMap<PathBuf, &Path> = HashMap::new();
    let mut paths = Vec::with_capacity(items.len());

    for item in items {
        let page = item.path.with_extension(&config.output.text_extension);
        if page == index {
            return Err(GenerateError::PageOverwritesIndex {
                photo: item.path.clone(),
                page,
            });
        }
        if let Some(first) = owners.insert(page.clone(), &item.path) {
            return Err(GenerateError::DuplicatePage {
                first: first.to_path_buf(),
                second: item.path.clone(),
                page,
            });
        }
        paths.push(page);
    }
    Ok(paths)
}

/// Write one detail page per photo of `dir` and return their paths.
pub fn write_pages(dir: &Path, config: &GalleryConfig) -> Result<Vec<PathBuf>, GenerateError> {
    let items = load_items(dir, config)?;
    let title = scan::gallery_title(dir);
    let paths = page_paths(dir, &items, config)?;

    let mut written = Vec::with_capacity(items.len());
    for (position, path) in paths.into_iter().enumerate() {
        let content = render_page(&title, &items, position, config)?;
        fs::write(&path, content)?;
        tracing::debug!(path = %path.display(), "wrote page");
        written.push(path);
    }
    tracing::info!(dir = %dir.display(), pages = written.len(), "wrote pages");
    Ok(written)
}
