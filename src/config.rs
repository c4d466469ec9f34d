//! Gallery configuration.
//!
//! Every option has a stock default, and each layer below overrides the one
//! before it:
//!
//! 1. stock defaults (this module)
//! 2. the file given with `--config`, if any
//! 3. `gallery.toml` inside the gallery directory, if present
//! 4. command-line flags
//!
//! ## Config File Location
//!
//! ```text
//! photos/
//! ├── site-gallery.toml        # shared, passed with --config
//! ├── trip/
//! │   ├── gallery.toml         # per-gallery overrides
//! │   └── ...
//! └── wedding/
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! geometry = "210x150"   # thumbnail bounding box, passed to the converter
//! url = ""               # base URL for links; empty = links relative to the gallery
//! pages = false          # also write one detail page per photo
//! order = "listing"      # "listing" (filesystem order) or "name"
//! # site_root = "/srv/www"  # link directories are taken relative to this;
//!                           # a relative value is relative to the config file
//!
//! [converter]
//! program = "convert"    # ImageMagick-compatible converter
//!
//! [output]
//! text_extension = "textile"   # extension of the index and detail pages
//! page_extension = "html"      # extension the site generator renders them to
//! index_layout = "gallery"     # layout named in the index front matter
//! page_layout = "photo"        # layout named in each detail page
//! ```
//!
//! Config files are sparse and unknown keys are rejected to catch typos early.

use crate::imaging::Geometry;
use crate::scan::{IMAGE_EXTENSIONS, SortOrder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the per-gallery config file.
pub const CONFIG_FILENAME: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Resolved configuration for one gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Thumbnail geometry handed to the converter.
    pub geometry: Geometry,
    /// Base URL prefixed to links. Empty keeps links relative.
    pub url: String,
    /// Whether to write detail pages.
    pub pages: bool,
    /// Gallery order.
    pub order: SortOrder,
    /// Directory that link paths are made relative to when `url` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_root: Option<PathBuf>,
    /// External converter settings.
    pub converter: ConverterConfig,
    /// Names and layouts of the generated text files.
    pub output: OutputConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            url: String::new(),
            pages: false,
            order: SortOrder::default(),
            site_root: None,
            converter: ConverterConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.geometry.as_str().trim().is_empty() {
            return Err(ConfigError::Validation("geometry must not be empty".into()));
        }
        if self.converter.program.trim().is_empty() {
            return Err(ConfigError::Validation(
                "converter.program must not be empty".into(),
            ));
        }
        for (key, ext) in [
            ("output.text_extension", &self.output.text_extension),
            ("output.page_extension", &self.output.page_extension),
        ] {
            if ext.is_empty() || ext.contains(['.', '/']) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a bare extension like \"html\", got {ext:?}"
                )));
            }
        }
        if IMAGE_EXTENSIONS.contains(&self.output.text_extension.as_str()) {
            return Err(ConfigError::Validation(format!(
                "output.text_extension must not be an image extension, got {:?}",
                self.output.text_extension
            )));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of the file-based config.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(geometry) = &overrides.geometry {
            self.geometry = geometry.clone();
        }
        if let Some(url) = &overrides.url {
            self.url = url.clone();
        }
        if overrides.pages {
            self.pages = true;
        }
        if let Some(order) = overrides.order {
            self.order = order;
        }
        if let Some(site_root) = &overrides.site_root {
            self.site_root = Some(site_root.clone());
        }
    }

    /// File name of the gallery index, e.g. `index.textile`.
    pub fn index_filename(&self) -> String {
        format!("index.{}", self.output.text_extension)
    }

    /// Link to the rendered gallery index, e.g. `index.html`.
    pub fn gallery_index_link(&self) -> String {
        format!("index.{}", self.output.page_extension)
    }
}

/// External converter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Program name or path, invoked as `<program> <src> -resize <geometry> <dst>`.
    pub program: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: crate::imaging::imagemagick::DEFAULT_PROGRAM.to_string(),
        }
    }
}

/// Generated text file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Extension of written index and detail pages.
    pub text_extension: String,
    /// Extension links use to reach rendered pages.
    pub page_extension: String,
    /// Layout identifier in the index front matter.
    pub index_layout: String,
    /// Layout identifier in detail page front matter.
    pub page_layout: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            text_extension: "textile".to_string(),
            page_extension: crate::naming::PAGE_EXTENSION.to_string(),
            index_layout: "gallery".to_string(),
            page_layout: "photo".to_string(),
        }
    }
}

/// Values given on the command line. `None`/`false` leave the config alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub geometry: Option<Geometry>,
    pub url: Option<String>,
    pub pages: bool,
    pub order: Option<SortOrder>,
    pub site_root: Option<PathBuf>,
}

/// Stock defaults as a TOML value, the base every overlay merges onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a TOML file as a raw value.
///
/// A relative `site_root` is resolved against the directory holding the file.
pub fn load_raw_file(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut value: toml::Value = toml::from_str(&content)?;
    if let Some(base) = path.parent() {
        resolve_site_root(&mut value, base);
    }
    Ok(value)
}

fn resolve_site_root(value: &mut toml::Value, base: &Path) {
    let Some(entry) = value.get_mut("site_root") else {
        return;
    };
    let resolved = match entry.as_str().map(Path::new) {
        Some(root) if root.is_relative() => base.join(root),
        _ => return,
    };
    *entry = toml::Value::String(resolved.to_string_lossy().into_owned());
}

/// Load `gallery.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    load_raw_file(&config_path).map(Some)
}

/// Merge overlays in order onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config for one gallery directory.
///
/// Layers stock defaults, the optional shared file and the directory's own
/// `gallery.toml`, then applies `overrides` and validates the result.
pub fn load_config(
    gallery_dir: &Path,
    shared_file: Option<&Path>,
    overrides: &Overrides,
) -> Result<GalleryConfig, ConfigError> {
    let mut overlays = Vec::new();
    if let Some(file) = shared_file {
        overlays.push(load_raw_file(file)?);
    }
    if let Some(local) = load_raw_config(gallery_dir)? {
        overlays.push(local);
    }

    let mut config = resolve_config(stock_defaults_value(), overlays)?;
    config.apply(overrides);
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `gallery.toml`.
///
/// Printed by `--gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# create_gallery configuration
# ===========================
#
# Place this file as `gallery.toml` in a gallery directory, or pass it to
# every run with `--config FILE`. Command-line flags override both.
# All options are optional; the values below are the defaults.

# Thumbnail bounding box, passed unchanged to the converter (WIDTHxHEIGHT).
geometry = "210x150"

# Base URL prefixed to every link. Empty keeps links relative to the gallery
# directory, which works as long as pages and photos are published together.
url = ""

# Also write one detail page per photo, with previous/next links.
pages = false

# Gallery order: "listing" keeps the order the filesystem lists files in,
# "name" sorts by file name.
order = "listing"

# When `url` is set, link paths are taken relative to this directory instead
# of the directory create_gallery was started from. A relative value is
# resolved against the directory holding this file; --site-root on the
# command line is resolved against the current directory.
# site_root = "/srv/www"

[converter]
# ImageMagick-compatible program, run as: <program> <src> -resize <geometry> <dst>
program = "convert"

[output]
# Extension of the written index and detail pages.
text_extension = "textile"
# Extension the site generator renders those pages to; used in links.
page_extension = "html"
# Layout identifiers written into the front matter.
index_layout = "gallery"
page_layout = "photo"
"##
}
