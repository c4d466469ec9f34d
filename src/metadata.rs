//! Capture metadata for gallery captions and detail pages.
//!
//! Only JPEG sources (`.jpg`) carry metadata. For them a [`PhotoMetadata`]
//! record is built from two places:
//!
//! - **Frame header**: pixel width and height, read by probing the file with
//!   the `image` crate's JPEG decoder. This is also the validity check: a
//!   `.jpg` that does not decode is a [`MetadataError::Decode`], and callers
//!   let it abort the gallery.
//! - **EXIF segment** (APP1): capture time (`DateTimeOriginal`, falling back
//!   to `DateTime`), camera `Model`, `ExposureTime` and `FNumber`. A JPEG with
//!   no EXIF, or with an EXIF block we cannot parse, simply has no such
//!   fields.
//!
//! ## Renderings
//!
//! The same record renders two ways:
//!
//! ```text
//! HTML (index captions):
//!   <div class="exif"><span class="date_time">2024:03:15 12:30:45</span>…<span class="size">4000x3000</span></div>
//!
//! YAML (detail page front matter):
//!   date_time: 2024:03:15 12:30:45
//!   model: X100V
//!   exposure: 1/250
//!   aperture: 5.6
//!   size: 4000x3000
//! ```
//!
//! Non-JPEG files have no record, and both renderings are empty strings.

use crate::scan;
use exif::{In, Reader, Tag, Value};
use maud::{Markup, html};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a readable JPEG: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Capture metadata of one JPEG.
///
/// String fields keep the camera's own notation: the timestamp as written in
/// EXIF, exposure as a fraction (`1/60`). The f-number is numeric so it
/// reaches front matter as a YAML number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoMetadata {
    pub date_time: Option<String>,
    pub model: Option<String>,
    pub exposure: Option<String>,
    pub aperture: Option<f64>,
    pub width: u32,
    pub height: u32,
}

/// Serialized shape of [`PhotoMetadata`]; absent fields are left out.
#[derive(Serialize)]
struct MetadataFields<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    date_time: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exposure: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aperture: Option<f64>,
    size: String,
}

impl PhotoMetadata {
    /// Pixel size as `WIDTHxHEIGHT`.
    pub fn size(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// HTML rendering: a `div.exif` with one span per known field.
    pub fn to_html(&self) -> Markup {
        html! {
            div.exif {
                @if let Some(date_time) = &self.date_time {
                    span.date_time { (date_time) }
                }
                @if let Some(model) = &self.model {
                    span.model { (model) }
                }
                @if let Some(exposure) = &self.exposure {
                    span.exposure { (exposure) }
                }
                @if let Some(aperture) = self.aperture {
                    span.aperture { "f/" (aperture_text(aperture)) }
                }
                span.size { (self.size()) }
            }
        }
    }

    /// YAML rendering: one `key: value` line per known field.
    pub fn to_yaml(&self) -> Result<String, MetadataError> {
        let fields = MetadataFields {
            date_time: self.date_time.as_deref(),
            model: self.model.as_deref(),
            exposure: self.exposure.as_deref(),
            aperture: self.aperture,
            size: self.size(),
        };
        Ok(serde_yaml::to_string(&fields)?)
    }
}

/// HTML rendering of optional metadata; empty when there is none.
pub fn html_block(metadata: Option<&PhotoMetadata>) -> Markup {
    match metadata {
        Some(m) => m.to_html(),
        None => html! {},
    }
}

/// YAML rendering of optional metadata; empty when there is none.
pub fn yaml_block(metadata: Option<&PhotoMetadata>) -> Result<String, MetadataError> {
    match metadata {
        Some(m) => m.to_yaml(),
        None => Ok(String::new()),
    }
}

/// Read the metadata of `path`.
///
/// Returns `Ok(None)` for anything that is not a `.jpg`, without touching
/// the file.
pub fn read_metadata(path: &Path) -> Result<Option<PhotoMetadata>, MetadataError> {
    if !scan::is_jpeg(path) {
        return Ok(None);
    }

    let (width, height) = jpeg_dimensions(path)?;
    let mut metadata = PhotoMetadata {
        width,
        height,
        ..PhotoMetadata::default()
    };

    if let Some(exif) = read_exif(path)? {
        metadata.date_time = read_ascii_tag(&exif, Tag::DateTimeOriginal)
            .or_else(|| read_ascii_tag(&exif, Tag::DateTime));
        metadata.model = read_ascii_tag(&exif, Tag::Model);
        metadata.exposure = read_rational_tag(&exif, Tag::ExposureTime).map(fraction);
        metadata.aperture = read_rational_tag(&exif, Tag::FNumber).and_then(decimal);
    }

    Ok(Some(metadata))
}

fn jpeg_dimensions(path: &Path) -> Result<(u32, u32), MetadataError> {
    let mut reader = image::ImageReader::open(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    reader.set_format(image::ImageFormat::Jpeg);
    reader
        .into_dimensions()
        .map_err(|source| MetadataError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Parse the EXIF segment, treating a missing or malformed one as absent.
fn read_exif(path: &Path) -> Result<Option<exif::Exif>, MetadataError> {
    let file = File::open(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    match Reader::new().read_from_container(&mut reader) {
        Ok(exif) => Ok(Some(exif)),
        Err(e) => {
            tracing::debug!("no EXIF in {:?}: {}", path, e);
            Ok(None)
        }
    }
}

fn read_ascii_tag(exif: &exif::Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Ascii(vecs) => {
            let s = vecs
                .first()
                .and_then(|v| std::str::from_utf8(v).ok())?
                .trim()
                .to_string();
            if s.is_empty() { None } else { Some(s) }
        }
        _ => None,
    }
}

fn read_rational_tag(exif: &exif::Exif, tag: Tag) -> Option<exif::Rational> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Rational(v) => v.first().copied(),
        _ => None,
    }
}

/// `1/250`, `2/1`: the rational exactly as stored.
fn fraction(r: exif::Rational) -> String {
    format!("{}/{}", r.num, r.denom)
}

fn decimal(r: exif::Rational) -> Option<f64> {
    if r.denom == 0 {
        return None;
    }
    Some(r.to_f64())
}

/// `5.6`, `8.0`, `1.75`: whole numbers keep one decimal place.
fn aperture_text(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn sample() -> PhotoMetadata {
        PhotoMetadata {
            date_time: Some("2024:03:15 12:30:45".to_string()),
            model: Some("X100V".to_string()),
            exposure: Some("1/250".to_string()),
            aperture: Some(5.6),
            width: 4000,
            height: 3000,
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    #[test]
    fn html_wraps_fields_in_exif_div() {
        let html = sample().to_html().into_string();

        assert!(html.starts_with(r#"<div class="exif">"#));
        assert!(html.contains(r#"<span class="model">X100V</span>"#));
        assert!(html.contains(r#"<span class="exposure">1/250</span>"#));
        assert!(html.contains(r#"<span class="aperture">f/5.6</span>"#));
        assert!(html.contains(r#"<span class="size">4000x3000</span>"#));
    }

    #[test]
    fn html_escapes_camera_strings() {
        let meta = PhotoMetadata {
            model: Some("<b>cam</b>".to_string()),
            ..sample()
        };
        let html = meta.to_html().into_string();
        assert!(html.contains("&lt;b&gt;cam&lt;/b&gt;"));
    }

    #[test]
    fn yaml_has_one_key_per_field_in_order() {
        let yaml = sample().to_yaml().unwrap();
        let keys: Vec<&str> = yaml
            .lines()
            .map(|l| l.split(':').next().unwrap())
            .collect();
        assert_eq!(keys, vec!["date_time", "model", "exposure", "aperture", "size"]);

        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed["model"].as_str(), Some("X100V"));
        assert_eq!(parsed["exposure"].as_str(), Some("1/250"));
        assert_eq!(parsed["aperture"].as_f64(), Some(5.6));
        assert_eq!(parsed["size"].as_str(), Some("4000x3000"));
        assert_eq!(parsed["date_time"].as_str(), Some("2024:03:15 12:30:45"));
    }

    #[test]
    fn yaml_omits_missing_fields() {
        let meta = PhotoMetadata {
            width: 8,
            height: 6,
            ..PhotoMetadata::default()
        };
        assert_eq!(meta.to_yaml().unwrap(), "size: 8x6\n");
    }

    #[test]
    fn no_metadata_renders_empty() {
        assert_eq!(html_block(None).into_string(), "");
        assert_eq!(yaml_block(None).unwrap(), "");
    }

    #[test]
    fn decimal_reads_f_number() {
        let r = |num, denom| exif::Rational { num, denom };
        assert_eq!(decimal(r(56, 10)), Some(5.6));
        assert_eq!(decimal(r(8, 1)), Some(8.0));
        assert_eq!(decimal(r(1, 0)), None);
    }

    #[test]
    fn aperture_text_keeps_one_decimal_for_whole_numbers() {
        assert_eq!(aperture_text(5.6), "5.6");
        assert_eq!(aperture_text(8.0), "8.0");
        assert_eq!(aperture_text(1.75), "1.75");
    }

    #[test]
    fn yaml_writes_aperture_as_number() {
        let yaml = sample().to_yaml().unwrap();
        assert!(yaml.contains("aperture: 5.6\n"), "{yaml}");

        let whole = PhotoMetadata {
            aperture: Some(8.0),
            ..sample()
        };
        let yaml = whole.to_yaml().unwrap();
        assert!(yaml.contains("aperture: 8.0\n"), "{yaml}");
    }

    #[test]
    fn fraction_keeps_native_form() {
        assert_eq!(fraction(exif::Rational { num: 1, denom: 60 }), "1/60");
        assert_eq!(fraction(exif::Rational { num: 2, denom: 1 }), "2/1");
    }

    // =========================================================================
    // read_metadata()
    // =========================================================================

    #[test]
    fn png_has_no_metadata() {
        let tmp = TempDir::new().unwrap();
        let png = tmp.path().join("p3.png");
        write_png(&png, 4, 4);

        assert_eq!(read_metadata(&png).unwrap(), None);
    }

    #[test]
    fn non_jpeg_is_not_opened() {
        // Does not exist, and still no error: only `.jpg` is ever read.
        assert_eq!(read_metadata(Path::new("/nonexistent/p.png")).unwrap(), None);
    }

    #[test]
    fn jpeg_without_exif_has_size_only() {
        let tmp = TempDir::new().unwrap();
        let jpg = tmp.path().join("plain.jpg");
        write_jpeg(&jpg, 12, 9);

        let meta = read_metadata(&jpg).unwrap().unwrap();
        assert_eq!(
            meta,
            PhotoMetadata {
                width: 12,
                height: 9,
                ..PhotoMetadata::default()
            }
        );
    }

    #[test]
    fn jpeg_exif_fields_are_read() {
        let tmp = TempDir::new().unwrap();
        let jpg = tmp.path().join("shot.jpg");
        write_jpeg_with_exif(&jpg, 16, 10, &sample_exif());

        let meta = read_metadata(&jpg).unwrap().unwrap();
        assert_eq!(meta.date_time.as_deref(), Some("2024:03:15 12:30:45"));
        assert_eq!(meta.model.as_deref(), Some("X100V"));
        assert_eq!(meta.exposure.as_deref(), Some("1/250"));
        assert_eq!(meta.aperture, Some(5.6));
        assert_eq!((meta.width, meta.height), (16, 10));
    }

    #[test]
    fn date_time_falls_back_to_modification_stamp() {
        let tmp = TempDir::new().unwrap();
        let jpg = tmp.path().join("edited.jpg");
        let exif = ExifSample {
            date_time_original: None,
            date_time: Some("2020:01:02 03:04:05"),
            ..sample_exif()
        };
        write_jpeg_with_exif(&jpg, 4, 4, &exif);

        let meta = read_metadata(&jpg).unwrap().unwrap();
        assert_eq!(meta.date_time.as_deref(), Some("2020:01:02 03:04:05"));
    }

    #[test]
    fn invalid_jpeg_is_decode_error() {
        let tmp = TempDir::new().unwrap();
        let jpg = tmp.path().join("fake.jpg");
        std::fs::write(&jpg, "not really a jpeg").unwrap();

        assert!(matches!(
            read_metadata(&jpg),
            Err(MetadataError::Decode { .. })
        ));
    }

    #[test]
    fn missing_jpeg_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = read_metadata(&tmp.path().join("gone.jpg"));
        assert!(matches!(result, Err(MetadataError::Io { .. })));
    }
}
