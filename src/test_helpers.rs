//! Shared test utilities for the create-gallery test suite.
//!
//! Provides real image fixtures (tiny JPEGs and PNGs, optionally with an EXIF
//! segment), gallery directory setup, and front-matter parsing for asserting
//! on generated text files.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let dir = gallery_dir(&tmp, "trip");
//! write_jpeg_with_exif(&dir.join("p1.jpg"), 16, 10, &sample_exif());
//! write_png(&dir.join("p2.png"), 4, 4);
//!
//! let page = front_matter(&std::fs::read_to_string(dir.join("p1.textile")).unwrap());
//! assert_eq!(page["index"].as_u64(), Some(1));
//! ```

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =========================================================================
// Image fixtures
// =========================================================================

/// Encode a flat-colour JPEG in memory.
pub fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([180, 120, 60]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Jpeg).unwrap();
    buf.into_inner()
}

/// Write a valid JPEG without any EXIF data.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, encode_jpeg(width, height)).unwrap();
}

/// Write a valid PNG.
pub fn write_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([20, 40, 60]));
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// EXIF values to embed in a fixture JPEG. `None` leaves the tag out.
#[derive(Debug, Clone)]
pub struct ExifSample {
    pub date_time_original: Option<&'static str>,
    pub date_time: Option<&'static str>,
    pub model: Option<&'static str>,
    pub exposure: Option<(u32, u32)>,
    pub f_number: Option<(u32, u32)>,
}

/// A typical camera: X100V at 1/250, f/5.6.
pub fn sample_exif() -> ExifSample {
    ExifSample {
        date_time_original: Some("2024:03:15 12:30:45"),
        date_time: None,
        model: Some("X100V"),
        exposure: Some((1, 250)),
        f_number: Some((56, 10)),
    }
}

fn ascii(tag: Tag, s: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![s.as_bytes().to_vec()]),
    }
}

fn rational(tag: Tag, (num, denom): (u32, u32)) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![Rational { num, denom }]),
    }
}

/// Write a JPEG with an APP1 EXIF segment right after SOI.
pub fn write_jpeg_with_exif(path: &Path, width: u32, height: u32, sample: &ExifSample) {
    let mut fields = Vec::new();
    if let Some(s) = sample.date_time_original {
        fields.push(ascii(Tag::DateTimeOriginal, s));
    }
    if let Some(s) = sample.date_time {
        fields.push(ascii(Tag::DateTime, s));
    }
    if let Some(s) = sample.model {
        fields.push(ascii(Tag::Model, s));
    }
    if let Some(r) = sample.exposure {
        fields.push(rational(Tag::ExposureTime, r));
    }
    if let Some(r) = sample.f_number {
        fields.push(rational(Tag::FNumber, r));
    }

    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).unwrap();

    let mut segment = b"Exif\0\0".to_vec();
    segment.extend(tiff.into_inner());
    let segment_len = u16::try_from(segment.len() + 2).unwrap();

    let jpeg = encode_jpeg(width, height);
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE1];
    bytes.extend(segment_len.to_be_bytes());
    bytes.extend(segment);
    bytes.extend(&jpeg[2..]);
    std::fs::write(path, bytes).unwrap();
}

// =========================================================================
// Gallery setup
// =========================================================================

/// Create a named gallery directory inside `tmp`, so its title is predictable.
pub fn gallery_dir(tmp: &TempDir, name: &str) -> PathBuf {
    let dir = tmp.path().join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Create empty placeholder images; enough for anything but metadata reads.
pub fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), "").unwrap();
    }
}

/// File names in `dir` with the given extension, sorted.
pub fn files_with_extension(dir: &Path, ext: &str) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(ext))
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

// =========================================================================
// Generated text
// =========================================================================

/// Parse the `---` delimited front matter at the top of a generated file.
pub fn front_matter(content: &str) -> serde_yaml::Value {
    let rest = content
        .strip_prefix("---\n")
        .unwrap_or_else(|| panic!("no front matter in:\n{content}"));
    let end = rest
        .find("\n---\n")
        .unwrap_or_else(|| panic!("unterminated front matter in:\n{content}"));
    serde_yaml::from_str(&rest[..end]).unwrap()
}

/// Body of a generated file: everything after the front matter.
pub fn body(content: &str) -> &str {
    let rest = content.strip_prefix("---\n").unwrap();
    let end = rest.find("\n---\n").unwrap();
    &rest[end + "\n---\n".len()..]
}
