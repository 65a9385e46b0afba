//! Decode an uploaded image and convert it to RGB before inference.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, ImageReader};
use veritas_core::errors::{DetectionError, DetectionResult};

/// An RGB image re-encoded as PNG, ready to send to a classifier.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub source: PathBuf,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Open `path`, sniff its format, decode, drop alpha/palette, re-encode as PNG.
pub fn prepare_image(path: &Path) -> DetectionResult<PreparedImage> {
    let invalid = |reason: String| DetectionError::InvalidImage {
        path: path.display().to_string(),
        reason,
    };

    let decoded = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| invalid(e.to_string()))?
        .decode()
        .map_err(|e| invalid(e.to_string()))?;

    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| invalid(e.to_string()))?;

    Ok(PreparedImage {
        source: path.to_path_buf(),
        width,
        height,
        png: png.into_inner(),
    })
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    #[test]
    fn rgba_png_is_converted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 128]))
            .save(&path)
            .unwrap();

        let prepared = prepare_image(&path).unwrap();
        assert_eq!((prepared.width, prepared.height), (4, 3));

        let reloaded = image::load_from_memory(&prepared.png).unwrap();
        assert_eq!(reloaded.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn format_is_sniffed_not_taken_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let png_path = dir.path().join("real.png");
        RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])).save(&png_path).unwrap();
        let misnamed = dir.path().join("photo.jpg");
        std::fs::rename(&png_path, &misnamed).unwrap();

        assert!(prepare_image(&misnamed).is_ok());
    }

    #[test]
    fn garbage_bytes_are_invalid_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = prepare_image(&path).unwrap_err();
        assert!(matches!(err, DetectionError::InvalidImage { .. }));
    }

    #[test]
    fn missing_file_is_invalid_image() {
        let err = prepare_image(Path::new("/nonexistent/veritas.png")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/veritas.png"));
    }
}
