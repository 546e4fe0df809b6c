//! PNG export of a rendered [`PixelBuffer`].

use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{ImageFormat, RgbaImage};
use log::info;
use mirrorgrid_core::PixelBuffer;

/// Errors that can occur while exporting.
#[derive(Debug)]
pub enum ExportError {
    /// The image could not be encoded or written.
    Encode(image::ImageError),
    /// The pixel buffer had no pixels.
    Empty,
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "png export failed: {e}"),
            Self::Empty => write!(f, "nothing to export: canvas is empty"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(e) => Some(e),
            Self::Empty => None,
        }
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        Self::Encode(e)
    }
}

/// Copy the buffer into an RGBA image.
pub fn to_image(buf: &PixelBuffer) -> Result<RgbaImage, ExportError> {
    if buf.width() == 0 || buf.height() == 0 {
        return Err(ExportError::Empty);
    }
    RgbaImage::from_raw(buf.width() as u32, buf.height() as u32, buf.to_rgba_bytes())
        .ok_or(ExportError::Empty)
}

/// Encode the buffer as PNG bytes.
pub fn encode_png(buf: &PixelBuffer) -> Result<Vec<u8>, ExportError> {
    let img = to_image(buf)?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Write the buffer to `path` as a PNG file.
pub fn save_png(buf: &PixelBuffer, path: &Path) -> Result<(), ExportError> {
    let img = to_image(buf)?;
    img.save_with_format(path, ImageFormat::Png)?;
    info!("exported {}x{} canvas to {}", buf.width(), buf.height(), path.display());
    Ok(())
}

/// `dir/mirrorgrid-<unix millis>.png`.
pub fn timestamped_path(dir: &Path) -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    dir.join(format!("mirrorgrid-{millis}.png"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirrorgrid_core::{Canvas, Color, Range};

    fn sample() -> PixelBuffer {
        let mut buf = PixelBuffer::new(4, 3);
        buf.fill_rect(Range::new(1, 1, 3, 2), Color::from_rgb(30, 144, 255));
        buf
    }

    #[test]
    fn image_matches_buffer() {
        let img = to_image(&sample()).unwrap();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(1, 1).0, [30, 144, 255, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn png_bytes_decode_back() {
        let bytes = encode_png(&sample()).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(2, 1).0, [30, 144, 255, 255]);
    }

    #[test]
    fn empty_buffer_is_rejected() {
        assert!(matches!(encode_png(&PixelBuffer::new(0, 5)), Err(ExportError::Empty)));
    }

    #[test]
    fn save_writes_file() {
        let dir = std::env::temp_dir().join(format!("mirrorgrid-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = timestamped_path(&dir);
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("mirrorgrid-"));
        save_png(&sample(), &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 8);
        std::fs::remove_dir_all(&dir).ok();
    }
}
