//! Card export: crop a window capture, flatten it onto the backdrop, write PNG.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::zodiac::{Rgb, Sign};

use super::{export_backdrop, export_file_name};

/// Captured pixels (straight-alpha RGBA, row-major).
#[derive(Debug, Clone, PartialEq)]
pub struct CardCapture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Pixel rectangle inside a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Error during export
#[derive(Debug)]
pub struct ExportError {
    pub message: String,
    pub phase: &'static str,
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

impl std::error::Error for ExportError {}

impl CardCapture {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ExportError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ExportError {
                message: format!("expected {} bytes, got {}", expected, rgba.len()),
                phase: "capture",
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Copy out `rect`, clipped to the capture bounds.
    pub fn crop(&self, rect: PixelRect) -> Result<CardCapture, ExportError> {
        let x0 = rect.x.min(self.width);
        let y0 = rect.y.min(self.height);
        let x1 = rect.x.saturating_add(rect.width).min(self.width);
        let y1 = rect.y.saturating_add(rect.height).min(self.height);
        if x1 <= x0 || y1 <= y0 {
            return Err(ExportError {
                message: format!("card region {:?} lies outside the capture", rect),
                phase: "crop",
            });
        }

        let (w, h) = (x1 - x0, y1 - y0);
        if w < rect.width || h < rect.height {
            log::warn!(
                "Card region {:?} extends past the {}x{} capture, exporting {}x{}",
                rect,
                self.width,
                self.height,
                w,
                h
            );
        }
        let stride = self.width as usize * 4;
        let mut rgba = Vec::with_capacity(w as usize * h as usize * 4);
        for row in y0..y1 {
            let start = row as usize * stride + x0 as usize * 4;
            rgba.extend_from_slice(&self.rgba[start..start + w as usize * 4]);
        }
        Ok(CardCapture {
            width: w,
            height: h,
            rgba,
        })
    }

    /// Composite every pixel over an opaque backdrop.
    pub fn flatten_onto(&mut self, backdrop: Rgb) {
        for px in self.rgba.chunks_exact_mut(4) {
            let a = px[3] as u32;
            for c in 0..3 {
                let fg = px[c] as u32;
                let bg = backdrop[c] as u32;
                px[c] = ((fg * a + bg * (255 - a) + 127) / 255) as u8;
            }
            px[3] = 255;
        }
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
            .ok_or_else(|| ExportError {
                message: "pixel buffer does not match dimensions".to_string(),
                phase: "encode",
            })?;
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| ExportError {
                message: e.to_string(),
                phase: "encode",
            })?;
        Ok(buf)
    }
}

/// Crop the card out of a window capture and write it into `dir`.
///
/// Returns the path of the written PNG.
pub fn save_card(
    capture: &CardCapture,
    card: PixelRect,
    sign: Option<&Sign>,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let mut cropped = capture.crop(card)?;
    cropped.flatten_onto(export_backdrop(sign));
    let png = cropped.encode_png()?;

    let path = dir.join(export_file_name(sign));
    std::fs::write(&path, png).map_err(|e| ExportError {
        message: format!("{}: {}", path.display(), e),
        phase: "write",
    })?;
    log::info!(
        "Exported card {}x{} to {}",
        cropped.width,
        cropped.height,
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> CardCapture {
        let mut rgba = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let alpha = if (x + y) % 2 == 0 { 255 } else { 0 };
                rgba.extend_from_slice(&[200, 100, 50, alpha]);
            }
        }
        CardCapture::new(width, height, rgba).unwrap()
    }

    #[test]
    fn new_rejects_short_buffers() {
        assert!(CardCapture::new(2, 2, vec![0; 15]).is_err());
    }

    #[test]
    fn crop_is_clipped_to_bounds() {
        let cap = checker(8, 6);
        let out = cap
            .crop(PixelRect { x: 4, y: 4, width: 10, height: 10 })
            .unwrap();
        assert_eq!((out.width, out.height), (4, 2));
        assert_eq!(out.rgba.len(), 4 * 2 * 4);
        // (4,4) is an opaque square of the checkerboard.
        assert_eq!(&out.rgba[..4], &[200, 100, 50, 255]);
        assert!(cap.crop(PixelRect { x: 9, y: 0, width: 2, height: 2 }).is_err());
    }

    #[test]
    fn transparent_pixels_take_the_backdrop() {
        let mut cap = checker(2, 1);
        cap.flatten_onto([0x11, 0x18, 0x27]);
        assert_eq!(cap.rgba, vec![200, 100, 50, 255, 0x11, 0x18, 0x27, 255]);
    }

    #[test]
    fn encoded_png_round_trips_dimensions() {
        let png = checker(4, 3).encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }

    #[test]
    fn save_card_writes_named_file() {
        let dir = std::env::temp_dir().join(format!("zodiac-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let sign = Sign {
            name: "Extinct Mall Mascot".to_string(),
            constellation: "Absurd Nostalgia".to_string(),
            ..Sign::default()
        };
        let path = save_card(
            &checker(6, 6),
            PixelRect { x: 1, y: 1, width: 4, height: 4 },
            Some(&sign),
            &dir,
        )
        .unwrap();
        assert!(path.ends_with("my-zodiac-extinct-mall-mascot.png"));
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        std::fs::remove_dir_all(&dir).ok();
    }
}
