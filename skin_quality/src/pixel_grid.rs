//! Decoded RGBA pixel grid shared (read-only) by every analyzer.
//!
//! Layout is row-major, top-left origin, 4 bytes per pixel (R, G, B, A).

use crate::error::{QualityError, Result};
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

/// Owned RGBA8 image buffer with a validated length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Wrap a raw RGBA buffer. The buffer must hold exactly
    /// `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(QualityError::ZeroDimensions);
        }
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(QualityError::InvalidBuffer {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Decode encoded image bytes (JPEG, PNG, WebP, ...) into RGBA8.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        Self::from_image(&img)
    }

    pub fn from_image(img: &DynamicImage) -> Result<Self> {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::new(width, height, rgba.into_raw())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn rgba(&self, x: usize, y: usize) -> [u8; 4] {
        let idx = (y * self.width as usize + x) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Rec.601 luma scaled by 1000 (0..=255_000), kept integral so sums
    /// are exact and order independent.
    #[inline]
    pub fn luma_milli(&self, x: usize, y: usize) -> u32 {
        let idx = (y * self.width as usize + x) * 4;
        self.data[idx] as u32 * 299 + self.data[idx + 1] as u32 * 587 + self.data[idx + 2] as u32 * 114
    }

    /// Integer gray level 0..=255.
    #[inline]
    pub fn gray(&self, x: usize, y: usize) -> i32 {
        (self.luma_milli(x, y) / 1000) as i32
    }
}

/// Read only the image header to get `(width, height)`.
pub fn decode_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    let dims = reader.into_dimensions()?;
    Ok(dims)
}
