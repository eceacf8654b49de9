//! Synthetic images for unit tests.

use crate::pixel_grid::PixelGrid;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

pub const SKIN: [u8; 4] = [224, 172, 135, 255];

pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

pub fn checkerboard(width: u32, height: u32, tile: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if ((x / tile) + (y / tile)) % 2 == 0 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
}

/// Checkerboard in two mid-gray levels so it stays well lit overall.
pub fn gray_checkerboard(width: u32, height: u32, tile: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if ((x / tile) + (y / tile)) % 2 == 0 {
            Rgba([200, 200, 200, 255])
        } else {
            Rgba([60, 60, 60, 255])
        }
    })
}

/// Centered skin-colored rectangle covering `fraction` of each axis on a
/// checkerboard background.
pub fn skin_patch(width: u32, height: u32, fraction: f64) -> RgbaImage {
    let pw = (width as f64 * fraction) as u32;
    let ph = (height as f64 * fraction) as u32;
    let x0 = (width - pw) / 2;
    let y0 = (height - ph) / 2;
    let mut img = gray_checkerboard(width, height, 40);
    for y in y0..y0 + ph {
        for x in x0..x0 + pw {
            img.put_pixel(x, y, Rgba(SKIN));
        }
    }
    img
}

pub fn grid(img: &RgbaImage) -> PixelGrid {
    PixelGrid::new(img.width(), img.height(), img.as_raw().clone()).unwrap()
}

pub fn png(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}
