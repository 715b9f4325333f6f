// In-memory RGB raster surface backed by an `image::RgbImage`; exports PNG.

use super::RasterSurface;
use crate::models::Rgb;
use anyhow::{Context, Result};
use image::RgbImage;
use std::path::Path;

fn to_pixel(color: Rgb) -> image::Rgb<u8> {
    image::Rgb([color.r, color.g, color.b])
}

#[derive(Debug, Clone)]
pub struct PixelBuffer {
    image: RgbImage,
    rects_filled: usize,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, to_pixel(Rgb::BLACK)),
            rects_filled: 0,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Rgb::new(p[0], p[1], p[2]))
    }

    /// Rectangles filled since the last full fill.
    pub fn rects_filled(&self) -> usize {
        self.rects_filled
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.image
            .save(path)
            .with_context(|| format!("writing {}", path.display()))
    }
}

impl RasterSurface for PixelBuffer {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn fill(&mut self, color: Rgb) {
        let pixel = to_pixel(color);
        self.image.pixels_mut().for_each(|p| *p = pixel);
        self.rects_filled = 0;
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgb) {
        self.rects_filled += 1;
        let (w, h) = self.image.dimensions();
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + width as i64).min(w as i64);
        let y1 = (y as i64 + height as i64).min(h as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let pixel = to_pixel(color);
        for row in y0 as u32..y1 as u32 {
            for col in x0 as u32..x1 as u32 {
                self.image.put_pixel(col, row, pixel);
            }
        }
    }

    fn clear(&mut self) {
        self.fill(Rgb::BLACK);
    }
}
