use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder, ImageFormat, Rgb, RgbImage};

use crate::error::{RenderError, Result};
use crate::math::Vec3;

/// Row-major grid of linear colors, row 0 at the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Vec3>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> FrameBuffer {
        FrameBuffer {
            width,
            height,
            pixels: vec![Vec3::ZERO; pixel_count(width, height)],
        }
    }

    pub(crate) fn from_pixels(width: u32, height: u32, pixels: Vec<Vec3>) -> FrameBuffer {
        debug_assert_eq!(pixels.len(), pixel_count(width, height));
        FrameBuffer {
            width,
            height,
            pixels,
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Vec3) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.width as usize
    }

    pub fn pixels(&self) -> &[Vec3] {
        &self.pixels
    }

    pub fn to_rgb8(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let color = self.get(x, y);
            Rgb([to_byte(color.x), to_byte(color.y), to_byte(color.z)])
        })
    }

    /// Writes the frame to `path`. `.ppm`, `.pnm` or a missing extension produce a binary
    /// P6 pixmap, any other extension is handed to the matching `image` encoder.
    pub fn save(&self, path: &Path) -> Result<()> {
        let rgb = self.to_rgb8();

        match path.extension().and_then(|extension| extension.to_str()) {
            None => self.write_ppm(path, &rgb),
            Some(extension)
                if extension.eq_ignore_ascii_case("ppm")
                    || extension.eq_ignore_ascii_case("pnm") =>
            {
                self.write_ppm(path, &rgb)
            }
            Some(_) => {
                let format = ImageFormat::from_path(path)?;
                rgb.save_with_format(path, format)?;
                Ok(())
            }
        }
    }

    fn write_ppm(&self, path: &Path, rgb: &RgbImage) -> Result<()> {
        let file = File::create(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        PnmEncoder::new(BufWriter::new(file))
            .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
            .write_image(rgb.as_raw(), self.width, self.height, ExtendedColorType::Rgb8)?;

        Ok(())
    }
}

/// Number of pixels in a `width` x `height` frame, computed without `u32` overflow.
pub fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Linear channel value to display byte; out of range values clamp instead of wrapping.
pub fn to_byte(channel: f64) -> u8 {
    (channel * 255.0).clamp(0.0, 255.0).round() as u8
}
