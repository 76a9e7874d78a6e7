use std::fmt;

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use super::Rgb;
use crate::error::DecodeError;

/// The color representation declared by a loaded or captured raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorMode {
    Truecolor,
    TruecolorAlpha,
    Grayscale,
    Indexed,
    Other(String),
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Truecolor => f.write_str("RGB"),
            ColorMode::TruecolorAlpha => f.write_str("RGBA"),
            ColorMode::Grayscale => f.write_str("L"),
            ColorMode::Indexed => f.write_str("P"),
            ColorMode::Other(name) => f.write_str(name),
        }
    }
}

/// Palette raster: one index byte per pixel, resolved through `palette`.
#[derive(Debug, Clone)]
pub struct IndexedPixels {
    width: u32,
    height: u32,
    indices: Vec<u8>,
    palette: Vec<Rgb>,
}

impl IndexedPixels {
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        self.indices[(y as usize) * (self.width as usize) + x as usize]
    }

    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    pub fn resolve(&self, index: u8) -> Result<Rgb, DecodeError> {
        self.palette
            .get(usize::from(index))
            .copied()
            .ok_or(DecodeError::PaletteIndex {
                index,
                palette_len: self.palette.len(),
            })
    }
}

#[derive(Debug, Clone)]
pub enum PixelStore {
    Truecolor(RgbImage),
    TruecolorAlpha(RgbaImage),
    Grayscale(GrayImage),
    Indexed(IndexedPixels),
    /// Any layout without a dedicated decode path (16-bit, float, gray+alpha).
    Other(DynamicImage),
}

/// A full-resolution raster owned by the session. Never mutated; a new
/// load or capture replaces it wholesale.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: PixelStore,
}

impl SourceImage {
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let pixels = match image {
            DynamicImage::ImageRgb8(buffer) => PixelStore::Truecolor(buffer),
            DynamicImage::ImageRgba8(buffer) => PixelStore::TruecolorAlpha(buffer),
            DynamicImage::ImageLuma8(buffer) => PixelStore::Grayscale(buffer),
            other => PixelStore::Other(other),
        };
        Self { pixels }
    }

    pub fn truecolor(buffer: RgbImage) -> Self {
        Self {
            pixels: PixelStore::Truecolor(buffer),
        }
    }

    pub fn indexed(
        width: u32,
        height: u32,
        indices: Vec<u8>,
        palette: Vec<Rgb>,
    ) -> Result<Self, DecodeError> {
        let expected = (width as usize) * (height as usize);
        if indices.len() != expected {
            return Err(DecodeError::Corrupt(format!(
                "indexed raster {width}x{height} needs {expected} indices, got {}",
                indices.len()
            )));
        }
        Ok(Self {
            pixels: PixelStore::Indexed(IndexedPixels {
                width,
                height,
                indices,
                palette,
            }),
        })
    }

    pub fn pixels(&self) -> &PixelStore {
        &self.pixels
    }

    pub fn mode(&self) -> ColorMode {
        match &self.pixels {
            PixelStore::Truecolor(_) => ColorMode::Truecolor,
            PixelStore::TruecolorAlpha(_) => ColorMode::TruecolorAlpha,
            PixelStore::Grayscale(_) => ColorMode::Grayscale,
            PixelStore::Indexed(_) => ColorMode::Indexed,
            PixelStore::Other(image) => ColorMode::Other(format!("{:?}", image.color())),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match &self.pixels {
            PixelStore::Truecolor(buffer) => buffer.dimensions(),
            PixelStore::TruecolorAlpha(buffer) => buffer.dimensions(),
            PixelStore::Grayscale(buffer) => buffer.dimensions(),
            PixelStore::Indexed(indexed) => (indexed.width, indexed.height),
            PixelStore::Other(image) => (image.width(), image.height()),
        }
    }

    /// Expands the raster to RGBA for the renderer. Alpha is kept as-is;
    /// palette entries become opaque.
    pub fn to_rgba8(&self) -> Result<RgbaImage, DecodeError> {
        match &self.pixels {
            PixelStore::Truecolor(buffer) => {
                Ok(DynamicImage::ImageRgb8(buffer.clone()).into_rgba8())
            }
            PixelStore::TruecolorAlpha(buffer) => Ok(buffer.clone()),
            PixelStore::Grayscale(buffer) => {
                Ok(DynamicImage::ImageLuma8(buffer.clone()).into_rgba8())
            }
            PixelStore::Indexed(indexed) => {
                let mut out = RgbaImage::new(indexed.width, indexed.height);
                for (x, y, pixel) in out.enumerate_pixels_mut() {
                    let rgb = indexed.resolve(indexed.index_at(x, y))?;
                    *pixel = image::Rgba([rgb.r, rgb.g, rgb.b, 255]);
                }
                Ok(out)
            }
            PixelStore::Other(image) => Ok(image.to_rgba8()),
        }
    }
}
