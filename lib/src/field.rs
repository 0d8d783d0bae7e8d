use crate::error::{ConfigError, Result};
use image::{DynamicImage, GrayImage, Luma, RgbImage, imageops};
use std::path::Path;

/// Grayscale intensity grid sampled by the renderers
///
/// Always at least 1x1; the constructors reject empty images.
#[derive(Debug, Clone, PartialEq)]
pub struct LuminosityField {
    image: GrayImage,
}

impl LuminosityField {
    /// Wrap an existing grayscale image
    pub fn from_luma(image: GrayImage) -> std::result::Result<Self, ConfigError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptySource { width, height });
        }
        Ok(Self { image })
    }

    /// Convert a decoded image of any color type
    pub fn from_image(image: &DynamicImage) -> std::result::Result<Self, ConfigError> {
        Self::from_luma(calculate_luma(&image.to_rgb8()))
    }

    /// Decode an image file and convert it to luminosity
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = image::open(path)?;
        Ok(Self::from_image(&image)?)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.image.get_pixel(x, y)[0]
    }

    /// Sample at fractional coordinates
    ///
    /// Coordinates are floored and clamped into the grid, so sampling just past
    /// an edge reads the edge pixel.
    pub fn sample(&self, x: f64, y: f64) -> u8 {
        let (width, height) = self.dimensions();
        let px = (x.floor().max(0.0) as u32).min(width - 1);
        let py = (y.floor().max(0.0) as u32).min(height - 1);
        self.get(px, py)
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_gray(self) -> GrayImage {
        self.image
    }

    /// Resample to exact dimensions (each clamped to at least 1)
    pub fn resized(&self, width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        if self.dimensions() == (width, height) {
            return self.clone();
        }
        Self {
            image: imageops::resize(&self.image, width, height, imageops::FilterType::CatmullRom),
        }
    }

    /// Resample so the height matches `height`, keeping the aspect ratio
    ///
    /// Width is `floor(height / old_height * old_width)`.
    pub fn resized_to_height(&self, height: u32) -> Self {
        let (old_width, old_height) = self.dimensions();
        let width = (height as f64 / old_height as f64 * old_width as f64) as u32;
        self.resized(width, height)
    }

    /// Rotate 90° counter-clockwise
    pub fn rotated_ccw(&self) -> Self {
        Self {
            image: imageops::rotate270(&self.image),
        }
    }

    /// Photographic negative (255 - v)
    pub fn inverted(&self) -> Self {
        let mut image = self.image.clone();
        imageops::invert(&mut image);
        Self { image }
    }
}

/// Perceptual luma from RGB using the ITU-R 601 weights
///
/// Formula: L = 0.299*R + 0.587*G + 0.114*B, rounded to the nearest level
pub fn calculate_luma(img: &RgbImage) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = GrayImage::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let r = pixel[0] as f32;
        let g = pixel[1] as f32;
        let b = pixel[2] as f32;

        let luma = 0.299 * r + 0.587 * g + 0.114 * b;
        output.put_pixel(x, y, Luma([luma.round().clamp(0.0, 255.0) as u8]));
    }

    output
}
