use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Direction the bands run in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    /// Source is turned 90° before sampling and the canvas turned back afterwards
    Vertical,
}

/// Which end of the brightness scale gets the dense strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Black ink on white paper, dark regions drawn densest
    #[default]
    Normal,
    /// White ink on black paper, bright regions drawn densest
    Inverted,
}

impl Polarity {
    /// Stroke intensity for a luminosity sample, 255 being the densest
    pub fn intensity(self, value: u8) -> u8 {
        match self {
            Polarity::Normal => 255 - value,
            Polarity::Inverted => value,
        }
    }

    /// [`Polarity::intensity`] normalized to [0, 1]
    pub fn ratio(self, value: u8) -> f64 {
        self.intensity(value) as f64 / 255.0
    }

    /// (ink, paper) gray levels
    pub fn colors(self) -> (u8, u8) {
        match self {
            Polarity::Normal => (0, 255),
            Polarity::Inverted => (255, 0),
        }
    }
}

/// Stroke angle bounds in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    pub min: f64,
    pub max: f64,
}

impl AngleRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Distance kept between the strokes and the band edges
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    /// Pulled up from the band's bottom edge
    pub bottom: f64,
    /// Pushed down from the band's top edge
    pub top: f64,
}

/// Configuration for zig-zag line rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas height in pixels (width when vertical)
    pub output_height: u32,
    /// Number of bands
    pub density: u32,
    pub thickness: u32,

    pub orientation: Orientation,
    pub polarity: Polarity,

    pub angle_range: AngleRange,
    pub margins: Margins,
    pub antialiased: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::preset_b()
    }
}

impl RenderConfig {
    /// Tall output with heavy aliased strokes and a slightly wider angle range
    pub fn preset_a() -> Self {
        Self {
            output_height: 3200,
            density: 200,
            thickness: 4,
            orientation: Orientation::Horizontal,
            polarity: Polarity::Normal,
            angle_range: AngleRange::new(32.0, 85.0),
            margins: Margins { bottom: 1.0, top: 0.0 },
            antialiased: false,
        }
    }

    /// Medium output with thin anti-aliased strokes
    pub fn preset_b() -> Self {
        Self {
            output_height: 2000,
            density: 160,
            thickness: 2,
            orientation: Orientation::Horizontal,
            polarity: Polarity::Normal,
            angle_range: AngleRange::new(32.0, 82.0),
            margins: Margins { bottom: 0.0, top: 1.0 },
            antialiased: true,
        }
    }

    /// Height of one band, also the horizontal span of a flat period
    pub fn band_height(&self) -> f64 {
        self.output_height as f64 / self.density as f64
    }

    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.density == 0 {
            return Err(ConfigError::ZeroDensity);
        }
        if self.output_height == 0 {
            return Err(ConfigError::ZeroOutputHeight);
        }
        if self.thickness == 0 {
            return Err(ConfigError::ZeroThickness);
        }

        let AngleRange { min, max } = self.angle_range;
        if !(min > 0.0 && min < max && max < 90.0) {
            return Err(ConfigError::InvalidAngleRange { min, max });
        }

        for margin in [self.margins.bottom, self.margins.top] {
            if !(margin.is_finite() && margin >= 0.0) {
                return Err(ConfigError::InvalidMargin(margin));
            }
        }
        Ok(())
    }
}

/// Configuration for dot halftone rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotConfig {
    /// Dots along the shorter image side
    pub density: u32,
    /// Darkness is divided by twice this value to get a radius
    pub radius_scale: f64,
    pub polarity: Polarity,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            density: 100,
            radius_scale: 32.0,
            polarity: Polarity::Normal,
        }
    }
}

impl DotConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.density == 0 {
            return Err(ConfigError::ZeroDensity);
        }
        if !(self.radius_scale.is_finite() && self.radius_scale > 0.0) {
            return Err(ConfigError::InvalidRadiusScale(self.radius_scale));
        }
        Ok(())
    }
}
