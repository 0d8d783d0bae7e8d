use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use lineart_rendr::{DotConfig, RenderConfig};

/// Which renderer the batch runs
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Lines,
    Dots,
}

/// Everything the batch needs to render one image
///
/// Serializable to TOML; missing tables and fields take their defaults.
///
/// ```toml
/// mode = "lines"
///
/// [lines]
/// output_height = 2500
/// density = 160
/// angle_range = { min = 32.0, max = 82.0 }
///
/// [dots]
/// density = 100
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: Mode,
    pub lines: RenderConfig,
    pub dots: DotConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Lines,
            lines: RenderConfig {
                output_height: 2500,
                density: 160,
                thickness: 2,
                ..RenderConfig::preset_b()
            },
            dots: DotConfig::default(),
        }
    }
}

impl Settings {
    /// Read settings from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid settings TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read settings {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid settings in {}", path.display()))
    }

    /// Check the configuration of the selected renderer.
    ///
    /// # Errors
    /// Returns the renderer's configuration error.
    pub fn validate(&self) -> Result<()> {
        match self.mode {
            Mode::Lines => self.lines.validate().context("invalid line settings")?,
            Mode::Dots => self.dots.validate().context("invalid dot settings")?,
        }
        Ok(())
    }
}
