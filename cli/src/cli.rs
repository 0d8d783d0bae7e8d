use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::settings::{Mode, Settings};
use lineart_rendr::{Orientation, Polarity, RenderConfig};

/// Line-art renderer: turns a folder of images into zig-zag line drawings.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Folder scanned for .jpg, .jpeg, .png and .bmp files.
    #[arg(short, long, default_value = "input")]
    pub input: PathBuf,

    /// Folder receiving one .png per input image. Created if missing.
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// TOML settings file. Flags given on the command line take precedence.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base line preset, ignored when --config is given.
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Renderer to use.
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Output height in pixels (width when --vertical).
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of bands.
    #[arg(long)]
    pub density: Option<u32>,

    /// Stroke thickness in pixels.
    #[arg(long)]
    pub thickness: Option<u32>,

    /// Run the bands vertically.
    #[arg(long, default_value_t = false)]
    pub vertical: bool,

    /// White strokes on black, bright regions drawn densest.
    #[arg(long, default_value_t = false)]
    pub invert: bool,

    /// Dots along the shorter image side (dots mode).
    #[arg(long)]
    pub dot_density: Option<u32>,

    /// Darkness divisor for dot radii (dots mode).
    #[arg(long)]
    pub radius_scale: Option<f64>,

    /// Render images concurrently.
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// 3200px, 200 bands, 4px aliased strokes, 32°..85°
    A,
    /// 2000px, 160 bands, 2px anti-aliased strokes, 32°..82°
    B,
}

impl Preset {
    pub fn config(self) -> RenderConfig {
        match self {
            Preset::A => RenderConfig::preset_a(),
            Preset::B => RenderConfig::preset_b(),
        }
    }
}

impl Cli {
    /// Fold the command-line overrides into `settings`.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(mode) = self.mode {
            settings.mode = mode;
        }

        let lines = &mut settings.lines;
        if let Some(height) = self.height {
            lines.output_height = height;
        }
        if let Some(density) = self.density {
            lines.density = density;
        }
        if let Some(thickness) = self.thickness {
            lines.thickness = thickness;
        }
        if self.vertical {
            lines.orientation = Orientation::Vertical;
        }
        if self.invert {
            lines.polarity = Polarity::Inverted;
            settings.dots.polarity = Polarity::Inverted;
        }

        if let Some(density) = self.dot_density {
            settings.dots.density = density;
        }
        if let Some(scale) = self.radius_scale {
            settings.dots.radius_scale = scale;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["lineart"]);
        assert_eq!(cli.input, PathBuf::from("input"));
        assert_eq!(cli.output, PathBuf::from("output"));
        assert!(cli.config.is_none());
        assert!(!cli.parallel);
    }

    #[test]
    fn test_overrides_applied() {
        let cli = Cli::parse_from([
            "lineart",
            "--mode",
            "dots",
            "--height",
            "900",
            "--density",
            "90",
            "--vertical",
            "--invert",
            "--dot-density",
            "40",
        ]);
        let settings = cli.apply(Settings::default());

        assert_eq!(settings.mode, Mode::Dots);
        assert_eq!(settings.lines.output_height, 900);
        assert_eq!(settings.lines.density, 90);
        assert_eq!(settings.lines.orientation, Orientation::Vertical);
        assert_eq!(settings.lines.polarity, Polarity::Inverted);
        assert_eq!(settings.dots.polarity, Polarity::Inverted);
        assert_eq!(settings.dots.density, 40);
    }

    #[test]
    fn test_preset_flag() {
        let cli = Cli::parse_from(["lineart", "--preset", "a"]);
        assert_eq!(cli.preset, Some(Preset::A));
        assert_eq!(Preset::A.config(), RenderConfig::preset_a());
    }
}
