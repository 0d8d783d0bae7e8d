use crate::canvas::StrokeCanvas;
use crate::config::{Orientation, RenderConfig};
use crate::error::Result;
use crate::field::LuminosityField;
use crate::geometry::{LinePlan, plan_lines};
use image::{GrayImage, Luma, imageops};
use log::{debug, trace};

/// Converts a luminosity field to zig-zag line art
///
/// Pipeline:
/// 1. Turn the source 90° counter-clockwise when the orientation is vertical
/// 2. Resize so the height matches `config.output_height`
/// 3. Plan every band's periods (see [`plan_lines`])
/// 4. Stroke each period onto a canvas filled with the paper color
/// 5. Turn the canvas back when vertical
///
/// # Errors
/// Returns [`crate::RenderError::Config`] before drawing anything if the
/// configuration is invalid.
pub fn render_lines(source: &LuminosityField, config: &RenderConfig) -> Result<GrayImage> {
    config.validate()?;

    let oriented = match config.orientation {
        Orientation::Horizontal => None,
        Orientation::Vertical => Some(source.rotated_ccw()),
    };
    let field = oriented
        .as_ref()
        .unwrap_or(source)
        .resized_to_height(config.output_height);

    let plan = plan_lines(&field, config);
    debug!(
        "line plan: {}x{} canvas, {} bands of {:.2}px, {} periods",
        plan.width,
        plan.height,
        plan.bands.len(),
        plan.band_height,
        plan.bands.iter().map(|band| band.periods.len()).sum::<usize>()
    );

    let canvas = rasterize(&plan, config);

    Ok(match config.orientation {
        Orientation::Horizontal => canvas,
        Orientation::Vertical => imageops::rotate90(&canvas),
    })
}

/// Draw a planned set of bands onto a fresh canvas
pub fn rasterize(plan: &LinePlan, config: &RenderConfig) -> GrayImage {
    let (ink, paper) = config.polarity.colors();
    let mut canvas = GrayImage::from_pixel(plan.width, plan.height, Luma([paper]));

    for band in &plan.bands {
        trace!("band {}: {} periods", band.index, band.periods.len());
        for period in &band.periods {
            canvas.draw_polyline(
                &period.vertices(),
                Luma([ink]),
                config.thickness,
                config.antialiased,
            );
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AngleRange, Margins, Polarity};
    use crate::error::{ConfigError, RenderError};

    fn gradient(width: u32, height: u32) -> LuminosityField {
        let img = GrayImage::from_fn(width, height, |x, y| {
            Luma([((x * 255 / width.max(1)) as u8).wrapping_add((y * 3) as u8)])
        });
        LuminosityField::from_luma(img).unwrap()
    }

    fn small_config() -> RenderConfig {
        RenderConfig {
            output_height: 60,
            density: 6,
            thickness: 2,
            ..RenderConfig::preset_b()
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let source = gradient(40, 30);
        let config = small_config();
        let first = render_lines(&source, &config).unwrap();
        let second = render_lines(&source, &config).unwrap();
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn test_horizontal_output_height() {
        let source = gradient(30, 60);
        let config = RenderConfig {
            output_height: 120,
            density: 12,
            ..small_config()
        };
        let canvas = render_lines(&source, &config).unwrap();
        assert_eq!(canvas.dimensions(), (60, 120));
    }

    #[test]
    fn test_vertical_output_width() {
        let source = gradient(30, 60);
        let config = RenderConfig {
            output_height: 120,
            density: 12,
            orientation: Orientation::Vertical,
            ..small_config()
        };
        let canvas = render_lines(&source, &config).unwrap();
        assert_eq!(canvas.dimensions(), (120, 240));
    }

    #[test]
    fn test_vertical_matches_rotated_horizontal() {
        let source = gradient(33, 21);
        let vertical = RenderConfig {
            orientation: Orientation::Vertical,
            ..small_config()
        };
        let horizontal = small_config();

        let direct = render_lines(&source, &vertical).unwrap();
        let via_rotation =
            imageops::rotate90(&render_lines(&source.rotated_ccw(), &horizontal).unwrap());
        assert_eq!(direct, via_rotation);
    }

    #[test]
    fn test_invalid_config_fails_before_drawing() {
        let source = gradient(10, 10);
        let config = RenderConfig {
            angle_range: AngleRange::new(60.0, 30.0),
            ..small_config()
        };
        let err = render_lines(&source, &config).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Config(ConfigError::InvalidAngleRange { .. })
        ));
    }

    #[test]
    fn test_aliased_polarity_symmetry_is_exact() {
        let source = gradient(50, 60);
        let normal = RenderConfig {
            antialiased: false,
            ..small_config()
        };
        let inverted = RenderConfig {
            polarity: Polarity::Inverted,
            ..normal.clone()
        };

        let a = render_lines(&source, &normal).unwrap();
        let b = render_lines(&source.inverted(), &inverted).unwrap();
        assert_eq!(a.dimensions(), b.dimensions());
        for (p, q) in a.pixels().zip(b.pixels()) {
            assert_eq!(p[0], 255 - q[0]);
        }
    }

    #[test]
    fn test_antialiased_polarity_symmetry_within_rounding() {
        let source = gradient(50, 60);
        let normal = small_config();
        let inverted = RenderConfig {
            polarity: Polarity::Inverted,
            ..normal.clone()
        };

        let a = render_lines(&source, &normal).unwrap();
        let b = render_lines(&source.inverted(), &inverted).unwrap();
        for (p, q) in a.pixels().zip(b.pixels()) {
            let sum = p[0] as i32 + q[0] as i32;
            assert!((sum - 255).abs() <= 2, "{} + {} drifted from 255", p[0], q[0]);
        }
    }

    #[test]
    fn test_white_source_draws_only_band_baselines() {
        let source = LuminosityField::from_luma(GrayImage::from_pixel(20, 40, Luma([255]))).unwrap();
        let config = RenderConfig {
            output_height: 40,
            density: 4,
            thickness: 1,
            antialiased: false,
            margins: Margins { bottom: 1.0, top: 0.0 },
            ..RenderConfig::preset_a()
        };
        let canvas = render_lines(&source, &config).unwrap();

        for y in 0..40 {
            let inked = (0..20).filter(|&x| canvas.get_pixel(x, y)[0] == 0).count();
            if [9, 19, 29, 39].contains(&y) {
                assert_eq!(inked, 20, "row {y} should be a full baseline");
            } else {
                assert_eq!(inked, 0, "row {y} should be empty");
            }
        }
    }

    #[test]
    fn test_dark_source_inks_more_than_light_source() {
        let dark = LuminosityField::from_luma(GrayImage::from_pixel(40, 60, Luma([20]))).unwrap();
        let light = LuminosityField::from_luma(GrayImage::from_pixel(40, 60, Luma([200]))).unwrap();
        let config = small_config();

        let ink = |img: &GrayImage| img.pixels().map(|p| 255 - p[0] as u32).sum::<u32>();
        let dark_ink = ink(&render_lines(&dark, &config).unwrap());
        let light_ink = ink(&render_lines(&light, &config).unwrap());
        assert!(dark_ink > light_ink);
    }

    #[test]
    fn test_two_by_two_mid_gray_renders() {
        let source = LuminosityField::from_luma(GrayImage::from_pixel(2, 2, Luma([128]))).unwrap();
        let config = RenderConfig {
            output_height: 2,
            density: 2,
            thickness: 1,
            angle_range: AngleRange::new(32.0, 85.0),
            margins: Margins::default(),
            polarity: Polarity::Normal,
            ..RenderConfig::preset_b()
        };
        let canvas = render_lines(&source, &config).unwrap();
        assert_eq!(canvas.dimensions(), (2, 2));
        assert!(canvas.pixels().any(|p| p[0] < 255));
    }

    #[test]
    fn test_two_by_two_with_margin_filling_the_band() {
        let source = LuminosityField::from_luma(GrayImage::from_pixel(2, 2, Luma([128]))).unwrap();
        let config = RenderConfig {
            output_height: 2,
            density: 2,
            thickness: 1,
            ..RenderConfig::preset_a()
        };
        assert_eq!(config.margins.bottom, config.band_height());

        let canvas = render_lines(&source, &config).unwrap();
        assert_eq!(canvas.dimensions(), (2, 2));
        assert!(canvas.pixels().any(|p| p[0] == 0));
    }

    #[test]
    fn test_more_bands_than_pixels() {
        let source = gradient(16, 10);
        let config = RenderConfig {
            output_height: 10,
            density: 20,
            ..small_config()
        };
        let first = render_lines(&source, &config).unwrap();
        assert_eq!(first.height(), 10);
        assert!(first.pixels().any(|p| p[0] < 255));
        assert_eq!(first, render_lines(&source, &config).unwrap());
    }
}
