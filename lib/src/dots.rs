use crate::canvas::{BoundingBox, StrokeCanvas};
use crate::config::DotConfig;
use crate::error::Result;
use crate::field::LuminosityField;
use image::{GrayImage, Luma};
use log::debug;
use rayon::prelude::*;

/// One halftone mark in output coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    pub center: (i32, i32),
    /// Zero means a single point
    pub radius: i32,
}

/// Grid of dots for a source at its original size
#[derive(Debug, Clone, PartialEq)]
pub struct DotPlan {
    pub width: u32,
    pub height: u32,
    /// Row-major over the resampled grid
    pub dots: Vec<Dot>,
}

/// Lay out one dot per cell of a grid with `config.density` cells along the
/// shorter side of the source
pub fn plan_dots(source: &LuminosityField, config: &DotConfig) -> DotPlan {
    let (width, height) = source.dimensions();
    let short_side = width.min(height) as f64;
    let scale = config.density as f64 / short_side;
    let grid = source.resized(
        (width as f64 * scale) as u32,
        (height as f64 * scale) as u32,
    );
    let (grid_width, grid_height) = grid.dimensions();
    let offset = (short_side / config.density as f64 / 2.0).floor();

    let dots = (0..grid_height)
        .into_par_iter()
        .flat_map_iter(|j| {
            let grid = &grid;
            (0..grid_width).map(move |i| {
                let darkness = config.polarity.intensity(grid.get(i, j)) as f64;
                let radius = (darkness / config.radius_scale / 2.0) as i32;
                let center = (
                    (i as f64 / scale + offset).round() as i32,
                    (j as f64 / scale + offset).round() as i32,
                );
                Dot { center, radius }
            })
        })
        .collect();

    DotPlan {
        width,
        height,
        dots,
    }
}

/// Converts a luminosity field to a dot halftone of the same size
///
/// Darker cells get larger outline circles; cells whose radius rounds to zero
/// become single points.
///
/// # Errors
/// Returns [`crate::RenderError::Config`] if the configuration is invalid.
pub fn render_dots(source: &LuminosityField, config: &DotConfig) -> Result<GrayImage> {
    config.validate()?;

    let plan = plan_dots(source, config);
    debug!(
        "dot plan: {}x{} canvas, {} dots",
        plan.width,
        plan.height,
        plan.dots.len()
    );

    let (ink, paper) = config.polarity.colors();
    let mut canvas = GrayImage::from_pixel(plan.width, plan.height, Luma([paper]));
    for dot in &plan.dots {
        if dot.radius == 0 {
            canvas.plot(dot.center, Luma([ink]));
        } else {
            canvas.draw_ellipse_outline(BoundingBox::around(dot.center, dot.radius), Luma([ink]));
        }
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Polarity;
    use crate::error::{ConfigError, RenderError};

    fn uniform(width: u32, height: u32, value: u8) -> LuminosityField {
        LuminosityField::from_luma(GrayImage::from_pixel(width, height, Luma([value]))).unwrap()
    }

    #[test]
    fn test_canvas_keeps_source_size() {
        let config = DotConfig {
            density: 10,
            ..Default::default()
        };
        let canvas = render_dots(&uniform(80, 40, 100), &config).unwrap();
        assert_eq!(canvas.dimensions(), (80, 40));
    }

    #[test]
    fn test_grid_follows_density_on_short_side() {
        let config = DotConfig {
            density: 10,
            ..Default::default()
        };
        let plan = plan_dots(&uniform(80, 40, 100), &config);
        assert_eq!(plan.dots.len(), 20 * 10);
        assert_eq!(plan.dots[0].center, (2, 2));
        assert_eq!(plan.dots[1].center, (6, 2));
        assert_eq!(plan.dots[20].center, (2, 6));
    }

    #[test]
    fn test_tall_grid_is_row_major() {
        let config = DotConfig {
            density: 4,
            ..Default::default()
        };
        let plan = plan_dots(&uniform(40, 80, 100), &config);
        assert_eq!(plan.dots.len(), 4 * 8);
        for (k, dot) in plan.dots.iter().enumerate() {
            let (i, j) = ((k % 4) as i32, (k / 4) as i32);
            assert_eq!(dot.center, (i * 10 + 5, j * 10 + 5));
        }
    }

    #[test]
    fn test_radius_follows_darkness() {
        let config = DotConfig {
            density: 4,
            radius_scale: 32.0,
            ..Default::default()
        };
        assert!(plan_dots(&uniform(40, 40, 255), &config).dots.iter().all(|d| d.radius == 0));
        assert!(plan_dots(&uniform(40, 40, 0), &config).dots.iter().all(|d| d.radius == 3));
        assert!(plan_dots(&uniform(40, 40, 127), &config).dots.iter().all(|d| d.radius == 2));
    }

    #[test]
    fn test_inverted_polarity_grows_bright_dots() {
        let config = DotConfig {
            density: 4,
            polarity: Polarity::Inverted,
            ..Default::default()
        };
        assert!(plan_dots(&uniform(40, 40, 255), &config).dots.iter().all(|d| d.radius == 3));
    }

    #[test]
    fn test_white_source_renders_points() {
        let config = DotConfig {
            density: 5,
            ..Default::default()
        };
        let canvas = render_dots(&uniform(50, 50, 255), &config).unwrap();
        assert_eq!(canvas.pixels().filter(|p| p[0] == 0).count(), 25);
    }

    #[test]
    fn test_black_source_renders_hollow_circles() {
        let config = DotConfig {
            density: 2,
            radius_scale: 16.0,
            ..Default::default()
        };
        let canvas = render_dots(&uniform(40, 40, 0), &config).unwrap();
        let dot = plan_dots(&uniform(40, 40, 0), &config).dots[0];
        assert_eq!(dot.radius, 7);
        assert_eq!(dot.center, (10, 10));
        assert_eq!(canvas.get_pixel(17, 10)[0], 0);
        assert_eq!(canvas.get_pixel(10, 10)[0], 255);
    }

    #[test]
    fn test_invalid_dot_config() {
        let config = DotConfig {
            density: 0,
            ..Default::default()
        };
        let err = render_dots(&uniform(4, 4, 0), &config).unwrap_err();
        assert!(matches!(err, RenderError::Config(ConfigError::ZeroDensity)));
    }

    #[test]
    fn test_render_is_deterministic() {
        let img = GrayImage::from_fn(30, 20, |x, y| Luma([((x * 9 + y * 5) % 256) as u8]));
        let source = LuminosityField::from_luma(img).unwrap();
        let config = DotConfig {
            density: 8,
            ..Default::default()
        };
        assert_eq!(
            render_dots(&source, &config).unwrap(),
            render_dots(&source, &config).unwrap()
        );
    }
}
