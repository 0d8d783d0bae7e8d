use crate::config::{AngleRange, RenderConfig};
use crate::field::LuminosityField;
use rayon::prelude::*;

/// Vertical offset into a band where luminosity is sampled
pub const SAMPLE_OFFSET: f64 = 5.0;

/// Ratios below this draw a flat run instead of a zig-zag
pub const FLAT_THRESHOLD: f64 = 1.0 / 16.0;

/// Narrowest period the walk will emit, in pixels
pub const MIN_PERIOD_WIDTH: f64 = 1.0 / 256.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Shape of one period
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stroke {
    /// Near-background sample, a single segment along the band's bottom
    Flat,
    /// Down-up-down cycle rising at `angle` radians
    Zigzag { angle: f64 },
}

/// One zig-zag cycle or flat run within a band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period {
    pub stroke: Stroke,
    pub start_x: f64,
    /// Horizontal extent of the whole period
    pub width: f64,
    pub bottom_y: f64,
    pub top_y: f64,
}

impl Period {
    pub fn end_x(&self) -> f64 {
        self.start_x + self.width
    }

    /// Vertices of the stroke polyline, two for flat runs and three for zig-zags
    pub fn vertices(&self) -> Vec<Point> {
        match self.stroke {
            Stroke::Flat => vec![
                Point::new(self.start_x, self.bottom_y),
                Point::new(self.end_x(), self.bottom_y),
            ],
            Stroke::Zigzag { .. } => vec![
                Point::new(self.start_x, self.bottom_y),
                Point::new(self.start_x + self.width / 2.0, self.top_y),
                Point::new(self.end_x(), self.bottom_y),
            ],
        }
    }
}

/// Periods of one band, left to right
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub index: u32,
    pub periods: Vec<Period>,
}

impl Band {
    /// Continuous polyline through every period; consecutive periods share endpoints
    pub fn polyline(&self) -> Vec<Point> {
        let mut points: Vec<Point> = Vec::with_capacity(self.periods.len() * 2 + 1);
        for period in &self.periods {
            let vertices = period.vertices();
            let skip = usize::from(points.last() == vertices.first());
            points.extend(vertices.into_iter().skip(skip));
        }
        points
    }
}

/// Stroke geometry for a whole (already resized) field
#[derive(Debug, Clone, PartialEq)]
pub struct LinePlan {
    pub width: u32,
    pub height: u32,
    pub band_height: f64,
    pub bands: Vec<Band>,
}

/// Map a stroke ratio in [0, 1] linearly onto the angle range, in radians
pub fn angle_for_ratio(ratio: f64, range: AngleRange) -> f64 {
    (range.min + (range.max - range.min) * ratio).to_radians()
}

/// Horizontal extent of a zig-zag period: `2 * band_height * cot(angle)`,
/// never below [`MIN_PERIOD_WIDTH`]
pub fn period_width(band_height: f64, ratio: f64, range: AngleRange) -> f64 {
    (2.0 * band_height / angle_for_ratio(ratio, range).tan()).max(MIN_PERIOD_WIDTH)
}

/// Build the period starting at `start_x` for a given stroke ratio
pub fn period_at(start_x: f64, ratio: f64, band_index: u32, config: &RenderConfig) -> Period {
    let band_height = config.band_height();
    let band_top = band_height * band_index as f64;
    let bottom_y = band_top + band_height - config.margins.bottom;
    let top_y = band_top + config.margins.top;

    if ratio < FLAT_THRESHOLD {
        Period {
            stroke: Stroke::Flat,
            start_x,
            width: band_height,
            bottom_y,
            top_y,
        }
    } else {
        Period {
            stroke: Stroke::Zigzag {
                angle: angle_for_ratio(ratio, config.angle_range),
            },
            start_x,
            width: period_width(band_height, ratio, config.angle_range),
            bottom_y,
            top_y,
        }
    }
}

/// Walk one band left to right, one period per cursor step
///
/// The cursor is kept unrounded and advances by at least [`MIN_PERIOD_WIDTH`],
/// so a band never holds more than `width / MIN_PERIOD_WIDTH + 1` periods
/// however steep the angle range.
pub fn plan_band(field: &LuminosityField, band_index: u32, config: &RenderConfig) -> Band {
    let width = field.width() as f64;
    let sample_y = config.band_height() * band_index as f64 + SAMPLE_OFFSET;
    let polarity = config.polarity;

    let mut periods = Vec::new();
    let mut cursor = 0.0;
    while cursor < width {
        let ratio = polarity.ratio(field.sample(cursor, sample_y));
        let period = period_at(cursor, ratio, band_index, config);
        cursor = period.end_x();
        periods.push(period);
    }

    Band {
        index: band_index,
        periods,
    }
}

/// Plan every band of a field that already has the configured output height
///
/// Bands are independent and planned in parallel; the result is in band order.
pub fn plan_lines(field: &LuminosityField, config: &RenderConfig) -> LinePlan {
    let bands = (0..config.density)
        .into_par_iter()
        .map(|band_index| plan_band(field, band_index, config))
        .collect();

    LinePlan {
        width: field.width(),
        height: field.height(),
        band_height: config.band_height(),
        bands,
    }
}
