//! Drawing primitives shared by the renderers
//!
//! Every 8-bit [`ImageBuffer`] (gray, RGB, RGBA) can be drawn on, the renderers
//! only ever see the [`StrokeCanvas`] capability.

use crate::geometry::Point;
use image::{ImageBuffer, Pixel};
use imageproc::drawing::{
    draw_antialiased_line_segment_mut, draw_hollow_ellipse_mut, draw_line_segment_mut,
};

/// Integer box an ellipse is inscribed in (inclusive corners)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    /// Square box of a circle
    pub fn around(center: (i32, i32), radius: i32) -> Self {
        Self {
            left: center.0 - radius,
            top: center.1 - radius,
            right: center.0 + radius,
            bottom: center.1 + radius,
        }
    }

    pub fn center(&self) -> (i32, i32) {
        ((self.left + self.right) / 2, (self.top + self.bottom) / 2)
    }

    /// (horizontal, vertical) radii
    pub fn radii(&self) -> (i32, i32) {
        ((self.right - self.left) / 2, (self.bottom - self.top) / 2)
    }
}

/// Surface the line and dot renderers draw onto
pub trait StrokeCanvas {
    type Ink: Copy;

    /// Connected segments through `points`
    ///
    /// `thickness` parallel one-pixel strokes are laid side by side along each
    /// segment's normal.
    fn draw_polyline(&mut self, points: &[Point], ink: Self::Ink, thickness: u32, antialiased: bool);

    /// Outline of the ellipse inscribed in `bounds`
    fn draw_ellipse_outline(&mut self, bounds: BoundingBox, ink: Self::Ink);

    /// Single pixel; out-of-bounds coordinates are ignored
    fn plot(&mut self, at: (i32, i32), ink: Self::Ink);
}

impl<P> StrokeCanvas for ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    type Ink = P;

    fn draw_polyline(&mut self, points: &[Point], ink: P, thickness: u32, antialiased: bool) {
        for segment in points.windows(2) {
            draw_thick_segment(self, segment[0], segment[1], ink, thickness, antialiased);
        }
    }

    fn draw_ellipse_outline(&mut self, bounds: BoundingBox, ink: P) {
        let (width_radius, height_radius) = bounds.radii();
        if width_radius == 0 && height_radius == 0 {
            self.plot(bounds.center(), ink);
            return;
        }
        draw_hollow_ellipse_mut(self, bounds.center(), width_radius, height_radius, ink);
    }

    fn plot(&mut self, at: (i32, i32), ink: P) {
        let (x, y) = at;
        if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
            self.put_pixel(x as u32, y as u32, ink);
        }
    }
}

fn draw_thick_segment<P>(
    canvas: &mut ImageBuffer<P, Vec<u8>>,
    from: Point,
    to: Point,
    ink: P,
    thickness: u32,
    antialiased: bool,
) where
    P: Pixel<Subpixel = u8>,
{
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let length = dx.hypot(dy);
    let (nx, ny) = if length > 0.0 {
        (-dy / length, dx / length)
    } else {
        (0.0, 1.0)
    };

    let center = (thickness as f64 - 1.0) / 2.0;
    for strand in 0..thickness {
        let shift = strand as f64 - center;
        let (sx, sy) = (nx * shift, ny * shift);
        let start = (from.x + sx, from.y + sy);
        let end = (to.x + sx, to.y + sy);

        if antialiased {
            draw_antialiased_line_segment_mut(
                canvas,
                (start.0.round() as i32, start.1.round() as i32),
                (end.0.round() as i32, end.1.round() as i32),
                ink,
                blend,
            );
        } else {
            draw_line_segment_mut(
                canvas,
                (start.0 as f32, start.1 as f32),
                (end.0 as f32, end.1 as f32),
                ink,
            );
        }
    }
}

/// Coverage-weighted mix of ink over the existing pixel, rounded per channel
///
/// `imageproc::pixelops::interpolate` truncates, which breaks the
/// `ink(w) + paper(1 - w) == 255` complement between polarities.
fn blend<P>(ink: P, under: P, weight: f32) -> P
where
    P: Pixel<Subpixel = u8>,
{
    let weight = weight.clamp(0.0, 1.0);
    ink.map2(&under, |a, b| {
        (a as f32 * weight + b as f32 * (1.0 - weight))
            .round()
            .clamp(0.0, 255.0) as u8
    })
}
