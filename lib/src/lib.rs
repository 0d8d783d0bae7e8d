//! Line-art Renderer - CPU-based image to zig-zag line art converter
//!
//! This library samples image luminosity along horizontal bands and draws
//! zig-zag polylines whose angle and spacing encode brightness. A secondary
//! dot renderer turns the same luminosity field into outline-circle halftones.
//!
//! # Example
//! ```no_run
//! use lineart_rendr::{LuminosityField, RenderConfig, render_lines};
//!
//! let source = LuminosityField::open("photo.jpg").unwrap();
//! let config = RenderConfig::default();
//! let output = render_lines(&source, &config).unwrap();
//! output.save("line_art.png").unwrap();
//! ```

pub mod canvas;
pub mod config;
pub mod dots;
pub mod error;
pub mod field;
pub mod geometry;
pub mod lines;

// Re-export main types for convenience
pub use canvas::{BoundingBox, StrokeCanvas};
pub use config::{AngleRange, DotConfig, Margins, Orientation, Polarity, RenderConfig};
pub use dots::render_dots;
pub use error::{ConfigError, RenderError};
pub use field::LuminosityField;
pub use lines::render_lines;
