use thiserror::Error;

/// Rejected render parameters or source dimensions
///
/// Every variant is raised before the first stroke is drawn.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("density must be positive")]
    ZeroDensity,

    #[error("output height must be positive")]
    ZeroOutputHeight,

    #[error("stroke thickness must be positive")]
    ZeroThickness,

    /// Angles must satisfy `0 < min < max < 90` so the cotangent stays finite and positive.
    #[error("angle range ({min}°, {max}°) must satisfy 0 < min < max < 90")]
    InvalidAngleRange { min: f64, max: f64 },

    #[error("margin must be a non-negative number, got {0}")]
    InvalidMargin(f64),

    #[error("radius scale must be a positive number, got {0}")]
    InvalidRadiusScale(f64),

    #[error("source image is empty ({width}x{height})")]
    EmptySource { width: u32, height: u32 },
}

/// Errors returned by the renderers and by [`crate::LuminosityField::open`]
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
