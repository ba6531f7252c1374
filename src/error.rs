use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("invalid heater mask: {reason}")]
    InvalidMask { reason: String },

    #[error(
        "heater placement at ({row}, {col}) with side {side} does not fit a {width}x{height} grid"
    )]
    PlacementOutOfBounds {
        row: usize,
        col: usize,
        side: usize,
        width: usize,
        height: usize,
    },

    #[error("frame index {index} out of range for {len} frames")]
    FrameOutOfRange { index: usize, len: usize },
}

impl Error {
    /// `true` for errors raised while setting up a simulation, before any step runs.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::FrameOutOfRange { .. })
    }
}

pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonPositive { name, value })
    }
}
