use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("could not allocate {bytes} bytes")]
    Allocation { bytes: usize },

    #[error("region {width}x{height} at ({x},{y}) exceeds the 320x200 screen")]
    RegionOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("shape spanning ({left},{top})-({right},{bottom}) exceeds the 320x200 screen")]
    ShapeOutOfBounds {
        left: isize,
        top: isize,
        right: isize,
        bottom: isize,
    },

    #[error("pixel buffer holds {actual} bytes but {width}x{height} needs {expected}")]
    SizeMismatch {
        width: u16,
        height: u16,
        expected: usize,
        actual: usize,
    },
}

impl RasterError {
    /// True for caller mistakes that fail the same way on every retry.
    #[must_use]
    pub fn is_parameter_error(&self) -> bool {
        !matches!(self, Self::Allocation { .. })
    }
}
