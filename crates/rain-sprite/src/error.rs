//! Error types for raindrop sprite synthesis

use thiserror::Error;

/// Result type alias for sprite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sprite operations
#[derive(Debug, Error)]
pub enum Error {
    /// Drop radius must be at least one pixel
    #[error("Invalid drop radius: {0}")]
    InvalidRadius(u32),

    /// Externally supplied label and alpha maps disagree in size
    #[error("Label map dimensions {label:?} do not match alpha map dimensions {alpha:?}")]
    MapDimensionMismatch {
        /// Dimensions of the supplied label map
        label: (u32, u32),
        /// Dimensions of the supplied alpha map
        alpha: (u32, u32),
    },

    /// Externally supplied maps are too small to derive a positive radius
    #[error("Supplied maps of {0}x{1} are too small to derive a drop radius")]
    DegenerateMaps(u32, u32),

    /// Background sample does not match the drop's raster dimensions
    #[error("Background is {actual:?} but the drop expects {expected:?}")]
    BackgroundDimensionMismatch {
        /// Dimensions the drop's maps require
        expected: (u32, u32),
        /// Dimensions of the supplied background sample
        actual: (u32, u32),
    },
}
