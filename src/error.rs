use thiserror::Error;

/// Error type for filtering operations
///
/// All variants are reported synchronously by the operation that detected
/// them. Nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// Neighborhood size is zero or even
    ///
    /// Kernels are centred on the pixel being filtered, so the side length
    /// must be odd. The size is never rounded to a nearby valid value.
    #[error("Kernel size must be a positive odd integer, got {size}")]
    InvalidKernelSize { size: u32 },

    /// Raw data length does not match the stated dimensions
    ///
    /// Returned when building a kernel or a buffer from a flat vector whose
    /// length disagrees with `size * size` or `width * height`.
    #[error("Dimension mismatch: expected {expected} samples, got {actual}")]
    DimensionMismatch {
        /// Number of samples implied by the dimensions
        expected: usize,
        /// Number of samples supplied
        actual: usize,
    },

    /// A filter was applied before any source image was loaded
    #[error("No source image loaded")]
    UninitializedSource,

    /// Source image has zero width or height
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// A spread parameter is zero, negative or not finite
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidSigma { name: &'static str, value: f64 },
}
