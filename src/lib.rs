//! # imageops-filter
//!
//! Grayscale spatial filtering over fixed-size square neighborhoods.
//!
//! - **Linear convolution** with mean (box) or Gaussian kernels
//! - **Median filtering** (order statistic)
//! - **Bilateral filtering** (edge-preserving, per-pixel adaptive weights)
//!
//! Every filter zero-pads its input so each pixel has a full neighborhood.
//!
//! ## Example Usage
//!
//! ```no_run
//! use imageops_filter::{FilterEngine, Kernel};
//! use image::Luma;
//! use imageproc::definitions::Image;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let image: Image<Luma<u8>> = Image::from_pixel(64, 64, Luma([128]));
//!
//! let mut engine = FilterEngine::new();
//! engine.load_source(&image)?;
//!
//! engine.apply_linear(&Kernel::mean(3)?)?;
//! let smoothed = engine.result_as::<u8>();
//!
//! // Feed the median result into a bilateral pass
//! engine.apply_median(3)?.commit_result()?;
//! engine.apply_bilateral(5, 30.0, 2.0)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `rayon`: processes output rows in parallel
//! - `serde`: serialization support for [`FilterOptions`]
//! - `png`: PNG codec for the demo driver

mod error;
mod imageops_filter;
mod utils;

#[cfg(test)]
mod test_utils;

use image::{ImageBuffer, Luma, Pixel};

pub use error::FilterError;
pub use imageops_filter::bilateral::{BilateralFilter, BilateralFilterExt};
pub use imageops_filter::convolve::LinearFilterExt;
pub use imageops_filter::engine::FilterEngine;
pub use imageops_filter::kernel::Kernel;
pub use imageops_filter::median::{MedianFilter, MedianFilterExt};
pub use imageops_filter::options::{
    Coverage, FilterOptions, SpatialDistance, DEFAULT_KERNEL_SIZE, DEFAULT_SIGMA,
};
pub use imageops_filter::padding::{kernel_offset, Padding};
pub use utils::{buffer_from_raw, to_buffer};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// Floating-point grayscale grid every filter reads from and writes to.
pub type Buffer = Image<Luma<f64>>;
