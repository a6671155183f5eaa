//! Internal utility functions for imageops-filter.
//!
//! This module contains validation, conversion and iteration helpers shared by
//! the filter implementations.

mod rows;
pub(crate) use rows::for_each_row;

use crate::error::FilterError;
use crate::{Buffer, Image};
use image::{ImageBuffer, Luma, Primitive};
use imageproc::definitions::Clamp;

/// Rounds a floating-point sample and clamps it to the range of a primitive type.
///
/// NaN samples map to the lowest value of the target type.
///
/// # Arguments
///
/// * `value` - The floating-point value to convert
///
/// # Returns
///
/// The rounded, clamped value as the target primitive type
#[inline]
pub fn clamp_f64_to_primitive<T: Primitive + Clamp<f32>>(value: f64) -> T {
    if value.is_nan() {
        return T::DEFAULT_MIN_VALUE;
    }
    T::clamp(value.round() as f32)
}

/// Validates that an image has non-zero dimensions.
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
///
/// # Returns
///
/// `Ok(())` if the dimensions are valid, otherwise `FilterError::EmptyImage`
pub fn validate_non_empty_image(width: u32, height: u32) -> Result<(), FilterError> {
    if width == 0 || height == 0 {
        Err(FilterError::EmptyImage { width, height })
    } else {
        Ok(())
    }
}

/// Validates a spread parameter, returning it unchanged when usable.
pub fn validate_sigma(name: &'static str, value: f64) -> Result<f64, FilterError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(FilterError::InvalidSigma { name, value })
    }
}

/// Converts a grayscale image of any primitive sample type to a [`Buffer`].
///
/// # Examples
/// ```
/// use imageops_filter::to_buffer;
/// use imageproc::gray_image;
///
/// let image = gray_image!(
///     10, 20;
///     30, 40);
///
/// let buffer = to_buffer(&image);
/// assert_eq!(buffer.get_pixel(1, 1).0[0], 40.0);
/// ```
pub fn to_buffer<T>(image: &Image<Luma<T>>) -> Buffer
where
    T: Primitive + Into<f64>,
{
    let (width, height) = image.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| Luma([image.get_pixel(x, y).0[0].into()]))
}

/// Builds a [`Buffer`] from row-major samples.
///
/// # Errors
///
/// * `FilterError::DimensionMismatch` - If `data.len() != width * height`
pub fn buffer_from_raw(width: u32, height: u32, data: Vec<f64>) -> Result<Buffer, FilterError> {
    let expected = width as usize * height as usize;
    let actual = data.len();
    ImageBuffer::from_raw(width, height, data)
        .filter(|_| expected == actual)
        .ok_or(FilterError::DimensionMismatch { expected, actual })
}
