//! Test utilities for imageops-filter
//!
//! This module provides common fixtures for testing the filters.
//! It is only compiled when running tests.

use crate::{Buffer, Image};
use image::{ImageBuffer, Luma};

/// Creates a 3x3 buffer holding 1..=9 in row-major order
///
/// ```text
/// 1 2 3
/// 4 5 6
/// 7 8 9
/// ```
pub fn create_test_buffer() -> Buffer {
    ImageBuffer::from_fn(3, 3, |x, y| Luma([f64::from(y * 3 + x + 1)]))
}

/// Creates a test grayscale (Luma) image with predefined pixel values for testing.
///
/// This function creates a 2x2 test image with known grayscale values:
/// - (0,0): [200]
/// - (1,0): [150]
/// - (0,1): [100]
/// - (1,1): [50]
pub fn create_test_luma_image() -> Image<Luma<u8>> {
    let mut image: Image<Luma<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Luma([200]));
    image.put_pixel(1, 0, Luma([150]));
    image.put_pixel(0, 1, Luma([100]));
    image.put_pixel(1, 1, Luma([50]));
    image
}

/// Buffer with every sample set to `value`
pub fn constant_buffer(width: u32, height: u32, value: f64) -> Buffer {
    ImageBuffer::from_pixel(width, height, Luma([value]))
}

/// Buffer with `left` in the columns below `width / 2` and `right` elsewhere
pub fn create_step_buffer(width: u32, height: u32, left: f64, right: f64) -> Buffer {
    ImageBuffer::from_fn(width, height, |x, _| {
        Luma([if x < width / 2 { left } else { right }])
    })
}

/// Compares two buffers sample by sample with a tolerance.
///
/// # Returns
/// `true` if dimensions match and every sample pair differs by at most
/// `tolerance`, `false` otherwise
pub fn buffers_approx_equal(expected: &Buffer, actual: &Buffer, tolerance: f64) -> bool {
    expected.dimensions() == actual.dimensions()
        && expected
            .iter()
            .zip(actual.iter())
            .all(|(e, a)| (e - a).abs() <= tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_test_buffer_with_valid_input_creates_buffer() {
        let buffer = create_test_buffer();
        assert_eq!(buffer.dimensions(), (3, 3));
        assert_eq!(buffer.get_pixel(0, 0).0[0], 1.0);
        assert_eq!(buffer.get_pixel(2, 0).0[0], 3.0);
        assert_eq!(buffer.get_pixel(0, 2).0[0], 7.0);
    }

    #[test]
    fn create_step_buffer_splits_columns() {
        let buffer = create_step_buffer(4, 2, 1.0, 9.0);
        assert_eq!(buffer.get_pixel(1, 1).0[0], 1.0);
        assert_eq!(buffer.get_pixel(2, 0).0[0], 9.0);
    }

    #[test]
    fn buffers_approx_equal_with_tolerant_comparison_returns_true() {
        let buffer1 = create_test_buffer();
        let mut buffer2 = create_test_buffer();
        buffer2.put_pixel(1, 1, Luma([5.4]));

        assert!(buffers_approx_equal(&buffer1, &buffer2, 0.5));
        assert!(!buffers_approx_equal(&buffer1, &buffer2, 0.3));
        assert!(!buffers_approx_equal(&buffer1, &constant_buffer(2, 2, 1.0), 10.0));
    }
}
