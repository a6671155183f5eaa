use crate::error::FilterError;
use crate::imageops_filter::options::Coverage;
use crate::imageops_filter::padding::{kernel_offset, Padding};
use crate::utils::{for_each_row, to_buffer, validate_non_empty_image};
use crate::{Buffer, Image};
use image::{Luma, Primitive};

/// Median filter over a square neighborhood
///
/// Each output sample is the middle value, rank `(size² - 1) / 2`, of the
/// `size²` samples around it. Zero padding counts as real samples, so
/// corner pixels of a bright image can be pulled to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedianFilter {
    size: u32,
}

impl MedianFilter {
    /// Create a new median filter
    ///
    /// # Errors
    ///
    /// * `FilterError::InvalidKernelSize` - If `size` is zero or even
    pub const fn new(size: u32) -> Result<Self, FilterError> {
        match kernel_offset(size) {
            Ok(_) => Ok(Self { size }),
            Err(err) => Err(err),
        }
    }

    /// Get the neighborhood side length
    #[inline]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Get the neighborhood half-width
    #[inline]
    pub const fn offset(&self) -> u32 {
        (self.size - 1) / 2
    }

    /// Writes the neighborhood medians of `source` into `result`
    ///
    /// `result` must have the dimensions of `source`. Only the rows and
    /// columns selected by `coverage` are written.
    pub(crate) fn apply_into(
        &self,
        source: &Buffer,
        result: &mut Buffer,
        coverage: Coverage,
    ) -> Result<(), FilterError> {
        debug_assert_eq!(source.dimensions(), result.dimensions());

        let (width, height) = source.dimensions();
        let size = self.size as usize;
        let area = size * size;
        let middle = (area - 1) / 2;

        let padded = source.zero_pad(self.size)?;
        let padded_width = padded.width() as usize;
        let samples: &[f64] = padded.as_raw();

        let rows = coverage.covered(height, self.offset()) as usize;
        let cols = coverage.covered(width, self.offset()) as usize;

        for_each_row(result, width as usize, rows, area, |row, line, window| {
            for (col, out) in line[..cols].iter_mut().enumerate() {
                window.clear();
                for di in 0..size {
                    let start = (row + di) * padded_width + col;
                    window.extend_from_slice(&samples[start..start + size]);
                }
                let (_, median, _) = window.select_nth_unstable_by(middle, f64::total_cmp);
                *out = *median;
            }
        });

        Ok(())
    }
}

/// Extension trait providing median filtering on grayscale images
pub trait MedianFilterExt {
    /// Replaces each pixel with the median of its `size × size` neighborhood
    ///
    /// # Errors
    ///
    /// * `FilterError::InvalidKernelSize` - If `size` is zero or even
    /// * `FilterError::EmptyImage` - If the image has zero width or height
    fn median_filter(&self, size: u32) -> Result<Buffer, FilterError>;
}

impl<T> MedianFilterExt for Image<Luma<T>>
where
    T: Primitive + Into<f64>,
{
    fn median_filter(&self, size: u32) -> Result<Buffer, FilterError> {
        let filter = MedianFilter::new(size)?;
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height)?;

        let source = to_buffer(self);
        let mut result = Buffer::new(width, height);
        filter.apply_into(&source, &mut result, Coverage::Full)?;
        Ok(result)
    }
}
