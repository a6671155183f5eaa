use crate::error::FilterError;
use crate::imageops_filter::kernel::Kernel;
use crate::imageops_filter::options::Coverage;
use crate::imageops_filter::padding::Padding;
use crate::utils::{for_each_row, to_buffer, validate_non_empty_image};
use crate::{Buffer, Image};
use image::{Luma, Primitive};

/// Trait providing linear convolution of grayscale images with a weight kernel
///
/// The image is zero-padded by the kernel offset, so pixels within
/// `kernel.offset()` of an edge mix in zero samples and come out darker.
/// No normalization is applied beyond what the kernel weights encode.
///
/// # Examples
///
/// ```
/// use imageops_filter::{Kernel, LinearFilterExt};
/// use image::Luma;
/// use imageproc::definitions::Image;
///
/// let image: Image<Luma<u8>> = Image::from_pixel(5, 5, Luma([90]));
/// let blurred = image.convolve(&Kernel::mean(3).unwrap()).unwrap();
///
/// assert!((blurred.get_pixel(2, 2).0[0] - 90.0).abs() < 1e-9);
/// assert!((blurred.get_pixel(0, 0).0[0] - 40.0).abs() < 1e-9);
/// ```
pub trait LinearFilterExt {
    /// Convolves every pixel's neighborhood with `kernel`
    ///
    /// # Errors
    ///
    /// * `FilterError::EmptyImage` - If the image has zero width or height
    fn convolve(&self, kernel: &Kernel) -> Result<Buffer, FilterError>;
}

impl<T> LinearFilterExt for Image<Luma<T>>
where
    T: Primitive + Into<f64>,
{
    fn convolve(&self, kernel: &Kernel) -> Result<Buffer, FilterError> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height)?;

        let source = to_buffer(self);
        let mut result = Buffer::new(width, height);
        convolve_into(&source, kernel, &mut result, Coverage::Full)?;
        Ok(result)
    }
}

/// Writes the weighted neighborhood sums of `source` into `result`
///
/// `result` must have the dimensions of `source`. Only the rows and columns
/// selected by `coverage` are written.
pub(crate) fn convolve_into(
    source: &Buffer,
    kernel: &Kernel,
    result: &mut Buffer,
    coverage: Coverage,
) -> Result<(), FilterError> {
    debug_assert_eq!(source.dimensions(), result.dimensions());

    let (width, height) = source.dimensions();
    let size = kernel.size() as usize;
    let offset = kernel.offset();

    let padded = source.zero_pad(kernel.size())?;
    let padded_width = padded.width() as usize;
    let samples: &[f64] = padded.as_raw();

    let rows = coverage.covered(height, offset) as usize;
    let cols = coverage.covered(width, offset) as usize;

    for_each_row(result, width as usize, rows, 0, |row, line, _| {
        for (col, out) in line[..cols].iter_mut().enumerate() {
            *out = kernel
                .rows()
                .enumerate()
                .map(|(di, weights)| {
                    let start = (row + di) * padded_width + col;
                    samples[start..start + size]
                        .iter()
                        .zip(weights)
                        .map(|(sample, weight)| sample * weight)
                        .sum::<f64>()
                })
                .sum();
        }
    });

    Ok(())
}
