use crate::error::FilterError;
use crate::Image;
use image::{imageops, ImageBuffer, Pixel};
use num_traits::Zero;

/// Returns the neighborhood half-width `(size - 1) / 2` for an odd kernel size.
///
/// # Errors
///
/// * `FilterError::InvalidKernelSize` - If `size` is zero or even
///
/// # Examples
///
/// ```
/// use imageops_filter::kernel_offset;
///
/// assert_eq!(kernel_offset(1).unwrap(), 0);
/// assert_eq!(kernel_offset(5).unwrap(), 2);
/// assert!(kernel_offset(4).is_err());
/// ```
pub const fn kernel_offset(size: u32) -> Result<u32, FilterError> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::InvalidKernelSize { size });
    }
    Ok((size - 1) / 2)
}

/// Trait providing border padding for neighborhood extraction
pub trait Padding<P: Pixel> {
    /// Surrounds the image with `border` pixels of `color` on every side
    ///
    /// # Arguments
    ///
    /// * `border` - Border width in pixels
    /// * `color` - Border color
    ///
    /// # Returns
    ///
    /// An image of size `(width + 2 * border, height + 2 * border)` whose
    /// interior at `(border, border)` is a copy of `self`
    fn add_border(&self, border: u32, color: P) -> Image<P>;

    /// Zero-pads the image so every pixel has a full `kernel_size` neighborhood
    ///
    /// The border width is `(kernel_size - 1) / 2`. The padded copy is
    /// produced fresh on every call.
    ///
    /// # Errors
    ///
    /// * `FilterError::InvalidKernelSize` - If `kernel_size` is zero or even
    fn zero_pad(&self, kernel_size: u32) -> Result<Image<P>, FilterError>;
}

impl<P: Pixel> Padding<P> for Image<P> {
    fn add_border(&self, border: u32, color: P) -> Image<P> {
        let (width, height) = self.dimensions();
        let mut canvas = ImageBuffer::from_pixel(width + 2 * border, height + 2 * border, color);
        imageops::replace(&mut canvas, self, i64::from(border), i64::from(border));
        canvas
    }

    fn zero_pad(&self, kernel_size: u32) -> Result<Image<P>, FilterError> {
        let offset = kernel_offset(kernel_size)?;
        let channels = vec![P::Subpixel::zero(); usize::from(P::CHANNEL_COUNT)];
        Ok(self.add_border(offset, *P::from_slice(&channels)))
    }
}
