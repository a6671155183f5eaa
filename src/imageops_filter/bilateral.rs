use crate::error::FilterError;
use crate::imageops_filter::options::SpatialDistance;
use crate::imageops_filter::padding::{kernel_offset, Padding};
use crate::utils::{for_each_row, to_buffer, validate_non_empty_image, validate_sigma};
use crate::{Buffer, Image};
use image::{Luma, Primitive};
use itertools::iproduct;

/// Edge-preserving bilateral filter
///
/// For every output pixel a fresh `size × size` kernel is built whose weight
/// at kernel position `(i, j)` is
///
/// ```text
/// d = distance(i, j) / σd²
/// r = ((neighbor - centre) / σr)²
/// w = exp(-0.5 · (d + r))
/// ```
///
/// where `neighbor` lies `(i - offset, j - offset)` away from the centre.
/// The output is `Σ neighbor · w / Σ w`. `distance` is chosen by
/// [`SpatialDistance`]. Unlike linear and median filtering, every output
/// pixel is always written.
///
/// # Examples
///
/// ```
/// use imageops_filter::{BilateralFilter, BilateralFilterExt, SpatialDistance};
/// use image::Luma;
/// use imageproc::definitions::Image;
///
/// let image: Image<Luma<u8>> = Image::from_pixel(8, 8, Luma([120]));
/// let smoothed = image.bilateral_filter(5, 1.0, 1.0).unwrap();
/// assert!((smoothed.get_pixel(0, 0).0[0] - 120.0).abs() < 1e-9);
///
/// let filter = BilateralFilter::new(5, 1.0, 1.0)
///     .unwrap()
///     .with_spatial_distance(SpatialDistance::KernelIndex);
/// assert_eq!(filter.spatial_distance(), SpatialDistance::KernelIndex);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BilateralFilter {
    size: u32,
    sigma_range: f64,
    sigma_spatial: f64,
    spatial_distance: SpatialDistance,
}

impl BilateralFilter {
    /// Create a new bilateral filter using [`SpatialDistance::Centered`]
    ///
    /// # Errors
    ///
    /// * `FilterError::InvalidKernelSize` - If `size` is zero or even
    /// * `FilterError::InvalidSigma` - If either spread is not a positive finite number
    pub fn new(size: u32, sigma_range: f64, sigma_spatial: f64) -> Result<Self, FilterError> {
        kernel_offset(size)?;
        Ok(Self {
            size,
            sigma_range: validate_sigma("sigma_range", sigma_range)?,
            sigma_spatial: validate_sigma("sigma_spatial", sigma_spatial)?,
            spatial_distance: SpatialDistance::default(),
        })
    }

    #[must_use]
    pub const fn with_spatial_distance(mut self, spatial_distance: SpatialDistance) -> Self {
        self.spatial_distance = spatial_distance;
        self
    }

    #[inline]
    pub const fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub const fn offset(&self) -> u32 {
        (self.size - 1) / 2
    }

    #[inline]
    pub const fn sigma_range(&self) -> f64 {
        self.sigma_range
    }

    #[inline]
    pub const fn sigma_spatial(&self) -> f64 {
        self.sigma_spatial
    }

    #[inline]
    pub const fn spatial_distance(&self) -> SpatialDistance {
        self.spatial_distance
    }

    /// Scaled spatial term `d` for every kernel position, row-major
    fn spatial_terms(&self) -> Vec<f64> {
        let offset = self.offset();
        let sigma_sq = self.sigma_spatial * self.sigma_spatial;
        iproduct!(0..self.size, 0..self.size)
            .map(|(i, j)| self.spatial_distance.squared(i, j, offset) / sigma_sq)
            .collect()
    }

    /// Writes the bilateral-filtered `source` into every cell of `result`
    ///
    /// `result` must have the dimensions of `source`.
    pub(crate) fn apply_into(
        &self,
        source: &Buffer,
        result: &mut Buffer,
    ) -> Result<(), FilterError> {
        debug_assert_eq!(source.dimensions(), result.dimensions());

        let (width, height) = source.dimensions();
        let size = self.size as usize;
        let offset = self.offset() as usize;
        let sigma_range = self.sigma_range;
        let spatial = self.spatial_terms();

        let padded = source.zero_pad(self.size)?;
        let padded_width = padded.width() as usize;
        let samples: &[f64] = padded.as_raw();

        for_each_row(
            result,
            width as usize,
            height as usize,
            size * size,
            |row, line, kernel| {
                for (col, out) in line.iter_mut().enumerate() {
                    let centre = samples[(row + offset) * padded_width + col + offset];

                    kernel.clear();
                    let mut norm = 0.0;
                    for (di, spatial_row) in spatial.chunks_exact(size).enumerate() {
                        let start = (row + di) * padded_width + col;
                        let neighbors = &samples[start..start + size];
                        for (&neighbor, &d) in neighbors.iter().zip(spatial_row) {
                            let diff = (neighbor - centre) / sigma_range;
                            let weight = (-0.5 * (d + diff * diff)).exp();
                            norm += weight;
                            kernel.push(weight);
                        }
                    }

                    let mut weighted = 0.0;
                    for (di, kernel_row) in kernel.chunks_exact(size).enumerate() {
                        let start = (row + di) * padded_width + col;
                        weighted += samples[start..start + size]
                            .iter()
                            .zip(kernel_row)
                            .map(|(neighbor, weight)| neighbor * weight)
                            .sum::<f64>();
                    }

                    // Every weight underflowed
                    *out = if norm > 0.0 { weighted / norm } else { centre };
                }
            },
        );

        Ok(())
    }
}

/// Extension trait providing bilateral filtering on grayscale images
pub trait BilateralFilterExt {
    /// Applies a bilateral filter with [`SpatialDistance::Centered`]
    ///
    /// # Arguments
    ///
    /// * `size` - Neighborhood side length (odd)
    /// * `sigma_range` - Intensity spread σr
    /// * `sigma_spatial` - Spatial spread σd
    ///
    /// # Errors
    ///
    /// * `FilterError::InvalidKernelSize` - If `size` is zero or even
    /// * `FilterError::InvalidSigma` - If either spread is not a positive finite number
    /// * `FilterError::EmptyImage` - If the image has zero width or height
    fn bilateral_filter(
        &self,
        size: u32,
        sigma_range: f64,
        sigma_spatial: f64,
    ) -> Result<Buffer, FilterError>;
}

impl<T> BilateralFilterExt for Image<Luma<T>>
where
    T: Primitive + Into<f64>,
{
    fn bilateral_filter(
        &self,
        size: u32,
        sigma_range: f64,
        sigma_spatial: f64,
    ) -> Result<Buffer, FilterError> {
        let filter = BilateralFilter::new(size, sigma_range, sigma_spatial)?;
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height)?;

        let source = to_buffer(self);
        let mut result = Buffer::new(width, height);
        filter.apply_into(&source, &mut result)?;
        Ok(result)
    }
}
