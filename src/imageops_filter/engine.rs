use crate::error::FilterError;
use crate::imageops_filter::bilateral::BilateralFilter;
use crate::imageops_filter::convolve::convolve_into;
use crate::imageops_filter::kernel::Kernel;
use crate::imageops_filter::median::MedianFilter;
use crate::imageops_filter::options::FilterOptions;
use crate::utils::{clamp_f64_to_primitive, to_buffer, validate_non_empty_image};
use crate::{Buffer, Image};
use image::{DynamicImage, ImageBuffer, Luma, Primitive};
use imageproc::definitions::Clamp;

/// Stateful filtering pipeline over one grayscale source
///
/// The engine owns the current source and a result buffer of the same
/// dimensions. Every `apply_*` call reads the source and overwrites the
/// result; [`commit_result`](Self::commit_result) promotes the result to the
/// new source so filters can be chained.
///
/// The result is NaN-filled whenever a source is loaded, so cells a filter
/// did not write (see [`Coverage::Truncated`](crate::Coverage::Truncated))
/// stay detectable through [`unwritten_cells`](Self::unwritten_cells).
///
/// # Examples
///
/// ```
/// use imageops_filter::{FilterEngine, Kernel};
/// use image::Luma;
/// use imageproc::definitions::Image;
///
/// # fn main() -> Result<(), imageops_filter::FilterError> {
/// let image: Image<Luma<u8>> = Image::from_pixel(5, 5, Luma([100]));
/// let mut engine = FilterEngine::from_image(&image)?;
///
/// engine.apply_linear(&Kernel::gaussian(3, 1.0)?)?;
/// assert_eq!(engine.result().dimensions(), (5, 5));
///
/// engine.apply_median(3)?;
/// assert_eq!(engine.result().get_pixel(2, 2).0[0], 100.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FilterEngine {
    source: Option<Buffer>,
    result: Buffer,
    options: FilterOptions,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::with_options(FilterOptions::default())
    }
}

impl FilterEngine {
    /// Creates an engine with default options and no source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given options and no source
    #[must_use]
    pub fn with_options(options: FilterOptions) -> Self {
        Self {
            source: None,
            result: ImageBuffer::new(0, 0),
            options,
        }
    }

    /// Creates an engine with default options and `image` loaded as source
    ///
    /// # Errors
    ///
    /// * `FilterError::EmptyImage` - If the image has zero width or height
    pub fn from_image<T>(image: &Image<Luma<T>>) -> Result<Self, FilterError>
    where
        T: Primitive + Into<f64>,
    {
        let mut engine = Self::new();
        engine.load_source(image)?;
        Ok(engine)
    }

    #[must_use]
    pub const fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: FilterOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Replaces the source with `image` and resets the result to its dimensions
    ///
    /// # Errors
    ///
    /// * `FilterError::EmptyImage` - If the image has zero width or height
    pub fn load_source<T>(&mut self, image: &Image<Luma<T>>) -> Result<&mut Self, FilterError>
    where
        T: Primitive + Into<f64>,
    {
        let (width, height) = image.dimensions();
        validate_non_empty_image(width, height)?;
        self.load_buffer(to_buffer(image))
    }

    /// Replaces the source with an already converted buffer
    ///
    /// # Errors
    ///
    /// * `FilterError::EmptyImage` - If the buffer has zero width or height
    pub fn load_buffer(&mut self, buffer: Buffer) -> Result<&mut Self, FilterError> {
        let (width, height) = buffer.dimensions();
        validate_non_empty_image(width, height)?;

        log::trace!("loading {width}x{height} source");
        self.result = ImageBuffer::from_pixel(width, height, Luma([f64::NAN]));
        self.source = Some(buffer);
        Ok(self)
    }

    /// Replaces the source with the 8-bit luma conversion of a decoded image
    ///
    /// # Errors
    ///
    /// * `FilterError::EmptyImage` - If the image has zero width or height
    pub fn load_dynamic(&mut self, image: &DynamicImage) -> Result<&mut Self, FilterError> {
        self.load_source(&image.to_luma8())
    }

    /// Current source, if one has been loaded
    #[must_use]
    pub const fn source(&self) -> Option<&Buffer> {
        self.source.as_ref()
    }

    /// Convolves the source with `kernel` into the result
    ///
    /// # Errors
    ///
    /// * `FilterError::UninitializedSource` - If no source has been loaded
    pub fn apply_linear(&mut self, kernel: &Kernel) -> Result<&mut Self, FilterError> {
        let source = self.source.as_ref().ok_or(FilterError::UninitializedSource)?;
        log::debug!(
            "linear filter: size={} sum={:.6} coverage={:?}",
            kernel.size(),
            kernel.sum(),
            self.options.coverage
        );

        convolve_into(source, kernel, &mut self.result, self.options.coverage)?;
        Ok(self)
    }

    /// Writes the `size × size` neighborhood median of the source into the result
    ///
    /// # Errors
    ///
    /// * `FilterError::InvalidKernelSize` - If `size` is zero or even
    /// * `FilterError::UninitializedSource` - If no source has been loaded
    pub fn apply_median(&mut self, size: u32) -> Result<&mut Self, FilterError> {
        let filter = MedianFilter::new(size)?;
        let source = self.source.as_ref().ok_or(FilterError::UninitializedSource)?;
        log::debug!(
            "median filter: size={size} coverage={:?}",
            self.options.coverage
        );

        filter.apply_into(source, &mut self.result, self.options.coverage)?;
        Ok(self)
    }

    /// Writes the bilateral-filtered source into the result
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
    /// * `FilterError::UninitializedSource` - If no source has been loaded
    pub fn apply_bilateral(
        &mut self,
        size: u32,
        sigma_range: f64,
        sigma_spatial: f64,
    ) -> Result<&mut Self, FilterError> {
        let filter = BilateralFilter::new(size, sigma_range, sigma_spatial)?
            .with_spatial_distance(self.options.spatial_distance);
        let source = self.source.as_ref().ok_or(FilterError::UninitializedSource)?;
        log::debug!(
            "bilateral filter: size={size} sigma_range={sigma_range} sigma_spatial={sigma_spatial} spatial_distance={:?}",
            self.options.spatial_distance
        );

        filter.apply_into(source, &mut self.result)?;
        Ok(self)
    }

    /// Makes a copy of the result the new source
    ///
    /// The result itself is left as is, so cells the next filter does not
    /// write keep their current values.
    ///
    /// # Errors
    ///
    /// * `FilterError::UninitializedSource` - If no source has been loaded
    pub fn commit_result(&mut self) -> Result<&mut Self, FilterError> {
        if self.source.is_none() {
            return Err(FilterError::UninitializedSource);
        }
        log::trace!("committing result as source");
        self.source = Some(self.result.clone());
        Ok(self)
    }

    /// Current result
    #[must_use]
    pub const fn result(&self) -> &Buffer {
        &self.result
    }

    /// Consumes the engine and returns the result
    #[must_use]
    pub fn into_result(self) -> Buffer {
        self.result
    }

    /// Result rounded and clamped to a primitive sample type, e.g. `u8` for export
    ///
    /// Unwritten (NaN) cells map to the lowest value of `T`.
    #[must_use]
    pub fn result_as<T>(&self) -> Image<Luma<T>>
    where
        T: Primitive + Clamp<f32>,
    {
        let (width, height) = self.result.dimensions();
        ImageBuffer::from_fn(width, height, |x, y| {
            Luma([clamp_f64_to_primitive(self.result.get_pixel(x, y).0[0])])
        })
    }

    /// Number of result cells no filter has written since the last load
    #[must_use]
    pub fn unwritten_cells(&self) -> usize {
        self.result.iter().filter(|value| value.is_nan()).count()
    }
}
