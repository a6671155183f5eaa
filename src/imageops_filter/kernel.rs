use crate::error::FilterError;
use crate::imageops_filter::padding::kernel_offset;
use itertools::iproduct;
use std::f64::consts::PI;
use std::slice::ChunksExact;

/// Square grid of convolution weights with an odd side length
///
/// Weights are stored row-major. Position `(row, col)` is applied to the
/// neighbor `row - offset` rows and `col - offset` columns away from the
/// pixel being filtered.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    data: Vec<f64>,
    size: u32,
}

impl Kernel {
    /// Builds a kernel from row-major weights
    ///
    /// # Errors
    ///
    /// * `FilterError::InvalidKernelSize` - If `size` is zero or even
    /// * `FilterError::DimensionMismatch` - If `data.len() != size * size`
    pub fn new(data: Vec<f64>, size: u32) -> Result<Self, FilterError> {
        kernel_offset(size)?;
        let expected = size as usize * size as usize;
        if data.len() != expected {
            return Err(FilterError::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, size })
    }

    /// Box kernel whose `size²` weights are all `1 / size²`
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_filter::Kernel;
    ///
    /// let kernel = Kernel::mean(3).unwrap();
    /// assert_eq!(kernel.at(0, 0), 1.0 / 9.0);
    /// ```
    pub fn mean(size: u32) -> Result<Self, FilterError> {
        kernel_offset(size)?;
        let count = size as usize * size as usize;
        Ok(Self {
            data: vec![1.0 / count as f64; count],
            size,
        })
    }

    /// Gaussian kernel with spread `sigma`
    ///
    /// The weight at `(i, j)` is `exp(-((i-c)² + (j-c)²) / (2σ²)) / (2πσ²)`
    /// with `c` the kernel centre. The continuous normalization constant is
    /// kept as is, so the discrete weights do not sum to exactly one.
    ///
    /// # Errors
    ///
    /// * `FilterError::InvalidKernelSize` - If `size` is zero or even
    /// * `FilterError::InvalidSigma` - If `sigma` is not a positive finite number
    pub fn gaussian(size: u32, sigma: f64) -> Result<Self, FilterError> {
        let center = f64::from(kernel_offset(size)?);
        let sigma = crate::utils::validate_sigma("sigma", sigma)?;

        let variance = sigma * sigma;
        let coeff = 1.0 / (2.0 * PI * variance);
        let exp_denom = 2.0 * variance;

        let data = iproduct!(0..size, 0..size)
            .map(|(i, j)| {
                let di = f64::from(i) - center;
                let dj = f64::from(j) - center;
                coeff * (-(di * di + dj * dj) / exp_denom).exp()
            })
            .collect();

        Ok(Self { data, size })
    }

    /// Kernel with a single 1 at the centre; convolving with it copies the input
    pub fn identity(size: u32) -> Result<Self, FilterError> {
        let offset = kernel_offset(size)? as usize;
        let size_usize = size as usize;
        let mut data = vec![0.0; size_usize * size_usize];
        data[offset * size_usize + offset] = 1.0;
        Ok(Self { data, size })
    }

    /// Side length
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Half-width `(size - 1) / 2`
    #[must_use]
    pub const fn offset(&self) -> u32 {
        (self.size - 1) / 2
    }

    /// Weight at `(row, col)`
    ///
    /// # Panics
    ///
    /// If `row` or `col` is not below [`size`](Self::size).
    #[must_use]
    #[inline]
    pub fn at(&self, row: u32, col: u32) -> f64 {
        assert!(row < self.size && col < self.size, "kernel index out of range");
        self.data[(row * self.size + col) as usize]
    }

    /// Row-major weights
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.data
    }

    /// Sum of all weights
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    #[inline]
    pub(crate) fn rows(&self) -> ChunksExact<'_, f64> {
        self.data.chunks_exact(self.size as usize)
    }
}
