//! Behavior switches shared by the filters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Neighborhood size used when a caller has no preference.
pub const DEFAULT_KERNEL_SIZE: u32 = 3;

/// Spread used for Gaussian and bilateral weights when a caller has no preference.
pub const DEFAULT_SIGMA: f64 = 1.0;

/// Which output cells linear and median filtering write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Coverage {
    /// Every output cell is written.
    #[default]
    Full,
    /// The last `offset` rows and columns are left untouched. Those cells keep
    /// whatever the result held before the call (NaN right after a load).
    Truncated,
}

impl Coverage {
    /// Number of leading rows (or columns) out of `extent` that get written.
    #[inline]
    pub const fn covered(self, extent: u32, offset: u32) -> u32 {
        match self {
            Self::Full => extent,
            Self::Truncated => extent.saturating_sub(offset),
        }
    }
}

/// How the bilateral filter measures the spatial distance of a kernel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpatialDistance {
    /// Squared offset from the kernel centre, `(i - offset)² + (j - offset)²`.
    #[default]
    Centered,
    /// Squared raw kernel-local index, `i² + j²`.
    KernelIndex,
}

impl SpatialDistance {
    /// Squared distance of kernel position `(i, j)` in a kernel with the given offset.
    #[inline]
    pub fn squared(self, i: u32, j: u32, offset: u32) -> f64 {
        let (di, dj) = match self {
            Self::Centered => (
                f64::from(i) - f64::from(offset),
                f64::from(j) - f64::from(offset),
            ),
            Self::KernelIndex => (f64::from(i), f64::from(j)),
        };
        di * di + dj * dj
    }
}

/// Options carried by a [`FilterEngine`](crate::FilterEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterOptions {
    /// Output coverage for linear and median filtering
    pub coverage: Coverage,
    /// Spatial term used by bilateral filtering
    pub spatial_distance: SpatialDistance,
}

impl FilterOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            coverage: Coverage::Full,
            spatial_distance: SpatialDistance::Centered,
        }
    }

    /// Truncated coverage with kernel-index spatial distances.
    #[must_use]
    pub const fn truncated() -> Self {
        Self {
            coverage: Coverage::Truncated,
            spatial_distance: SpatialDistance::KernelIndex,
        }
    }

    #[must_use]
    pub const fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = coverage;
        self
    }

    #[must_use]
    pub const fn with_spatial_distance(mut self, spatial_distance: SpatialDistance) -> Self {
        self.spatial_distance = spatial_distance;
        self
    }
}
