use super::{Real, Scale, clamp_real, unit};
use crate::error::{Error, Result};

/// A linear scale mapping `[0, 1]` onto `[low, high]`.
///
/// The output type follows the bound type, so `MinMax<f32>` produces `f32`
/// values and `MinMax<f64>` produces `f64` values.
///
/// # Examples
///
/// ```
/// use quasisweep::scale::{MinMax, Scale};
///
/// let momentum = MinMax::new(0.8, 0.99).unwrap();
/// assert_eq!(momentum.transform(0.0), 0.8);
/// assert_eq!(momentum.transform(1.0), 0.99);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MinMax<T = f64> {
    low: T,
    high: T,
}

impl<T: Real> MinMax<T> {
    /// Creates a linear scale over `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if either bound is not finite or
    /// `low > high`.
    pub fn new(low: T, high: T) -> Result<Self> {
        let (lo, hi) = (low.to_f64(), high.to_f64());
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(Error::InvalidBounds { low: lo, high: hi });
        }
        Ok(Self { low, high })
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn low(&self) -> T {
        self.low
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn high(&self) -> T {
        self.high
    }
}

impl<T: Real> Scale for MinMax<T> {
    type Output = T;

    fn transform(&self, u: f64) -> T {
        let (lo, hi) = (self.low.to_f64(), self.high.to_f64());
        let u = unit(u);
        // Blended form keeps both endpoints exact.
        let v = T::from_f64(lo * (1.0 - u) + hi * u);
        clamp_real(v, self.low, self.high)
    }
}
