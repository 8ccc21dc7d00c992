use super::{Real, Scale, clamp_real, unit};
use crate::error::{Error, Result};

/// A geometric (log-like) scale mapping `[0, 1]` onto `[low, high]`.
///
/// With base `b`, the input is first warped by the bias exponent,
/// `t = u^bias`, then mapped to `low + (high − low) · (b^t − 1) / (b − 1)`.
/// Equal steps in `t` multiply the distance from the curve's pole by the
/// same factor; `b = 1` is the linear map. Both endpoints are preserved for
/// every base and bias. A bias above 1 pushes density toward `low`, below 1
/// toward `high`.
///
/// Only `b = high / low` gives a constant ratio between values at equal
/// input steps, i.e. the log-uniform map `low · (high / low)^u`; build it
/// with [`Geometric::log_uniform`]. Any other base is steeper or flatter:
/// with the default base 10 over `[1e-5, 1e-1]`, three quarters of the
/// inputs land above `8.7e-3`.
///
/// # Examples
///
/// ```
/// use quasisweep::scale::{Geometric, Scale};
///
/// let lr = Geometric::log_uniform(1e-5_f64, 1e-1).unwrap();
/// assert!((lr.transform(0.25) / 1e-4 - 1.0).abs() < 1e-9);
/// assert!((lr.transform(0.5) / 1e-3 - 1.0).abs() < 1e-9);
///
/// let warped = Geometric::builder(1e-5, 1e-1).base(2.0).bias(2.0).build().unwrap();
/// assert_eq!(warped.transform(0.0), 1e-5);
/// assert_eq!(warped.transform(1.0), 1e-1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Geometric<T = f64> {
    low: T,
    high: T,
    base: f64,
    bias: f64,
}

impl<T: Real> Geometric<T> {
    /// Default growth base.
    pub const DEFAULT_BASE: f64 = 10.0;

    /// Creates a geometric scale over `[low, high]` with base 10 and no bias.
    ///
    /// # Errors
    ///
    /// See [`GeometricBuilder::build`].
    pub fn new(low: T, high: T) -> Result<Self> {
        Self::builder(low, high).build()
    }

    /// Creates a log-uniform scale: the base is set to `high / low`, so
    /// equal input steps multiply the value by the same factor.
    ///
    /// # Errors
    ///
    /// See [`GeometricBuilder::build`]. A ratio that overflows `f64` is
    /// reported as [`Error::InvalidBase`].
    pub fn log_uniform(low: T, high: T) -> Result<Self> {
        Self::builder(low, high)
            .base(high.to_f64() / low.to_f64())
            .build()
    }

    /// Starts a builder for a geometric scale over `[low, high]`.
    #[must_use]
    pub fn builder(low: T, high: T) -> GeometricBuilder<T> {
        GeometricBuilder {
            low,
            high,
            base: Self::DEFAULT_BASE,
            bias: 1.0,
        }
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

    /// Returns the growth base.
    #[must_use]
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Returns the bias exponent.
    #[must_use]
    pub fn bias(&self) -> f64 {
        self.bias
    }
}

impl<T: Real> Scale for Geometric<T> {
    type Output = T;

    fn transform(&self, u: f64) -> T {
        let (lo, hi) = (self.low.to_f64(), self.high.to_f64());
        let t = unit(u).powf(self.bias);
        let log_base = self.base.ln();
        let s = if log_base == 0.0 {
            t
        } else {
            (t * log_base).exp_m1() / log_base.exp_m1()
        };
        clamp_real(T::from_f64(lo * (1.0 - s) + hi * s), self.low, self.high)
    }
}

/// Builder for [`Geometric`] scales.
#[derive(Clone, Debug)]
pub struct GeometricBuilder<T> {
    low: T,
    high: T,
    base: f64,
    bias: f64,
}

impl<T: Real> GeometricBuilder<T> {
    /// Sets the growth base (default 10).
    #[must_use]
    pub fn base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    /// Sets the bias exponent applied to the input (default 1).
    #[must_use]
    pub fn bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    /// Validates the configuration and builds the scale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if a bound is not finite or
    /// `low > high`, [`Error::InvalidLogBounds`] if `low <= 0`,
    /// [`Error::InvalidBase`] if the base is not finite and positive, and
    /// [`Error::InvalidBias`] if the bias is not finite and positive.
    pub fn build(self) -> Result<Geometric<T>> {
        let (lo, hi) = (self.low.to_f64(), self.high.to_f64());
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(Error::InvalidBounds { low: lo, high: hi });
        }
        if lo <= 0.0 {
            return Err(Error::InvalidLogBounds(lo));
        }
        if !self.base.is_finite() || self.base <= 0.0 {
            return Err(Error::InvalidBase(self.base));
        }
        if !self.bias.is_finite() || self.bias <= 0.0 {
            return Err(Error::InvalidBias(self.bias));
        }
        Ok(Geometric {
            low: self.low,
            high: self.high,
            base: self.base,
            bias: self.bias,
        })
    }
}
