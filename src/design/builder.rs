use super::{DEFAULT_SEED, Design};
use crate::error::{Error, Result};
use crate::sequence::scramble::{DEFAULT_PRECISION, MAX_PRECISION};
use crate::sequence::sobol;

/// A builder for [`Design`] instances.
///
/// Created via [`Design::builder()`].
///
/// # Defaults
///
/// - Seed: [`DEFAULT_SEED`]
/// - Exponent: `0` (a single configuration)
/// - Scrambling: enabled
/// - Precision: [`DEFAULT_PRECISION`] binary digits
///
/// # Examples
///
/// ```
/// use quasisweep::Design;
///
/// let design = Design::builder().seed(7).exponent(6).build().unwrap();
/// assert_eq!(design.sample_count(), 64);
/// ```
#[derive(Clone, Debug)]
pub struct DesignBuilder {
    seed: u64,
    exponent: u32,
    scramble: bool,
    precision: u32,
}

impl DesignBuilder {
    pub(super) fn new() -> Self {
        Self {
            seed: DEFAULT_SEED,
            exponent: 0,
            scramble: true,
            precision: DEFAULT_PRECISION,
        }
    }

    /// Sets the scrambling seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets `m`; the design produces `2^m` configurations.
    #[must_use]
    pub fn exponent(mut self, exponent: u32) -> Self {
        self.exponent = exponent;
        self
    }

    /// Enables or disables scrambling.
    ///
    /// Without scrambling the design is the raw Sobol' net, which always
    /// starts with the all-zero point.
    #[must_use]
    pub fn scramble(mut self, scramble: bool) -> Self {
        self.scramble = scramble;
        self
    }

    /// Sets the number of binary digits used when scrambling.
    #[must_use]
    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Validates the settings and builds the design.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExponent`] if the exponent is too large,
    /// [`Error::InvalidPrecision`] if the precision is outside
    /// `1..=MAX_PRECISION`, and [`Error::InsufficientPrecision`] if
    /// scrambling is enabled and the precision is below the exponent.
    pub fn build(self) -> Result<Design> {
        sobol::sample_count(self.exponent)?;
        if self.scramble {
            if !(1..=MAX_PRECISION).contains(&self.precision) {
                return Err(Error::InvalidPrecision {
                    precision: self.precision,
                    max: MAX_PRECISION,
                });
            }
            if self.exponent > self.precision {
                return Err(Error::InsufficientPrecision {
                    precision: self.precision,
                    exponent: self.exponent,
                });
            }
        }
        Ok(Design {
            seed: self.seed,
            exponent: self.exponent,
            scramble: self.scramble,
            precision: self.precision,
        })
    }
}
