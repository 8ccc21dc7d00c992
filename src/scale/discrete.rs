use super::{Scale, unit};
use crate::error::{Error, Result};
use crate::value::ScaleValue;

/// A scale over `N` equally weighted discrete values.
///
/// `u` selects the value at 1-based index `ceil(u · N)` clamped into
/// `[1, N]`, with `u = 0` mapped to the first value. Each value therefore
/// owns an interval of width `1 / N`, closed on the right.
///
/// # Examples
///
/// ```
/// use quasisweep::scale::{Discrete, Scale};
///
/// let batch = Discrete::new(vec![16_i64, 32, 64, 128]).unwrap();
/// assert_eq!(batch.transform(0.0), 16);
/// assert_eq!(batch.transform(0.25), 16);
/// assert_eq!(batch.transform(0.26), 32);
/// assert_eq!(batch.transform(1.0), 128);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Discrete<T> {
    values: Vec<T>,
}

impl<T: ScaleValue> Discrete<T> {
    /// Creates a discrete scale over `values`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyChoices`] if `values` is empty.
    pub fn new(values: Vec<T>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyChoices);
        }
        Ok(Self { values })
    }

    /// Returns the values in order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the 0-based index selected by `u`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn index_of(&self, u: f64) -> usize {
        let n = self.values.len();
        let u = unit(u);
        if u == 0.0 {
            return 0;
        }
        let one_based = (u * n as f64).ceil() as usize;
        one_based.clamp(1, n) - 1
    }
}

impl Discrete<String> {
    /// Creates a discrete scale over string labels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyChoices`] if `labels` is empty.
    pub fn labels<I, L>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self::new(labels.into_iter().map(Into::into).collect())
    }
}

impl<T: ScaleValue> Scale for Discrete<T> {
    type Output = T;

    fn transform(&self, u: f64) -> T {
        self.values[self.index_of(u)].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueType;

    #[test]
    fn zero_maps_to_first_value() {
        let d = Discrete::labels(["sgd", "adam", "rmsprop"]).unwrap();
        assert_eq!(d.transform(0.0), "sgd");
        assert_eq!(d.output_type(), ValueType::Str);
    }

    #[test]
    fn intervals_are_closed_on_the_right() {
        let d = Discrete::new(vec![1_i64, 2, 3, 4]).unwrap();
        assert_eq!(d.index_of(0.25), 0);
        assert_eq!(d.index_of(0.250_001), 1);
        assert_eq!(d.index_of(0.5), 1);
        assert_eq!(d.index_of(0.75), 2);
        assert_eq!(d.index_of(1.0), 3);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        let d = Discrete::new(vec![true, false]).unwrap();
        assert!(d.transform(-1.0));
        assert!(!d.transform(2.0));
        assert!(d.transform(f64::NAN));
    }

    #[test]
    fn equal_weights() {
        let d = Discrete::new(vec![0_i32, 1, 2, 3, 4]).unwrap();
        let mut counts = [0u32; 5];
        for i in 0..10_000 {
            counts[d.index_of(f64::from(i) / 10_000.0)] += 1;
        }
        for c in counts {
            assert!((1998..=2002).contains(&c), "{counts:?}");
        }
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Discrete::<f64>::new(vec![]).unwrap_err(), Error::EmptyChoices);
    }
}
