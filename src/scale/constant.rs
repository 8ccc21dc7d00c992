use super::Scale;
use crate::value::ScaleValue;

/// A scale that ignores its input and always returns the same value.
///
/// # Examples
///
/// ```
/// use quasisweep::scale::{Constant, Scale};
///
/// let optimizer = Constant::new(String::from("adam"));
/// assert_eq!(optimizer.transform(0.0), "adam");
/// assert_eq!(optimizer.transform(1.0), "adam");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Constant<T> {
    value: T,
}

impl<T: ScaleValue> Constant<T> {
    /// Creates a constant scale.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// Returns the fixed value.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: ScaleValue> Scale for Constant<T> {
    type Output = T;

    fn transform(&self, _u: f64) -> T {
        self.value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueType;

    #[test]
    fn ignores_input() {
        let c = Constant::new(7_i32);
        for u in [0.0, 0.3, 1.0] {
            assert_eq!(c.transform(u), 7);
        }
        assert_eq!(c.output_type(), ValueType::I32);
    }
}
