//! Typed, composable mappings from `[0, 1]` to parameter values.
//!
//! A [`Scale`] turns one raw coordinate of a sample point into a parameter
//! value of a declared output type. Built-in scales:
//!
//! | Scale | Maps `u` to |
//! |-------|-------------|
//! | [`Constant`] | one fixed value |
//! | [`Discrete`] | one of `N` equally weighted values |
//! | [`MinMax`] | `lo + u · (hi − lo)` |
//! | [`Geometric`] | a log-like range with constant multiplicative growth |
//! | [`Mixture`] | a weighted choice between sub-scales |
//! | [`Composed`] | a post-processing function applied to another scale |
//! | [`Declared`] | another scale, narrowed into an explicit [`ValueType`] |
//!
//! # Example
//!
//! ```
//! use quasisweep::scale::{Geometric, MinMax, Mixture, Scale};
//!
//! let dropout = MinMax::new(0.0, 0.5).unwrap();
//! assert_eq!(dropout.transform(0.5), 0.25);
//!
//! let lr = Geometric::log_uniform(1e-4, 1e-1).unwrap();
//! assert!((1e-4..=1e-1).contains(&lr.transform(0.3)));
//!
//! // Round a float range to whole numbers; the output type stays f32.
//! let width = MinMax::new(16.0_f32, 512.0).unwrap().map(f32::round);
//! assert_eq!(width.transform(0.5), 264.0);
//!
//! let mixed = Mixture::builder()
//!     .component(0.5, MinMax::new(0.0, 1.0).unwrap())
//!     .component(0.5, MinMax::new(10.0, 11.0).unwrap())
//!     .build()
//!     .unwrap();
//! assert_eq!(mixed.transform(0.75), 10.5);
//! ```

mod composed;
mod constant;
mod discrete;
mod geometric;
mod linear;
mod mixture;

use core::fmt::Debug;

pub use composed::{Composed, Declared, TypeInference};
pub use constant::Constant;
pub use discrete::Discrete;
pub use geometric::{Geometric, GeometricBuilder};
pub use linear::MinMax;
pub use mixture::{Mixture, MixtureBuilder};

use crate::error::Result;
use crate::value::{ScaleValue, Value, ValueType};

/// A boxed scale with a fixed output type.
pub type BoxedScale<T> = Box<dyn Scale<Output = T>>;

/// A typed mapping from a coordinate in `[0, 1]` to a parameter value.
///
/// `transform` must be total on the closed interval `[0, 1]`, and the
/// values it returns must be representable in [`Scale::output_type`].
pub trait Scale: Debug + Send + Sync {
    /// The Rust type produced by [`Scale::transform`].
    type Output: ScaleValue;

    /// Maps `u ∈ [0, 1]` to a value.
    fn transform(&self, u: f64) -> Self::Output;

    /// Returns the declared output type.
    ///
    /// Defaults to the static type of [`Scale::Output`]. Scales whose
    /// output is the dynamic [`Value`] override this with the type they
    /// inferred or were declared with.
    fn output_type(&self) -> ValueType {
        Self::Output::VALUE_TYPE
    }

    /// Applies `post` to every output of this scale.
    ///
    /// See [`Composed`] for how the output type is determined.
    #[must_use]
    fn map<F, U>(self, post: F) -> Composed<Self, F, U>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U + Send + Sync,
        U: ScaleValue,
    {
        Composed::new(self, post)
    }

    /// Declares an explicit output type; values are narrowed into it when
    /// configurations are assembled.
    #[must_use]
    fn declare(self, value_type: ValueType) -> Declared<Self>
    where
        Self: Sized,
    {
        Declared::new(self, value_type)
    }

    /// Boxes this scale behind its output type.
    #[must_use]
    fn boxed(self) -> BoxedScale<Self::Output>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<T: ScaleValue> Scale for Box<dyn Scale<Output = T>> {
    type Output = T;

    fn transform(&self, u: f64) -> T {
        (**self).transform(u)
    }

    fn output_type(&self) -> ValueType {
        (**self).output_type()
    }
}

/// Object-safe, type-erased view of a [`Scale`].
///
/// Implemented for every [`Scale`]; this is how a
/// [`Space`](crate::space::Space) stores dimensions of different output
/// types side by side.
pub trait DynScale: Debug + Send + Sync {
    /// Returns the declared output type.
    fn declared_type(&self) -> ValueType;

    /// Maps `u` to a value and narrows it into the declared type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeNarrowing`](crate::Error::TypeNarrowing) if the
    /// produced value cannot be represented in the declared type.
    fn evaluate(&self, u: f64) -> Result<Value>;
}

impl<S: Scale> DynScale for S {
    fn declared_type(&self) -> ValueType {
        self.output_type()
    }

    fn evaluate(&self, u: f64) -> Result<Value> {
        self.transform(u).into_value().narrow(self.output_type())
    }
}

/// Floating-point types usable as [`MinMax`] and [`Geometric`] bounds.
pub trait Real: ScaleValue + Copy + PartialOrd + sealed::Sealed {
    /// Converts from `f64`, rounding to the nearest representable value.
    fn from_f64(v: f64) -> Self;

    /// Widens to `f64`.
    fn to_f64(self) -> f64;
}

impl Real for f64 {
    fn from_f64(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Real for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

#[allow(unreachable_pub)]
mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Clamps `v` into `[low, high]`; round-off must never leave the range.
fn clamp_real<T: Real>(v: T, low: T, high: T) -> T {
    if v < low {
        low
    } else if v > high {
        high
    } else {
        v
    }
}

/// Clamps `u` into `[0, 1]`, mapping `NaN` to `0`.
fn unit(u: f64) -> f64 {
    if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0) }
}
