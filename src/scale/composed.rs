use core::fmt;
use core::marker::PhantomData;
use core::panic::AssertUnwindSafe;
use std::panic::catch_unwind;

use super::Scale;
use crate::value::{ScaleValue, Value, ValueType};

/// How a [`Composed`] scale arrived at its output type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeInference {
    /// The post-function returns a concrete Rust type.
    Static(ValueType),
    /// The post-function returns a dynamic [`Value`]; its type was read
    /// from one call on the zero element of the wrapped scale's output type.
    Observed(ValueType),
    /// No type could be read: the wrapped scale's output type has no zero
    /// element, or the post-function panicked on it. Outputs are untyped.
    ///
    /// The panic is caught, but the panic hook still runs first, so the
    /// default hook prints its message to stderr. Under `panic = "abort"`
    /// nothing is caught and constructing the scale aborts the process.
    Erased,
}

impl TypeInference {
    /// Returns the declared output type this inference resolves to.
    #[must_use]
    pub fn value_type(self) -> ValueType {
        match self {
            TypeInference::Static(ty) | TypeInference::Observed(ty) => ty,
            TypeInference::Erased => ValueType::Any,
        }
    }
}

/// A scale followed by a post-processing function.
///
/// When `U` is a concrete type (`f32`, `i64`, `String`, ...) the output
/// type is known statically. When `U` is the dynamic [`Value`], the
/// constructor calls `post` once on the zero element of the wrapped scale's
/// output type (`0`, `0.0`, `false` or `""`, see [`Value::zero`]) and
/// declares the type of that result; later outputs of a different type are
/// narrowed into it at assembly and fail if they do not fit. The zero
/// element need not lie inside the wrapped scale's range.
///
/// If the wrapped scale is untyped, or `post` panics on the zero element,
/// the output is [`TypeInference::Erased`]. Catching that panic relies on
/// unwinding: the panic hook still prints the message, and a build with
/// `panic = "abort"` aborts instead. Post-functions that cannot accept zero
/// should return a concrete type or be wrapped with [`Scale::declare`].
///
/// # Examples
///
/// ```
/// use quasisweep::scale::{MinMax, Scale, TypeInference};
/// use quasisweep::{Value, ValueType};
///
/// let layers = MinMax::new(1.0, 8.0).unwrap().map(|x: f64| x.round() as i64);
/// assert_eq!(layers.output_type(), ValueType::I64);
///
/// let dynamic = MinMax::new(0.0, 1.0)
///     .unwrap()
///     .map(|x: f64| Value::Bool(x > 0.5));
/// assert_eq!(dynamic.inference(), TypeInference::Observed(ValueType::Bool));
/// ```
pub struct Composed<S, F, U> {
    inner: S,
    post: F,
    inference: TypeInference,
    _output: PhantomData<fn() -> U>,
}

impl<S, F, U> Composed<S, F, U>
where
    S: Scale,
    F: Fn(S::Output) -> U + Send + Sync,
    U: ScaleValue,
{
    /// Wraps `inner` with `post`, inferring the output type.
    #[must_use]
    pub fn new(inner: S, post: F) -> Self {
        let inference = if U::VALUE_TYPE == ValueType::Any {
            let zero = Value::zero(inner.output_type())
                .and_then(|v| S::Output::from_value(&v).ok());
            let observed = zero.and_then(|zero| {
                catch_unwind(AssertUnwindSafe(|| post(zero).into_value().value_type())).ok()
            });
            match observed {
                Some(ty) => TypeInference::Observed(ty),
                None => {
                    trace_debug!(?inner, "composed scale output type unknown; output is untyped");
                    TypeInference::Erased
                }
            }
        } else {
            TypeInference::Static(U::VALUE_TYPE)
        };
        Self {
            inner,
            post,
            inference,
            _output: PhantomData,
        }
    }

    /// Returns how the output type was determined.
    #[must_use]
    pub fn inference(&self) -> TypeInference {
        self.inference
    }

    /// Returns the wrapped scale.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S, F, U> Scale for Composed<S, F, U>
where
    S: Scale,
    F: Fn(S::Output) -> U + Send + Sync,
    U: ScaleValue,
{
    type Output = U;

    fn transform(&self, u: f64) -> U {
        (self.post)(self.inner.transform(u))
    }

    fn output_type(&self) -> ValueType {
        self.inference.value_type()
    }
}

impl<S: fmt::Debug, F, U> fmt::Debug for Composed<S, F, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composed")
            .field("inner", &self.inner)
            .field("inference", &self.inference)
            .finish_non_exhaustive()
    }
}

/// A scale with an explicitly declared output type.
///
/// The wrapped scale's values are narrowed into the declared type when a
/// configuration is assembled; values that do not fit (for example `3.7`
/// declared as [`ValueType::I64`]) fail loudly instead of truncating.
///
/// # Examples
///
/// ```
/// use quasisweep::scale::{Discrete, DynScale, Scale};
/// use quasisweep::{Value, ValueType};
///
/// let batch = Discrete::new(vec![16_i64, 32, 64]).unwrap().declare(ValueType::I32);
/// assert_eq!(batch.evaluate(1.0), Ok(Value::I32(64)));
/// ```
#[derive(Clone, Debug)]
pub struct Declared<S> {
    inner: S,
    value_type: ValueType,
}

impl<S: Scale> Declared<S> {
    /// Wraps `inner` with the declared `value_type`.
    #[must_use]
    pub fn new(inner: S, value_type: ValueType) -> Self {
        Self { inner, value_type }
    }
}

impl<S: Scale> Scale for Declared<S> {
    type Output = Value;

    fn transform(&self, u: f64) -> Value {
        self.inner.transform(u).into_value()
    }

    fn output_type(&self) -> ValueType {
        self.value_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{Constant, Discrete, DynScale, MinMax};

    #[test]
    fn static_type_from_concrete_post_function() {
        let s = MinMax::new(0.0, 10.0).unwrap().map(|x: f64| x > 5.0);
        assert_eq!(s.inference(), TypeInference::Static(ValueType::Bool));
        assert!(!s.transform(0.2));
        assert!(s.transform(0.9));
    }

    #[test]
    fn rounding_f32_scale_stays_f32() {
        let s = MinMax::new(0.0_f32, 100.0).unwrap().map(f32::round);
        assert_eq!(s.output_type(), ValueType::F32);
        for i in 0..=50 {
            let v = s.transform(f64::from(i) / 50.0);
            assert_eq!(v.fract(), 0.0);
            assert_eq!(s.evaluate(f64::from(i) / 50.0), Ok(Value::F32(v)));
        }
    }

    #[test]
    fn dynamic_post_function_is_typed_from_zero() {
        let s = Discrete::new(vec![2_i64, 4, 8])
            .unwrap()
            .map(|x: i64| Value::I64(x * 10));
        assert_eq!(s.inference(), TypeInference::Observed(ValueType::I64));
        assert_eq!(s.evaluate(1.0), Ok(Value::I64(80)));
    }

    #[test]
    fn zero_element_is_used_even_outside_the_range() {
        let s = MinMax::new(1.0, 2.0).unwrap().map(|x: f64| {
            if x == 0.0 {
                Value::I64(0)
            } else {
                Value::F64(x)
            }
        });
        assert_eq!(s.inference(), TypeInference::Observed(ValueType::I64));

        let undefined_at_zero = MinMax::new(1.0, 2.0).unwrap().map(|x: f64| {
            assert!(x != 0.0, "undefined at zero");
            Value::F64(x.ln())
        });
        assert_eq!(undefined_at_zero.inference(), TypeInference::Erased);
        assert_eq!(undefined_at_zero.evaluate(0.0), Ok(Value::F64(0.0)));
    }

    #[test]
    fn declared_inner_supplies_its_zero() {
        let s = MinMax::new(1.0, 8.0)
            .unwrap()
            .map(f64::round)
            .declare(ValueType::I32)
            .map(|v: Value| {
                assert_eq!(v, Value::I32(0));
                Value::Bool(true)
            });
        assert_eq!(s.inference(), TypeInference::Observed(ValueType::Bool));
    }

    #[test]
    fn untyped_inner_erases_type() {
        let s = Constant::new(Value::Bool(true)).map(|v: Value| v);
        assert_eq!(s.inference(), TypeInference::Erased);
        assert_eq!(s.evaluate(0.3), Ok(Value::Bool(true)));
    }

    #[test]
    fn observed_type_rejects_later_mismatches() {
        let s = MinMax::new(0.0, 1.0).unwrap().map(|x: f64| {
            if x == 0.0 {
                Value::I64(0)
            } else {
                Value::F64(x)
            }
        });
        assert_eq!(s.output_type(), ValueType::I64);
        assert!(s.evaluate(0.5).unwrap_err().is_type());
    }

    #[test]
    fn panic_at_zero_erases_type() {
        let s = MinMax::new(0.0, 1.0).unwrap().map(|x: f64| {
            assert!(x > 0.0, "undefined at zero");
            Value::F64(x.ln())
        });
        assert_eq!(s.inference(), TypeInference::Erased);
        assert_eq!(s.output_type(), ValueType::Any);
        assert_eq!(s.evaluate(1.0), Ok(Value::F64(0.0)));
    }

    #[test]
    fn composition_nests() {
        let s = MinMax::new(0.0, 4.0)
            .unwrap()
            .map(f64::floor)
            .map(|x: f64| format!("bucket-{x}"));
        assert_eq!(s.output_type(), ValueType::Str);
        assert_eq!(s.transform(0.6), "bucket-2");
    }

    #[test]
    fn declared_scale_reports_declared_type() {
        let s = Discrete::new(vec![1_i64, 2, 3]).unwrap().declare(ValueType::F64);
        assert_eq!(s.declared_type(), ValueType::F64);
        assert_eq!(s.evaluate(0.0), Ok(Value::F64(1.0)));
    }
}
