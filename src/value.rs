//! Runtime value model for configuration fields.
//!
//! Every scale declares an output [`ValueType`]. When a configuration is
//! assembled, each produced [`Value`] is narrowed into that declared type
//! with [`Value::narrow`], which refuses lossy conversions instead of
//! truncating.

use core::fmt;

use crate::error::{Error, Result};

/// The declared type of a scale's output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueType {
    /// A boolean.
    Bool,
    /// A 32-bit signed integer.
    I32,
    /// A 64-bit signed integer.
    I64,
    /// A 32-bit float.
    F32,
    /// A 64-bit float.
    F64,
    /// An owned string.
    Str,
    /// No declared type; values pass through unchanged.
    Any,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Bool => "bool",
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
            ValueType::Str => "string",
            ValueType::Any => "any",
        };
        f.write_str(name)
    }
}

/// A single configuration field value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// A boolean value.
    Bool(bool),
    /// A 32-bit signed integer value.
    I32(i32),
    /// A 64-bit signed integer value.
    I64(i64),
    /// A 32-bit float value.
    F32(f32),
    /// A 64-bit float value.
    F64(f64),
    /// A string value.
    Str(String),
}

impl Value {
    /// Returns the runtime type of this value.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::I32(_) => ValueType::I32,
            Value::I64(_) => ValueType::I64,
            Value::F32(_) => ValueType::F32,
            Value::F64(_) => ValueType::F64,
            Value::Str(_) => ValueType::Str,
        }
    }

    /// Returns the zero element of `ty`: `false`, `0`, `0.0` or the empty
    /// string. [`ValueType::Any`] has none.
    #[must_use]
    pub fn zero(ty: ValueType) -> Option<Value> {
        match ty {
            ValueType::Bool => Some(Value::Bool(false)),
            ValueType::I32 => Some(Value::I32(0)),
            ValueType::I64 => Some(Value::I64(0)),
            ValueType::F32 => Some(Value::F32(0.0)),
            ValueType::F64 => Some(Value::F64(0.0)),
            ValueType::Str => Some(Value::Str(String::new())),
            ValueType::Any => None,
        }
    }

    /// Returns the value as an `f64` if it is numeric.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::I32(v) => Some(f64::from(v)),
            Value::I64(v) => Some(v as f64),
            Value::F32(v) => Some(f64::from(v)),
            Value::F64(v) => Some(v),
            Value::Bool(_) | Value::Str(_) => None,
        }
    }

    /// Returns the string slice if this is a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Converts this value into `target` without losing information.
    ///
    /// Widening conversions always succeed. Narrowing conversions succeed
    /// only when the value is exactly representable in the target type:
    /// floats must be finite and integral to become integers, integers must
    /// be in range, and `f64` values must not overflow `f32`. `f64 → f32`
    /// rounds to the nearest `f32`. [`ValueType::Any`] accepts everything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeNarrowing`] if the value cannot be represented in `target`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp
    )]
    pub fn narrow(self, target: ValueType) -> Result<Value> {
        if target == ValueType::Any || target == self.value_type() {
            return Ok(self);
        }
        let narrowed = match (&self, target) {
            (&Value::I32(v), ValueType::I64) => Some(Value::I64(i64::from(v))),
            (&Value::I32(v), ValueType::F64) => Some(Value::F64(f64::from(v))),
            (&Value::I32(v), ValueType::F32) => {
                let f = v as f32;
                (f as i128 == i128::from(v)).then_some(Value::F32(f))
            }
            (&Value::I64(v), ValueType::I32) => i32::try_from(v).ok().map(Value::I32),
            (&Value::I64(v), ValueType::F64) => {
                let f = v as f64;
                (f as i128 == i128::from(v)).then_some(Value::F64(f))
            }
            (&Value::I64(v), ValueType::F32) => {
                let f = v as f32;
                (f as i128 == i128::from(v)).then_some(Value::F32(f))
            }
            (&Value::F32(v), ValueType::F64) => Some(Value::F64(f64::from(v))),
            (&Value::F32(v), ValueType::I32 | ValueType::I64) => {
                float_to_int(f64::from(v), target)
            }
            (&Value::F64(v), ValueType::F32) => {
                let f = v as f32;
                (v.is_nan() || f.is_infinite() == v.is_infinite()).then_some(Value::F32(f))
            }
            (&Value::F64(v), ValueType::I32 | ValueType::I64) => float_to_int(v, target),
            _ => None,
        };
        narrowed.ok_or_else(|| Error::TypeNarrowing {
            value: self.to_string(),
            target,
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn float_to_int(v: f64, target: ValueType) -> Option<Value> {
    // 2^63 is exactly representable; i64::MAX is not.
    const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
    if !v.is_finite() || v.fract() != 0.0 {
        return None;
    }
    match target {
        ValueType::I32 => (v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX))
            .then(|| Value::I32(v as i32)),
        ValueType::I64 => (v >= -I64_UPPER && v < I64_UPPER).then(|| Value::I64(v as i64)),
        _ => None,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}_bool"),
            Value::I32(v) => write!(f, "{v}_i32"),
            Value::I64(v) => write!(f, "{v}_i64"),
            Value::F32(v) => write!(f, "{v}_f32"),
            Value::F64(v) => write!(f, "{v}_f64"),
            Value::Str(v) => write!(f, "{v:?}"),
        }
    }
}

/// A Rust type that can be produced by a scale and stored in a configuration.
///
/// `VALUE_TYPE` is the statically declared output type. The dynamic
/// [`Value`] implements this trait with [`ValueType::Any`], meaning its
/// concrete type is only known at runtime.
pub trait ScaleValue: Clone + fmt::Debug + Send + Sync + 'static {
    /// The declared type tag for this Rust type.
    const VALUE_TYPE: ValueType;

    /// Converts into a dynamic [`Value`].
    fn into_value(self) -> Value;

    /// Reads a dynamic [`Value`] back, narrowing it into this type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeNarrowing`] if the value cannot be represented.
    fn from_value(value: &Value) -> Result<Self>;
}

macro_rules! impl_scale_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ScaleValue for $ty {
                const VALUE_TYPE: ValueType = ValueType::$variant;

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: &Value) -> Result<Self> {
                    match value.clone().narrow(ValueType::$variant)? {
                        Value::$variant(v) => Ok(v),
                        other => Err(Error::TypeNarrowing {
                            value: other.to_string(),
                            target: ValueType::$variant,
                        }),
                    }
                }
            }
        )*
    };
}

impl_scale_value! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    String => Str,
}

impl ScaleValue for Value {
    const VALUE_TYPE: ValueType = ValueType::Any;

    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}
