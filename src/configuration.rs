//! Generated configuration records.

use core::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value::{ScaleValue, Value};

/// One fully instantiated assignment of values to every declared dimension.
///
/// Fields appear in declaration order. Records of one batch share their
/// name list.
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    index: usize,
    names: Arc<[String]>,
    values: Vec<Value>,
}

impl Configuration {
    pub(crate) fn new(index: usize, names: Arc<[String]>, values: Vec<Value>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self {
            index,
            names,
            values,
        }
    }

    /// Returns the position of this record in its batch (the sample column).
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the field names in declaration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the field values in declaration order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns the value of the named field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.values[i])
    }

    /// Returns the named field converted into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingDimension`] if no field has this name and
    /// [`Error::TypeNarrowing`] if the value cannot be represented as `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use quasisweep::scale::{Discrete, MinMax};
    /// use quasisweep::{Design, Space};
    ///
    /// let space = Space::builder()
    ///     .dimension("layers", Discrete::new(vec![2_i64, 4, 8]).unwrap())
    ///     .dimension("dropout", MinMax::new(0.0, 0.5).unwrap())
    ///     .build()
    ///     .unwrap();
    /// let configs = Design::builder().exponent(2).build().unwrap().generate(&space).unwrap();
    ///
    /// let layers: i32 = configs[0].get_as("layers").unwrap();
    /// assert!([2, 4, 8].contains(&layers));
    /// ```
    pub fn get_as<T: ScaleValue>(&self, name: &str) -> Result<T> {
        let value = self
            .get(name)
            .ok_or_else(|| Error::MissingDimension(name.to_owned()))?;
        T::from_value(value)
    }

    /// Iterates over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Converts this record into a user type.
    ///
    /// # Errors
    ///
    /// Propagates the error of [`FromConfiguration::from_configuration`].
    pub fn parse<T: FromConfiguration>(&self) -> Result<T> {
        T::from_configuration(self)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {{", self.index)?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {name}: {value}")?;
        }
        f.write_str(" }")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Configuration {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Types that can be built from a [`Configuration`].
///
/// Derive it for structs with `#[derive(FromConfiguration)]` (requires the
/// `derive` feature); each named field is read from the dimension of the
/// same name.
pub trait FromConfiguration: Sized {
    /// Builds `Self` from the record.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is missing or has an incompatible type.
    fn from_configuration(configuration: &Configuration) -> Result<Self>;
}
