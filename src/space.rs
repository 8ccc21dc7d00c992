//! Ordered dimension declarations.
//!
//! A [`Space`] maps parameter names to scales. Declaration order fixes which
//! row of the sample matrix each dimension reads and the field order of
//! every generated [`Configuration`](crate::Configuration).

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::scale::{DynScale, Scale};

/// One named dimension of a [`Space`].
#[derive(Debug)]
pub struct Dimension {
    name: String,
    scale: Box<dyn DynScale>,
}

impl Dimension {
    /// Returns the dimension name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type-erased scale.
    #[must_use]
    pub fn scale(&self) -> &dyn DynScale {
        self.scale.as_ref()
    }
}

/// An ordered set of uniquely named dimensions.
///
/// # Examples
///
/// ```
/// use quasisweep::scale::{Discrete, Geometric, MinMax};
/// use quasisweep::Space;
///
/// let space = Space::builder()
///     .dimension("lr", Geometric::log_uniform(1e-5, 1e-1).unwrap())
///     .dimension("dropout", MinMax::new(0.0, 0.5).unwrap())
///     .dimension("optimizer", Discrete::labels(["sgd", "adam"]).unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(space.len(), 3);
/// assert_eq!(space.names()[1], "dropout");
/// ```
#[derive(Debug)]
pub struct Space {
    dimensions: Vec<Dimension>,
    names: Arc<[String]>,
}

impl Space {
    /// Starts an empty builder.
    #[must_use]
    pub fn builder() -> SpaceBuilder {
        SpaceBuilder {
            dimensions: Vec::new(),
        }
    }

    /// Returns the number of dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    /// Returns `true` if no dimensions are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Returns the dimension names in declaration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn shared_names(&self) -> Arc<[String]> {
        Arc::clone(&self.names)
    }

    /// Iterates over the dimensions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Dimension> {
        self.dimensions.iter()
    }

    /// Looks up a dimension by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }
}

/// Builder for a [`Space`].
#[derive(Debug)]
pub struct SpaceBuilder {
    dimensions: Vec<Dimension>,
}

impl SpaceBuilder {
    /// Appends a named dimension.
    #[must_use]
    pub fn dimension<S>(mut self, name: impl Into<String>, scale: S) -> Self
    where
        S: Scale + 'static,
    {
        self.dimensions.push(Dimension {
            name: name.into(),
            scale: Box::new(scale),
        });
        self
    }

    /// Appends a named dimension with an already type-erased scale.
    #[must_use]
    pub fn dyn_dimension(mut self, name: impl Into<String>, scale: Box<dyn DynScale>) -> Self {
        self.dimensions.push(Dimension {
            name: name.into(),
            scale,
        });
        self
    }

    /// Validates the declarations and builds the space.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateDimension`] if two dimensions share a name.
    pub fn build(self) -> Result<Space> {
        let mut seen = HashSet::with_capacity(self.dimensions.len());
        for dim in &self.dimensions {
            if !seen.insert(dim.name.as_str()) {
                return Err(Error::DuplicateDimension(dim.name.clone()));
            }
        }
        let names = self.dimensions.iter().map(|d| d.name.clone()).collect();
        Ok(Space {
            dimensions: self.dimensions,
            names,
        })
    }
}
