//! Low-discrepancy sample matrices.
//!
//! A [`SampleMatrix`] holds `d × N` coordinates in `[0, 1]`: one row per
//! dimension, one column per point. [`sobol::generate`] builds the
//! unscrambled Sobol' net and [`scramble::Scrambler`] randomizes it while
//! keeping its equidistribution.
//!
//! # Example
//!
//! ```
//! use quasisweep::sequence::{scramble, sobol};
//!
//! let net = sobol::generate(3, 4).unwrap();
//! assert_eq!(net.dimensions(), 3);
//! assert_eq!(net.len(), 16);
//!
//! let scrambled = scramble::scramble(42, &net).unwrap();
//! assert_eq!(scrambled.len(), 16);
//! ```

mod direction;
pub mod scramble;
pub mod sobol;

pub use direction::MAX_DIMENSION;

use crate::error::{Error, Result};

/// A read-only `d × N` matrix of coordinates in `[0, 1]`.
///
/// Row `i` holds the coordinates of dimension `i` for all `N` points;
/// column `j` is the `j`-th point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")
)]
pub struct SampleMatrix {
    dimensions: usize,
    points: usize,
    /// Row-major coordinates, `dimensions * points` long.
    data: Vec<f64>,
}

impl SampleMatrix {
    pub(crate) fn from_raw(dimensions: usize, points: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), dimensions * points);
        Self {
            dimensions,
            points,
            data,
        }
    }

    /// Builds a matrix from externally supplied rows, one per dimension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RaggedMatrix`] if the rows differ in length, or
    /// [`Error::CoordinateOutOfRange`] if any coordinate lies outside `[0, 1]`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let dimensions = rows.len();
        let points = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(dimensions * points);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != points {
                return Err(Error::RaggedMatrix {
                    row,
                    expected: points,
                    got: values.len(),
                });
            }
            if let Some((column, &value)) = values
                .iter()
                .enumerate()
                .find(|(_, v)| !(0.0..=1.0).contains(*v))
            {
                return Err(Error::CoordinateOutOfRange { row, column, value });
            }
            data.extend(values);
        }
        Ok(Self::from_raw(dimensions, points, data))
    }

    /// Returns the number of dimensions (rows).
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Returns the number of points (columns).
    #[must_use]
    pub fn len(&self) -> usize {
        self.points
    }

    /// Returns `true` if the matrix holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points == 0
    }

    /// Returns `log2(N)` if the number of points is a power of two.
    #[must_use]
    pub fn exponent(&self) -> Option<u32> {
        self.points
            .is_power_of_two()
            .then(|| self.points.trailing_zeros())
    }

    /// Returns the coordinates of dimension `dim` across all points.
    ///
    /// # Panics
    ///
    /// Panics if `dim >= self.dimensions()`.
    #[must_use]
    pub fn row(&self, dim: usize) -> &[f64] {
        assert!(
            dim < self.dimensions,
            "row {dim} out of bounds for {} dimensions",
            self.dimensions
        );
        &self.data[dim * self.points..(dim + 1) * self.points]
    }

    /// Iterates over the rows in dimension order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.dimensions).map(move |dim| self.row(dim))
    }

    /// Returns one coordinate, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, dim: usize, column: usize) -> Option<f64> {
        (dim < self.dimensions && column < self.points)
            .then(|| self.data[dim * self.points + column])
    }

    /// Returns the coordinates of point `column` in dimension order.
    ///
    /// # Panics
    ///
    /// Panics if `column >= self.len()`.
    #[must_use]
    pub fn point(&self, column: usize) -> Vec<f64> {
        assert!(
            column < self.points,
            "column {column} out of bounds for {} points",
            self.points
        );
        (0..self.dimensions)
            .map(|dim| self.data[dim * self.points + column])
            .collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for SampleMatrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<SampleMatrix> for Vec<Vec<f64>> {
    fn from(matrix: SampleMatrix) -> Self {
        matrix.rows().map(<[f64]>::to_vec).collect()
    }
}
