//! Assemble sample matrices and dimension declarations into configurations.
//!
//! [`Design`] is the usual entry point. It generates a `d × 2^m` Sobol'
//! net, scrambles it with its seed, and maps every column through the
//! scales of a [`Space`]. [`assemble`] and [`assemble_range`] do the last
//! step alone, for callers that supply or share their own
//! [`SampleMatrix`].
//!
//! # Example
//!
//! ```
//! use quasisweep::scale::{Discrete, Geometric, MinMax};
//! use quasisweep::{Design, Space};
//!
//! let space = Space::builder()
//!     .dimension("lr", Geometric::log_uniform(1e-5, 1e-1).unwrap())
//!     .dimension("momentum", MinMax::new(0.8, 0.99).unwrap())
//!     .dimension("batch", Discrete::new(vec![32_i64, 64, 128]).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let design = Design::builder().seed(42).exponent(5).build().unwrap();
//! let configs = design.generate(&space).unwrap();
//! assert_eq!(configs.len(), 32);
//!
//! for config in &configs {
//!     let lr: f64 = config.get_as("lr").unwrap();
//!     assert!((1e-5..=1e-1).contains(&lr));
//! }
//! ```

mod builder;

use core::ops::Range;
use std::sync::Arc;

pub use builder::DesignBuilder;

use crate::configuration::Configuration;
use crate::error::{Error, Result};
use crate::sequence::SampleMatrix;
use crate::sequence::scramble::Scrambler;
use crate::sequence::sobol;
use crate::space::Space;

/// Seed used by [`sample`] and by [`Design`] when none is set.
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Settings for one deterministic batch of `2^m` configurations.
///
/// A design holds no mutable state: the same design and space always yield
/// bit-identical configurations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Design {
    seed: u64,
    exponent: u32,
    scramble: bool,
    precision: u32,
}

impl Design {
    /// Returns a builder with default settings.
    #[must_use]
    pub fn builder() -> DesignBuilder {
        DesignBuilder::new()
    }

    /// Creates a scrambled design of `2^exponent` points with [`DEFAULT_SEED`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExponent`] if the exponent is too large.
    pub fn new(exponent: u32) -> Result<Self> {
        Self::builder().exponent(exponent).build()
    }

    /// Returns the scrambling seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns `m`.
    #[must_use]
    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Returns the number of configurations, `2^m`.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        1 << self.exponent
    }

    /// Returns `true` if the Sobol' net is scrambled.
    #[must_use]
    pub fn is_scrambled(&self) -> bool {
        self.scramble
    }

    /// Generates the `dimensions × 2^m` sample matrix of this design.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionOutOfRange`] if `dimensions` exceeds
    /// [`MAX_DIMENSION`](crate::sequence::MAX_DIMENSION).
    pub fn sample_matrix(&self, dimensions: usize) -> Result<SampleMatrix> {
        let net = sobol::generate(dimensions, self.exponent)?;
        if !self.scramble {
            return Ok(net);
        }
        Scrambler::new(self.seed)
            .precision(self.precision)
            .scramble(&net)
    }

    /// Generates one configuration per sample point of this design.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Design::sample_matrix`] and [`assemble`].
    pub fn generate(&self, space: &Space) -> Result<Vec<Configuration>> {
        let matrix = self.sample_matrix(space.len())?;
        let configurations = assemble(&matrix, space)?;
        trace_info!(
            seed = self.seed,
            exponent = self.exponent,
            dimensions = space.len(),
            "generated configurations"
        );
        Ok(configurations)
    }
}

/// Builds one configuration per column of `matrix`.
///
/// Row `i` of the matrix feeds dimension `i` of the space. Each value is
/// narrowed into its scale's declared type; the first value that does not
/// fit aborts the whole batch.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the matrix has a different
/// number of rows than the space has dimensions, and
/// [`Error::TypeNarrowing`] if a scale output does not fit its declared type.
pub fn assemble(matrix: &SampleMatrix, space: &Space) -> Result<Vec<Configuration>> {
    assemble_range(matrix, space, 0..matrix.len())
}

/// Builds the configurations of the columns in `columns` only.
///
/// Because the matrix is read-only and each record depends only on its own
/// column, disjoint ranges can be assembled on different threads and
/// concatenated in order to reproduce [`assemble`].
///
/// # Errors
///
/// Returns [`Error::ColumnRange`] if `columns` is not within the matrix,
/// plus the errors of [`assemble`].
///
/// # Examples
///
/// ```
/// use quasisweep::design::{assemble, assemble_range};
/// use quasisweep::scale::MinMax;
/// use quasisweep::{Design, Space};
///
/// let space = Space::builder()
///     .dimension("x", MinMax::new(0.0, 1.0).unwrap())
///     .build()
///     .unwrap();
/// let matrix = Design::new(4).unwrap().sample_matrix(space.len()).unwrap();
///
/// let mut parts = assemble_range(&matrix, &space, 0..8).unwrap();
/// parts.extend(assemble_range(&matrix, &space, 8..16).unwrap());
/// assert_eq!(parts, assemble(&matrix, &space).unwrap());
/// ```
pub fn assemble_range(
    matrix: &SampleMatrix,
    space: &Space,
    columns: Range<usize>,
) -> Result<Vec<Configuration>> {
    if matrix.dimensions() != space.len() {
        return Err(Error::DimensionMismatch {
            expected: space.len(),
            got: matrix.dimensions(),
        });
    }
    if columns.start > columns.end || columns.end > matrix.len() {
        return Err(Error::ColumnRange {
            start: columns.start,
            end: columns.end,
            len: matrix.len(),
        });
    }

    let names = space.shared_names();
    let rows: Vec<&[f64]> = matrix.rows().collect();
    columns
        .map(|column| {
            let values = space
                .iter()
                .zip(&rows)
                .map(|(dim, row)| {
                    dim.scale().evaluate(row[column]).inspect_err(|_err| {
                        trace_debug!(dimension = dim.name(), column, error = %_err, "value does not fit declared type");
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Configuration::new(column, Arc::clone(&names), values))
        })
        .collect()
}

/// Generates `2^exponent` configurations of `space` with [`DEFAULT_SEED`].
///
/// # Errors
///
/// See [`Design::generate`].
pub fn sample(space: &Space, exponent: u32) -> Result<Vec<Configuration>> {
    Design::new(exponent)?.generate(space)
}

/// Generates `2^exponent` configurations of `space` with the given seed.
///
/// # Errors
///
/// See [`Design::generate`].
pub fn sample_with_seed(space: &Space, exponent: u32, seed: u64) -> Result<Vec<Configuration>> {
    Design::builder()
        .seed(seed)
        .exponent(exponent)
        .build()?
        .generate(space)
}
