use crate::value::ValueType;

/// Errors returned by sequence generation, scale construction, and
/// configuration assembly.
///
/// Variants fall into two kinds: domain errors (a caller-supplied parameter
/// violates a precondition, see [`Error::is_domain`]) and type errors (a
/// scale produced a value that cannot be represented in its declared type,
/// see [`Error::is_type`]).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Returned when the exponent `m` would produce an unrepresentable sample count.
    #[error("invalid exponent: 2^{exponent} samples exceeds the maximum of 2^{max}")]
    InvalidExponent {
        /// The requested exponent.
        exponent: u32,
        /// The largest supported exponent.
        max: u32,
    },

    /// Returned when more dimensions are requested than direction numbers exist for.
    #[error("dimension count {requested} exceeds the supported maximum of {max}")]
    DimensionOutOfRange {
        /// The requested number of dimensions.
        requested: usize,
        /// The largest supported number of dimensions.
        max: usize,
    },

    /// Returned when a net of `dimensions × 2^exponent` coordinates would exceed the allocation cap.
    #[error("{dimensions} dimensions of 2^{exponent} points exceed the maximum of {max} coordinates")]
    TooManyCoordinates {
        /// The requested number of dimensions.
        dimensions: usize,
        /// The requested exponent.
        exponent: u32,
        /// The largest supported number of coordinates.
        max: usize,
    },

    /// Returned when a sample matrix handed to the scrambler does not hold `2^m` points.
    #[error("sample count {0} is not a power of two")]
    NotPowerOfTwo(usize),

    /// Returned when the digit precision is outside the supported range.
    #[error("invalid precision: {precision} digits must be in 1..={max}")]
    InvalidPrecision {
        /// The requested number of binary digits.
        precision: u32,
        /// The largest supported number of binary digits.
        max: u32,
    },

    /// Returned when the digit precision is smaller than `m = log2(N)`.
    #[error("precision of {precision} digits cannot scramble 2^{exponent} points")]
    InsufficientPrecision {
        /// The configured number of binary digits.
        precision: u32,
        /// The exponent derived from the sample count.
        exponent: u32,
    },

    /// Returned when an externally supplied sample matrix has rows of different lengths.
    #[error("ragged sample matrix: row {row} has {got} points, expected {expected}")]
    RaggedMatrix {
        /// The offending row.
        row: usize,
        /// The number of points in the first row.
        expected: usize,
        /// The number of points in the offending row.
        got: usize,
    },

    /// Returned when a sample matrix coordinate lies outside `[0, 1]`.
    #[error("coordinate {value} at row {row}, column {column} is outside [0, 1]")]
    CoordinateOutOfRange {
        /// The row (dimension) of the coordinate.
        row: usize,
        /// The column (point) of the coordinate.
        column: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when the sample matrix and the declared space disagree on dimensionality.
    #[error("dimension mismatch: space declares {expected} dimensions but the matrix has {got} rows")]
    DimensionMismatch {
        /// The number of declared dimensions.
        expected: usize,
        /// The number of rows in the sample matrix.
        got: usize,
    },

    /// Returned when a column range reaches past the end of the sample matrix.
    #[error("column range {start}..{end} is outside a matrix of {len} points")]
    ColumnRange {
        /// Start of the requested range.
        start: usize,
        /// End of the requested range.
        end: usize,
        /// Number of points in the matrix.
        len: usize,
    },

    /// Returned when the lower bound is greater than the upper bound or either is not finite.
    #[error("invalid bounds: low ({low}) must be finite and less than or equal to high ({high})")]
    InvalidBounds {
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when a geometric scale is given a non-positive lower bound.
    #[error("invalid log bounds: low ({0}) must be positive for a geometric scale")]
    InvalidLogBounds(f64),

    /// Returned when a geometric scale base is not finite and positive.
    #[error("invalid base: {0} must be finite and positive")]
    InvalidBase(f64),

    /// Returned when a geometric scale bias exponent is not finite and positive.
    #[error("invalid bias: {0} must be finite and positive")]
    InvalidBias(f64),

    /// Returned when a discrete scale is given no values.
    #[error("discrete choices cannot be empty")]
    EmptyChoices,

    /// Returned when a mixture is built without components.
    #[error("mixture requires at least one component")]
    EmptyMixture,

    /// Returned when a mixture proportion is not finite or not strictly positive.
    #[error("invalid proportion at component {index}: {value} must be finite and positive")]
    InvalidProportion {
        /// Index of the offending component.
        index: usize,
        /// The offending proportion.
        value: f64,
    },

    /// Returned when un-normalized mixture proportions do not sum to one.
    #[error("mixture proportions sum to {sum}, expected 1 within {atol}")]
    ProportionSum {
        /// The actual sum of proportions.
        sum: f64,
        /// The allowed absolute tolerance.
        atol: f64,
    },

    /// Returned when a mixture bin collapses to zero width after normalization.
    #[error("mixture bin {0} has zero width")]
    ZeroWidthBin(usize),

    /// Returned when two dimensions share a name.
    #[error("dimension '{0}' is declared more than once")]
    DuplicateDimension(String),

    /// Returned when a configuration has no dimension of the requested name.
    #[error("configuration has no dimension named '{0}'")]
    MissingDimension(String),

    /// Returned when a value cannot be represented in the requested type.
    #[error("cannot narrow {value} into {target}")]
    TypeNarrowing {
        /// Rendering of the value that failed to convert.
        value: String,
        /// The type it was narrowed into.
        target: ValueType,
    },
}

impl Error {
    /// Returns `true` for errors caused by invalid caller-supplied parameters.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        !self.is_type()
    }

    /// Returns `true` for errors raised when a value does not fit its declared type.
    #[must_use]
    pub fn is_type(&self) -> bool {
        matches!(self, Error::TypeNarrowing { .. })
    }
}

/// A specialized `Result` type for quasisweep operations.
pub type Result<T> = core::result::Result<T, Error>;
