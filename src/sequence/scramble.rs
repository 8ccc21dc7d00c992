//! Matoušek linear scrambling of digital nets.
//!
//! Each coordinate is read as a `P`-digit binary expansion. For every
//! dimension independently, the leading `m = log2(N)` digits are replaced
//! by `M · d + C (mod 2)` where `M` is a random lower-triangular matrix
//! over GF(2) with unit diagonal and `C` a random shift, and every digit
//! past position `m` is replaced by a fresh uniform random bit. Because `M`
//! is invertible, every dyadic interval of width `2^-m` still holds exactly
//! one point after scrambling.
//!
//! Digit expansions are packed into `u64` words, leading digit first.

use super::SampleMatrix;
use crate::error::{Error, Result};

/// Default number of binary digits, enough to exceed `f32` resolution.
pub const DEFAULT_PRECISION: u32 = 32;

/// Largest number of binary digits an `f64` can carry exactly.
pub const MAX_PRECISION: u32 = f64::MANTISSA_DIGITS;

/// Seeded Matoušek scrambler.
///
/// # Examples
///
/// ```
/// use quasisweep::sequence::scramble::Scrambler;
/// use quasisweep::sequence::sobol;
///
/// let net = sobol::generate(2, 5).unwrap();
/// let a = Scrambler::new(7).scramble(&net).unwrap();
/// let b = Scrambler::new(7).scramble(&net).unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scrambler {
    seed: u64,
    precision: u32,
}

impl Scrambler {
    /// Creates a scrambler with the given seed and [`DEFAULT_PRECISION`] digits.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            precision: DEFAULT_PRECISION,
        }
    }

    /// Sets the number of binary digits `P` per coordinate.
    #[must_use]
    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Returns the seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Scrambles `matrix`, returning a new matrix of the same shape.
    ///
    /// The same seed and input always produce a bit-identical result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrecision`] if the precision is outside
    /// `1..=MAX_PRECISION`, [`Error::NotPowerOfTwo`] if the number of points
    /// is not `2^m`, and [`Error::InsufficientPrecision`] if `m` exceeds the
    /// precision. All checks run before any digit is touched.
    pub fn scramble(&self, matrix: &SampleMatrix) -> Result<SampleMatrix> {
        let precision = self.precision;
        if !(1..=MAX_PRECISION).contains(&precision) {
            return Err(Error::InvalidPrecision {
                precision,
                max: MAX_PRECISION,
            });
        }
        let exponent = matrix
            .exponent()
            .ok_or(Error::NotPowerOfTwo(matrix.len()))?;
        if exponent > precision {
            return Err(Error::InsufficientPrecision {
                precision,
                exponent,
            });
        }

        let points = matrix.len();
        let scale = pow2(precision);
        let mut rng = fastrand::Rng::with_seed(self.seed);
        let mut digits = vec![0u64; points];
        let mut data = Vec::with_capacity(matrix.dimensions() * points);

        for row in matrix.rows() {
            for (slot, &x) in digits.iter_mut().zip(row) {
                *slot = to_digits(x, precision, scale);
            }
            scramble_row(&mut digits, exponent, precision, &mut rng);
            data.extend(digits.iter().map(|&d| from_digits(d, scale)));
        }

        trace_debug!(
            seed = self.seed,
            exponent,
            dimensions = matrix.dimensions(),
            "scrambled sample matrix"
        );
        Ok(SampleMatrix::from_raw(matrix.dimensions(), points, data))
    }
}

/// Scrambles `matrix` with the given seed at [`DEFAULT_PRECISION`].
///
/// # Errors
///
/// See [`Scrambler::scramble`].
pub fn scramble(seed: u64, matrix: &SampleMatrix) -> Result<SampleMatrix> {
    Scrambler::new(seed).scramble(matrix)
}

/// Applies one random linear scramble, shift, and random tail to a row of
/// `P`-digit expansions.
fn scramble_row(digits: &mut [u64], exponent: u32, precision: u32, rng: &mut fastrand::Rng) {
    let tail_bits = precision - exponent;
    let tail_mask = low_mask(tail_bits);
    let lead_mask = low_mask(exponent);

    // Row i of M (digit i + 1, counted from the most significant) sits at
    // bit `exponent - 1 - i` of the leading-digit word. Lower-triangular
    // means it may only read digits at or above its own position.
    let matrix: Vec<u64> = (0..exponent)
        .map(|i| {
            let own = 1u64 << (exponent - 1 - i);
            let above = lead_mask & !low_mask(exponent - i);
            own | (rng.u64(..) & above)
        })
        .collect();
    let shift = rng.u64(..) & lead_mask;

    for d in digits.iter_mut() {
        let lead = *d >> tail_bits;
        let mut scrambled = 0u64;
        for (i, &row) in matrix.iter().enumerate() {
            let bit = u64::from((row & lead).count_ones() & 1);
            scrambled |= bit << (exponent as usize - 1 - i);
        }
        scrambled ^= shift;
        *d = (scrambled << tail_bits) | (rng.u64(..) & tail_mask);
    }
}

fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

#[allow(clippy::cast_precision_loss)]
fn pow2(bits: u32) -> f64 {
    (1u64 << bits) as f64
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn to_digits(x: f64, precision: u32, scale: f64) -> u64 {
    let max = low_mask(precision);
    let d = (x * scale).floor();
    if d <= 0.0 {
        0
    } else if d >= max as f64 {
        max
    } else {
        d as u64
    }
}

#[allow(clippy::cast_precision_loss)]
fn from_digits(d: u64, scale: f64) -> f64 {
    d as f64 / scale
}

#[cfg(test)]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
mod tests {
    use super::*;
    use crate::sequence::sobol;

    fn assert_stratified(row: &[f64], k: u32) {
        let n = 1usize << k;
        let mut hits = vec![0u32; n];
        for &x in &row[..n] {
            hits[(x * n as f64) as usize] += 1;
        }
        assert!(hits.iter().all(|&h| h == 1), "2^{k} bins: {hits:?}");
    }

    #[test]
    fn preserves_shape_and_range() {
        let net = sobol::generate(4, 6).unwrap();
        let s = scramble(1, &net).unwrap();
        assert_eq!(s.dimensions(), 4);
        assert_eq!(s.len(), 64);
        for row in s.rows() {
            assert!(row.iter().all(|x| (0.0..1.0).contains(x)));
        }
    }

    #[test]
    fn preserves_one_dimensional_stratification() {
        let m = 7;
        let net = sobol::generate(6, m).unwrap();
        for seed in [0, 1, 99, 12_345] {
            let s = scramble(seed, &net).unwrap();
            for row in s.rows() {
                assert_stratified(row, m);
            }
        }
    }

    #[test]
    fn preserves_two_dimensional_net_property() {
        let m = 6;
        let net = sobol::generate(2, m).unwrap();
        let s = scramble(3, &net).unwrap();
        for a in 0..=m {
            let (na, nb) = (1usize << a, 1usize << (m - a));
            let mut hits = vec![0u32; na * nb];
            for j in 0..s.len() {
                let x = (s.row(0)[j] * na as f64) as usize;
                let y = (s.row(1)[j] * nb as f64) as usize;
                hits[x * nb + y] += 1;
            }
            assert!(hits.iter().all(|&h| h == 1));
        }
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let net = sobol::generate(3, 5).unwrap();
        assert_eq!(scramble(42, &net).unwrap(), scramble(42, &net).unwrap());
    }

    #[test]
    fn different_seeds_differ() {
        let net = sobol::generate(3, 5).unwrap();
        assert_ne!(scramble(1, &net).unwrap(), scramble(2, &net).unwrap());
    }

    #[test]
    fn zero_point_is_randomized() {
        let net = sobol::generate(2, 4).unwrap();
        let s = scramble(5, &net).unwrap();
        assert!(s.point(0).iter().any(|&x| x != 0.0));
    }

    #[test]
    fn dimensions_are_scrambled_independently() {
        // Identical input rows must not come out identical.
        let net = sobol::generate(1, 5).unwrap();
        let row = net.row(0).to_vec();
        let twin = SampleMatrix::from_rows(vec![row.clone(), row]).unwrap();
        let s = scramble(8, &twin).unwrap();
        assert_ne!(s.row(0), s.row(1));
    }

    #[test]
    fn single_point_gets_random_digits() {
        let net = sobol::generate(2, 0).unwrap();
        let s = scramble(11, &net).unwrap();
        assert_eq!(s.len(), 1);
        assert!(s.row(0)[0] < 1.0);
    }

    #[test]
    fn accepts_coordinate_one() {
        let m = SampleMatrix::from_rows(vec![vec![0.0, 1.0]]).unwrap();
        let s = scramble(0, &m).unwrap();
        assert!(s.row(0).iter().all(|x| (0.0..1.0).contains(x)));
        assert_stratified(s.row(0), 1);
    }

    #[test]
    fn rejects_non_power_of_two() {
        let m = SampleMatrix::from_rows(vec![vec![0.1, 0.2, 0.3]]).unwrap();
        assert_eq!(scramble(0, &m).unwrap_err(), Error::NotPowerOfTwo(3));
        let empty = SampleMatrix::from_rows(vec![]).unwrap();
        assert_eq!(scramble(0, &empty).unwrap_err(), Error::NotPowerOfTwo(0));
    }

    #[test]
    fn rejects_bad_precision() {
        let net = sobol::generate(1, 4).unwrap();
        assert!(matches!(
            Scrambler::new(0).precision(0).scramble(&net),
            Err(Error::InvalidPrecision { .. })
        ));
        assert!(matches!(
            Scrambler::new(0).precision(60).scramble(&net),
            Err(Error::InvalidPrecision { .. })
        ));
        assert_eq!(
            Scrambler::new(0).precision(3).scramble(&net).unwrap_err(),
            Error::InsufficientPrecision {
                precision: 3,
                exponent: 4
            }
        );
    }

    #[test]
    fn high_precision_stays_below_one() {
        let net = sobol::generate(2, 5).unwrap();
        let s = Scrambler::new(4).precision(MAX_PRECISION).scramble(&net).unwrap();
        for row in s.rows() {
            assert!(row.iter().all(|x| (0.0..1.0).contains(x)));
            assert_stratified(row, 5);
        }
    }
}
