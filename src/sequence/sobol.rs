//! Unscrambled Sobol' nets.
//!
//! A Sobol' sequence is only maximally equidistributed over its first `2^k`
//! points when the all-zero point is counted as the first point. Many
//! generators skip it; [`generate`] emits it explicitly and then walks the
//! Gray-code recurrence for the remaining `2^m − 1` points.

use super::SampleMatrix;
use super::direction::{DirectionNumbers, MAX_DIMENSION};
use crate::error::{Error, Result};

/// Largest supported exponent: nets hold at most `2^31` points.
pub const MAX_EXPONENT: u32 = 31;

/// Largest number of coordinates `d × 2^m` a single net may hold.
///
/// The matrix is one contiguous `f64` buffer, so this caps a net at 8 GiB.
/// Scrambling allocates a second matrix of the same size.
pub const MAX_COORDINATES: usize = 1 << 30;

/// `2^-32`, the weight of the last digit of a direction number.
const UNIT: f64 = 1.0 / 4_294_967_296.0;

/// Returns `N = 2^m`, validating the exponent.
///
/// # Errors
///
/// Returns [`Error::InvalidExponent`] if `exponent > MAX_EXPONENT`.
pub fn sample_count(exponent: u32) -> Result<usize> {
    if exponent > MAX_EXPONENT {
        return Err(Error::InvalidExponent {
            exponent,
            max: MAX_EXPONENT,
        });
    }
    Ok(1usize << exponent)
}

/// Generates the first `2^exponent` points of the `dimensions`-dimensional
/// Sobol' sequence, starting with the zero point.
///
/// The result is fully determined by its arguments. Every coordinate is a
/// multiple of `2^-32` in `[0, 1)`.
///
/// # Errors
///
/// Returns [`Error::InvalidExponent`] if `exponent` exceeds [`MAX_EXPONENT`],
/// [`Error::DimensionOutOfRange`] if `dimensions` exceeds [`MAX_DIMENSION`],
/// and [`Error::TooManyCoordinates`] if `dimensions × 2^exponent` exceeds
/// [`MAX_COORDINATES`]. All are checked before anything is allocated.
///
/// # Examples
///
/// ```
/// use quasisweep::sequence::sobol;
///
/// let net = sobol::generate(2, 2).unwrap();
/// assert_eq!(net.row(0), &[0.0, 0.5, 0.75, 0.25]);
/// assert_eq!(net.row(1), &[0.0, 0.5, 0.25, 0.75]);
/// ```
pub fn generate(dimensions: usize, exponent: u32) -> Result<SampleMatrix> {
    let points = sample_count(exponent)?;
    if dimensions > MAX_DIMENSION {
        return Err(Error::DimensionOutOfRange {
            requested: dimensions,
            max: MAX_DIMENSION,
        });
    }
    let coordinates = dimensions
        .checked_mul(points)
        .filter(|&n| n <= MAX_COORDINATES)
        .ok_or(Error::TooManyCoordinates {
            dimensions,
            exponent,
            max: MAX_COORDINATES,
        })?;

    let mut data = vec![0.0; coordinates];
    for (row, v) in data.chunks_exact_mut(points).zip(DirectionNumbers::new()) {
        let mut x = 0u32;
        // row[0] stays the zero point.
        for i in 1..points {
            x ^= v[(i - 1).trailing_ones() as usize];
            row[i] = f64::from(x) * UNIT;
        }
    }

    trace_debug!(dimensions, exponent, "generated sobol net");
    Ok(SampleMatrix::from_raw(dimensions, points, data))
}

#[cfg(test)]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
mod tests {
    use super::*;

    #[test]
    fn emits_exactly_two_to_the_m_points() {
        for m in 0..8 {
            let net = generate(3, m).unwrap();
            assert_eq!(net.len(), 1 << m);
            assert_eq!(net.dimensions(), 3);
        }
    }

    #[test]
    fn first_point_is_zero() {
        let net = generate(MAX_DIMENSION, 3).unwrap();
        assert_eq!(net.dimensions(), MAX_DIMENSION);
        assert!(net.point(0).iter().all(|&x| x == 0.0));
    }

    #[test]
    fn single_point_net_is_the_origin() {
        let net = generate(4, 0).unwrap();
        assert_eq!(net.len(), 1);
        assert_eq!(net.point(0), vec![0.0; 4]);
    }

    #[test]
    fn coordinates_in_unit_interval() {
        let net = generate(MAX_DIMENSION, 4).unwrap();
        for row in net.rows() {
            assert!(row.iter().all(|x| (0.0..1.0).contains(x)));
        }
    }

    #[test]
    fn every_prefix_is_stratified_in_each_dimension() {
        let m = 8;
        let net = generate(MAX_DIMENSION, m).unwrap();
        // The published dimensions, then a stride through the rest.
        let dims = (0..64).chain((64..MAX_DIMENSION).step_by(97));
        for (dim, row) in dims.map(|dim| (dim, net.row(dim))) {
            for k in 0..=m {
                let n = 1usize << k;
                let mut hits = vec![0u32; n];
                for &x in &row[..n] {
                    hits[(x * n as f64) as usize] += 1;
                }
                assert!(
                    hits.iter().all(|&h| h == 1),
                    "dimension {dim}, prefix 2^{k}: {hits:?}"
                );
            }
        }
    }

    #[test]
    fn first_two_dimensions_form_a_zero_net() {
        // Dimensions 0 and 1 form a (0, m, 2)-net: every dyadic box of
        // volume 2^-m holds exactly one point.
        let m = 6;
        let net = generate(2, m).unwrap();
        for a in 0..=m {
            let b = m - a;
            let (na, nb) = (1usize << a, 1usize << b);
            let mut hits = vec![0u32; na * nb];
            for j in 0..net.len() {
                let x = (net.row(0)[j] * na as f64) as usize;
                let y = (net.row(1)[j] * nb as f64) as usize;
                hits[x * nb + y] += 1;
            }
            assert!(hits.iter().all(|&h| h == 1), "boxes 2^-{a} x 2^-{b}");
        }
    }

    #[test]
    fn deterministic() {
        assert_eq!(generate(5, 6).unwrap(), generate(5, 6).unwrap());
    }

    #[test]
    fn rejects_large_exponent_and_dimension() {
        assert_eq!(
            generate(1, 40).unwrap_err(),
            Error::InvalidExponent {
                exponent: 40,
                max: MAX_EXPONENT
            }
        );
        assert!(matches!(
            generate(MAX_DIMENSION + 1, 2),
            Err(Error::DimensionOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_nets_past_the_coordinate_cap() {
        assert_eq!(
            generate(MAX_DIMENSION, 20).unwrap_err(),
            Error::TooManyCoordinates {
                dimensions: MAX_DIMENSION,
                exponent: 20,
                max: MAX_COORDINATES
            }
        );
        assert!(matches!(
            generate(1, MAX_EXPONENT),
            Err(Error::TooManyCoordinates { .. })
        ));
        assert!(matches!(
            generate(usize::MAX / 2, MAX_EXPONENT),
            Err(Error::DimensionOutOfRange { .. })
        ));
    }

    #[test]
    fn dimensions_past_the_published_table_are_nets() {
        let m = 10;
        let net = generate(1000, m).unwrap();
        for dim in [40, 41, 500, 999] {
            let mut hits = vec![0u32; 1 << m];
            for &x in net.row(dim) {
                hits[(x * f64::from(1u32 << m)) as usize] += 1;
            }
            assert!(hits.iter().all(|&h| h == 1), "dimension {dim}");
        }
        assert_ne!(net.row(998), net.row(999));
    }

    #[test]
    fn zero_dimensions_still_count_points() {
        let net = generate(0, 3).unwrap();
        assert_eq!(net.dimensions(), 0);
        assert_eq!(net.len(), 8);
    }
}
