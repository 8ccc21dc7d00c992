use quasisweep::Error;
use quasisweep::sequence::scramble::{self, Scrambler};
use quasisweep::sequence::{MAX_DIMENSION, SampleMatrix, sobol};

/// Number of points of `row` falling into each of `bins` equal-width bins.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn histogram(row: &[f64], bins: usize) -> Vec<usize> {
    let mut counts = vec![0; bins];
    for &x in row {
        counts[((x * bins as f64) as usize).min(bins - 1)] += 1;
    }
    counts
}

#[test]
fn every_scrambled_row_is_stratified() {
    let m = 8;
    let net = sobol::generate(1200, m).unwrap();
    let scrambled = scramble::scramble(2024, &net).unwrap();
    for (dim, row) in scrambled.rows().enumerate() {
        assert_eq!(histogram(row, 1 << m), vec![1; 1 << m], "dimension {dim}");
    }
}

#[test]
fn scrambled_prefixes_stay_stratified() {
    let net = sobol::generate(5, 10).unwrap();
    let scrambled = Scrambler::new(9).scramble(&net).unwrap();
    for row in scrambled.rows() {
        for k in 0..=10 {
            let prefix = &row[..1 << k];
            assert_eq!(histogram(prefix, 1 << k), vec![1; 1 << k], "prefix 2^{k}");
        }
    }
}

#[test]
fn first_two_dimensions_form_a_net_after_scrambling() {
    let m = 6;
    let scrambled = scramble::scramble(77, &sobol::generate(2, m).unwrap()).unwrap();
    // Every split of 2^m cells into 2^a × 2^(m-a) boxes holds one point per box.
    for a in 0..=m {
        let (cols, rows) = (1usize << a, 1usize << (m - a));
        let mut seen = vec![0usize; cols * rows];
        for j in 0..scrambled.len() {
            let point = scrambled.point(j);
            let cx = ((point[0] * cols as f64) as usize).min(cols - 1);
            let cy = ((point[1] * rows as f64) as usize).min(rows - 1);
            seen[cx * rows + cy] += 1;
        }
        assert!(seen.iter().all(|&c| c == 1), "split 2^{a} x 2^{}", m - a);
    }
}

#[test]
fn scrambled_mean_is_close_to_one_half() {
    let m = 12;
    let scrambled = scramble::scramble(5, &sobol::generate(10, m).unwrap()).unwrap();
    for row in scrambled.rows() {
        let mean = row.iter().sum::<f64>() / row.len() as f64;
        assert!((mean - 0.5).abs() < 1.0 / f64::from(1u32 << m), "mean {mean}");
    }
}

#[test]
fn coordinates_stay_in_unit_interval() {
    for seed in 0..16 {
        let scrambled = scramble::scramble(seed, &sobol::generate(8, 7).unwrap()).unwrap();
        for row in scrambled.rows() {
            assert!(row.iter().all(|x| (0.0..1.0).contains(x)));
        }
    }
}

#[test]
fn scrambler_accepts_external_matrices() {
    let matrix = SampleMatrix::from_rows(vec![vec![0.0, 0.5, 0.25, 1.0]]).unwrap();
    let scrambled = scramble::scramble(1, &matrix).unwrap();
    assert_eq!(scrambled.dimensions(), 1);
    assert_eq!(scrambled.len(), 4);
}

#[test]
fn rejects_non_power_of_two_point_counts() {
    let matrix = SampleMatrix::from_rows(vec![vec![0.1, 0.2, 0.3]]).unwrap();
    assert_eq!(
        scramble::scramble(1, &matrix).unwrap_err(),
        Error::NotPowerOfTwo(3)
    );
}

#[test]
fn external_matrix_validation() {
    assert!(matches!(
        SampleMatrix::from_rows(vec![vec![0.0, 0.5], vec![0.5]]),
        Err(Error::RaggedMatrix { row: 1, .. })
    ));
    assert!(matches!(
        SampleMatrix::from_rows(vec![vec![0.0, 1.5]]),
        Err(Error::CoordinateOutOfRange { column: 1, .. })
    ));
    assert!(matches!(
        SampleMatrix::from_rows(vec![vec![f64::NAN]]),
        Err(Error::CoordinateOutOfRange { .. })
    ));
}

#[test]
fn generation_limits() {
    assert!(sobol::generate(1, sobol::MAX_EXPONENT + 1).is_err());
    assert!(sobol::generate(MAX_DIMENSION + 1, 1).is_err());
    assert_eq!(sobol::generate(MAX_DIMENSION, 1).unwrap().dimensions(), MAX_DIMENSION);
    assert!(matches!(
        sobol::generate(1 << 20, 11),
        Err(Error::DimensionOutOfRange { .. })
    ));
    assert!(matches!(
        sobol::generate(1024, 21),
        Err(Error::TooManyCoordinates { max, .. }) if max == sobol::MAX_COORDINATES
    ));
    assert_eq!(sobol::sample_count(10), Ok(1024));
}
