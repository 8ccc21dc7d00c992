use quasisweep::Error;
use quasisweep::scale::{Geometric, Scale};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "{actual} != {expected}"
    );
}

#[test]
fn test_geometric_hits_both_endpoints() {
    let scale = Geometric::new(1e-5, 1e-1).unwrap();
    assert_eq!(scale.transform(0.0), 1e-5);
    assert_eq!(scale.transform(1.0), 1e-1);
}

#[test]
fn test_geometric_base_matching_ratio_is_log_uniform() {
    let scale = Geometric::builder(1.0, 1000.0).base(1000.0).build().unwrap();
    assert_close(scale.transform(1.0 / 3.0), 10.0);
    assert_close(scale.transform(2.0 / 3.0), 100.0);
}

#[test]
fn test_geometric_is_monotone() {
    let scale = Geometric::new(0.5, 5000.0).unwrap();
    let values: Vec<f64> = (0..=100).map(|i| scale.transform(f64::from(i) / 100.0)).collect();
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
    assert!(values.iter().all(|v| (0.5..=5000.0).contains(v)));
}

#[test]
fn test_geometric_favors_low_end() {
    let scale = Geometric::new(1.0, 100.0).unwrap();
    assert!(scale.transform(0.5) < 50.5);
}

#[test]
fn test_geometric_bias_reshapes_input() {
    let plain = Geometric::new(1.0, 100.0).unwrap();
    let biased = Geometric::builder(1.0, 100.0).bias(2.0).build().unwrap();
    assert_close(biased.transform(0.5), plain.transform(0.25));
}

#[test]
fn test_geometric_degenerate_range() {
    let scale = Geometric::new(3.0, 3.0).unwrap();
    assert_eq!(scale.transform(0.7), 3.0);
}

#[test]
fn test_geometric_f32_bounds() {
    let scale = Geometric::new(1e-3_f32, 1.0).unwrap();
    for i in 0..=64 {
        let v = scale.transform(f64::from(i) / 64.0);
        assert!((1e-3..=1.0).contains(&v));
    }
}

#[test]
fn test_geometric_rejects_invalid_parameters() {
    assert_eq!(Geometric::new(0.0, 1.0).unwrap_err(), Error::InvalidLogBounds(0.0));
    assert_eq!(Geometric::new(-1.0, 1.0).unwrap_err(), Error::InvalidLogBounds(-1.0));
    assert!(matches!(Geometric::new(2.0, 1.0), Err(Error::InvalidBounds { .. })));
    assert!(matches!(
        Geometric::builder(1.0, 2.0).base(-3.0).build(),
        Err(Error::InvalidBase(_))
    ));
    assert!(matches!(
        Geometric::builder(1.0, 2.0).bias(0.0).build(),
        Err(Error::InvalidBias(_))
    ));
}
