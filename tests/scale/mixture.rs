use quasisweep::scale::{Constant, Discrete, DynScale, MinMax, Mixture, Scale};
use quasisweep::{Error, Value, ValueType};

fn letters() -> Mixture<String> {
    Mixture::builder()
        .component(0.2, Constant::new("a".to_string()))
        .component(0.5, Constant::new("b".to_string()))
        .component(0.3, Constant::new("c".to_string()))
        .build()
        .unwrap()
}

#[test]
fn test_mixture_breakpoints() {
    let mix = letters();
    assert_eq!(mix.transform(0.0), "a");
    assert_eq!(mix.transform(0.19), "a");
    assert_eq!(mix.transform(0.21), "b");
    assert_eq!(mix.transform(0.69), "b");
    assert_eq!(mix.transform(0.71), "c");
    assert_eq!(mix.transform(1.0), "c");
}

#[test]
fn test_mixture_frequencies_match_proportions() {
    let mix = letters();
    let n = 10_000;
    let mut counts = [0usize; 3];
    for i in 0..n {
        let u = (f64::from(i) + 0.5) / f64::from(n);
        counts[mix.bin_of(u).0] += 1;
    }
    for (count, expected) in counts.iter().zip([0.2, 0.5, 0.3]) {
        let freq = *count as f64 / f64::from(n);
        assert!((freq - expected).abs() < 0.005, "{freq} vs {expected}");
    }
}

#[test]
fn test_mixture_rescales_into_component() {
    let mix = Mixture::builder()
        .component(0.5, MinMax::new(0.0_f64, 1.0).unwrap())
        .component(0.5, MinMax::new(10.0_f64, 20.0).unwrap())
        .build()
        .unwrap();
    assert!((mix.transform(0.25) - 0.5).abs() < 1e-12);
    assert!((mix.transform(0.75) - 15.0).abs() < 1e-12);
    assert!(mix.transform(1.0) <= 20.0);
}

#[test]
fn test_mixture_normalizes_by_default() {
    let mix = Mixture::builder()
        .component(2.0, Constant::new(1_i64))
        .component(6.0, Constant::new(2_i64))
        .build()
        .unwrap();
    assert_eq!(mix.proportions(), &[0.25, 0.75]);
    assert_eq!(mix.edges().last(), Some(&1.0));
}

#[test]
fn test_mixture_sum_check_without_normalization() {
    let err = Mixture::builder()
        .component(0.5, Constant::new(1_i64))
        .component(0.6, Constant::new(2_i64))
        .normalize(false)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::ProportionSum { .. }));

    let ok = Mixture::builder()
        .component(0.5, Constant::new(1_i64))
        .component(0.6, Constant::new(2_i64))
        .normalize(false)
        .atol(0.2)
        .build();
    assert!(ok.is_ok());
}

#[test]
fn test_mixture_rejects_bad_proportions() {
    assert_eq!(
        Mixture::<i64>::builder().build().unwrap_err(),
        Error::EmptyMixture
    );
    let err = Mixture::builder()
        .component(0.5, Constant::new(1_i64))
        .component(-0.5, Constant::new(2_i64))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        Error::InvalidProportion {
            index: 1,
            value: -0.5
        }
    );
    let err = Mixture::builder()
        .component(1.0, Constant::new(1_i64))
        .component(1e-300, Constant::new(2_i64))
        .build()
        .unwrap_err();
    assert_eq!(err, Error::ZeroWidthBin(1));
}

#[test]
fn test_mixture_of_boxed_scales() {
    let mix = Mixture::new(vec![
        (1.0, Discrete::new(vec![1_i64, 2]).unwrap().boxed()),
        (1.0, Constant::new(100_i64).boxed()),
    ])
    .unwrap();
    assert_eq!(mix.len(), 2);
    assert_eq!(mix.output_type(), ValueType::I64);
    assert_eq!(mix.transform(0.9), 100);
}

#[test]
fn test_heterogeneous_mixture_is_untyped() {
    let mix = Mixture::builder()
        .component(0.5, Constant::new(false).declare(ValueType::Bool))
        .component(0.5, MinMax::new(0.1, 0.9).unwrap().declare(ValueType::F64))
        .build()
        .unwrap();
    assert_eq!(mix.declared_type(), ValueType::Any);
    assert_eq!(mix.evaluate(0.1), Ok(Value::Bool(false)));
    assert!(matches!(mix.evaluate(0.9), Ok(Value::F64(_))));
}

#[test]
fn test_nested_mixture() {
    let inner = Mixture::builder()
        .component(0.5, Constant::new(1_i32))
        .component(0.5, Constant::new(2_i32))
        .build()
        .unwrap();
    let outer = Mixture::builder()
        .component(0.5, inner)
        .component(0.5, Constant::new(3_i32))
        .build()
        .unwrap();
    assert_eq!(outer.transform(0.1), 1);
    assert_eq!(outer.transform(0.4), 2);
    assert_eq!(outer.transform(0.8), 3);
}
