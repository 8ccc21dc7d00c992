use quasisweep::scale::{Discrete, DynScale, Geometric, MinMax, Scale, TypeInference};
use quasisweep::{Value, ValueType};

#[test]
fn test_composed_rounding_keeps_float_type() {
    let scale = MinMax::new(0.0, 10.0).unwrap().map(f64::round);
    assert_eq!(scale.output_type(), ValueType::F64);
    assert_eq!(scale.evaluate(0.26), Ok(Value::F64(3.0)));
}

#[test]
fn test_composed_conversion_changes_type() {
    let scale = Geometric::new(1.0, 1024.0)
        .unwrap()
        .map(|x: f64| x.round() as i64);
    assert_eq!(scale.inference(), TypeInference::Static(ValueType::I64));
    assert_eq!(scale.evaluate(1.0), Ok(Value::I64(1024)));
}

#[test]
fn test_composed_dynamic_output_is_typed_from_zero() {
    let scale = Discrete::labels(["none", "l1", "l2"])
        .unwrap()
        .map(|s: String| Value::Str(s.to_uppercase()));
    assert_eq!(scale.inference(), TypeInference::Observed(ValueType::Str));
    assert_eq!(scale.evaluate(1.0), Ok(Value::Str("L2".into())));
}

#[test]
fn test_composed_panic_at_zero_erases_type() {
    let scale = MinMax::new(0.5, 1.0).unwrap().map(|x: f64| {
        assert!(x > 0.0);
        Value::F64(1.0 / x)
    });
    assert_eq!(scale.inference(), TypeInference::Erased);
    assert_eq!(scale.declared_type(), ValueType::Any);
    assert_eq!(scale.evaluate(0.0), Ok(Value::F64(2.0)));
}

#[test]
fn test_declared_widening() {
    let scale = Discrete::new(vec![1_i32, 2, 3]).unwrap().declare(ValueType::I64);
    assert_eq!(scale.evaluate(0.0), Ok(Value::I64(1)));
}

#[test]
fn test_declared_narrowing_failure() {
    let scale = Discrete::new(vec![i64::MAX]).unwrap().declare(ValueType::I32);
    let err = scale.evaluate(0.5).unwrap_err();
    assert!(err.is_type());
}
