use quasisweep::scale::{Discrete, DynScale, Scale};
use quasisweep::{Error, Value, ValueType};

#[test]
fn test_discrete_uses_ceiling_buckets() {
    let scale = Discrete::new(vec!['a'.to_string(), 'b'.to_string(), 'c'.to_string()]).unwrap();
    assert_eq!(scale.transform(0.0), "a");
    assert_eq!(scale.transform(1.0 / 3.0), "a");
    assert_eq!(scale.transform(0.34), "b");
    assert_eq!(scale.transform(2.0 / 3.0), "b");
    assert_eq!(scale.transform(0.67), "c");
    assert_eq!(scale.transform(1.0), "c");
}

#[test]
fn test_discrete_every_choice_reachable() {
    let scale = Discrete::new(vec![1_i64, 2, 3, 4, 5]).unwrap();
    let mut hits = [0usize; 5];
    for i in 0..=1000 {
        hits[scale.index_of(f64::from(i) / 1000.0)] += 1;
    }
    assert!(hits.iter().all(|&h| h >= 199), "{hits:?}");
}

#[test]
fn test_discrete_single_choice() {
    let scale = Discrete::new(vec![true]).unwrap();
    for u in [0.0, 0.5, 1.0] {
        assert!(scale.transform(u));
    }
    assert_eq!(scale.output_type(), ValueType::Bool);
}

#[test]
fn test_discrete_out_of_range_input_is_clamped() {
    let scale = Discrete::new(vec![10_i32, 20]).unwrap();
    assert_eq!(scale.transform(-1.0), 10);
    assert_eq!(scale.transform(2.0), 20);
    assert_eq!(scale.transform(f64::NAN), 10);
}

#[test]
fn test_discrete_rejects_empty() {
    assert_eq!(Discrete::<i64>::new(Vec::new()).unwrap_err(), Error::EmptyChoices);
    assert_eq!(
        Discrete::labels(Vec::<&str>::new()).unwrap_err(),
        Error::EmptyChoices
    );
}

#[test]
fn test_discrete_labels_evaluate_to_strings() {
    let scale = Discrete::labels(["relu", "gelu"]).unwrap();
    assert_eq!(scale.declared_type(), ValueType::Str);
    assert_eq!(scale.evaluate(1.0), Ok(Value::Str("gelu".into())));
}
