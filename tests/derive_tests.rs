use quasisweep::scale::{Constant, Discrete, Geometric, MinMax, Scale};
use quasisweep::FromConfiguration as _;
use quasisweep::{Configuration, Error, Space, sample};
use quasisweep_derive::FromConfiguration;

#[derive(Debug, PartialEq, FromConfiguration)]
struct Hyper {
    learning_rate: f64,
    layers: i32,
    optimizer: String,
    warm_start: bool,
}

#[derive(Debug, FromConfiguration)]
struct Keyword {
    r#type: String,
}

#[derive(Debug, FromConfiguration)]
struct Narrow {
    layers: f32,
}

fn space() -> Space {
    Space::builder()
        .dimension("learning_rate", Geometric::log_uniform(1e-4, 1e-1).unwrap())
        .dimension("layers", MinMax::new(1.0, 6.0).unwrap().map(|x: f64| x.round() as i64))
        .dimension("optimizer", Discrete::labels(["sgd", "adam"]).unwrap())
        .dimension("warm_start", Discrete::new(vec![false, true]).unwrap())
        .build()
        .unwrap()
}

#[test]
fn derive_parses_every_record() {
    for config in sample(&space(), 5).unwrap() {
        let hyper: Hyper = config.parse().unwrap();
        assert!((1e-4..=1e-1).contains(&hyper.learning_rate));
        assert!((1..=6).contains(&hyper.layers));
        assert!(["sgd", "adam"].contains(&hyper.optimizer.as_str()));
    }
}

#[test]
fn derive_matches_manual_lookup() {
    let config = &sample(&space(), 3).unwrap()[5];
    let hyper = Hyper::from_configuration(config).unwrap();
    assert_eq!(
        hyper,
        Hyper {
            learning_rate: config.get_as("learning_rate").unwrap(),
            layers: config.get_as("layers").unwrap(),
            optimizer: config.get_as("optimizer").unwrap(),
            warm_start: config.get_as("warm_start").unwrap(),
        }
    );
}

#[test]
fn derive_strips_raw_identifier_prefix() {
    let space = Space::builder()
        .dimension("type", Constant::new("resnet".to_string()))
        .build()
        .unwrap();
    let config: &Configuration = &sample(&space, 0).unwrap()[0];
    let keyword: Keyword = config.parse().unwrap();
    assert_eq!(keyword.r#type, "resnet");
}

#[test]
fn derive_reports_missing_dimension() {
    let space = Space::builder()
        .dimension("learning_rate", MinMax::new(0.1, 0.2).unwrap())
        .build()
        .unwrap();
    let config = &sample(&space, 1).unwrap()[0];
    assert_eq!(
        config.parse::<Hyper>().unwrap_err(),
        Error::MissingDimension("layers".into())
    );
}

#[test]
fn derive_widens_integer_fields() {
    let space = Space::builder()
        .dimension("layers", Constant::new(12_i64))
        .build()
        .unwrap();
    let narrow: Narrow = sample(&space, 0).unwrap()[0].parse().unwrap();
    assert_eq!(narrow.layers, 12.0);
}
