use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use edgewise_nn::data::{read_table, split, write_table, DataGenerator};
use edgewise_nn::{
    Header, Learner, Network, NetworkConfig, NetworkError, Problem, Table, Tester, TrainConfig,
    Trainer, Validator,
};

fn quadrant(point: [f64; 2]) -> &'static str {
    if point[0] >= 0.0 { "Right" } else { "Left" }
}

#[test]
fn classifier_learns_a_linear_boundary() {
    let mut rng = StdRng::seed_from_u64(2024);
    let data = DataGenerator::uniform(quadrant, 200, [-1.0, -1.0], [1.0, 1.0])
        .unwrap()
        .generate(&mut rng)
        .unwrap();
    let parts = split(&data, &[8, 1, 1]).unwrap();

    let config = NetworkConfig::new(2, 1, vec![4])
        .with_learning_rate(0.05)
        .with_momentum(0.5)
        .with_he_weights();
    let mut network = Network::new(config, &mut rng).unwrap();
    let validator = Validator::new(&network, parts[1].clone(), 5).unwrap();
    let mut trainer = Trainer::from_config(
        &network,
        parts[0].clone(),
        &TrainConfig::new(100, 8).weighted(10),
        Some(validator),
    ).unwrap();
    trainer.run(&mut network, &mut rng).unwrap();

    let history = trainer.loss_history();
    assert_eq!(history.training.len(), 100);
    assert_eq!(history.validation.as_ref().map(Vec::len), Some(100));
    assert!(history.training[99] < history.training[0]);

    let mut tester = Tester::new(&network, parts[2].clone(), 5).unwrap();
    let loss = tester.run(&mut network, &mut rng).unwrap();
    assert!(loss.is_finite());
    let confusion = tester.confusion().unwrap();
    assert_eq!(confusion.total(), 20);
    assert!(confusion.mean_dice() > 0.6);
}

#[test]
fn regressor_reduces_squared_error() {
    let mut rng = StdRng::seed_from_u64(99);
    let data = Problem::SineProduct.generate(120, &mut rng).unwrap();

    let config = NetworkConfig::new(2, 2, vec![6, 6])
        .regression()
        .with_learning_rate(0.01)
        .with_momentum(0.9)
        .with_he_weights();
    let mut network = Network::new(config, &mut rng).unwrap();
    let mut trainer = Trainer::new(&network, data, 16, true, 10, 150, None).unwrap();
    trainer.run(&mut network, &mut rng).unwrap();

    let history = trainer.history();
    assert!(history[149].train_loss < history[0].train_loss);
    assert!(trainer.core().categorical_frame().is_none());
    assert_eq!(network.output_size(), 1);
}

#[test]
fn learners_reject_mismatched_data() {
    let mut rng = StdRng::seed_from_u64(0);
    let network = Network::new(NetworkConfig::new(3, 1, vec![2]), &mut rng).unwrap();
    let data = Problem::Circle.generate(10, &mut rng).unwrap();
    assert!(matches!(
        Tester::new(&network, data, 2),
        Err(NetworkError::FeatureCountMismatch { features: 2, inputs: 3 })
    ));
}

#[test]
fn csv_round_trip_feeds_a_learner() {
    let mut rng = StdRng::seed_from_u64(7);
    let data = Problem::Diagonals.generate(40, &mut rng).unwrap();

    let mut buffer = Vec::new();
    write_table(&mut buffer, &data).unwrap();
    let read_back: Table<String> = read_table(buffer.as_slice()).unwrap();
    assert_eq!(read_back, data);

    let network = Network::new(NetworkConfig::new(2, 1, vec![4]).with_classes(4), &mut rng).unwrap();
    let tester = Tester::new(&network, read_back, 8).unwrap();
    assert_eq!(tester.core().num_datapoints(), 40);
    let x1 = tester.core().frame().column(Header::X(1)).unwrap();
    let original: f64 = data.column(Header::X(1)).unwrap()[0].parse().unwrap();
    assert_relative_eq!(x1[0], original);
}
