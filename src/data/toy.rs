//! Built-in two-dimensional problems: their labellers, the data they are
//! sampled from and a network/training setup that learns each of them.

use std::fmt;

use rand::Rng;

use crate::data::generator::DataGenerator;
use crate::data::table::Table;
use crate::error::Result;
use crate::network::NetworkConfig;
use crate::train::{RunConfig, TrainConfig};

/// Inside or outside the unit circle.
pub fn circle(point: [f64; 2]) -> &'static str {
    let [x1, x2] = point;
    if x1 * x1 + x2 * x2 <= 1.0 { "Inside" } else { "Outside" }
}

/// The four quadrants cut out by the lines `x2 = x1` and `x2 = -x1`.
pub fn diagonals(point: [f64; 2]) -> &'static str {
    let [x1, x2] = point;
    match (x1 + x2 > 0.0, x1 - x2 > 0.0) {
        (true, true) => "East",
        (true, false) => "North",
        (false, true) => "South",
        (false, false) => "West",
    }
}

/// Parity of the integer part of `x1`.
pub fn even_odd(point: [f64; 2]) -> &'static str {
    if (point[0].floor() as i64) % 2 == 0 { "Even" } else { "Odd" }
}

/// Above or below the curve `x2 = sin(x1)`.
pub fn sine_band(point: [f64; 2]) -> &'static str {
    if point[1] > point[0].sin() { "Above" } else { "Below" }
}

/// `sin(x1)·sin(x2)`.
pub fn sine_product(point: [f64; 2]) -> f64 {
    point[0].sin() * point[1].sin()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum Problem {
    Circle,
    Diagonals,
    EvenOdd,
    SineBand,
    SineProduct,
}

impl Problem {
    pub fn default_datapoints(&self) -> usize {
        match self {
            Problem::Circle => 300,
            Problem::Diagonals | Problem::EvenOdd | Problem::SineBand => 400,
            Problem::SineProduct => 800,
        }
    }

    pub fn is_regression(&self) -> bool {
        matches!(self, Problem::SineProduct)
    }

    /// Samples `num_datapoints` labelled points over the problem's domain.
    pub fn generate<R: Rng + ?Sized>(&self, num_datapoints: usize, rng: &mut R) -> Result<Table<String>> {
        match self {
            Problem::Circle => DataGenerator::uniform(circle, num_datapoints, [-1.0, -1.0], [1.0, 1.0])?
                .generate(rng),
            Problem::Diagonals => DataGenerator::normal(diagonals, num_datapoints, [0.0, 0.0], [1.0, 1.0])?
                .generate(rng),
            Problem::EvenOdd => DataGenerator::uniform(even_odd, num_datapoints, [0.0, 0.0], [6.0, 6.0])?
                .generate(rng),
            Problem::SineBand => DataGenerator::uniform(sine_band, num_datapoints, [-6.28, -2.0], [6.28, 2.0])?
                .generate(rng),
            Problem::SineProduct => DataGenerator::uniform(sine_product, num_datapoints, [-3.14, -3.14], [3.14, 3.14])?
                .generate(rng),
        }
    }

    /// Network and training setup known to fit this problem: momentum
    /// descent from He weights, weighted batches of 16 and an 8:1:1 split.
    pub fn run_config(&self) -> RunConfig {
        let (neuron_counts, classes, gamma, epochs) = match self {
            Problem::Circle => (vec![4, 4, 4], 2, 0.09, 1000),
            Problem::Diagonals => (vec![4, 4], 4, 0.9, 1000),
            Problem::EvenOdd => (vec![7, 7, 7], 2, 0.9, 8000),
            Problem::SineBand => (vec![3, 3, 3, 3], 2, 0.9, 1000),
            Problem::SineProduct => (vec![6, 6, 6], 2, 0.9, 1000),
        };
        let mut network = NetworkConfig::new(2, neuron_counts.len(), neuron_counts)
            .with_classes(classes)
            .with_momentum(gamma)
            .with_he_weights();
        if self.is_regression() {
            network = network.regression().with_learning_rate(0.001);
        }
        let train = TrainConfig::new(epochs, 16)
            .weighted(10)
            .with_eval_batch_sizes(10, 10);
        RunConfig::new(network, train)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Problem::Circle => "circle",
            Problem::Diagonals => "diagonals",
            Problem::EvenOdd => "even_odd",
            Problem::SineBand => "sine_band",
            Problem::SineProduct => "sine_product",
        };
        write!(f, "{name}")
    }
}
