use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::loss::LossType;
use crate::math::init::WeightInit;
use crate::optim::Sgd;

fn default_num_classes() -> usize { 2 }
fn default_leak() -> f64 { 0.01 }
fn default_learning_rate() -> f64 { 0.01 }

/// Every parameter needed to build a [`Network`](crate::Network).
///
/// Can be saved to / loaded from JSON independently of any trained state.
/// Omitted fields fall back to a two-class classifier with leak 0.01,
/// learning rate 0.01, no momentum and uniform weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub num_features: usize,
    pub num_hidden_layers: usize,
    /// One neuron count per hidden layer, input side first.
    pub neuron_counts: Vec<usize>,
    /// Ignored (forced to 1 output) when `regression` is set.
    #[serde(default = "default_num_classes")]
    pub num_classes: usize,
    /// Negative-side slope of the hidden Leaky ReLU. Must be positive: the
    /// backward pass reads the slope off the activated value, which only
    /// keeps the sign of the pre-activation when `leak > 0`.
    #[serde(default = "default_leak")]
    pub leak: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default)]
    pub regression: bool,
    /// Momentum gradient descent with coefficient `gamma`.
    #[serde(default)]
    pub adaptive: bool,
    #[serde(default)]
    pub gamma: f64,
    #[serde(default)]
    pub he_weights: bool,
}

impl NetworkConfig {
    pub fn new(num_features: usize, num_hidden_layers: usize, neuron_counts: Vec<usize>) -> Self {
        NetworkConfig {
            num_features,
            num_hidden_layers,
            neuron_counts,
            num_classes: default_num_classes(),
            leak: default_leak(),
            learning_rate: default_learning_rate(),
            regression: false,
            adaptive: false,
            gamma: 0.0,
            he_weights: false,
        }
    }

    pub fn with_classes(mut self, num_classes: usize) -> Self {
        self.num_classes = num_classes;
        self
    }

    pub fn with_leak(mut self, leak: f64) -> Self {
        self.leak = leak;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Single identity output neuron trained with squared error.
    pub fn regression(mut self) -> Self {
        self.regression = true;
        self
    }

    pub fn with_momentum(mut self, gamma: f64) -> Self {
        self.adaptive = true;
        self.gamma = gamma;
        self
    }

    pub fn with_he_weights(mut self) -> Self {
        self.he_weights = true;
        self
    }

    /// Checks dimensions; called by `Network::new`.
    pub fn validate(&self) -> Result<()> {
        if self.neuron_counts.len() != self.num_hidden_layers {
            return Err(NetworkError::HiddenLayerCountMismatch {
                counts: self.neuron_counts.len(),
                hidden: self.num_hidden_layers,
            });
        }
        if !(self.leak > 0.0 && self.leak.is_finite()) {
            return Err(NetworkError::InvalidLeak { leak: self.leak });
        }
        if let Some(layer) = self.layer_sizes().iter().position(|&size| size == 0) {
            return Err(NetworkError::EmptyLayer { layer });
        }
        Ok(())
    }

    pub fn output_size(&self) -> usize {
        if self.regression { 1 } else { self.num_classes }
    }

    /// Sizes of every layer: input, hidden..., output.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.num_hidden_layers + 2);
        sizes.push(self.num_features);
        sizes.extend(self.neuron_counts.iter().copied());
        sizes.push(self.output_size());
        sizes
    }

    pub fn weight_init(&self) -> WeightInit {
        if self.he_weights { WeightInit::He } else { WeightInit::Uniform }
    }

    pub fn hidden_activation(&self) -> ActivationFunction {
        ActivationFunction::LeakyReLU { leak: self.leak }
    }

    pub fn optimizer(&self) -> Sgd {
        if self.adaptive {
            Sgd::with_momentum(self.learning_rate, self.gamma)
        } else {
            Sgd::new(self.learning_rate)
        }
    }

    pub fn loss_type(&self) -> LossType {
        LossType::for_regression(self.regression)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkConfig` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regression_forces_one_output() {
        let config = NetworkConfig::new(2, 1, vec![4]).with_classes(5).regression();
        assert_eq!(config.layer_sizes(), vec![2, 4, 1]);
        assert_eq!(config.loss_type(), LossType::Mse);
    }

    #[test]
    fn mismatched_hidden_counts_fail() {
        let config = NetworkConfig::new(2, 2, vec![4]);
        assert!(matches!(
            config.validate(),
            Err(NetworkError::HiddenLayerCountMismatch { counts: 1, hidden: 2 })
        ));
    }

    #[test]
    fn empty_layers_fail() {
        assert!(matches!(
            NetworkConfig::new(2, 2, vec![3, 0]).validate(),
            Err(NetworkError::EmptyLayer { layer: 2 })
        ));
        assert!(matches!(
            NetworkConfig::new(0, 0, vec![]).validate(),
            Err(NetworkError::EmptyLayer { layer: 0 })
        ));
    }

    #[test]
    fn leak_must_be_positive() {
        for leak in [0.0, -0.1, f64::NAN] {
            assert!(matches!(
                NetworkConfig::new(2, 1, vec![3]).with_leak(leak).validate(),
                Err(NetworkError::InvalidLeak { .. })
            ));
        }
        assert!(NetworkConfig::new(2, 1, vec![3]).with_leak(0.5).validate().is_ok());
    }

    #[test]
    fn json_defaults_fill_missing_fields() {
        let config: NetworkConfig = serde_json::from_str(
            r#"{"num_features": 3, "num_hidden_layers": 1, "neuron_counts": [5]}"#,
        ).unwrap();
        assert_eq!(config, NetworkConfig::new(3, 1, vec![5]));
        assert_eq!(config.optimizer(), Sgd::new(0.01));
    }

    #[test]
    fn momentum_selects_adaptive_optimizer() {
        let config = NetworkConfig::new(1, 0, vec![]).with_learning_rate(0.1).with_momentum(0.9);
        assert_eq!(config.optimizer(), Sgd::with_momentum(0.1, 0.9));
    }
}
