use std::f64::consts::E;

use crate::error::{NetworkError, Result};

/// Softmax over a whole output layer.
///
/// `normalise` must be called once per forward pass with every raw output
/// value; `function` then maps each raw value to its probability using the
/// cached maximum and normalisation constant.
#[derive(Debug, Clone)]
pub struct Softmax {
    max_z: f64,
    normalisation: f64,
}

impl Default for Softmax {
    fn default() -> Self {
        Softmax { max_z: 0.0, normalisation: 1.0 }
    }
}

impl Softmax {
    pub fn new() -> Softmax {
        Softmax::default()
    }

    /// Caches `max(z)` and `Σ exp(z_j - max(z))` for the current pass.
    pub fn normalise(&mut self, z: &[f64]) {
        self.max_z = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let max_z = self.max_z;
        self.normalisation = z.iter().map(|&zj| E.powf(zj - max_z)).sum();
    }

    pub fn function(&self, z: f64) -> f64 {
        E.powf(z - self.max_z) / self.normalisation
    }

    /// Normalises and activates a full vector in one go.
    pub fn activate(&mut self, z: &[f64]) -> Vec<f64> {
        self.normalise(z);
        z.iter().map(|&zj| self.function(zj)).collect()
    }

    /// The softmax gradient is folded into the combined softmax +
    /// cross-entropy delta `p - onehot`, so it is never evaluated here.
    pub fn derivative(&self, _z: f64) -> Result<f64> {
        Err(NetworkError::UnsupportedOperation(
            "the softmax gradient is computed jointly with cross-entropy",
        ))
    }
}
