use serde::{Serialize, Deserialize};

/// Plain or momentum ("adaptive") gradient descent over averaged batch
/// gradients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sgd {
    pub learning_rate: f64,
    /// `Some(gamma)` enables momentum: `v' = gamma·v + lr·g`, `w' = w - v'`.
    pub momentum: Option<f64>,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate, momentum: None }
    }

    pub fn with_momentum(learning_rate: f64, gamma: f64) -> Sgd {
        Sgd { learning_rate, momentum: Some(gamma) }
    }

    /// One weight update; returns `(new_weight, new_velocity)`.
    /// Without momentum the velocity is passed through unchanged.
    pub fn step_weight(&self, weight: f64, velocity: f64, avg_gradient: f64) -> (f64, f64) {
        match self.momentum {
            Some(gamma) => {
                let velocity = gamma * velocity + self.learning_rate * avg_gradient;
                (weight - velocity, velocity)
            }
            None => (weight - self.learning_rate * avg_gradient, velocity),
        }
    }

    /// Biases never carry momentum.
    pub fn step_bias(&self, bias: f64, avg_gradient: f64) -> f64 {
        bias - self.learning_rate * avg_gradient
    }
}

/// Mean of a batch of per-datapoint gradients, `None` when nothing was
/// accumulated since the last update.
pub fn average(gradients: &[f64]) -> Option<f64> {
    if gradients.is_empty() {
        None
    } else {
        Some(gradients.iter().sum::<f64>() / gradients.len() as f64)
    }
}
