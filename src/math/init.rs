use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};

/// How a freshly built edge draws its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightInit {
    /// Uniform on `[-1, 1)`.
    Uniform,
    /// He initialisation: samples from N(0, sqrt(2 / fan_in)).
    ///
    /// Recommended before ReLU layers. The variance 2/fan_in accounts for
    /// the fact that ReLU zeroes half of its inputs on average.
    He,
}

impl WeightInit {
    /// Draws one weight for an edge whose left layer holds `fan_in` neurons.
    pub fn draw<R: Rng + ?Sized>(&self, fan_in: usize, rng: &mut R) -> Result<f64> {
        match self {
            WeightInit::Uniform => Ok(rng.gen_range(-1.0..1.0)),
            WeightInit::He => Ok(he_normal(fan_in)?.sample(rng)),
        }
    }
}

/// Normal(0, sqrt(2 / fan_in)); a zero fan-in has no valid deviation.
pub fn he_normal(fan_in: usize) -> Result<Normal<f64>> {
    let std_dev = (2.0 / fan_in as f64).sqrt();
    if fan_in == 0 || !std_dev.is_finite() {
        return Err(NetworkError::NonPositiveStdDev { coordinate: 0, std_dev: 0.0 });
    }
    Normal::new(0.0, std_dev)
        .map_err(|_| NetworkError::NonPositiveStdDev { coordinate: 0, std_dev })
}
