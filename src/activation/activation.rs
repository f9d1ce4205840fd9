use serde::{Serialize, Deserialize};

/// Element-wise activations used by the network's layers.
///
/// Hidden layers use `LeakyReLU`; a regression output neuron uses
/// `Identity`. The classification output layer is vector-valued and is
/// handled by [`Softmax`](crate::activation::softmax::Softmax) instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    /// `z` if `z >= 0`, else `leak * z`.
    LeakyReLU { leak: f64 },
    Sigmoid,
    Identity,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::LeakyReLU { leak } => if x >= 0.0 { x } else { leak * x },
            ActivationFunction::Sigmoid => {
                // Split on sign so exp() never overflows.
                if x < 0.0 {
                    let ex = x.exp();
                    ex / (1.0 + ex)
                } else {
                    1.0 / (1.0 + (-x).exp())
                }
            }
            ActivationFunction::Identity => x,
        }
    }

    /// Element-wise derivative.
    ///
    /// For `LeakyReLU` this may be evaluated on either the pre-activation or
    /// the activated value: the sign of the two always agrees (for `leak > 0`).
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::LeakyReLU { leak } => if x >= 0.0 { 1.0 } else { *leak },
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::Identity => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn leaky_relu_passes_positive_and_scales_negative() {
        let relu = ActivationFunction::LeakyReLU { leak: 0.5 };
        assert_eq!(relu.function(2.5), 2.5);
        assert_eq!(relu.function(0.0), 0.0);
        assert_eq!(relu.function(-2.0), -1.0);
        assert_eq!(relu.derivative(3.0), 1.0);
        assert_eq!(relu.derivative(0.0), 1.0);
        assert_eq!(relu.derivative(-3.0), 0.5);
    }

    #[test]
    fn sigmoid_values_and_slopes() {
        let sigmoid = ActivationFunction::Sigmoid;
        assert_eq!(sigmoid.function(0.0), 0.5);
        assert_eq!(sigmoid.derivative(0.0), 0.25);
        assert_relative_eq!(sigmoid.function(1.0), 0.73105858, epsilon = 1e-8);
        assert_relative_eq!(sigmoid.function(-1.0), 0.26894142, epsilon = 1e-8);
        assert_relative_eq!(sigmoid.derivative(1.0), 0.19661193, epsilon = 1e-8);
        assert_relative_eq!(sigmoid.derivative(-1.0), 0.19661193, epsilon = 1e-8);
    }

    #[test]
    fn sigmoid_saturates_without_overflow() {
        let sigmoid = ActivationFunction::Sigmoid;
        assert_eq!(sigmoid.function(1000.0), 1.0);
        assert_eq!(sigmoid.function(-1000.0), 0.0);
        assert_eq!(sigmoid.derivative(-1000.0), 0.0);
    }

    #[test]
    fn identity_is_linear() {
        let id = ActivationFunction::Identity;
        assert_eq!(id.function(-4.2), -4.2);
        assert_eq!(id.derivative(-4.2), 1.0);
    }
}
