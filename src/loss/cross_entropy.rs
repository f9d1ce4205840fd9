use crate::error::{NetworkError, Result};

/// Categorical cross-entropy loss for use with a Softmax output layer.
pub struct CrossEntropyLoss;

impl CrossEntropyLoss {
    /// Computes `-ln(p[class])`.
    ///
    /// `probabilities`: softmax output, shape [n_classes]
    /// `class`: index of the true class
    ///
    /// A probability outside `[0, 1]` means the softmax produced garbage and
    /// is reported instead of being clamped.
    pub fn loss(probabilities: &[f64], class: usize) -> Result<f64> {
        let p = *probabilities.get(class).ok_or(NetworkError::ClassOutOfRange {
            class,
            len: probabilities.len(),
        })?;
        if (0.0..=1.0).contains(&p) {
            Ok(-p.ln())
        } else {
            Err(NetworkError::ProbabilityOutOfRange { class, value: p })
        }
    }

    /// Gradient of the combined Softmax + cross-entropy w.r.t. the logit of
    /// output neuron `row`:
    ///   ∂L/∂z_row = p_row - [row == class]
    pub fn gradient(p_row: f64, row: usize, class: usize) -> f64 {
        p_row - if row == class { 1.0 } else { 0.0 }
    }
}
