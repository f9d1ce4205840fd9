use serde::{Serialize, Deserialize};

/// Selects which loss function the learners use.
///
/// - `Mse`: squared error; paired with a single identity output
///   neuron for regression.
/// - `CrossEntropy`: categorical cross-entropy; paired with a softmax output
///   layer. The gradient is the combined softmax + CE gradient (p - onehot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    Mse,
    CrossEntropy,
}

impl LossType {
    pub fn for_regression(regression: bool) -> LossType {
        if regression { LossType::Mse } else { LossType::CrossEntropy }
    }
}
