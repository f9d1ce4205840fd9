use std::fmt;

/// Position of a neuron: `layer` 0 is the input layer, the last layer is
/// the output layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeuronId {
    pub layer: usize,
    pub row: usize,
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.layer, self.row)
    }
}

/// A scalar unit holding its last forward-pass value and, for non-input
/// layers, a bias plus the bias gradients of the current batch.
#[derive(Debug, Clone)]
pub struct Neuron {
    id: NeuronId,
    pub(crate) value: f64,
    pub(crate) bias: f64,
    pub(crate) bias_gradients: Vec<f64>,
}

impl Neuron {
    pub fn new(layer: usize, row: usize) -> Neuron {
        Neuron {
            id: NeuronId { layer, row },
            value: f64::NAN,
            bias: 0.0,
            bias_gradients: Vec::new(),
        }
    }

    pub fn id(&self) -> NeuronId {
        self.id
    }

    /// Output of the last forward pass; NaN before the first one.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn set_bias(&mut self, bias: f64) {
        self.bias = bias;
    }

    /// One entry per datapoint seen since the last update.
    pub fn bias_gradients(&self) -> &[f64] {
        &self.bias_gradients
    }
}
