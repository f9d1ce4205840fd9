use crate::network::neuron::Neuron;

/// An ordered column of neurons at position `id` (0 = input).
#[derive(Debug, Clone)]
pub struct Layer {
    id: usize,
    pub(crate) neurons: Vec<Neuron>,
}

impl Layer {
    pub fn new(id: usize, size: usize) -> Layer {
        Layer {
            id,
            neurons: (0..size).map(|row| Neuron::new(id, row)).collect(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn size(&self) -> usize {
        self.neurons.len()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Current values of every neuron, in row order.
    pub fn values(&self) -> Vec<f64> {
        self.neurons.iter().map(|n| n.value).collect()
    }
}
