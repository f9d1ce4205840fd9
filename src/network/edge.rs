use std::fmt;

use crate::error::{NetworkError, Result};
use crate::network::neuron::NeuronId;

/// `(left_layer, left_row, right_row)`; the right neuron always lives in
/// layer `left_layer + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    pub left_layer: usize,
    pub left_row: usize,
    pub right_row: usize,
}

impl EdgeId {
    pub fn left(&self) -> NeuronId {
        NeuronId { layer: self.left_layer, row: self.left_row }
    }

    pub fn right(&self) -> NeuronId {
        NeuronId { layer: self.left_layer + 1, row: self.right_row }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.left_layer, self.left_row, self.right_row)
    }
}

/// A weighted connection between neurons of adjacent layers.
#[derive(Debug, Clone)]
pub struct Edge {
    id: EdgeId,
    pub(crate) weight: f64,
    /// Backprop error term of the right neuron for the current datapoint.
    pub(crate) delta: f64,
    /// Momentum accumulator; survives across batches.
    pub(crate) velocity: f64,
    pub(crate) loss_gradients: Vec<f64>,
}

impl Edge {
    pub fn new(left: NeuronId, right: NeuronId, weight: f64) -> Result<Edge> {
        if left.layer + 1 != right.layer {
            return Err(NetworkError::NonAdjacentLayers { left: left.layer, right: right.layer });
        }
        Ok(Edge {
            id: EdgeId { left_layer: left.layer, left_row: left.row, right_row: right.row },
            weight,
            delta: 0.0,
            velocity: 0.0,
            loss_gradients: Vec::new(),
        })
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn loss_gradients(&self) -> &[f64] {
        &self.loss_gradients
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_layers_only() {
        let left = NeuronId { layer: 1, row: 3 };
        let right = NeuronId { layer: 2, row: 0 };
        let edge = Edge::new(left, right, 0.5).unwrap();
        assert_eq!(edge.id(), EdgeId { left_layer: 1, left_row: 3, right_row: 0 });
        assert_eq!(edge.id().left(), left);
        assert_eq!(edge.id().right(), right);
        assert_eq!(edge.velocity(), 0.0);
        assert!(edge.loss_gradients().is_empty());

        let far = NeuronId { layer: 3, row: 0 };
        assert!(matches!(
            Edge::new(left, far, 0.5),
            Err(NetworkError::NonAdjacentLayers { left: 1, right: 3 })
        ));
        assert!(Edge::new(right, left, 0.5).is_err());
    }

    #[test]
    fn display_matches_id_triple() {
        let id = EdgeId { left_layer: 0, left_row: 1, right_row: 2 };
        assert_eq!(id.to_string(), "[0, 1, 2]");
    }
}
