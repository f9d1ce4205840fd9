use log::debug;
use rand::Rng;

use crate::activation::{ActivationFunction, Softmax};
use crate::error::{NetworkError, Result};
use crate::loss::{CrossEntropyLoss, MseLoss};
use crate::math::transfer::pre_activation;
use crate::network::config::NetworkConfig;
use crate::network::edge::{Edge, EdgeId};
use crate::network::layer::Layer;
use crate::network::neuron::{Neuron, NeuronId};
use crate::optim::sgd::{average, Sgd};

/// A fully connected feed-forward network stored as an arena.
///
/// Layers own their neurons; edges live in
/// `edges[left_layer][right_row][left_row]`, so every lookup is by integer
/// key and the network is the single owner of all numeric state.
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    layers: Vec<Layer>,
    edges: Vec<Vec<Vec<Edge>>>,
    relu: ActivationFunction,
    softmax: Softmax,
    optimizer: Sgd,
}

impl Network {
    /// Builds the input layer, the hidden layers in order and the output
    /// layer, then connects every pair of consecutive layers. Weights are
    /// uniform on [-1, 1) unless `he_weights` is set, in which case each is
    /// drawn from N(0, sqrt(2 / size of the left layer)).
    pub fn new<R: Rng + ?Sized>(config: NetworkConfig, rng: &mut R) -> Result<Network> {
        config.validate()?;
        let sizes = config.layer_sizes();
        let layers: Vec<Layer> = sizes.iter()
            .enumerate()
            .map(|(id, &size)| Layer::new(id, size))
            .collect();

        let init = config.weight_init();
        let mut edges = Vec::with_capacity(layers.len() - 1);
        for pair in layers.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            let mut layer_edges = Vec::with_capacity(right.size());
            for right_neuron in right.neurons() {
                let row = left.neurons().iter()
                    .map(|left_neuron| {
                        let weight = init.draw(left.size(), rng)?;
                        Edge::new(left_neuron.id(), right_neuron.id(), weight)
                    })
                    .collect::<Result<Vec<Edge>>>()?;
                layer_edges.push(row);
            }
            edges.push(layer_edges);
        }

        debug!(
            "built network: layers {:?}, {} edges, {:?} weights, {}",
            sizes,
            edges.iter().flatten().map(Vec::len).sum::<usize>(),
            init,
            if config.regression { "regression" } else { "classification" },
        );

        Ok(Network {
            relu: config.hidden_activation(),
            optimizer: config.optimizer(),
            softmax: Softmax::new(),
            config,
            layers,
            edges,
        })
    }

    // -----------------------------------------------------------------------
    // Forward pass
    // -----------------------------------------------------------------------

    /// Runs one datapoint through the network.
    ///
    /// Returns the softmax probability of every class for classification, or
    /// a single raw output value for regression. Every neuron keeps its value
    /// for the backward pass.
    pub fn forward(&mut self, x: &[f64]) -> Result<Vec<f64>> {
        let expected = self.layers[0].size();
        if x.len() != expected {
            return Err(NetworkError::InputSizeMismatch { got: x.len(), expected });
        }
        for (neuron, &xj) in self.layers[0].neurons.iter_mut().zip(x) {
            neuron.value = xj;
        }

        let output = self.layers.len() - 1;
        let relu = self.relu;
        for right in 1..output {
            let z = self.pre_activations(right);
            for (neuron, zj) in self.layers[right].neurons.iter_mut().zip(z) {
                neuron.value = relu.function(zj);
            }
        }

        let z = self.pre_activations(output);
        if self.config.regression {
            let y_hat = ActivationFunction::Identity.function(z[0]);
            self.layers[output].neurons[0].value = y_hat;
            return Ok(vec![y_hat]);
        }

        let probabilities = self.softmax.activate(&z);
        for (neuron, &p) in self.layers[output].neurons.iter_mut().zip(&probabilities) {
            neuron.value = p;
        }
        Ok(probabilities)
    }

    /// Raw `z` of every neuron in layer `right` from the current values of
    /// layer `right - 1`.
    fn pre_activations(&self, right: usize) -> Vec<f64> {
        let left_values = self.layers[right - 1].values();
        self.layers[right].neurons.iter()
            .zip(&self.edges[right - 1])
            .map(|(neuron, inner_edges)| {
                let weights: Vec<f64> = inner_edges.iter().map(|e| e.weight).collect();
                pre_activation(&weights, &left_values, neuron.bias)
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Backward pass
    // -----------------------------------------------------------------------

    /// Accumulates the loss gradient of one edge for the datapoint last sent
    /// through [`forward`](Self::forward).
    ///
    /// Edges feeding the output layer take their delta straight from the
    /// loss; hidden edges combine the deltas already stored on the next
    /// layer's edges, so the sweep must run output layer first. `first` marks
    /// the first edge visited for a right neuron, which also records that
    /// neuron's bias gradient. `target` is the true value for regression and
    /// the true class code for classification.
    pub fn store_gradient_of_loss(&mut self, id: EdgeId, target: f64, first: bool) -> Result<()> {
        if self.edge(id).is_none() {
            return Err(NetworkError::UnknownEdge(id));
        }
        let right = id.right();
        let o_left = self.layers[id.left_layer].neurons[id.left_row].value;
        let o_right = self.layers[right.layer].neurons[right.row].value;

        let delta = if id.left_layer == self.config.num_hidden_layers {
            if self.config.regression {
                MseLoss::gradient(o_right, target)
            } else {
                CrossEntropyLoss::gradient(o_right, right.row, target as usize)
            }
        } else {
            // Edges leaving `right` towards the next layer.
            let factor: f64 = self.edges[right.layer].iter()
                .map(|next_row| {
                    let next = &next_row[right.row];
                    next.weight * next.delta
                })
                .sum();
            factor * self.relu.derivative(o_right)
        };

        let edge = &mut self.edges[id.left_layer][id.right_row][id.left_row];
        edge.delta = delta;
        edge.loss_gradients.push(o_left * delta);
        if first {
            self.layers[right.layer].neurons[right.row].bias_gradients.push(delta);
        }
        Ok(())
    }

    /// Full backward sweep for one datapoint, output layer first.
    pub fn store_gradients(&mut self, target: f64) -> Result<()> {
        for left_layer in (0..self.edges.len()).rev() {
            for right_row in 0..self.edges[left_layer].len() {
                for left_row in 0..self.edges[left_layer][right_row].len() {
                    let id = EdgeId { left_layer, left_row, right_row };
                    self.store_gradient_of_loss(id, target, left_row == 0)?;
                }
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Parameter update
    // -----------------------------------------------------------------------

    /// Gradient descent on every weight with the batch-averaged gradient,
    /// then clears the accumulated gradients.
    pub fn back_propagate_weights(&mut self) {
        let optimizer = self.optimizer;
        for edge in self.edges.iter_mut().flatten().flatten() {
            if let Some(avg) = average(&edge.loss_gradients) {
                let (weight, velocity) = optimizer.step_weight(edge.weight, edge.velocity, avg);
                edge.weight = weight;
                edge.velocity = velocity;
            }
            edge.loss_gradients.clear();
        }
    }

    /// Gradient descent on every non-input bias, then clears the
    /// accumulated bias gradients.
    pub fn back_propagate_biases(&mut self) {
        let optimizer = self.optimizer;
        for neuron in self.layers.iter_mut().skip(1).flat_map(|l| l.neurons.iter_mut()) {
            if let Some(avg) = average(&neuron.bias_gradients) {
                neuron.bias = optimizer.step_bias(neuron.bias, avg);
            }
            neuron.bias_gradients.clear();
        }
    }

    /// End-of-batch update: weights first, then biases.
    pub fn apply_gradients(&mut self) {
        self.back_propagate_weights();
        self.back_propagate_biases();
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn is_regressor(&self) -> bool {
        self.config.regression
    }

    pub fn num_features(&self) -> usize {
        self.layers[0].size()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].size()
    }

    /// Sizes of every layer: input, hidden..., output.
    pub fn neuron_counts(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::size).collect()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Edges indexed as `[left_layer][right_row][left_row]`.
    pub fn edges(&self) -> &[Vec<Vec<Edge>>] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> impl Iterator<Item = &mut Edge> {
        self.edges.iter_mut().flatten().flatten()
    }

    pub fn neurons_mut(&mut self) -> impl Iterator<Item = &mut Neuron> {
        self.layers.iter_mut().flat_map(|l| l.neurons.iter_mut())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.left_layer)?.get(id.right_row)?.get(id.left_row)
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.left_layer)?.get_mut(id.right_row)?.get_mut(id.left_row)
    }

    pub fn neuron(&self, id: NeuronId) -> Option<&Neuron> {
        self.layers.get(id.layer)?.neurons.get(id.row)
    }

    pub fn neuron_mut(&mut self, id: NeuronId) -> Option<&mut Neuron> {
        self.layers.get_mut(id.layer)?.neurons.get_mut(id.row)
    }
}
