pub mod config;
pub mod edge;
pub mod layer;
pub mod network;
pub mod neuron;

pub use config::NetworkConfig;
pub use edge::{Edge, EdgeId};
pub use layer::Layer;
pub use network::Network;
pub use neuron::{Neuron, NeuronId};
