pub mod activation;
pub mod data;
pub mod error;
pub mod loss;
pub mod math;
pub mod network;
pub mod optim;
pub mod partition;
pub mod train;

// Convenience re-exports
pub use activation::{ActivationFunction, Softmax};
pub use data::{Header, Problem, Table};
pub use error::{NetworkError, Result};
pub use loss::{CrossEntropyLoss, LossType, MseLoss};
pub use network::{Network, NetworkConfig};
pub use optim::Sgd;
pub use partition::{Partitioner, UniformPartitioner, WeightedPartitioner};
pub use train::{ConfusionMatrix, Learner, LossHistory, RunConfig, Tester, TrainConfig, Trainer, Validator};
