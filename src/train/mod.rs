//! The three learning phases and what they report.
//!
//! [`Trainer`], [`Validator`] and [`Tester`] share a [`LearnerCore`] and the
//! [`Learner`] capability; only the Trainer stores gradients.

pub mod epoch_stats;
pub mod learner;
pub mod metrics;
pub mod tester;
pub mod train_config;
pub mod trainer;
pub mod validator;

pub use epoch_stats::{EpochStats, LossHistory};
pub use learner::{Learner, LearnerCore};
pub use metrics::ConfusionMatrix;
pub use tester::Tester;
pub use train_config::{RunConfig, TrainConfig};
pub use trainer::Trainer;
pub use validator::Validator;
