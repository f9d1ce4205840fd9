use log::debug;
use rand::Rng;

use crate::data::table::Table;
use crate::error::Result;
use crate::network::Network;
use crate::train::learner::{Learner, LearnerCore};

/// Measures the loss of held-out data once per training epoch without
/// touching gradients or parameters.
#[derive(Debug, Clone)]
pub struct Validator {
    core: LearnerCore,
    losses: Vec<f64>,
}

impl Validator {
    /// Validation batches are plain shuffled slices.
    pub fn new(network: &Network, data: Table<String>, batch_size: usize) -> Result<Validator> {
        Validator::with_partitioning(network, data, batch_size, false, 0)
    }

    /// `num_bins` is only read for weighted regression.
    pub fn with_partitioning(
        network: &Network,
        data: Table<String>,
        batch_size: usize,
        weighted: bool,
        num_bins: usize,
    ) -> Result<Validator> {
        Ok(Validator {
            core: LearnerCore::new(network, data, batch_size, weighted, num_bins)?,
            losses: Vec::new(),
        })
    }

    /// Mean loss of the whole validation set under the current parameters.
    pub fn validate<R: Rng + ?Sized>(&mut self, network: &mut Network, epoch: usize, rng: &mut R) -> Result<f64> {
        let loss = self.forward_pass_all(network, rng)?;
        debug!("epoch {epoch}: validation loss {loss:.4}");
        self.losses.push(loss);
        if !self.core.is_regressor() {
            self.core.update_categorical_frame()?;
        }
        Ok(loss)
    }

    /// One entry per call to [`validate`](Self::validate).
    pub fn losses(&self) -> &[f64] {
        &self.losses
    }
}

impl Learner for Validator {
    fn core(&self) -> &LearnerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LearnerCore {
        &mut self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::data::header::Header;
    use crate::network::NetworkConfig;
    use rand::{rngs::StdRng, SeedableRng};

    fn data() -> Table<String> {
        Table::from_columns([
            (Header::X(1), vec!["0.5".into(), "-0.5".into(), "0.1".into(), "0.9".into()]),
            (Header::Y, vec!["Inside".into(), "Inside".into(), "Outside".into(), "Outside".into()]),
        ]).unwrap()
    }

    #[test]
    fn validation_leaves_parameters_alone() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut network = Network::new(NetworkConfig::new(1, 1, vec![3]), &mut rng).unwrap();
        let before = network.clone();
        let mut validator = Validator::new(&network, data(), 3).unwrap();

        let first = validator.validate(&mut network, 0, &mut rng).unwrap();
        let second = validator.validate(&mut network, 1, &mut rng).unwrap();

        assert_eq!(validator.losses(), &[first, second]);
        assert!(first > 0.0);
        assert_relative_eq!(first, second, epsilon = 1e-12);
        for (a, b) in network.edges().iter().flatten().flatten().zip(before.edges().iter().flatten().flatten()) {
            assert_eq!(a.weight(), b.weight());
            assert!(a.loss_gradients().is_empty());
        }
    }

    #[test]
    fn weighted_validation_batches() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut network = Network::new(NetworkConfig::new(1, 1, vec![3]), &mut rng).unwrap();
        let mut validator = Validator::with_partitioning(&network, data(), 2, true, 10).unwrap();
        assert!(validator.core().partitioner().is_weighted());
        assert!(validator.validate(&mut network, 0, &mut rng).unwrap().is_finite());
        assert!(!Validator::new(&network, data(), 2).unwrap().core().partitioner().is_weighted());
    }

    #[test]
    fn predicted_names_are_filled_in() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut network = Network::new(NetworkConfig::new(1, 1, vec![3]), &mut rng).unwrap();
        let mut validator = Validator::new(&network, data(), 2).unwrap();
        validator.validate(&mut network, 0, &mut rng).unwrap();
        let names = validator.core().categorical_frame().unwrap().column(Header::YHat).unwrap();
        assert!(names.iter().all(|n| n == "Inside" || n == "Outside"));
    }
}
