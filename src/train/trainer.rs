use std::time::Instant;

use log::{info, trace};
use rand::Rng;

use crate::data::table::Table;
use crate::error::Result;
use crate::network::Network;
use crate::train::epoch_stats::{EpochStats, LossHistory};
use crate::train::learner::{Learner, LearnerCore};
use crate::train::train_config::TrainConfig;
use crate::train::validator::Validator;

/// Mini-batch gradient descent over a training set, with an optional
/// Validator consulted once per epoch.
#[derive(Debug, Clone)]
pub struct Trainer {
    core: LearnerCore,
    epochs: usize,
    validator: Option<Validator>,
    history: Vec<EpochStats>,
}

impl Trainer {
    pub fn new(
        network: &Network,
        data: Table<String>,
        batch_size: usize,
        weighted: bool,
        num_bins: usize,
        epochs: usize,
        validator: Option<Validator>,
    ) -> Result<Trainer> {
        Ok(Trainer {
            core: LearnerCore::new(network, data, batch_size, weighted, num_bins)?,
            epochs,
            validator,
            history: Vec::with_capacity(epochs),
        })
    }

    pub fn from_config(
        network: &Network,
        data: Table<String>,
        config: &TrainConfig,
        validator: Option<Validator>,
    ) -> Result<Trainer> {
        Trainer::new(
            network,
            data,
            config.batch_size,
            config.weighted,
            config.num_bins,
            config.epochs,
            validator,
        )
    }

    /// Trains `network` in place for every configured epoch.
    ///
    /// Each batch is run forward with gradients recorded, then the batch's
    /// averaged gradients are applied. Progress is logged every
    /// `ceil(epochs / 100)` epochs. For classification the categorical frame
    /// holds the predicted names of the final epoch afterwards.
    pub fn run<R: Rng + ?Sized>(&mut self, network: &mut Network, rng: &mut R) -> Result<()> {
        info!(
            "training for {} epochs: {} datapoints, batch size {}, learning rate {}, {} batches",
            self.epochs,
            self.core.num_datapoints(),
            self.core.batch_size(),
            network.config().learning_rate,
            if self.core.partitioner().is_weighted() { "weighted" } else { "uniform" },
        );
        let factor = self.epochs.div_ceil(100).max(1);

        for epoch in 0..self.epochs {
            let t_start = Instant::now();

            let batches = self.core.partition(rng);
            let mut total_loss = 0.0;
            for (i, batch) in batches.iter().enumerate() {
                let batch_loss = self.forward_pass_one_batch(network, batch)?;
                network.apply_gradients();
                trace!("epoch {epoch} batch {i}: loss {batch_loss:.4}");
                total_loss += batch_loss;
            }
            let train_loss = total_loss / self.core.num_datapoints() as f64;

            let val_loss = match self.validator.as_mut() {
                Some(validator) => Some(validator.validate(network, epoch, rng)?),
                None => None,
            };

            if epoch % factor == 0 {
                match val_loss {
                    Some(v) => info!("epoch {epoch}: training loss {train_loss:.4}, validation loss {v:.4}"),
                    None => info!("epoch {epoch}: training loss {train_loss:.4}"),
                }
            }

            self.history.push(EpochStats {
                epoch,
                total_epochs: self.epochs,
                train_loss,
                val_loss,
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            });
        }

        if !self.core.is_regressor() {
            self.core.update_categorical_frame()?;
        }
        Ok(())
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    /// One entry per completed epoch, across every call to `run`.
    pub fn history(&self) -> &[EpochStats] {
        &self.history
    }

    pub fn loss_history(&self) -> LossHistory {
        LossHistory::from_stats(&self.history)
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }
}

impl Learner for Trainer {
    fn core(&self) -> &LearnerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LearnerCore {
        &mut self.core
    }

    fn store_gradients(&mut self, network: &mut Network, target: f64) -> Result<()> {
        network.store_gradients(target)
    }
}
