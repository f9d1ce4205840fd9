use log::info;
use rand::Rng;

use crate::data::header::Header;
use crate::data::table::Table;
use crate::error::{NetworkError, Result};
use crate::network::Network;
use crate::train::learner::{Learner, LearnerCore};
use crate::train::metrics::ConfusionMatrix;

/// Final evaluation of a trained network on unseen data.
#[derive(Debug, Clone)]
pub struct Tester {
    core: LearnerCore,
    loss: Option<f64>,
}

impl Tester {
    pub fn new(network: &Network, data: Table<String>, batch_size: usize) -> Result<Tester> {
        Tester::with_partitioning(network, data, batch_size, false, 0)
    }

    /// Stratified testing batches; `num_bins` is only read for regression.
    pub fn with_partitioning(
        network: &Network,
        data: Table<String>,
        batch_size: usize,
        weighted: bool,
        num_bins: usize,
    ) -> Result<Tester> {
        Ok(Tester {
            core: LearnerCore::new(network, data, batch_size, weighted, num_bins)?,
            loss: None,
        })
    }

    /// One pass over the testing set; returns the mean loss.
    ///
    /// For classification the confusion summary is logged and the
    /// categorical frame is filled with predicted names.
    pub fn run<R: Rng + ?Sized>(&mut self, network: &mut Network, rng: &mut R) -> Result<f64> {
        let loss = self.forward_pass_all(network, rng)?;
        info!("testing loss: {loss:.4}");
        self.loss = Some(loss);

        if !self.core.is_regressor() {
            self.core.update_categorical_frame()?;
            let confusion = self.confusion()?;
            info!("confusion matrix (rows y, columns y_hat):\n{confusion}");
            for (name, score) in confusion.dice_scores() {
                info!("dice score {name}: {score:.4}");
            }
            info!("mean dice score: {:.4}", confusion.mean_dice());
        }
        Ok(loss)
    }

    /// Loss of the last [`run`](Self::run), if any.
    pub fn loss(&self) -> Option<f64> {
        self.loss
    }

    /// True against predicted classes of the last run, over the categories
    /// present in the testing data. Predictions of classes the testing data
    /// never contains are left out of the table.
    pub fn confusion(&self) -> Result<ConfusionMatrix> {
        let categories = self.core.categories().ok_or(NetworkError::RegressionHasNoCategories)?;
        let n = categories.len();
        let frame = self.core.frame();
        let (y, y_hat): (Vec<usize>, Vec<usize>) = frame.column(Header::Y)?.iter()
            .zip(frame.column(Header::YHat)?)
            .map(|(&y, &y_hat)| (y as usize, y_hat as usize))
            .filter(|&(_, y_hat)| y_hat < n)
            .unzip();
        ConfusionMatrix::from_codes(categories.to_vec(), &y, &y_hat)
    }
}

impl Learner for Tester {
    fn core(&self) -> &LearnerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LearnerCore {
        &mut self.core
    }
}
