use std::collections::BTreeSet;

use rand::Rng;

use crate::data::header::Header;
use crate::data::table::Table;
use crate::error::{NetworkError, Result};
use crate::loss::{CrossEntropyLoss, LossType, MseLoss};
use crate::network::Network;
use crate::partition::{Partitioner, UniformPartitioner, WeightedPartitioner};

/// State shared by the Trainer, Validator and Tester: the numeric frame a
/// learner iterates over, its category names and its batch sampler.
///
/// The numeric frame holds `x_1..x_k, y, y_hat`. For classification `y` and
/// `y_hat` hold class codes, assigned by lexicographic order of the distinct
/// label strings seen by this learner, and a parallel categorical frame keeps
/// the original strings.
#[derive(Debug, Clone)]
pub struct LearnerCore {
    frame: Table<f64>,
    features: Vec<Header>,
    categories: Option<Vec<String>>,
    categorical: Option<Table<String>>,
    num_datapoints: usize,
    batch_size: usize,
    partitioner: Partitioner,
    loss_type: LossType,
}

impl LearnerCore {
    /// Checks `data` against `network` and converts it to numbers.
    ///
    /// `num_bins` is only read for weighted regression.
    pub fn new(
        network: &Network,
        data: Table<String>,
        batch_size: usize,
        weighted: bool,
        num_bins: usize,
    ) -> Result<LearnerCore> {
        data.validate()?;
        let features = data.feature_headers();
        if features.len() != network.num_features() {
            return Err(NetworkError::FeatureCountMismatch {
                features: features.len(),
                inputs: network.num_features(),
            });
        }
        let num_datapoints = data.column(Header::Y)?.len();
        if batch_size > num_datapoints {
            return Err(NetworkError::BatchSizeTooLarge { batch_size, datapoints: num_datapoints });
        }

        let mut frame = Table::new();
        for &header in &features {
            frame.insert_column(header, parse_column(header, data.column(header)?)?);
        }
        frame.insert_column(Header::YHat, vec![0.0; num_datapoints]);

        let regression = network.is_regressor();
        let (categories, categorical) = if regression {
            frame.insert_column(Header::Y, parse_column(Header::Y, data.column(Header::Y)?)?);
            (None, None)
        } else {
            let labels = data.column(Header::Y)?;
            let categories: Vec<String> = labels.iter()
                .cloned()
                .collect::<BTreeSet<String>>()
                .into_iter()
                .collect();
            if network.output_size() < categories.len() {
                return Err(NetworkError::TooFewOutputs {
                    outputs: network.output_size(),
                    classes: categories.len(),
                });
            }
            let codes = labels.iter()
                .map(|label| categories.binary_search(label).unwrap_or_default() as f64)
                .collect();
            frame.insert_column(Header::Y, codes);

            let mut categorical = data;
            categorical.insert_column(Header::YHat, vec![String::new(); num_datapoints]);
            (Some(categories), Some(categorical))
        };

        let partitioner = if weighted {
            Partitioner::Weighted(WeightedPartitioner::new(
                num_datapoints,
                batch_size,
                frame.column(Header::Y)?,
                regression,
                num_bins,
            )?)
        } else {
            Partitioner::Uniform(UniformPartitioner::new(num_datapoints, batch_size)?)
        };

        Ok(LearnerCore {
            frame,
            features,
            categories,
            categorical,
            num_datapoints,
            batch_size,
            partitioner,
            loss_type: network.config().loss_type(),
        })
    }

    /// Forward pass of datapoint `index`: records the prediction in `y_hat`
    /// (argmax class code or raw value) and returns the loss together with the
    /// target the backward pass needs.
    pub fn forward_one(&mut self, network: &mut Network, index: usize) -> Result<(f64, f64)> {
        let x = self.features.iter()
            .map(|&h| self.frame.column(h).map(|column| column[index]))
            .collect::<Result<Vec<f64>>>()?;
        let y = self.frame.column(Header::Y)?[index];
        let output = network.forward(&x)?;

        let (loss, y_hat) = match self.loss_type {
            LossType::Mse => (MseLoss::loss(output[0], y), output[0]),
            LossType::CrossEntropy => {
                let loss = CrossEntropyLoss::loss(&output, y as usize)?;
                (loss, argmax(&output) as f64)
            }
        };
        self.frame.column_mut(Header::YHat)?[index] = y_hat;
        Ok((loss, y))
    }

    pub fn partition<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Vec<usize>> {
        self.partitioner.partition(rng)
    }

    /// Rewrites the categorical `y_hat` column from the current class codes.
    /// Predicted codes with no observed category are shown as `#code`.
    pub fn update_categorical_frame(&mut self) -> Result<()> {
        let (Some(categories), Some(categorical)) = (&self.categories, &mut self.categorical) else {
            return Err(NetworkError::RegressionHasNoCategories);
        };
        let names = self.frame.column(Header::YHat)?.iter()
            .map(|&code| category_name(categories, code as usize));
        for (cell, name) in categorical.column_mut(Header::YHat)?.iter_mut().zip(names) {
            *cell = name;
        }
        Ok(())
    }

    pub fn frame(&self) -> &Table<f64> {
        &self.frame
    }

    pub fn categories(&self) -> Option<&[String]> {
        self.categories.as_deref()
    }

    pub fn categorical_frame(&self) -> Option<&Table<String>> {
        self.categorical.as_ref()
    }

    pub fn is_regressor(&self) -> bool {
        self.loss_type == LossType::Mse
    }

    pub fn num_features(&self) -> usize {
        self.features.len()
    }

    pub fn num_datapoints(&self) -> usize {
        self.num_datapoints
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn partitioner(&self) -> &Partitioner {
        &self.partitioner
    }

    pub fn loss_type(&self) -> LossType {
        self.loss_type
    }
}

/// The capability every learning phase shares: run a batch forward and
/// optionally record gradients for it.
pub trait Learner {
    fn core(&self) -> &LearnerCore;

    fn core_mut(&mut self) -> &mut LearnerCore;

    /// Called after each datapoint's forward pass. Only training records
    /// anything.
    fn store_gradients(&mut self, _network: &mut Network, _target: f64) -> Result<()> {
        Ok(())
    }

    /// Summed loss of the datapoints in `batch`.
    fn forward_pass_one_batch(&mut self, network: &mut Network, batch: &[usize]) -> Result<f64> {
        let mut total = 0.0;
        for &index in batch {
            let (loss, target) = self.core_mut().forward_one(network, index)?;
            total += loss;
            self.store_gradients(network, target)?;
        }
        Ok(total)
    }

    /// One full sweep over the partitioned data, returning the summed loss
    /// divided by the number of datapoints.
    fn forward_pass_all<R: Rng + ?Sized>(&mut self, network: &mut Network, rng: &mut R) -> Result<f64>
    where
        Self: Sized,
    {
        let batches = self.core().partition(rng);
        let mut total = 0.0;
        for batch in batches {
            total += self.forward_pass_one_batch(network, &batch)?;
        }
        Ok(total / self.core().num_datapoints() as f64)
    }
}

pub(crate) fn category_name(categories: &[String], code: usize) -> String {
    categories.get(code).cloned().unwrap_or_else(|| format!("#{code}"))
}

/// Index of the largest value; the first one on ties.
fn argmax(values: &[f64]) -> usize {
    values.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, max), (i, &v)| if v > max { (i, v) } else { (best, max) })
        .0
}

fn parse_column(header: Header, values: &[String]) -> Result<Vec<f64>> {
    values.iter()
        .map(|value| {
            value.trim().parse::<f64>().map_err(|_| NetworkError::NotNumeric {
                header,
                value: value.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkConfig;
    use rand::{rngs::StdRng, SeedableRng};

    fn labelled(labels: &[&str]) -> Table<String> {
        let n = labels.len();
        Table::from_columns([
            (Header::X(1), (0..n).map(|i| format!("{}", i as f64 / 10.0)).collect()),
            (Header::X(2), (0..n).map(|i| format!("{}", 1.0 - i as f64 / 10.0)).collect()),
            (Header::Y, labels.iter().map(|s| s.to_string()).collect()),
        ]).unwrap()
    }

    fn classifier(classes: usize) -> Network {
        let config = NetworkConfig::new(2, 1, vec![3]).with_classes(classes);
        Network::new(config, &mut StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn categories_are_sorted_and_coded() {
        let core = LearnerCore::new(&classifier(3), labelled(&["b", "c", "a", "b"]), 2, false, 10).unwrap();
        assert_eq!(core.categories().unwrap(), &["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(core.frame().column(Header::Y).unwrap(), &[1.0, 2.0, 0.0, 1.0]);
        assert_eq!(core.frame().column(Header::YHat).unwrap(), &[0.0; 4]);
        assert_eq!(core.num_datapoints(), 4);
    }

    #[test]
    fn feature_count_must_match_inputs() {
        let network = Network::new(NetworkConfig::new(3, 1, vec![2]), &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(matches!(
            LearnerCore::new(&network, labelled(&["a", "b"]), 1, false, 10),
            Err(NetworkError::FeatureCountMismatch { features: 2, inputs: 3 })
        ));
    }

    #[test]
    fn batch_larger_than_data_fails() {
        assert!(matches!(
            LearnerCore::new(&classifier(2), labelled(&["a", "b"]), 3, false, 10),
            Err(NetworkError::BatchSizeTooLarge { batch_size: 3, datapoints: 2 })
        ));
    }

    #[test]
    fn more_classes_than_outputs_fails() {
        assert!(matches!(
            LearnerCore::new(&classifier(2), labelled(&["a", "b", "c"]), 1, false, 10),
            Err(NetworkError::TooFewOutputs { outputs: 2, classes: 3 })
        ));
    }

    #[test]
    fn non_numeric_features_fail() {
        let mut data = labelled(&["a", "b"]);
        data.column_mut(Header::X(2)).unwrap()[1] = "north".into();
        assert!(matches!(
            LearnerCore::new(&classifier(2), data, 1, false, 10),
            Err(NetworkError::NotNumeric { header: Header::X(2), .. })
        ));
    }

    #[test]
    fn regression_keeps_numeric_targets() {
        let network = Network::new(NetworkConfig::new(2, 1, vec![3]).regression(), &mut StdRng::seed_from_u64(0)).unwrap();
        let mut core = LearnerCore::new(&network, labelled(&["0.5", "-1.25"]), 1, true, 4).unwrap();
        assert_eq!(core.frame().column(Header::Y).unwrap(), &[0.5, -1.25]);
        assert!(core.categories().is_none());
        assert!(core.partitioner().is_weighted());
        assert!(matches!(core.update_categorical_frame(), Err(NetworkError::RegressionHasNoCategories)));
    }

    #[test]
    fn forward_records_prediction() {
        let mut network = classifier(2);
        let mut core = LearnerCore::new(&network, labelled(&["a", "b", "b"]), 1, false, 10).unwrap();
        let (loss, target) = core.forward_one(&mut network, 1).unwrap();
        assert_eq!(target, 1.0);
        assert!(loss >= 0.0);
        let y_hat = core.frame().column(Header::YHat).unwrap()[1];
        assert!(y_hat == 0.0 || y_hat == 1.0);

        core.update_categorical_frame().unwrap();
        let names = core.categorical_frame().unwrap().column(Header::YHat).unwrap();
        assert_eq!(names[1], if y_hat == 0.0 { "a" } else { "b" });
    }

    #[test]
    fn argmax_prefers_first_maximum() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), 1);
        assert_eq!(argmax(&[1.0]), 0);
        assert_eq!(category_name(&["a".to_string()], 3), "#3");
    }
}
