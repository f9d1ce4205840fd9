use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::network::NetworkConfig;

fn default_num_bins() -> usize { 10 }
fn default_proportions() -> Vec<usize> { vec![8, 1, 1] }

/// Batching and epoch parameters for a Trainer, plus the batch sizes of its
/// Validator and Tester.
///
/// - `weighted`: draw training batches with the stratified partitioner
/// - `num_bins`: value buckets for weighted regression; ignored otherwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    #[serde(default)]
    pub weighted: bool,
    #[serde(default = "default_num_bins")]
    pub num_bins: usize,
    /// Also draw validation and testing batches with the stratified
    /// partitioner, using `num_bins`.
    #[serde(default)]
    pub weighted_evaluation: bool,
    pub validation_batch_size: usize,
    pub testing_batch_size: usize,
}

impl TrainConfig {
    /// Plain shuffled batching; validation and testing reuse `batch_size`.
    pub fn new(epochs: usize, batch_size: usize) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            weighted: false,
            num_bins: default_num_bins(),
            weighted_evaluation: false,
            validation_batch_size: batch_size,
            testing_batch_size: batch_size,
        }
    }

    pub fn weighted(mut self, num_bins: usize) -> Self {
        self.weighted = true;
        self.num_bins = num_bins;
        self
    }

    pub fn with_weighted_evaluation(mut self) -> Self {
        self.weighted_evaluation = true;
        self
    }

    pub fn with_eval_batch_sizes(mut self, validation: usize, testing: usize) -> Self {
        self.validation_batch_size = validation;
        self.testing_batch_size = testing;
        self
    }
}

/// Everything needed to reproduce a run from a single JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub network: NetworkConfig,
    pub train: TrainConfig,
    /// train:validation:test ratio; one or two entries drop the later phases.
    #[serde(default = "default_proportions")]
    pub proportions: Vec<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RunConfig {
    pub fn new(network: NetworkConfig, train: TrainConfig) -> Self {
        RunConfig { network, train, proportions: default_proportions(), seed: None }
    }

    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load_json(path: &str) -> Result<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
