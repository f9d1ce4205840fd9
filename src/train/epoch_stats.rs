use serde::{Serialize, Deserialize};

use crate::error::Result;

/// Per-epoch training statistics recorded by the Trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 0-based epoch index.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Summed training loss of the epoch divided by the number of datapoints.
    pub train_loss: f64,
    /// Mean validation loss, if a Validator was attached.
    pub val_loss: Option<f64>,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

/// The two loss series of a training run, ready for external plotting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LossHistory {
    pub training: Vec<f64>,
    pub validation: Option<Vec<f64>>,
}

impl LossHistory {
    pub fn from_stats(stats: &[EpochStats]) -> LossHistory {
        let training = stats.iter().map(|s| s.train_loss).collect();
        let validation = stats.iter().map(|s| s.val_loss).collect::<Option<Vec<f64>>>();
        LossHistory {
            training,
            validation: validation.filter(|v| !v.is_empty()),
        }
    }

    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
