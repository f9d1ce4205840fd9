use std::collections::BTreeMap;

use log::debug;
use rand::Rng;

use crate::error::{NetworkError, Result};
use crate::partition::uniform::check_sizes;

/// Stratified sampler: every drawn index first picks a bin uniformly, then an
/// index of that bin uniformly **with replacement**, so rare classes (or
/// sparse value ranges) are seen as often as common ones.
///
/// Bins are the classes for classification and equal-width value buckets
/// over `[min(y), max(y)]` for regression. Empty buckets are dropped and the
/// remaining bins are numbered contiguously from 0.
#[derive(Debug, Clone)]
pub struct WeightedPartitioner {
    num_ints: usize,
    set_size: usize,
    bins: Vec<Vec<usize>>,
}

impl WeightedPartitioner {
    /// `y` holds one true value (regression) or class code (classification)
    /// per index; `num_bins` is only read for regression.
    pub fn new(
        num_ints: usize,
        set_size: usize,
        y: &[f64],
        regression: bool,
        num_bins: usize,
    ) -> Result<WeightedPartitioner> {
        check_sizes(num_ints, set_size)?;
        if y.len() != num_ints {
            return Err(NetworkError::LabelCountMismatch { labels: y.len(), datapoints: num_ints });
        }
        let bins = if regression {
            value_bins(y, num_bins)?
        } else {
            class_bins(y)
        };
        debug!(
            "weighted partitioner: {} bins with sizes {:?}",
            bins.len(),
            bins.iter().map(Vec::len).collect::<Vec<_>>()
        );
        Ok(WeightedPartitioner { num_ints, set_size, bins })
    }

    pub fn num_batches(&self) -> usize {
        self.num_ints.div_ceil(self.set_size)
    }

    pub fn num_ints(&self) -> usize {
        self.num_ints
    }

    pub fn set_size(&self) -> usize {
        self.set_size
    }

    /// Indices grouped by (relabelled) bin.
    pub fn bins(&self) -> &[Vec<usize>] {
        &self.bins
    }

    pub fn partition<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Vec<usize>> {
        self.draw(rng)
            .into_iter()
            .map(|batch| batch.into_iter().map(|(_, index)| index).collect())
            .collect()
    }

    /// Batches of `(bin, index)` draws: all bin choices of a batch are made
    /// first, then one member of each chosen bin.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Vec<(usize, usize)>> {
        let num_bins = self.bins.len();
        (0..self.num_batches())
            .map(|batch| {
                let start = batch * self.set_size;
                let len = self.set_size.min(self.num_ints - start);
                let chosen: Vec<usize> = (0..len).map(|_| rng.gen_range(0..num_bins)).collect();
                chosen.into_iter()
                    .map(|bin| {
                        let members = &self.bins[bin];
                        (bin, members[rng.gen_range(0..members.len())])
                    })
                    .collect()
            })
            .collect()
    }
}

fn class_bins(y: &[f64]) -> Vec<Vec<usize>> {
    let mut classes: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &class) in y.iter().enumerate() {
        classes.entry(class as usize).or_default().push(i);
    }
    classes.into_values().collect()
}

fn value_bins(y: &[f64], num_bins: usize) -> Result<Vec<Vec<usize>>> {
    if num_bins == 0 {
        return Err(NetworkError::InvalidBinCount);
    }
    let min_y = y.iter().copied().fold(f64::INFINITY, f64::min);
    let max_y = y.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max_y - min_y) / num_bins as f64;

    let mut bins = vec![Vec::new(); num_bins];
    for (i, &value) in y.iter().enumerate() {
        // max(y) lands exactly on the upper edge; keep it in the last bin.
        let bin = if width > 0.0 { ((value - min_y) / width) as usize } else { 0 };
        bins[bin.min(num_bins - 1)].push(i);
    }
    bins.retain(|members| !members.is_empty());
    Ok(bins)
}
