use std::fmt::Display;

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::data::header::Header;
use crate::data::table::Table;
use crate::error::{NetworkError, Result};

/// How each feature coordinate of a synthetic datapoint is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sampling<const K: usize> {
    /// Coordinate `i` uniform on `[lower[i], upper[i])`.
    Uniform { lower: [f64; K], upper: [f64; K] },
    /// Coordinate `i` from N(means[i], std_devs[i]).
    Normal { means: [f64; K], std_devs: [f64; K] },
}

/// Synthetic dataset source: draws `K` features per datapoint and labels
/// them with a user-supplied function.
///
/// The output is a raw `Table<String>` shaped exactly like a CSV read, so it
/// can be split and handed to a learner as-is.
#[derive(Debug, Clone, Copy)]
pub struct DataGenerator<const K: usize, L> {
    labeller: fn([f64; K]) -> L,
    num_datapoints: usize,
    sampling: Sampling<K>,
}

impl<const K: usize, L: Display> DataGenerator<K, L> {
    pub fn uniform(
        labeller: fn([f64; K]) -> L,
        num_datapoints: usize,
        lower: [f64; K],
        upper: [f64; K],
    ) -> Result<Self> {
        Self::check_shape(num_datapoints)?;
        for (coordinate, (&lo, &hi)) in lower.iter().zip(&upper).enumerate() {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(NetworkError::InvalidBounds { coordinate, lower: lo, upper: hi });
            }
        }
        Ok(DataGenerator { labeller, num_datapoints, sampling: Sampling::Uniform { lower, upper } })
    }

    pub fn normal(
        labeller: fn([f64; K]) -> L,
        num_datapoints: usize,
        means: [f64; K],
        std_devs: [f64; K],
    ) -> Result<Self> {
        Self::check_shape(num_datapoints)?;
        for (coordinate, (&mean, &std_dev)) in means.iter().zip(&std_devs).enumerate() {
            if !mean.is_finite() {
                return Err(NetworkError::NonFiniteMean { coordinate, mean });
            }
            if !(std_dev > 0.0 && std_dev.is_finite()) {
                return Err(NetworkError::NonPositiveStdDev { coordinate, std_dev });
            }
        }
        Ok(DataGenerator { labeller, num_datapoints, sampling: Sampling::Normal { means, std_devs } })
    }

    fn check_shape(num_datapoints: usize) -> Result<()> {
        if K == 0 {
            return Err(NetworkError::EmptyDataset("a datapoint needs at least one coordinate".into()));
        }
        if num_datapoints == 0 {
            return Err(NetworkError::EmptyDataset("number of datapoints must be positive".into()));
        }
        Ok(())
    }

    pub fn num_datapoints(&self) -> usize {
        self.num_datapoints
    }

    pub fn sampling(&self) -> &Sampling<K> {
        &self.sampling
    }

    fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R, normals: &[Normal<f64>]) -> [f64; K] {
        let mut point = [0.0; K];
        match &self.sampling {
            Sampling::Uniform { lower, upper } => {
                for (i, x) in point.iter_mut().enumerate() {
                    *x = rng.gen_range(lower[i]..upper[i]);
                }
            }
            Sampling::Normal { .. } => {
                for (x, normal) in point.iter_mut().zip(normals) {
                    *x = normal.sample(rng);
                }
            }
        }
        point
    }

    /// Draws `num_datapoints` labelled points into columns `x_1..x_K, y`.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Table<String>> {
        let normals = match &self.sampling {
            Sampling::Uniform { .. } => Vec::new(),
            Sampling::Normal { means, std_devs } => means.iter().zip(std_devs).enumerate()
                .map(|(coordinate, (&mean, &std_dev))| {
                    Normal::new(mean, std_dev)
                        .map_err(|_| NetworkError::NonPositiveStdDev { coordinate, std_dev })
                })
                .collect::<Result<Vec<_>>>()?,
        };

        let mut features: Vec<Vec<String>> = vec![Vec::with_capacity(self.num_datapoints); K];
        let mut labels = Vec::with_capacity(self.num_datapoints);
        for _ in 0..self.num_datapoints {
            let point = self.sample_point(rng, &normals);
            for (column, x) in features.iter_mut().zip(point) {
                column.push(x.to_string());
            }
            labels.push((self.labeller)(point).to_string());
        }

        let mut columns: Vec<(Header, Vec<String>)> = Header::features(K).into_iter()
            .zip(features)
            .collect();
        columns.push((Header::Y, labels));
        Table::from_columns(columns)
    }
}
