use std::collections::BTreeMap;
use std::fmt;

use crate::error::{NetworkError, Result};

/// Contingency table of true (rows) against predicted (columns) classes.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    categories: Vec<String>,
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// `counts[i][j]` is the number of datapoints of class `i` predicted as
    /// class `j`; the table must be square with one row per category.
    pub fn new(categories: Vec<String>, counts: Vec<Vec<usize>>) -> Result<ConfusionMatrix> {
        let n = categories.len();
        if counts.len() != n {
            return Err(NetworkError::LabelCountMismatch { labels: n, datapoints: counts.len() });
        }
        if let Some(row) = counts.iter().find(|row| row.len() != n) {
            return Err(NetworkError::LabelCountMismatch { labels: n, datapoints: row.len() });
        }
        Ok(ConfusionMatrix { categories, counts })
    }

    /// Tallies pairs of class codes. Codes must index into `categories`.
    pub fn from_codes(categories: Vec<String>, y: &[usize], y_hat: &[usize]) -> Result<ConfusionMatrix> {
        if y.len() != y_hat.len() {
            return Err(NetworkError::LabelCountMismatch { labels: y_hat.len(), datapoints: y.len() });
        }
        let n = categories.len();
        let mut counts = vec![vec![0; n]; n];
        for (&truth, &predicted) in y.iter().zip(y_hat) {
            let class = truth.max(predicted);
            if class >= n {
                return Err(NetworkError::ClassOutOfRange { class, len: n });
            }
            counts[truth][predicted] += 1;
        }
        Ok(ConfusionMatrix { categories, counts })
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// `2·TP / (row sum + column sum)` per class; 0 for a class that neither
    /// occurs nor is predicted.
    pub fn dice_scores(&self) -> BTreeMap<String, f64> {
        self.categories.iter()
            .enumerate()
            .map(|(i, name)| {
                let row: usize = self.counts[i].iter().sum();
                let column: usize = self.counts.iter().map(|r| r[i]).sum();
                let score = if row + column == 0 {
                    0.0
                } else {
                    2.0 * self.counts[i][i] as f64 / (row + column) as f64
                };
                (name.clone(), score)
            })
            .collect()
    }

    /// Unweighted mean of the per-class Dice scores.
    pub fn mean_dice(&self) -> f64 {
        let scores = self.dice_scores();
        if scores.is_empty() {
            return 0.0;
        }
        scores.values().sum::<f64>() / scores.len() as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let corner = "y \\ y_hat";
        let width = self.categories.iter()
            .map(String::len)
            .chain(self.counts.iter().flatten().map(|c| c.to_string().len()))
            .max()
            .unwrap_or(0)
            .max(corner.len());

        write!(f, "{corner:>width$}")?;
        for name in &self.categories {
            write!(f, " {name:>width$}")?;
        }
        writeln!(f)?;
        for (name, row) in self.categories.iter().zip(&self.counts) {
            write!(f, "{name:>width$}")?;
            for count in row {
                write!(f, " {count:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dice_of_two_by_two() {
        let matrix = ConfusionMatrix::new(names(&["a", "b"]), vec![vec![3, 0], vec![1, 1]]).unwrap();
        let dice = matrix.dice_scores();
        assert_relative_eq!(dice["a"], 6.0 / 7.0);
        assert_relative_eq!(dice["b"], 2.0 / 3.0);
        assert_relative_eq!(matrix.mean_dice(), (6.0 / 7.0 + 2.0 / 3.0) / 2.0);
        assert_relative_eq!(matrix.mean_dice(), 0.7619, epsilon = 1e-4);
    }

    #[test]
    fn tally_from_codes() {
        let matrix = ConfusionMatrix::from_codes(
            names(&["Inside", "Outside"]),
            &[0, 0, 0, 1, 1],
            &[0, 0, 0, 0, 1],
        ).unwrap();
        assert_eq!(matrix.counts(), &[vec![3, 0], vec![1, 1]]);
        assert_eq!(matrix.total(), 5);
    }

    #[test]
    fn absent_class_scores_zero() {
        let matrix = ConfusionMatrix::from_codes(names(&["a", "b", "c"]), &[0, 1], &[0, 1]).unwrap();
        let dice = matrix.dice_scores();
        assert_eq!(dice["a"], 1.0);
        assert_eq!(dice["c"], 0.0);
    }

    #[test]
    fn codes_outside_categories_fail() {
        assert!(matches!(
            ConfusionMatrix::from_codes(names(&["a"]), &[0], &[1]),
            Err(NetworkError::ClassOutOfRange { class: 1, len: 1 })
        ));
        assert!(ConfusionMatrix::new(names(&["a", "b"]), vec![vec![1, 0]]).is_err());
    }

    #[test]
    fn display_has_a_row_per_class() {
        let matrix = ConfusionMatrix::new(names(&["a", "b"]), vec![vec![3, 0], vec![1, 1]]).unwrap();
        let text = matrix.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].trim_start().starts_with("y \\ y_hat"));
        assert!(lines[2].split_whitespace().eq(["b", "1", "1"]));
    }
}
