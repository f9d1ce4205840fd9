use crate::data::table::Table;
use crate::error::{NetworkError, Result};

/// Splits a table into 1–3 consecutive parts (train:validation:test) by
/// relative proportion.
///
/// Every part but the last gets `floor(n · p_i / Σp)` rows, at least one;
/// the last part gets whatever remains. Row order is preserved.
pub fn split<T: Clone>(table: &Table<T>, proportions: &[usize]) -> Result<Vec<Table<T>>> {
    if proportions.is_empty() || proportions.len() > 3 {
        return Err(NetworkError::InvalidProportions(format!(
            "expected 1-3 proportions denoting the train:validation:test ratio, got {}",
            proportions.len()
        )));
    }
    let total: usize = proportions.iter().sum();
    if total == 0 {
        return Err(NetworkError::InvalidProportions("proportions must not all be zero".into()));
    }

    let n = table.num_rows();
    let mut parts = Vec::with_capacity(proportions.len());
    let mut start = 0;
    for &p in &proportions[..proportions.len() - 1] {
        let len = ((n as f64 * p as f64 / total as f64) as usize).max(1);
        let end = (start + len).min(n);
        parts.push(table.slice(start, end));
        start = end;
    }
    parts.push(table.slice(start, n));
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::header::Header;

    fn numbered(n: usize) -> Table<f64> {
        Table::from_columns([
            (Header::X(1), (0..n).map(|i| i as f64).collect()),
            (Header::Y, vec![0.0; n]),
        ]).unwrap()
    }

    #[test]
    fn eight_one_one() {
        let parts = split(&numbered(100), &[8, 1, 1]).unwrap();
        assert_eq!(parts.iter().map(Table::num_rows).collect::<Vec<_>>(), vec![80, 10, 10]);
        assert_eq!(parts[1].column(Header::X(1)).unwrap()[0], 80.0);
    }

    #[test]
    fn remainder_goes_last() {
        let parts = split(&numbered(11), &[1, 1]).unwrap();
        assert_eq!(parts.iter().map(Table::num_rows).collect::<Vec<_>>(), vec![5, 6]);
    }

    #[test]
    fn tiny_parts_get_one_row() {
        let parts = split(&numbered(5), &[8, 1, 1]).unwrap();
        assert_eq!(parts.iter().map(Table::num_rows).collect::<Vec<_>>(), vec![4, 1, 0]);
    }

    #[test]
    fn single_proportion_keeps_everything() {
        let parts = split(&numbered(7), &[3]).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].num_rows(), 7);
    }

    #[test]
    fn invalid_proportions() {
        assert!(split(&numbered(5), &[]).is_err());
        assert!(split(&numbered(5), &[1, 1, 1, 1]).is_err());
        assert!(split(&numbered(5), &[0, 0]).is_err());
    }
}
