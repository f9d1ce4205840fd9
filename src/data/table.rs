use std::collections::BTreeMap;

use crate::data::header::Header;
use crate::error::{NetworkError, Result};

/// Column store keyed by [`Header`], one row per datapoint.
///
/// A raw dataset is a `Table<String>` with columns `x_1..x_k, y`; learners
/// keep a numeric `Table<f64>` with an extra `y_hat` column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    columns: BTreeMap<Header, Vec<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table { columns: BTreeMap::new() }
    }
}

impl<T> Table<T> {
    pub fn new() -> Table<T> {
        Table::default()
    }

    /// Builds a table and checks that every column has the same length.
    pub fn from_columns<I>(columns: I) -> Result<Table<T>>
    where
        I: IntoIterator<Item = (Header, Vec<T>)>,
    {
        let table = Table { columns: columns.into_iter().collect() };
        table.validate()?;
        Ok(table)
    }

    /// Inserts or replaces a column, returning the previous one.
    pub fn insert_column(&mut self, header: Header, values: Vec<T>) -> Option<Vec<T>> {
        self.columns.insert(header, values)
    }

    pub fn column(&self, header: Header) -> Result<&[T]> {
        self.columns.get(&header)
            .map(Vec::as_slice)
            .ok_or(NetworkError::MissingColumn(header))
    }

    pub fn column_mut(&mut self, header: Header) -> Result<&mut [T]> {
        self.columns.get_mut(&header)
            .map(Vec::as_mut_slice)
            .ok_or(NetworkError::MissingColumn(header))
    }

    pub fn contains(&self, header: Header) -> bool {
        self.columns.contains_key(&header)
    }

    /// Headers in column order.
    pub fn headers(&self) -> impl Iterator<Item = Header> + '_ {
        self.columns.keys().copied()
    }

    pub fn feature_headers(&self) -> Vec<Header> {
        self.headers().filter(Header::is_feature).collect()
    }

    pub fn num_features(&self) -> usize {
        self.headers().filter(Header::is_feature).count()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.values().next().map_or(0, Vec::len)
    }

    pub fn validate(&self) -> Result<()> {
        let expected = self.num_rows();
        for (&header, values) in &self.columns {
            if values.len() != expected {
                return Err(NetworkError::RaggedColumns { header, len: values.len(), expected });
            }
        }
        Ok(())
    }
}

impl<T: Clone> Table<T> {
    /// Rows `from..to` of every column, clamped to the rows that exist.
    pub fn slice(&self, from: usize, to: usize) -> Table<T> {
        let to = to.min(self.num_rows());
        let from = from.min(to);
        Table {
            columns: self.columns.iter()
                .map(|(&header, values)| (header, values[from..to].to_vec()))
                .collect(),
        }
    }

    /// One row, in column order.
    pub fn row(&self, index: usize) -> Vec<T> {
        self.columns.values().map(|values| values[index].clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table<String> {
        Table::from_columns([
            (Header::Y, vec!["a".into(), "b".into(), "a".into()]),
            (Header::X(2), vec!["4".into(), "5".into(), "6".into()]),
            (Header::X(1), vec!["1".into(), "2".into(), "3".into()]),
        ]).unwrap()
    }

    #[test]
    fn columns_are_ordered() {
        let table = sample();
        assert_eq!(table.headers().collect::<Vec<_>>(), vec![Header::X(1), Header::X(2), Header::Y]);
        assert_eq!(table.feature_headers(), vec![Header::X(1), Header::X(2)]);
        assert_eq!(table.num_features(), 2);
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.row(1), vec!["2", "5", "b"]);
    }

    #[test]
    fn slicing_keeps_every_column() {
        let part = sample().slice(1, 3);
        assert_eq!(part.num_rows(), 2);
        assert_eq!(part.column(Header::X(1)).unwrap(), &["2".to_string(), "3".to_string()]);
        assert_eq!(part.column(Header::Y).unwrap(), &["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn slicing_past_the_end_is_clamped() {
        let table = sample();
        assert_eq!(table.slice(2, 10).num_rows(), 1);
        assert_eq!(table.slice(5, 9).num_rows(), 0);
        assert_eq!(table.slice(2, 1).num_rows(), 0);
        assert_eq!(table.slice(2, 1).headers().count(), 3);
    }

    #[test]
    fn ragged_columns_fail() {
        let result = Table::from_columns([
            (Header::X(1), vec![1.0, 2.0]),
            (Header::Y, vec![1.0]),
        ]);
        assert!(matches!(result, Err(NetworkError::RaggedColumns { header: Header::Y, len: 1, expected: 2 })));
    }

    #[test]
    fn missing_column_is_reported() {
        let table: Table<f64> = Table::new();
        assert!(matches!(table.column(Header::YHat), Err(NetworkError::MissingColumn(Header::YHat))));
        assert_eq!(table.num_rows(), 0);
    }
}
