//! CSV reading and writing for dataset tables.
//!
//! Format:
//! - comma-separated, UTF-8
//! - the first record is a header row and is skipped on read; columns are
//!   assigned positionally as `x_1..x_k, y` with `k = columns - 1`
//! - every record must have the same width

use std::fmt::Display;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::data::header::Header;
use crate::data::table::Table;
use crate::error::{NetworkError, Result};

/// Reads a raw dataset from any CSV source.
pub fn read_table<R: Read>(reader: R) -> Result<Table<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let width = rdr.headers()?.len();
    if width < 2 {
        return Err(NetworkError::EmptyDataset(format!(
            "expected at least one feature column and a label column, got {width} column(s)"
        )));
    }
    let headers = Header::initial(width - 1);
    let mut columns: Vec<Vec<String>> = vec![Vec::new(); width];

    for record in rdr.records() {
        let record = record?;
        for (column, cell) in columns.iter_mut().zip(record.iter()) {
            column.push(cell.to_owned());
        }
    }

    Table::from_columns(headers.into_iter().zip(columns))
}

pub fn read_table_from_path<P: AsRef<Path>>(path: P) -> Result<Table<String>> {
    read_table(File::open(path)?)
}

/// Writes a header row of lower-case column names followed by one row per
/// datapoint.
pub fn write_table<W: Write, T: Display>(writer: W, table: &Table<T>) -> Result<()> {
    table.validate()?;
    let mut wtr = csv::Writer::from_writer(writer);
    let headers: Vec<Header> = table.headers().collect();
    wtr.write_record(headers.iter().map(Header::to_string))?;

    let columns = headers.iter()
        .map(|&h| table.column(h))
        .collect::<Result<Vec<_>>>()?;
    for row in 0..table.num_rows() {
        wtr.write_record(columns.iter().map(|column| column[row].to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_table_to_path<P: AsRef<Path>, T: Display>(path: P, table: &Table<T>) -> Result<()> {
    write_table(File::create(path)?, table)
}
