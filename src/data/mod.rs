//! Tabular datasets and their sources: the column store learners consume,
//! CSV files, proportional splitting and synthetic generation.

pub mod csv;
pub mod generator;
pub mod header;
pub mod splitter;
pub mod table;
pub mod toy;

pub use self::csv::{read_table, read_table_from_path, write_table, write_table_to_path};
pub use generator::{DataGenerator, Sampling};
pub use header::Header;
pub use splitter::split;
pub use table::Table;
pub use toy::Problem;
