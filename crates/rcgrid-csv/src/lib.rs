//! # rcgrid-csv
//!
//! Reader and writer for the rcgrid table file format.
//!
//! A table file holds one line per row starting at row 0, with the expressions of
//! that row's cells separated by `;`. Empty fields are cells that do not exist.
//! Only expressions are stored; cached values are recomputed after loading.
//!
//! ```rust
//! use rcgrid_core::{Coordinates, Table};
//! use rcgrid_csv::{ReadOptions, TableReader, TableWriter, WriteOptions};
//!
//! let mut table = Table::new();
//! table.set(Coordinates::new(0, 0), "1");
//! table.set(Coordinates::new(1, 1), "R0C0 + 1");
//!
//! let mut buf = Vec::new();
//! TableWriter::write(&table, &mut buf, &WriteOptions::default()).unwrap();
//! assert_eq!(buf, b"1;\n;R0C0 + 1\n");
//!
//! let mut loaded = Table::new();
//! TableReader::read(buf.as_slice(), &mut loaded, &ReadOptions::default()).unwrap();
//! assert_eq!(loaded.get(Coordinates::new(1, 1)).unwrap(), "R0C0 + 1");
//! ```

mod error;
mod options;
mod reader;
mod writer;

pub use error::{StoreError, StoreResult};
pub use options::{LineTerminator, ReadOptions, WriteOptions};
pub use reader::TableReader;
pub use writer::TableWriter;
