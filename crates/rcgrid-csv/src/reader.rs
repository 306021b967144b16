//! Table file reader

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::{debug, warn};

use crate::error::StoreResult;
use crate::options::ReadOptions;
use rcgrid_core::{Coordinates, Table};

/// Table file reader
pub struct TableReader;

impl TableReader {
    /// Read a table file into a new table using default options
    pub fn load_file<P: AsRef<Path>>(path: P) -> StoreResult<Table> {
        let mut table = Table::new();
        Self::read_file(path, &mut table, &ReadOptions::default())?;
        Ok(table)
    }

    /// Read a table file into `table`, returning the number of cells loaded
    pub fn read_file<P: AsRef<Path>>(
        path: P,
        table: &mut Table,
        options: &ReadOptions,
    ) -> StoreResult<usize> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let loaded = Self::read(file, table, options)?;
        debug!("loaded {} cells from {}", loaded, path.display());
        Ok(loaded)
    }

    /// Read table rows from a reader into `table`
    ///
    /// Line `r` (0-based) supplies row `r`; its `c`-th field, when non-empty, is
    /// stored at `(r, c)`. Existing cells at those coordinates are replaced, all
    /// others are left alone. Quoted fields cannot span lines.
    pub fn read<R: Read>(reader: R, table: &mut Table, options: &ReadOptions) -> StoreResult<usize> {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true);

        let mut record = csv::StringRecord::new();
        let mut loaded = 0;
        for (row, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let Ok(row) = i64::try_from(row) else {
                warn!("row {} does not fit a coordinate, stopping", row);
                break;
            };

            record.clear();
            builder.from_reader(line.as_bytes()).read_record(&mut record)?;
            for (col, field) in record.iter().enumerate() {
                if field.is_empty() {
                    continue;
                }
                let Ok(col) = i64::try_from(col) else {
                    warn!("column {} in row {} does not fit a coordinate", col, row);
                    break;
                };
                table.set(Coordinates::new(row, col), field);
                loaded += 1;
            }
        }

        Ok(loaded)
    }
}
