//! Table file writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::StoreResult;
use crate::options::WriteOptions;
use rcgrid_core::{Coordinates, Table};

/// Table file writer
pub struct TableWriter;

impl TableWriter {
    /// Write a table to a file
    pub fn write_file<P: AsRef<Path>>(
        table: &Table,
        path: P,
        options: &WriteOptions,
    ) -> StoreResult<()> {
        let path = path.as_ref();
        let file = BufWriter::new(File::create(path)?);
        Self::write(table, file, options)?;
        debug!("saved {} cells to {}", table.len(), path.display());
        Ok(())
    }

    /// Write a table to a writer
    ///
    /// Rows `0..=max_row` are written with fields `0..=max_col` each, where the
    /// maxima come from [`Table::bounds`]. Cells at negative coordinates are not
    /// written. An empty table produces no output. A row of a single empty field
    /// is written as an empty line.
    pub fn write<W: Write>(
        table: &Table,
        mut writer: W,
        options: &WriteOptions,
    ) -> StoreResult<()> {
        if table.is_empty() {
            return Ok(());
        }

        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(options.line_terminator.to_csv())
            .quote_style(csv::QuoteStyle::Necessary)
            .flexible(true);

        let bounds = table.bounds();
        for row in 0..=bounds.max_row() {
            // csv quotes a lone empty field as `""`
            if bounds.max_col() == 0 && !has_expression(table, Coordinates::new(row, 0)) {
                writer.write_all(options.line_terminator.as_bytes())?;
                continue;
            }

            let record = (0..=bounds.max_col()).map(|col| {
                table
                    .cell(Coordinates::new(row, col))
                    .map_or("", |cell| cell.expression.as_str())
            });
            let mut csv_writer = builder.from_writer(&mut writer);
            csv_writer.write_record(record)?;
            csv_writer.flush()?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn has_expression(table: &Table, coords: Coordinates) -> bool {
    table.cell(coords).map_or(false, |cell| !cell.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LineTerminator;
    use pretty_assertions::assert_eq;

    fn write(table: &Table, options: &WriteOptions) -> String {
        let mut buf = Vec::new();
        TableWriter::write(table, &mut buf, options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_fills_gaps() {
        let mut table = Table::new();
        table.set(Coordinates::new(0, 0), "10");
        table.set(Coordinates::new(2, 2), "R0C0 * 2");

        assert_eq!(
            write(&table, &WriteOptions::default()),
            "10;;\n;;\n;;R0C0 * 2\n"
        );
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        assert_eq!(write(&Table::new(), &WriteOptions::default()), "");
    }

    #[test]
    fn test_negative_cells_are_skipped() {
        let mut table = Table::new();
        table.set(Coordinates::new(0, 1), "1");
        table.set(Coordinates::new(-1, 0), "2");

        assert_eq!(write(&table, &WriteOptions::default()), ";1\n");
    }

    #[test]
    fn test_fields_with_delimiter_are_quoted() {
        let mut table = Table::new();
        table.set(Coordinates::new(0, 0), "a;b");
        table.set(Coordinates::new(0, 1), "c");

        assert_eq!(write(&table, &WriteOptions::default()), "\"a;b\";c\n");
    }

    #[test]
    fn test_crlf_terminator() {
        let mut table = Table::new();
        table.set(Coordinates::new(0, 0), "1");
        table.set(Coordinates::new(1, 1), "2");
        let options = WriteOptions {
            line_terminator: LineTerminator::CRLF,
            ..Default::default()
        };

        assert_eq!(write(&table, &options), "1;\r\n;2\r\n");
    }

    #[test]
    fn test_single_column_gaps_are_empty_lines() {
        let mut table = Table::new();
        table.set(Coordinates::new(0, 0), "1");
        table.set(Coordinates::new(2, 0), "2");

        assert_eq!(write(&table, &WriteOptions::default()), "1\n\n2\n");
    }

    #[test]
    fn test_single_column_empty_expression_and_crlf() {
        let mut table = Table::new();
        table.set(Coordinates::new(0, 0), "");
        table.set(Coordinates::new(1, 0), "R0C0");
        let options = WriteOptions {
            line_terminator: LineTerminator::CRLF,
            ..Default::default()
        };

        assert_eq!(write(&table, &options), "\r\nR0C0\r\n");
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");

        let mut table = Table::new();
        table.set(Coordinates::new(0, 0), "1");
        table.set(Coordinates::new(0, 1), "R0C0 + 1");
        TableWriter::write_file(&table, &path, &WriteOptions::default()).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1;R0C0 + 1\n");
    }
}
