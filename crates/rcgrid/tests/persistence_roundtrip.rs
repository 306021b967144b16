//! Save/load round trips through the table file format

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rcgrid::prelude::*;
use rcgrid::{ReadOptions, WriteOptions};

fn expressions(table: &Table) -> BTreeMap<Coordinates, String> {
    table
        .iter()
        .filter(|(_, cell)| !cell.is_empty())
        .map(|(coords, cell)| (coords, cell.expression.clone()))
        .collect()
}

#[test]
fn test_save_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.csv");

    let mut table = Table::new();
    table.set(Coordinates::new(0, 0), "10");
    table.set(Coordinates::new(0, 1), "20");
    table.set(Coordinates::new(2, 0), "if(R0C0 > R0C1, R0C0, R0C1)");
    table.set(Coordinates::new(3, 3), "R[-3]C[-3] % 3");
    table.calculate().unwrap();
    table.save(&path).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "10;20;;\n;;;\nif(R0C0 > R0C1, R0C0, R0C1);;;\n;;;R[-3]C[-3] % 3\n"
    );

    let mut loaded = Table::open(&path).unwrap();
    assert_eq!(expressions(&loaded), expressions(&table));

    // Values are not stored and come back only after a new pass
    assert_eq!(loaded.cached_value(Coordinates::new(2, 0)).unwrap(), 0.0);
    loaded.calculate().unwrap();
    assert_eq!(loaded.cached_value(Coordinates::new(2, 0)).unwrap(), 20.0);
    assert_eq!(loaded.cached_value(Coordinates::new(3, 3)).unwrap(), 1.0);
}

#[test]
fn test_empty_table_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");

    Table::new().save(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    assert!(Table::open(&path).unwrap().is_empty());
}

#[test]
fn test_negative_cells_are_not_saved() {
    let mut table = Table::new();
    table.set(Coordinates::new(0, 0), "1");
    table.set(Coordinates::new(-1, 0), "2");

    let mut buf = Vec::new();
    TableWriter::write(&table, &mut buf, &WriteOptions::default()).unwrap();

    let mut loaded = Table::new();
    TableReader::read(buf.as_slice(), &mut loaded, &ReadOptions::default()).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(!loaded.contains(Coordinates::new(-1, 0)));
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Table::open(dir.path().join("missing.csv")),
        Err(StoreError::Io(_))
    ));
}

fn saved_text(cells: &[((i64, i64), &str)]) -> String {
    let mut table = Table::new();
    for &((row, col), expr) in cells {
        table.set(Coordinates::new(row, col), expr);
    }
    let mut buf = Vec::new();
    TableWriter::write(&table, &mut buf, &WriteOptions::default()).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_saved_layout() {
    let cases = vec![
        (vec![((0, 0), "1")], "1\n"),
        (vec![((0, 0), "1"), ((2, 0), "2")], "1\n\n2\n"),
        (vec![((3, 0), "R0C0")], "\n\n\nR0C0\n"),
        (vec![((0, 0), "1"), ((2, 2), "3")], "1;;\n;;\n;;3\n"),
        (vec![((0, 2), "7")], ";;7\n"),
        (vec![((1, 1), "R[-1]C[-1]")], ";\n;R[-1]C[-1]\n"),
    ];

    for (cells, expected) in &cases {
        let text = saved_text(cells);
        assert_eq!(text, *expected, "{cells:?}");

        let mut loaded = Table::new();
        let count =
            TableReader::read(text.as_bytes(), &mut loaded, &ReadOptions::default()).unwrap();
        assert_eq!(count, cells.len(), "{cells:?}");
        for &((row, col), expr) in cells.iter() {
            assert_eq!(
                loaded.get(Coordinates::new(row, col)).unwrap(),
                expr,
                "{cells:?}"
            );
        }
    }
}

/// Rows `0..=max_row`, each holding fields `0..=max_col` joined by `;`
fn layout(cells: &BTreeMap<(i64, i64), String>) -> String {
    let Some(max_row) = cells.keys().map(|&(row, _)| row).max() else {
        return String::new();
    };
    let max_col = cells.keys().map(|&(_, col)| col).max().unwrap_or(0);

    let mut text = String::new();
    for row in 0..=max_row {
        let fields: Vec<&str> = (0..=max_col)
            .map(|col| cells.get(&(row, col)).map_or("", String::as_str))
            .collect();
        text.push_str(&fields.join(";"));
        text.push('\n');
    }
    text
}

fn expression() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,5}",
        "R[0-9]C[0-9]",
        "R\\[-?[0-9]\\]C\\[-?[0-9]\\]",
        "[0-9] [-+*/%] [0-9]",
        "if\\([0-9], [0-9], [0-9]\\)",
    ]
}

proptest! {
    #[test]
    fn prop_round_trip_preserves_expressions(
        cells in prop::collection::btree_map((0i64..8, 0i64..8), expression(), 0..24)
    ) {
        let mut table = Table::new();
        for (&(row, col), expr) in &cells {
            table.set(Coordinates::new(row, col), expr.as_str());
        }

        let mut buf = Vec::new();
        TableWriter::write(&table, &mut buf, &WriteOptions::default()).unwrap();

        let mut loaded = Table::new();
        let count = TableReader::read(buf.as_slice(), &mut loaded, &ReadOptions::default()).unwrap();

        prop_assert_eq!(count, cells.len());
        prop_assert_eq!(expressions(&loaded), expressions(&table));
    }

    #[test]
    fn prop_saved_bytes_follow_layout(
        cells in prop::collection::btree_map((0i64..6, 0i64..3), expression(), 0..10)
    ) {
        let mut table = Table::new();
        for (&(row, col), expr) in &cells {
            table.set(Coordinates::new(row, col), expr.as_str());
        }

        let mut buf = Vec::new();
        TableWriter::write(&table, &mut buf, &WriteOptions::default()).unwrap();

        prop_assert_eq!(String::from_utf8(buf).unwrap(), layout(&cells));
    }
}
