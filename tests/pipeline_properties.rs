use sales_cleaner::pipeline::{CleaningRules, Pipeline, Stage};
use sales_cleaner::{CellValue, CleanerError, Row, Table};

fn messy_export() -> Table {
    Table::from_text_rows(
        &[" Price ", "Qty", "Item", "Date Sold"],
        &[
            &["$12.50", "3", " Widget ", "2024-03-01"],
            &["abc", "5", "X", "2024-03-01"],
            &["-5", "2", "Y", "2024-03-02"],
            &["0", "0", "  Free   sample ", "2024-03-02"],
            &["4.00", "-", "Gadget", "2024-03-03"],
            &["€7", "2 pcs", "\"Gizmo\"", ""],
            &["1.2.3", "1", "Broken", "2024-03-04"],
            &["9.99", "10", "Thing", "2024-03-05"],
        ],
    )
}

/// Write a cleaned table back to raw text, as the CSV adapters would
fn as_raw_text(table: &Table) -> Table {
    let rows = table
        .rows()
        .iter()
        .map(|row| Row::new(row.cells().iter().map(|c| CellValue::from_raw(&c.to_field())).collect()))
        .collect();
    Table::with_rows(table.columns().to_vec(), rows)
}

#[test]
fn test_cleaning_is_idempotent() {
    let pipeline = Pipeline::default();
    let first = pipeline.run(messy_export()).unwrap().table;
    let second = pipeline.run(first.clone()).unwrap().table;
    assert_eq!(first, second);

    // and also after a round trip through raw text
    let third = pipeline.run(as_raw_text(&first)).unwrap().table;
    assert_eq!(first, third);
}

#[test]
fn test_row_count_shrinks_monotonically() {
    let outcome = Pipeline::default().run(messy_export()).unwrap();
    let report = &outcome.report;
    assert_eq!(report.rows_in, 8);
    for stage in &report.stages {
        assert!(stage.rows_out <= stage.rows_in, "{} grew the table", stage.stage);
        if matches!(
            stage.stage,
            Stage::NormalizeColumns | Stage::TrimWhitespace | Stage::CoerceNumeric
        ) {
            assert_eq!(stage.rows_out, stage.rows_in, "{} must not drop rows", stage.stage);
        }
    }
    assert_eq!(report.rows_out, outcome.table.len());
}

#[test]
fn test_output_columns_are_canonical() {
    let outcome = Pipeline::default().run(messy_export()).unwrap();
    for column in outcome.table.columns() {
        assert_eq!(column.trim(), column);
        assert_eq!(column.to_lowercase(), *column);
        assert!(!column.contains(' '));
    }
    assert_eq!(outcome.table.columns(), &["price", "qty", "item", "date_sold"]);
}

#[test]
fn test_final_numbers_are_valid_and_non_negative() {
    let outcome = Pipeline::default().run(messy_export()).unwrap();
    let table = &outcome.table;
    assert!(!table.is_empty());
    for i in 0..table.len() {
        for column in ["price", "qty"] {
            let value = table.value(i, column).and_then(CellValue::as_number);
            assert!(matches!(value, Some(v) if v >= 0.0), "row {i} {column} = {value:?}");
        }
    }
}

#[test]
fn test_messy_export_survivors() {
    let outcome = Pipeline::default().run(messy_export()).unwrap();
    let items: Vec<String> = (0..outcome.table.len())
        .map(|i| outcome.table.value(i, "item").unwrap().to_field())
        .collect();
    // abc, "-" qty, missing date_sold, 1.2.3 and the negative price are gone
    assert_eq!(items, vec!["Widget", "Free sample", "Thing"]);
}

#[test]
fn test_widget_example() {
    let table = Table::from_text_rows(&[" Price ", "Qty", "Item"], &[&["$12.50", "3", " Widget "]]);
    let outcome = Pipeline::default().run(table).unwrap();
    assert_eq!(outcome.table.columns(), &["price", "qty", "item"]);
    assert_eq!(outcome.table.len(), 1);
    assert_eq!(outcome.table.value(0, "price"), Some(&CellValue::Number(12.5)));
    assert_eq!(outcome.table.value(0, "qty"), Some(&CellValue::Number(3.0)));
    assert_eq!(outcome.table.value(0, "item"), Some(&CellValue::Text("Widget".into())));
}

#[test]
fn test_unparseable_price_dropped_when_filtering_missing() {
    let table = Table::from_text_rows(&["price", "qty", "item"], &[&["abc", "5", "X"]]);
    let report = Pipeline::default().run(table).unwrap().report;
    assert_eq!(report.stage(Stage::CoerceNumeric).unwrap().rows_out, 1);
    assert_eq!(report.stage(Stage::CoerceNumeric).unwrap().counter("invalid"), 1);
    assert_eq!(report.stage(Stage::DropIncomplete).unwrap().rows_out, 0);
    assert_eq!(report.rows_out, 0);
}

#[test]
fn test_negative_price_dropped_by_range_filter() {
    let table = Table::from_text_rows(&["price", "qty", "item"], &[&["-5", "2", "Y"]]);
    let report = Pipeline::default().run(table).unwrap().report;
    assert_eq!(report.stage(Stage::DropIncomplete).unwrap().rows_out, 1);
    assert_eq!(report.stage(Stage::FilterRange).unwrap().rows_out, 0);
}

#[test]
fn test_missing_price_column_is_schema_error() {
    let table = Table::from_text_rows(&["Qty", "Item"], &[&["5", "X"]]);
    let err = Pipeline::default().run(table).unwrap_err();
    assert!(matches!(err, CleanerError::Schema { ref missing, .. } if missing == &["price"]));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_original_cleanup_options() {
    let rules = CleaningRules {
        swap_price_qty: true,
        max_value: Some(1_000_000.0),
        drop_duplicates: true,
        ..CleaningRules::default()
    };
    let table = Table::from_text_rows(
        &["price", "qty", "item"],
        &[
            &["0.5", "250", "swapped"],
            &["2000000", "1", "outlier"],
            &["3", "1", "dup"],
            &["3", "1", "dup"],
        ],
    );
    let outcome = Pipeline::new(rules).run(table).unwrap();
    assert_eq!(outcome.table.len(), 2);
    assert_eq!(outcome.table.value(0, "price"), Some(&CellValue::Number(250.0)));
    assert_eq!(outcome.table.value(0, "qty"), Some(&CellValue::Number(0.5)));

    let report = &outcome.report;
    assert_eq!(report.stage(Stage::SwapTransposed).unwrap().counter("swapped"), 1);
    assert_eq!(report.stage(Stage::FilterRange).unwrap().counter("above_max"), 1);
    assert_eq!(report.stage(Stage::DropDuplicates).unwrap().counter("duplicates"), 1);
}
