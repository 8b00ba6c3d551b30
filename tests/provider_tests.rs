//! Dataset provider tests
//!
//! Header row, record lookup, formula columns and out-of-range access through
//! the `DataSource` contract, plus a provider-driven engine.

#![allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]

mod common;

use std::rc::Rc;

use common::{provider, stars};
use toby::data::compute_formula;
use toby::{
    CellValue, ColumnSet, DataProvider, DataSource, Dataset, Engine, EngineConfig, MemoryTarget,
    TobyError, Viewport,
};

#[test]
fn test_header_row_all_columns() {
    let provider = provider(20, ColumnSet::All);
    assert_eq!(provider.number_of_columns(), 6);
    let header: Vec<String> = (0..6).map(|c| provider.get_item(0, c).to_string()).collect();
    assert_eq!(header, ["id", "hip", "proper", "ra", "dec", "dist"]);
}

#[test]
fn test_header_row_demo_columns() {
    let provider = provider(20, ColumnSet::DEMO);
    // Only six dataset columns exist, so all of them lead
    assert_eq!(
        provider.display_columns(),
        ["id", "hip", "proper", "ra", "dec", "dist", "formula_1", "formula_2", "formula_3"]
    );
    for (col, name) in (0u32..).zip(provider.display_columns()) {
        assert_eq!(provider.get_item(0, col), CellValue::Text(name.clone()));
    }
}

#[test]
fn test_body_rows_are_offset_by_header() {
    let provider = provider(20, ColumnSet::All);
    assert_eq!(provider.get_item(1, 2), CellValue::from("Sol"));
    assert_eq!(provider.get_item(5, 2), CellValue::from("Star 4"));
    assert_eq!(provider.get_item(5, 5).to_string(), "6");
    // Every third record has a null distance
    assert_eq!(provider.get_item(4, 5), CellValue::Empty);
}

#[test]
fn test_out_of_range_is_empty() {
    let provider = provider(20, ColumnSet::All);
    assert_eq!(provider.get_item(21, 0), CellValue::Empty);
    assert_eq!(provider.get_item(u32::MAX, 0), CellValue::Empty);
    assert_eq!(provider.get_item(1, 6), CellValue::Empty);
    assert_eq!(provider.get_item(0, 99), CellValue::Empty);
}

#[test]
fn test_formula_columns_are_computed() {
    let provider = provider(20, ColumnSet::DEMO);
    let first_formula = 6;
    let value = provider.get_item(7, first_formula);
    assert_eq!(value, CellValue::Number(compute_formula(7, first_formula)));
    assert_eq!(provider.get_item(7, first_formula), value);
    // Computed even past the end of the dataset
    assert!(!provider.get_item(500, first_formula + 1).is_empty());
}

#[test]
fn test_formula_with_zero_seed() {
    assert_eq!(compute_formula(0, 9), 0.0);
    assert_eq!(compute_formula(9, 0), 0.0);
}

#[test]
fn test_explicit_columns() {
    let provider = DataProvider::new(stars(3), vec!["proper".into(), "missing".into()]);
    assert_eq!(provider.number_of_columns(), 2);
    assert_eq!(provider.get_item(2, 0), CellValue::from("Star 1"));
    assert_eq!(provider.get_item(2, 1), CellValue::Empty);
}

#[test]
fn test_malformed_dataset() {
    assert!(matches!(
        Dataset::from_json("{\"not\": \"an array\"}"),
        Err(TobyError::Dataset(_))
    ));
    assert!(matches!(
        Dataset::from_path("/nonexistent/stars.json"),
        Err(TobyError::Io(_))
    ));
}

#[test]
fn test_engine_renders_header_and_records() {
    let provider = DataProvider::with_columns(stars(100), ColumnSet::All);
    let mut engine = Engine::new(Rc::new(provider), EngineConfig::default());
    engine
        .attach_to(MemoryTarget::new(Viewport::new(0.0, 310.0)))
        .unwrap();

    let target = engine.target().unwrap();
    let (_, header) = target.find_row(0).unwrap();
    assert_eq!(header.cells[0].text, "id");
    assert_eq!(header.cells[5].text, "dist");
    let (_, sol) = target.find_row(1).unwrap();
    assert_eq!(sol.cells[2].text, "Sol");
    // Row past the dataset still materializes, just empty
    assert_eq!(engine.cell_value(101, 0), CellValue::Empty);
}
