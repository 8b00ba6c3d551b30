//! Dataset-backed [`DataSource`] with synthetic formula columns.

use std::rc::Rc;

use super::{CellValue, DataSource, Dataset};

/// Display columns with this prefix are computed rather than read.
pub const FORMULA_PREFIX: &str = "formula_";

/// Work multiplier for formula columns.
pub const COMPLEXITY_FACTOR: f64 = 99.0;

/// Which columns a provider shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSet {
    /// Every column of the dataset.
    All,
    /// The first `leading` dataset columns followed by `formula_1..=formula_<formulas>`.
    Sample { leading: usize, formulas: usize },
}

impl ColumnSet {
    /// The sample used by the demo page: ten data columns and three formulas.
    pub const DEMO: Self = Self::Sample {
        leading: 10,
        formulas: 3,
    };

    /// Resolve against the columns a dataset offers.
    pub fn resolve(self, available: &[String]) -> Vec<String> {
        match self {
            Self::All => available.to_vec(),
            Self::Sample { leading, formulas } => available
                .iter()
                .take(leading)
                .cloned()
                .chain((1..=formulas).map(|n| format!("{FORMULA_PREFIX}{n}")))
                .collect(),
        }
    }
}

/// Serves a [`Dataset`] through a fixed list of display columns.
///
/// Row 0 yields the column names, row `r >= 1` yields record `r - 1`.
#[derive(Debug, Clone)]
pub struct DataProvider {
    dataset: Rc<Dataset>,
    display_columns: Vec<String>,
}

impl DataProvider {
    pub fn new(dataset: Rc<Dataset>, display_columns: Vec<String>) -> Self {
        Self {
            dataset,
            display_columns,
        }
    }

    /// Provider showing `columns` of `dataset`.
    pub fn with_columns(dataset: Rc<Dataset>, columns: ColumnSet) -> Self {
        let display_columns = columns.resolve(dataset.available_columns());
        Self::new(dataset, display_columns)
    }

    pub fn display_columns(&self) -> &[String] {
        &self.display_columns
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

impl DataSource for DataProvider {
    #[allow(clippy::cast_possible_truncation)]
    fn number_of_columns(&self) -> u32 {
        self.display_columns.len().min(u32::MAX as usize) as u32
    }

    fn get_item(&self, row: u32, col: u32) -> CellValue {
        let Some(column) = self.display_columns.get(col as usize) else {
            return CellValue::Empty;
        };
        if row == 0 {
            return CellValue::Text(column.clone());
        }
        if column.starts_with(FORMULA_PREFIX) {
            return CellValue::Number(compute_formula(row, col));
        }
        self.dataset.value(row as usize - 1, column)
    }
}

/// Deterministic but deliberately slow value for a formula cell.
///
/// The seed `|min(1000, tan(row) * tan(col))|` scaled by
/// [`COMPLEXITY_FACTOR`] is the number of `tan` terms summed, so repeated
/// calls return the same result while costing a row-dependent amount of work.
#[allow(clippy::cast_precision_loss)]
pub fn compute_formula(row: u32, col: u32) -> f64 {
    let seed = (f64::from(row).tan() * f64::from(col).tan()).min(1000.0).abs();
    let complexity = seed * COMPLEXITY_FACTOR;

    let mut result = 0.0;
    let mut i: u64 = 0;
    while (i as f64) < complexity {
        result += (i as f64).tan();
        i += 1;
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::cast_possible_truncation)]
mod tests {
    use super::*;

    fn dataset() -> Rc<Dataset> {
        let json = r#"[
            {"id": "0", "proper": "Sol", "dist": "0.000"},
            {"id": "1", "proper": "Unnamed #1", "dist": "219.7802"}
        ]"#;
        Rc::new(Dataset::from_json(json).unwrap())
    }

    #[test]
    fn test_sample_columns() {
        let available: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let columns = ColumnSet::Sample {
            leading: 2,
            formulas: 2,
        }
        .resolve(&available);
        assert_eq!(columns, ["a", "b", "formula_1", "formula_2"]);
    }

    #[test]
    fn test_header_row_is_column_names() {
        let provider = DataProvider::with_columns(dataset(), ColumnSet::DEMO);
        for (col, name) in provider.display_columns().iter().enumerate() {
            assert_eq!(
                provider.get_item(0, col as u32),
                CellValue::Text(name.clone())
            );
        }
    }

    #[test]
    fn test_record_rows_are_offset_by_header() {
        let provider = DataProvider::with_columns(dataset(), ColumnSet::All);
        assert_eq!(provider.get_item(1, 1), CellValue::from("Sol"));
        assert_eq!(provider.get_item(2, 2), CellValue::from("219.7802"));
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let provider = DataProvider::with_columns(dataset(), ColumnSet::All);
        assert!(provider.get_item(3, 0).is_empty());
        assert!(provider.get_item(1_000_000, 1).is_empty());
        assert!(provider.get_item(0, 99).is_empty());
    }

    #[test]
    fn test_formula_is_repeatable() {
        let provider = DataProvider::with_columns(dataset(), ColumnSet::DEMO);
        let col = provider.number_of_columns() - 1;
        assert_eq!(provider.get_item(7, col), provider.get_item(7, col));
        assert!(matches!(provider.get_item(7, col), CellValue::Number(_)));
    }

    #[test]
    fn test_formula_zero_seed() {
        // tan(0) == 0, so no terms are summed
        assert_eq!(compute_formula(0, 5), 0.0);
        assert_eq!(compute_formula(5, 0), 0.0);
    }
}
