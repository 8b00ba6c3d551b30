//! Data sources feeding the row window.
//!
//! The engine only sees the [`DataSource`] trait. [`DataProvider`] is the
//! concrete JSON-backed source used by the CLI and the browser viewer.

mod dataset;
mod provider;

use std::fmt;

pub use dataset::Dataset;
pub use provider::{compute_formula, ColumnSet, DataProvider, COMPLEXITY_FACTOR, FORMULA_PREFIX};

/// A single displayed value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Out-of-range access or a missing field.
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Value lookup contract consumed by the engine.
///
/// Implementations must be pure in `(row, col)`: the engine re-queries values
/// on hover and relies on recycled rows still showing the right content.
/// Row 0 is the header row and returns column names. Requests outside the
/// backing data return [`CellValue::Empty`] rather than failing.
pub trait DataSource {
    /// Number of displayed columns, fixed for the lifetime of the source.
    fn number_of_columns(&self) -> u32;

    /// Value at `(row, col)`.
    fn get_item(&self, row: u32, col: u32) -> CellValue;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn number_of_columns(&self) -> u32 {
        (**self).number_of_columns()
    }

    fn get_item(&self, row: u32, col: u32) -> CellValue {
        (**self).get_item(row, col)
    }
}

impl<T: DataSource + ?Sized> DataSource for std::rc::Rc<T> {
    fn number_of_columns(&self) -> u32 {
        (**self).number_of_columns()
    }

    fn get_item(&self, row: u32, col: u32) -> CellValue {
        (**self).get_item(row, col)
    }
}
