//! Fixed-height grid geometry.

use std::ops::RangeInclusive;

use serde::Serialize;

/// Inclusive range of row indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RowRange {
    pub first: u32,
    pub last: u32,
}

impl RowRange {
    /// Create a range; bounds are swapped if given out of order.
    pub fn new(first: u32, last: u32) -> Self {
        Self {
            first: first.min(last),
            last: first.max(last),
        }
    }

    /// Pad the range by `preload` rows on both edges, clamped at row 0.
    pub fn expand(self, preload: u32) -> Self {
        Self {
            first: self.first.saturating_sub(preload),
            last: self.last.saturating_add(preload),
        }
    }

    /// Smallest range covering both `self` and `other`.
    pub fn union(self, other: Self) -> Self {
        Self {
            first: self.first.min(other.first),
            last: self.last.max(other.last),
        }
    }

    pub fn contains(&self, row: u32) -> bool {
        row >= self.first && row <= self.last
    }

    /// True if every row of `other` is inside `self`.
    pub fn covers(&self, other: &Self) -> bool {
        self.first <= other.first && self.last >= other.last
    }

    /// Number of rows in the range (never zero).
    pub fn len(&self) -> u64 {
        u64::from(self.last.saturating_sub(self.first)) + 1
    }

    pub fn rows(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }
}

impl IntoIterator for RowRange {
    type Item = u32;
    type IntoIter = RangeInclusive<u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows()
    }
}

/// Compute the rows intersecting a viewport.
///
/// `first = floor(scroll_top / pitch)`, `last = floor((scroll_top + height) / pitch)`
/// where `pitch = row_height + border_width`. Negative and NaN inputs land on
/// row 0; there is no upper clamp against a dataset size.
pub fn visible_range(
    scroll_top: f64,
    viewport_height: f64,
    row_height: f64,
    border_width: f64,
) -> RowRange {
    let pitch = row_height + border_width;
    let first = row_at(scroll_top, pitch);
    let last = row_at(scroll_top + viewport_height.max(0.0), pitch);
    RowRange::new(first, last)
}

// Float-to-int `as` saturates and maps NaN to 0, which is exactly the clamp we want.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn row_at(y: f64, pitch: f64) -> u32 {
    if pitch.is_nan() || pitch <= 0.0 {
        return 0;
    }
    (y / pitch).floor().max(0.0) as u32
}

/// Fixed sizes of the grid, all in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub row_height: f32,
    pub column_width: f32,
    pub border_width: f32,
}

impl GridMetrics {
    pub fn new(row_height: f32, column_width: f32, border_width: f32) -> Self {
        Self {
            row_height,
            column_width,
            border_width,
        }
    }

    /// Vertical distance between the tops of consecutive rows.
    pub fn row_pitch(&self) -> f32 {
        self.row_height + self.border_width
    }

    /// Horizontal distance between the left edges of consecutive cells.
    pub fn col_pitch(&self) -> f32 {
        self.column_width + self.border_width
    }

    /// Top edge of `row`.
    #[allow(clippy::cast_precision_loss)]
    pub fn row_offset(&self, row: u32) -> f32 {
        row as f32 * self.row_pitch()
    }

    /// Left edge of `col`.
    #[allow(clippy::cast_precision_loss)]
    pub fn col_offset(&self, col: u32) -> f32 {
        col as f32 * self.col_pitch()
    }

    /// Width of a row holding `columns` cells.
    #[allow(clippy::cast_precision_loss)]
    pub fn row_width(&self, columns: u32) -> f32 {
        columns as f32 * self.col_pitch()
    }

    /// Visible rows for a scroll offset and viewport height.
    pub fn visible_range(&self, scroll_top: f64, viewport_height: f64) -> RowRange {
        visible_range(
            scroll_top,
            viewport_height,
            f64::from(self.row_height),
            f64::from(self.border_width),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range_reference() {
        assert_eq!(visible_range(0.0, 310.0, 30.0, 1.0), RowRange::new(0, 10));
    }

    #[test]
    fn test_visible_range_negative_scroll_clamps() {
        let range = visible_range(-500.0, 310.0, 30.0, 1.0);
        assert_eq!(range.first, 0);
        assert_eq!(range.last, 0);
    }

    #[test]
    fn test_visible_range_nan_is_zero() {
        let range = visible_range(f64::NAN, 310.0, 30.0, 1.0);
        assert_eq!(range, RowRange::new(0, 0));
    }

    #[test]
    fn test_expand_clamps_at_zero() {
        let target = RowRange::new(2, 10).expand(5);
        assert_eq!(target, RowRange::new(0, 15));
        assert!(target.covers(&RowRange::new(2, 10)));
    }

    #[test]
    fn test_union_and_len() {
        let a = RowRange::new(0, 15);
        let b = RowRange::new(15, 35);
        assert_eq!(a.union(b), RowRange::new(0, 35));
        assert_eq!(a.len(), 16);
        assert_eq!(RowRange::new(7, 7).len(), 1);
    }

    #[test]
    fn test_len_with_fields_out_of_order() {
        let backwards = RowRange { first: 9, last: 3 };
        assert_eq!(backwards.len(), 1);
        assert_eq!(RowRange { first: u32::MAX, last: 0 }.len(), 1);
    }

    #[test]
    fn test_offsets() {
        let m = GridMetrics::new(30.0, 120.0, 1.0);
        assert_eq!(m.row_offset(3), 93.0);
        assert_eq!(m.col_offset(2), 242.0);
        assert_eq!(m.row_width(13), 13.0 * 121.0);
    }
}
