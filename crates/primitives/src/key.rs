use std::cmp::Ordering;

/// Position of a field within a row.
///
/// A plain alias of `usize`, like [`RowIdx`]; the separate name only
/// documents intent at call sites.
pub type FieldIdx = usize;

/// Position of a row within a table.
pub type RowIdx = usize;

/// Total order over sort-key values.
///
/// Numerically equal values compare equal, so `-0.0` and `0.0` are the same
/// key. Everything else follows IEEE 754 `totalOrder`: a negative `NaN`
/// orders before everything and a positive `NaN` after everything.
#[inline]
pub fn cmp_keys(a: f64, b: f64) -> Ordering {
	if a == b { Ordering::Equal } else { a.total_cmp(&b) }
}
