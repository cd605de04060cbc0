//! Binary searches over sorted rows.
//!
//! Every function takes `cmp`, which orders a stored row against the probe
//! row being placed (`Less` means the stored row sorts first).

use std::cmp::Ordering;
use std::ops::Range;

use xsect_primitives::{Row, RowIdx};

/// First index whose row does not sort before the probe.
pub(super) fn lower_bound<const N: usize>(rows: &[Row<N>], cmp: impl Fn(&Row<N>) -> Ordering) -> RowIdx {
	rows.partition_point(|row| cmp(row) == Ordering::Less)
}

/// First index whose row sorts after the probe.
///
/// Inserting here places the probe behind every equal key, which keeps
/// ties in insertion order.
pub(super) fn upper_bound<const N: usize>(rows: &[Row<N>], cmp: impl Fn(&Row<N>) -> Ordering) -> RowIdx {
	rows.partition_point(|row| cmp(row) != Ordering::Greater)
}

/// Indices of all rows comparing equal to the probe.
pub(super) fn equal_range<const N: usize>(rows: &[Row<N>], cmp: impl Fn(&Row<N>) -> Ordering) -> Range<RowIdx> {
	lower_bound(rows, &cmp)..upper_bound(rows, &cmp)
}

/// Final index for the row at `index` once its key changes.
///
/// The search runs over the other rows only (the two sorted halves around
/// `index`). Any slot within the run of equal keys is valid, so the one
/// closest to `index` is chosen; a row whose new key keeps its relative
/// order does not move at all.
pub(super) fn relocation_target<const N: usize>(
	rows: &[Row<N>],
	index: RowIdx,
	cmp: impl Fn(&Row<N>) -> Ordering,
) -> RowIdx {
	let (before, rest) = rows.split_at(index);
	let after = &rest[1..];
	let lo = lower_bound(before, &cmp) + lower_bound(after, &cmp);
	let hi = upper_bound(before, &cmp) + upper_bound(after, &cmp);
	index.clamp(lo, hi)
}
