use xsect_primitives::{FieldIdx, Row, RowIdx};

use crate::error::{ConstraintViolation, Result};
use crate::policy::{OrderingPolicy, require_finite};
use crate::store::SortedRowStore;

/// Offset/elevation profile, ascending by offset.
///
/// Duplicate offsets are allowed: two points at the same `y` describe a
/// vertical wall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YzPolicy;

impl YzPolicy {
	/// Horizontal offset across the section.
	pub const Y: FieldIdx = 0;
	/// Bed elevation at the offset.
	pub const Z: FieldIdx = 1;
}

impl OrderingPolicy<2> for YzPolicy {
	const NAME: &'static str = "yz";

	fn sort_key(&self) -> FieldIdx {
		Self::Y
	}

	fn validate(&self, row: &Row<2>) -> std::result::Result<(), ConstraintViolation> {
		require_finite(row)
	}
}

/// Table of `(y, z)` points.
pub type YzTable = SortedRowStore<YzPolicy, 2>;

impl YzTable {
	/// Adds a point and returns the index it landed at.
	pub fn add_point(&mut self, y: f64, z: f64) -> Result<RowIdx> {
		self.insert(Row::new([y, z]))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::TableConfig;

	#[test]
	fn sorts_by_offset() {
		let mut table = YzTable::new();
		table.add_point(50.0, -3.0).unwrap();
		table.add_point(0.0, 0.0).unwrap();
		table.add_point(100.0, 0.0).unwrap();
		let ys: Vec<f64> = table.keys().collect();
		assert_eq!(ys, vec![0.0, 50.0, 100.0]);
	}

	#[test]
	fn vertical_wall_is_allowed() {
		let mut table = YzTable::new();
		table.add_point(10.0, 0.0).unwrap();
		table.add_point(10.0, -5.0).unwrap();
		assert_eq!(table.len(), 2);
		assert_eq!(table.row_at(1).unwrap()[YzPolicy::Z], -5.0);
	}

	#[test]
	fn nan_offset_is_rejected() {
		let mut table = YzTable::new();
		let err = table.add_point(f64::NAN, 0.0).unwrap_err();
		assert!(matches!(err.as_constraint(), Some(ConstraintViolation::NonFinite { field: 0, .. })));
		assert!(table.is_empty());
	}

	#[test]
	fn nan_offset_accepted_when_trusted() {
		let mut table = YzTable::with_config(TableConfig::trusted());
		table.add_point(f64::NAN, 0.0).unwrap();
		assert_eq!(table.len(), 1);
	}
}
