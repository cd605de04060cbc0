use xsect_primitives::{FieldIdx, Row, RowIdx};

use crate::error::{ConstraintViolation, Result};
use crate::policy::{OrderingPolicy, require_finite, require_non_negative};
use crate::store::SortedRowStore;

/// Offset/elevation profile with a storage depth per point, ascending by offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YzStoragePolicy;

impl YzStoragePolicy {
	/// Horizontal offset across the section.
	pub const Y: FieldIdx = 0;
	/// Bed elevation at the offset.
	pub const Z: FieldIdx = 1;
	/// Depth of non-conveying storage above the bed.
	pub const DELTA_Z_STORAGE: FieldIdx = 2;
}

impl OrderingPolicy<3> for YzStoragePolicy {
	const NAME: &'static str = "yz-storage";

	fn sort_key(&self) -> FieldIdx {
		Self::Y
	}

	fn validate(&self, row: &Row<3>) -> std::result::Result<(), ConstraintViolation> {
		require_finite(row)?;
		require_non_negative(row, Self::DELTA_Z_STORAGE)
	}
}

/// Table of `(y, z, delta_z_storage)` points.
pub type YzStorageTable = SortedRowStore<YzStoragePolicy, 3>;

impl YzStorageTable {
	/// Adds a point and returns the index it landed at.
	pub fn add_point(&mut self, y: f64, z: f64, delta_z_storage: f64) -> Result<RowIdx> {
		self.insert(Row::new([y, z, delta_z_storage]))
	}
}
