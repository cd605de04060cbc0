use xsect_primitives::{FieldIdx, Row, RowIdx};

use crate::error::{ConstraintViolation, Result};
use crate::policy::{OrderingPolicy, require_finite, require_non_negative};
use crate::store::SortedRowStore;

/// Level/width table, ascending by level.
///
/// Each row describes the section at one level: its total width and the
/// part of it that only stores water. Levels must be unique; two widths at
/// the same level would make the tabulated profile ambiguous.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZwPolicy;

impl ZwPolicy {
	/// Level.
	pub const Z: FieldIdx = 0;
	/// Total width at the level.
	pub const TOTAL_WIDTH: FieldIdx = 1;
	/// Storage part of the total width.
	pub const STORAGE_WIDTH: FieldIdx = 2;
}

impl OrderingPolicy<3> for ZwPolicy {
	const NAME: &'static str = "zw";

	fn sort_key(&self) -> FieldIdx {
		Self::Z
	}

	fn validate(&self, row: &Row<3>) -> std::result::Result<(), ConstraintViolation> {
		require_finite(row)?;
		require_non_negative(row, Self::TOTAL_WIDTH)?;
		require_non_negative(row, Self::STORAGE_WIDTH)?;
		let (total, storage) = (row[Self::TOTAL_WIDTH], row[Self::STORAGE_WIDTH]);
		if storage > total {
			return Err(ConstraintViolation::StorageExceedsTotal { storage, total });
		}
		Ok(())
	}

	fn allows_duplicate_keys(&self) -> bool {
		false
	}
}

/// Table of `(z, total_width, storage_width)` levels.
pub type ZwTable = SortedRowStore<ZwPolicy, 3>;

impl ZwTable {
	/// Adds a level and returns the index it landed at.
	pub fn add_level(&mut self, z: f64, total_width: f64, storage_width: f64) -> Result<RowIdx> {
		self.insert(Row::new([z, total_width, storage_width]))
	}
}
