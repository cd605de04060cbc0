//! Cross-section profile helpers built on the table variants.
//!
//! These are the derived quantities and canned shapes the owning
//! cross-section definitions ask of their tables: widths, default
//! profiles, and loading tabulated level data from importers.

use tracing::warn;
use xsect_primitives::Row;

use crate::error::Result;
use crate::variants::{YzPolicy, YzTable, ZwPolicy, ZwTable};

/// Width used for freshly created default profiles.
pub const DEFAULT_SECTION_WIDTH: f64 = 100.0;

/// Depth of the default trapezoid below its banks.
const DEFAULT_DEPTH: f64 = 10.0;

/// Six-point trapezoid of `width`: flat banks, sloped sides and a flat bed
/// [`DEFAULT_DEPTH`] below the banks.
pub fn default_yz_profile(width: f64) -> [Row<2>; 6] {
	let at = |eighteenths: f64| eighteenths * width / 18.0;
	[
		Row::new([0.0, 0.0]),
		Row::new([at(4.0), 0.0]),
		Row::new([at(6.0), -DEFAULT_DEPTH]),
		Row::new([at(12.0), -DEFAULT_DEPTH]),
		Row::new([at(14.0), 0.0]),
		Row::new([width, 0.0]),
	]
}

impl YzTable {
	/// Horizontal extent of the profile; zero when fewer than two points.
	pub fn width(&self) -> f64 {
		self.key_range().map_or(0.0, |(lo, hi)| hi - lo)
	}

	/// Default thalweg position: the middle of the profile.
	pub fn default_thalweg(&self) -> f64 {
		self.width() / 2.0
	}

	/// Deepest point of the profile. The first one wins on ties.
	pub fn lowest_point(&self) -> Option<Row<2>> {
		self.iter().fold(None, |lowest: Option<Row<2>>, row| match lowest {
			Some(best) if best[YzPolicy::Z] <= row[YzPolicy::Z] => Some(best),
			_ => Some(row),
		})
	}

	/// Replaces the contents with [`default_yz_profile`].
	pub fn set_default_profile(&mut self, width: f64) -> Result<()> {
		self.with_suspended(|table| table.bulk_load(default_yz_profile(width)))
	}
}

/// One level of a tabulated profile as delivered by importers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabulatedLevel {
	/// Level.
	pub level: f64,
	/// Total width at the level.
	pub total_width: f64,
	/// Conveying part of the total width.
	pub flow_width: f64,
}

impl ZwTable {
	/// Largest conveying width (total minus storage) over all levels.
	pub fn flow_width(&self) -> f64 {
		self.iter()
			.map(|row| row[ZwPolicy::TOTAL_WIDTH] - row[ZwPolicy::STORAGE_WIDTH])
			.fold(0.0, f64::max)
	}

	/// Largest total width over all levels.
	pub fn max_total_width(&self) -> f64 {
		self.column(ZwPolicy::TOTAL_WIDTH).fold(0.0, f64::max)
	}

	/// Whether zero total widths only appear where a flow profile allows them.
	///
	/// Allowed: no zero width; one at the lowest or highest level; or two,
	/// at the lowest and highest level with at least one level in between.
	pub fn is_flow_profile_valid(&self) -> bool {
		let last = match self.len() {
			0 => return true,
			n => n - 1,
		};
		let zeros: Vec<usize> = self
			.column(ZwPolicy::TOTAL_WIDTH)
			.enumerate()
			.filter(|&(_, width)| width == 0.0)
			.map(|(index, _)| index)
			.collect();
		match zeros.as_slice() {
			[] => true,
			[only] => *only == 0 || *only == last,
			[low, high] => *low == 0 && *high == last && last >= 2,
			_ => false,
		}
	}

	/// Replaces the contents with the two-level default table.
	pub fn set_default_profile(&mut self) -> Result<()> {
		self.with_suspended(|table| {
			table.bulk_load([
				[0.0, DEFAULT_SECTION_WIDTH, 0.0],
				[-DEFAULT_DEPTH, DEFAULT_SECTION_WIDTH / 3.0, 0.0],
			])
		})
	}

	/// Loads levels given as total and flow width.
	///
	/// Storage width is `total - flow`. A flow width exceeding the total is
	/// clamped (storage set to zero) and logged. Returns the number of
	/// clamped levels.
	pub fn load_tabulated<I>(&mut self, levels: I) -> Result<usize>
	where
		I: IntoIterator<Item = TabulatedLevel>,
	{
		let mut clamped = 0;
		let rows: Vec<Row<3>> = levels
			.into_iter()
			.map(|level| {
				let mut storage = level.total_width - level.flow_width;
				if storage < 0.0 {
					warn!(
						level = level.level,
						total_width = level.total_width,
						flow_width = level.flow_width,
						"flow width exceeds total width; storage width set to 0"
					);
					clamped += 1;
					storage = 0.0;
				}
				Row::new([level.level, level.total_width, storage])
			})
			.collect();
		self.with_suspended(|table| table.bulk_load(rows))?;
		Ok(clamped)
	}
}
