//! The self-sorting row store.
//!
//! A [`SortedRowStore`] keeps its rows ascending by the policy's sort key
//! at all times. Edits that would break the order are repaired by moving
//! the one affected row, never by re-sorting, and every physical change is
//! announced through the table's [`Notifier`].
//!
//! # Event shapes
//!
//! | operation                     | events                                       |
//! |-------------------------------|----------------------------------------------|
//! | `insert` landing at the tail  | `Insert(tail)`                               |
//! | `insert` landing at `j`       | `Insert(tail)`, `Move(tail, j)`              |
//! | `update_field`, order kept    | `ValueChanged(index, field)`                 |
//! | `update_field`, order broken  | `Move(index, j)`                             |
//! | `remove`                      | `Remove(index)`                              |
//! | `bulk_load`, `shift_field`... | `Reset` (deferred to `resume` when suspended)|
//!
//! An insert is announced as an append followed by a move into place, which
//! is what a grid does when a new row is typed at the bottom and then
//! sorts itself. Physically the row is written once at its final slot.

use std::cmp::Ordering;

use smallvec::SmallVec;
use tracing::{debug, trace};
use xsect_primitives::{FieldIdx, Row, RowIdx};

use crate::config::TableConfig;
use crate::error::{ConstraintViolation, Result, TableError};
use crate::notify::{Notifier, SubscriptionId, TableEvent};
use crate::policy::OrderingPolicy;

mod search;

/// Rows held inline before the store spills to the heap.
///
/// Most profiles have a handful of points; keeping those inside the table
/// avoids one allocation per table.
pub const INLINE_ROWS: usize = 4;

type Rows<const N: usize> = SmallVec<[Row<N>; INLINE_ROWS]>;

/// Outcome of [`SortedRowStore::update_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationResult {
	/// The value was written without changing the row's position.
	InPlace {
		/// Index of the edited row.
		index: RowIdx,
	},
	/// The row moved to keep the table ordered.
	Moved {
		/// Index before the edit.
		from: RowIdx,
		/// Index after the edit.
		to: RowIdx,
	},
}

impl MutationResult {
	/// Index of the edited row after the edit.
	pub fn index(&self) -> RowIdx {
		match *self {
			Self::InPlace { index } => index,
			Self::Moved { to, .. } => to,
		}
	}
}

/// An ordered sequence of `N`-field rows kept ascending by policy `P`.
///
/// The store owns its rows exclusively. Readers get copies
/// ([`Self::row_at`], [`Self::iter`]) or a shared slice; nothing outside
/// the store can write a row without going through the ordering logic.
#[derive(Debug)]
pub struct SortedRowStore<P, const N: usize> {
	rows: Rows<N>,
	policy: P,
	config: TableConfig,
	notifier: Notifier,
}

impl<P, const N: usize> Default for SortedRowStore<P, N>
where
	P: OrderingPolicy<N> + Default,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<P, const N: usize> SortedRowStore<P, N>
where
	P: OrderingPolicy<N> + Default,
{
	/// Creates an empty table with the default config.
	pub fn new() -> Self {
		Self::with_policy(P::default(), TableConfig::default())
	}

	/// Creates an empty table with `config`.
	pub fn with_config(config: TableConfig) -> Self {
		Self::with_policy(P::default(), config)
	}

	/// Creates a table pre-seeded with `rows`.
	///
	/// The rows need not be ordered. Fails if validation is enforced and a
	/// row is rejected.
	pub fn from_rows<I>(rows: I, config: TableConfig) -> Result<Self>
	where
		I: IntoIterator,
		I::Item: Into<Row<N>>,
	{
		let mut table = Self::with_config(config);
		table.bulk_load(rows)?;
		Ok(table)
	}
}

impl<P, const N: usize> SortedRowStore<P, N>
where
	P: OrderingPolicy<N>,
{
	/// Creates an empty table with an explicit policy instance.
	pub fn with_policy(policy: P, config: TableConfig) -> Self {
		Self {
			rows: SmallVec::new(),
			policy,
			config,
			notifier: Notifier::new(),
		}
	}

	/// Returns the ordering policy.
	pub fn policy(&self) -> &P {
		&self.policy
	}

	/// Returns the active config.
	pub fn config(&self) -> TableConfig {
		self.config
	}

	/// Turns constraint checking on or off for subsequent writes.
	///
	/// Rows already stored are not re-validated when checking is turned back on.
	pub fn set_enforce_constraints(&mut self, enforce: bool) {
		self.config.enforce_constraints = enforce;
	}

	/// Field the rows are ordered by.
	pub fn key_field(&self) -> FieldIdx {
		self.policy.sort_key()
	}

	/// Number of rows.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Returns true if the table has no rows.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Returns a copy of the row at `index`.
	pub fn row_at(&self, index: RowIdx) -> Result<Row<N>> {
		self.get(index).ok_or(TableError::IndexOutOfRange { index, len: self.len() })
	}

	/// Returns a copy of the row at `index`, or [`None`] if out of range.
	pub fn get(&self, index: RowIdx) -> Option<Row<N>> {
		self.rows.get(index).copied()
	}

	/// All rows in order.
	pub fn as_slice(&self) -> &[Row<N>] {
		&self.rows
	}

	/// Iterates over copies of the rows in order.
	pub fn iter(&self) -> impl Iterator<Item = Row<N>> + '_ {
		self.rows.iter().copied()
	}

	/// Iterates over the sort keys in order.
	pub fn keys(&self) -> impl Iterator<Item = f64> + '_ {
		let key = self.key_field();
		self.rows.iter().map(move |row| row[key])
	}

	/// Values of `field` for every row, in order.
	///
	/// # Panics
	///
	/// Panics if `field >= N`.
	pub fn column(&self, field: FieldIdx) -> impl Iterator<Item = f64> + '_ {
		self.rows.iter().map(move |row| row[field])
	}

	/// Smallest and largest sort key, or [`None`] when empty.
	pub fn key_range(&self) -> Option<(f64, f64)> {
		let key = self.key_field();
		Some((self.rows.first()?[key], self.rows.last()?[key]))
	}

	/// Exports the rows as plain tuples, in order.
	pub fn to_vec(&self) -> Vec<[f64; N]> {
		self.rows.iter().map(|row| row.into_fields()).collect()
	}

	/// Inserts `row` at its ordered position and returns that position.
	///
	/// Rows with a key equal to existing rows go after them. Observers see
	/// `Insert` at the tail, then `Move` into place if the tail is not the
	/// final slot.
	pub fn insert(&mut self, row: impl Into<Row<N>>) -> Result<RowIdx> {
		let row = row.into();
		if self.config.enforce_constraints {
			self.policy.validate(&row)?;
			self.check_unique_key(&row, None)?;
		}

		let index = search::upper_bound(&self.rows, |stored| self.policy.compare(stored, &row));
		self.rows.insert(index, row);

		let tail = self.rows.len() - 1;
		self.notifier.emit(TableEvent::Insert { index: tail });
		if index != tail {
			self.notifier.emit(TableEvent::Move { from: tail, to: index });
		}
		trace!(table = P::NAME, index, len = self.rows.len(), "row inserted");
		Ok(index)
	}

	/// Writes `value` into `field` of the row at `index`.
	///
	/// Editing a non-key field, or a key edit that keeps the row between its
	/// neighbours, writes in place and emits `ValueChanged`. A key edit that
	/// breaks the order relocates the row with a single `Move`. Validation
	/// runs on the edited copy first, so a rejected edit leaves the table
	/// untouched.
	pub fn update_field(&mut self, index: RowIdx, field: FieldIdx, value: f64) -> Result<MutationResult> {
		let current = self.row_at(index)?;
		if field >= N {
			return Err(TableError::FieldOutOfRange { field, arity: N });
		}

		let candidate = current.with_field(field, value);
		let key = self.key_field();
		if self.config.enforce_constraints {
			self.policy.validate(&candidate)?;
			if field == key {
				self.check_unique_key(&candidate, Some(index))?;
			}
		}

		let target = if field == key {
			search::relocation_target(&self.rows, index, |stored| self.policy.compare(stored, &candidate))
		} else {
			index
		};
		self.rows[index] = candidate;

		if target == index {
			self.notifier.emit(TableEvent::ValueChanged { index, field });
			trace!(table = P::NAME, index, field, "value changed in place");
			return Ok(MutationResult::InPlace { index });
		}

		if target > index {
			self.rows[index..=target].rotate_left(1);
		} else {
			self.rows[target..=index].rotate_right(1);
		}
		self.notifier.emit(TableEvent::Move { from: index, to: target });
		trace!(table = P::NAME, from = index, to = target, field, "row moved");
		Ok(MutationResult::Moved { from: index, to: target })
	}

	/// Removes and returns the row at `index`.
	pub fn remove(&mut self, index: RowIdx) -> Result<Row<N>> {
		if index >= self.rows.len() {
			return Err(TableError::IndexOutOfRange { index, len: self.rows.len() });
		}
		let row = self.rows.remove(index);
		self.notifier.emit(TableEvent::Remove { index });
		trace!(table = P::NAME, index, len = self.rows.len(), "row removed");
		Ok(row)
	}

	/// Replaces the whole contents with `rows`.
	///
	/// Unordered input is sorted once (stable, so equal keys keep their input
	/// order). When constraints are enforced every row is validated before
	/// anything is replaced. No per-row events fire; observers get one
	/// `Reset`, immediately or at the outermost [`Self::resume`].
	pub fn bulk_load<I>(&mut self, rows: I) -> Result<()>
	where
		I: IntoIterator,
		I::Item: Into<Row<N>>,
	{
		let buffer: Rows<N> = rows.into_iter().map(Into::into).collect();
		self.replace_rows(buffer)
	}

	/// Adds `delta` to `field` of every row.
	///
	/// Used to raise or lower a whole profile. Announced as one `Reset`.
	pub fn shift_field(&mut self, field: FieldIdx, delta: f64) -> Result<()> {
		if field >= N {
			return Err(TableError::FieldOutOfRange { field, arity: N });
		}
		let mut buffer = self.rows.clone();
		for row in &mut buffer {
			row.shift(field, delta);
		}
		self.replace_rows(buffer)
	}

	/// Removes every row. A no-op on an empty table.
	pub fn clear(&mut self) {
		if self.rows.is_empty() {
			return;
		}
		self.rows = SmallVec::new();
		self.notifier.emit(TableEvent::Reset);
		debug!(table = P::NAME, "table cleared");
	}

	/// Registers an observer for every subsequent [`TableEvent`].
	pub fn subscribe(&mut self, callback: impl FnMut(&TableEvent) + 'static) -> SubscriptionId {
		self.notifier.subscribe(callback)
	}

	/// Removes an observer. Returns false if it was not registered.
	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		self.notifier.unsubscribe(id)
	}

	/// Enters quiet mode; see [`Notifier::suspend`].
	pub fn suspend(&mut self) {
		self.notifier.suspend();
	}

	/// Leaves quiet mode; see [`Notifier::resume`].
	pub fn resume(&mut self) -> bool {
		self.notifier.resume()
	}

	/// Returns true while notifications are suspended.
	pub fn is_suspended(&self) -> bool {
		self.notifier.is_suspended()
	}

	/// Runs `f` with notifications suspended, then resumes.
	///
	/// Observers see a single `Reset` afterwards if `f` changed anything.
	pub fn with_suspended<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
		self.notifier.suspend();
		let out = f(self);
		self.notifier.resume();
		out
	}

	/// Bytes of row storage allocated outside the table itself.
	///
	/// Zero while the rows fit inline.
	pub fn heap_bytes(&self) -> usize {
		if self.rows.spilled() {
			self.rows.capacity() * std::mem::size_of::<Row<N>>()
		} else {
			0
		}
	}

	fn rejects_duplicate_keys(&self) -> bool {
		self.config
			.reject_duplicate_keys
			.unwrap_or_else(|| !self.policy.allows_duplicate_keys())
	}

	/// Fails if another row (not `skip`) shares `row`'s key and duplicates are forbidden.
	fn check_unique_key(&self, row: &Row<N>, skip: Option<RowIdx>) -> std::result::Result<(), ConstraintViolation> {
		if !self.rejects_duplicate_keys() {
			return Ok(());
		}
		let equal = search::equal_range(&self.rows, |stored| self.policy.compare(stored, row));
		let others = equal.len() - usize::from(skip.is_some_and(|i| equal.contains(&i)));
		if others > 0 {
			return Err(ConstraintViolation::DuplicateKey { key: row[self.key_field()] });
		}
		Ok(())
	}

	/// Validates, orders and installs `buffer` as the new contents.
	fn replace_rows(&mut self, mut buffer: Rows<N>) -> Result<()> {
		if self.config.enforce_constraints {
			for (index, row) in buffer.iter().enumerate() {
				if let Err(violation) = self.policy.validate(row) {
					debug!(table = P::NAME, row = index, %violation, "bulk contents rejected");
					return Err(violation.into());
				}
			}
		}

		let presorted = buffer.is_sorted_by(|a, b| self.policy.compare(a, b) != Ordering::Greater);
		if !presorted {
			buffer.sort_by(|a, b| self.policy.compare(a, b));
		}

		if self.config.enforce_constraints && self.rejects_duplicate_keys() {
			let key = self.key_field();
			if let Some(pair) = buffer.windows(2).find(|pair| self.policy.compare(&pair[0], &pair[1]) == Ordering::Equal) {
				let violation = ConstraintViolation::DuplicateKey { key: pair[0][key] };
				debug!(table = P::NAME, %violation, "bulk contents rejected");
				return Err(violation.into());
			}
		}

		buffer.shrink_to_fit();
		let len = buffer.len();
		self.rows = buffer;
		self.notifier.emit(TableEvent::Reset);
		debug!(table = P::NAME, len, presorted, "table contents replaced");
		Ok(())
	}
}
