//! Ordering policies: which column is the sort key and what rows are valid.
//!
//! A policy is pure, stateless logic. Each table variant supplies a
//! zero-sized policy type, so carrying one inside every table costs nothing.
//! Policies must be `Send + Sync`; comparisons share no mutable state and
//! may run on any thread even though the owning table is single-threaded.

use std::cmp::Ordering;

use xsect_primitives::{FieldIdx, Row, cmp_keys};

use crate::error::ConstraintViolation;


/// Comparison and validation rules for a table of `N`-field rows.
pub trait OrderingPolicy<const N: usize>: Send + Sync {
	/// Short name used in logs.
	const NAME: &'static str;

	/// The field rows are kept ascending by.
	fn sort_key(&self) -> FieldIdx;

	/// Orders two rows by their sort key.
	///
	/// Only the key takes part; rows with equal keys compare equal and keep
	/// their insertion order inside a table.
	fn compare(&self, a: &Row<N>, b: &Row<N>) -> Ordering {
		let key = self.sort_key();
		cmp_keys(a[key], b[key])
	}

	/// Checks a single row against the variant's constraints.
	fn validate(&self, row: &Row<N>) -> Result<(), ConstraintViolation>;

	/// Whether two rows may share a sort key.
	fn allows_duplicate_keys(&self) -> bool {
		true
	}
}

/// Rejects any `NaN` or infinite field.
///
/// The base check of every shipped variant; a `NaN` key has no meaningful
/// place in an ascending profile.
pub fn require_finite<const N: usize>(row: &Row<N>) -> Result<(), ConstraintViolation> {
	match row.first_non_finite() {
		Some((field, value)) => Err(ConstraintViolation::NonFinite { field, value }),
		None => Ok(()),
	}
}

/// Rejects a negative value in `field`.
pub fn require_non_negative<const N: usize>(row: &Row<N>, field: FieldIdx) -> Result<(), ConstraintViolation> {
	let value = row[field];
	if value < 0.0 {
		return Err(ConstraintViolation::Negative { field, value });
	}
	Ok(())
}
