use std::ops::Index;

use crate::key::FieldIdx;


/// A fixed-arity tuple of numeric fields.
///
/// Rows are plain values: no identity beyond their contents. The arity is
/// part of the type, so a table of 3-tuples stores exactly `3 * 8` bytes
/// per row with no per-row header or allocation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct Row<const N: usize>([f64; N]);

impl<const N: usize> Row<N> {
	/// Creates a row from its fields.
	#[inline]
	pub const fn new(fields: [f64; N]) -> Self {
		Self(fields)
	}

	/// Returns a copy of this row with `field` replaced by `value`.
	///
	/// # Panics
	///
	/// Panics if `field >= N`.
	#[inline]
	#[must_use]
	pub fn with_field(mut self, field: FieldIdx, value: f64) -> Self {
		self.0[field] = value;
		self
	}

	/// Adds `delta` to `field` in place.
	///
	/// # Panics
	///
	/// Panics if `field >= N`.
	#[inline]
	pub fn shift(&mut self, field: FieldIdx, delta: f64) {
		self.0[field] += delta;
	}

	/// Returns all fields.
	#[inline]
	pub fn fields(&self) -> &[f64; N] {
		&self.0
	}

	/// Consumes the row and returns its fields.
	#[inline]
	pub fn into_fields(self) -> [f64; N] {
		self.0
	}

	/// Returns the first field that is not finite, with its value.
	pub fn first_non_finite(&self) -> Option<(FieldIdx, f64)> {
		self.0.iter().copied().enumerate().find(|(_, v)| !v.is_finite())
	}

	/// Bitwise equality on every field.
	///
	/// Unlike `==`, this treats identical `NaN` payloads as equal and
	/// distinguishes `-0.0` from `0.0`. Used to check lossless round-trips.
	pub fn bits_eq(&self, other: &Self) -> bool {
		self.0.iter().zip(other.0.iter()).all(|(a, b)| a.to_bits() == b.to_bits())
	}
}

impl<const N: usize> Default for Row<N> {
	fn default() -> Self {
		Self([0.0; N])
	}
}

impl<const N: usize> Index<FieldIdx> for Row<N> {
	type Output = f64;

	#[inline]
	fn index(&self, field: FieldIdx) -> &f64 {
		&self.0[field]
	}
}

impl<const N: usize> From<[f64; N]> for Row<N> {
	#[inline]
	fn from(fields: [f64; N]) -> Self {
		Self(fields)
	}
}

impl<const N: usize> From<Row<N>> for [f64; N] {
	#[inline]
	fn from(row: Row<N>) -> Self {
		row.0
	}
}

impl From<(f64, f64)> for Row<2> {
	fn from((a, b): (f64, f64)) -> Self {
		Self([a, b])
	}
}

impl From<(f64, f64, f64)> for Row<3> {
	fn from((a, b, c): (f64, f64, f64)) -> Self {
		Self([a, b, c])
	}
}
