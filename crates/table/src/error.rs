//! Error types for table mutation and configuration.

use thiserror::Error;
use xsect_primitives::{FieldIdx, RowIdx};

/// A row rejected by an [`OrderingPolicy`](crate::OrderingPolicy).
///
/// Only produced while constraint enforcement is active. The table is left
/// untouched when a violation is returned.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConstraintViolation {
	/// A field is `NaN` or infinite.
	#[error("field {field} is not finite ({value})")]
	NonFinite {
		/// Offending field.
		field: FieldIdx,
		/// Offending value.
		value: f64,
	},

	/// A field that must be non-negative is below zero.
	#[error("field {field} must not be negative ({value})")]
	Negative {
		/// Offending field.
		field: FieldIdx,
		/// Offending value.
		value: f64,
	},

	/// Storage width larger than the total width of the same level.
	#[error("storage width {storage} exceeds total width {total}")]
	StorageExceedsTotal {
		/// Storage width of the row.
		storage: f64,
		/// Total width of the row.
		total: f64,
	},

	/// Another row already holds this sort key and the table forbids duplicates.
	#[error("duplicate sort key {key}")]
	DuplicateKey {
		/// The repeated key.
		key: f64,
	},
}

/// Errors returned by table operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
	/// The row failed validation.
	#[error("constraint violation: {0}")]
	Constraint(#[from] ConstraintViolation),

	/// A row index outside `[0, len)`.
	#[error("row index {index} out of range for table of {len} rows")]
	IndexOutOfRange {
		/// Requested index.
		index: RowIdx,
		/// Current row count.
		len: usize,
	},

	/// A field index at or past the row arity.
	#[error("field index {field} out of range for arity {arity}")]
	FieldOutOfRange {
		/// Requested field.
		field: FieldIdx,
		/// Arity of the table.
		arity: usize,
	},
}

impl TableError {
	/// Returns the constraint violation, if this is one.
	pub fn as_constraint(&self) -> Option<&ConstraintViolation> {
		match self {
			Self::Constraint(violation) => Some(violation),
			_ => None,
		}
	}
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors that can occur when loading a [`TableConfig`](crate::TableConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The TOML source could not be parsed into a config.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}
