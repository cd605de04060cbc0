//! Error types for table encoding and decoding.

use thiserror::Error;
use xsect_table::TableError;

/// Errors that can occur when encoding or decoding a table.
///
/// Decoding is all-or-nothing: whenever one of these is returned, no table
/// was built and a target table passed to [`decode_into`](crate::decode_into)
/// is unchanged.
#[derive(Debug, Error)]
pub enum CodecError {
	/// The bytes are truncated or not a table envelope.
	#[error("malformed table encoding: {0}")]
	Malformed(#[from] postcard::Error),

	/// The envelope was written by an unknown format version.
	#[error("unsupported format version {found} (expected {expected})")]
	Version {
		/// Version found in the input.
		found: u8,
		/// Version this build reads.
		expected: u8,
	},

	/// The envelope holds rows of a different arity than requested.
	#[error("arity mismatch: encoded {found}, table expects {expected}")]
	Arity {
		/// Arity found in the input.
		found: usize,
		/// Arity of the target table.
		expected: usize,
	},

	/// The value count is not a whole number of rows.
	#[error("{values} values do not form whole rows of arity {arity}")]
	Ragged {
		/// Number of values in the input.
		values: usize,
		/// Arity of the rows.
		arity: usize,
	},

	/// Bytes left over after a complete envelope.
	#[error("{0} trailing bytes after table encoding")]
	TrailingBytes(usize),

	/// The decoded rows were rejected by the target table.
	#[error("decoded rows rejected: {0}")]
	Rejected(#[from] TableError),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
