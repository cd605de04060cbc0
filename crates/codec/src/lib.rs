//! Compact, lossless encoding of profile tables.
//!
//! A table is written as a [postcard] envelope: format version, row arity,
//! then every field of every row in table order as a flat sequence of
//! 8-byte little-endian `f64`s. Bit patterns are preserved exactly,
//! including `-0.0` and `NaN` payloads.
//!
//! Envelopes are self-delimiting, so many tables can be appended to one
//! buffer with [`encode_append`] and read back with [`decode_rows_prefix`].
//!
//! Encoding never touches a table's observers. Decoding into an existing
//! table goes through [`SortedRowStore::bulk_load`] with notifications
//! suspended, so observers see a single `Reset`.

use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use xsect_primitives::Row;
use xsect_table::{OrderingPolicy, SortedRowStore, TableConfig};

mod error;
#[cfg(test)]
mod tests;

pub use error::{CodecError, Result};

/// Envelope format version written by this build.
pub const FORMAT_VERSION: u8 = 1;

/// Borrowed rows serialized as one flat value sequence.
struct FlatRows<'a, const N: usize>(&'a [Row<N>]);

impl<const N: usize> Serialize for FlatRows<'_, N> {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let mut seq = serializer.serialize_seq(Some(self.0.len() * N))?;
		for row in self.0 {
			for value in row.fields() {
				seq.serialize_element(value)?;
			}
		}
		seq.end()
	}
}

#[derive(Serialize)]
struct EnvelopeRef<'a, const N: usize> {
	version: u8,
	arity: usize,
	values: FlatRows<'a, N>,
}

#[derive(Deserialize)]
struct Envelope {
	version: u8,
	arity: usize,
	values: Vec<f64>,
}

impl Envelope {
	fn into_rows<const N: usize>(self) -> Result<Vec<Row<N>>> {
		if self.version != FORMAT_VERSION {
			return Err(CodecError::Version {
				found: self.version,
				expected: FORMAT_VERSION,
			});
		}
		if self.arity != N {
			return Err(CodecError::Arity {
				found: self.arity,
				expected: N,
			});
		}
		if N == 0 || self.values.len() % N != 0 {
			return Err(CodecError::Ragged {
				values: self.values.len(),
				arity: N,
			});
		}
		Ok(self
			.values
			.chunks_exact(N)
			.map(|chunk| {
				let mut fields = [0.0; N];
				fields.copy_from_slice(chunk);
				Row::new(fields)
			})
			.collect())
	}
}

fn envelope<const N: usize>(rows: &[Row<N>]) -> EnvelopeRef<'_, N> {
	EnvelopeRef {
		version: FORMAT_VERSION,
		arity: N,
		values: FlatRows(rows),
	}
}

/// Encodes rows in the given order.
pub fn encode_rows<const N: usize>(rows: &[Row<N>]) -> Result<Vec<u8>> {
	let bytes = postcard::to_stdvec(&envelope(rows))?;
	trace!(rows = rows.len(), bytes = bytes.len(), "rows encoded");
	Ok(bytes)
}

/// Encodes every row of `table`.
pub fn encode<P, const N: usize>(table: &SortedRowStore<P, N>) -> Result<Vec<u8>>
where
	P: OrderingPolicy<N>,
{
	encode_rows(table.as_slice())
}

/// Appends the encoding of `table` to `buf`.
///
/// On error `buf` is left as it was.
pub fn encode_append<P, const N: usize>(table: &SortedRowStore<P, N>, buf: &mut Vec<u8>) -> Result<()>
where
	P: OrderingPolicy<N>,
{
	let bytes = encode(table)?;
	buf.extend_from_slice(&bytes);
	Ok(())
}

/// Decodes one envelope from the front of `bytes`, returning the rest.
pub fn decode_rows_prefix<const N: usize>(bytes: &[u8]) -> Result<(Vec<Row<N>>, &[u8])> {
	let (envelope, rest) = postcard::take_from_bytes::<Envelope>(bytes)?;
	let rows = envelope.into_rows::<N>()?;
	trace!(rows = rows.len(), consumed = bytes.len() - rest.len(), "rows decoded");
	Ok((rows, rest))
}

/// Decodes rows, requiring `bytes` to hold exactly one envelope.
pub fn decode_rows<const N: usize>(bytes: &[u8]) -> Result<Vec<Row<N>>> {
	let (rows, rest) = decode_rows_prefix::<N>(bytes)?;
	if !rest.is_empty() {
		return Err(CodecError::TrailingBytes(rest.len()));
	}
	Ok(rows)
}

/// Decodes a new table configured with `config`.
///
/// The encoding carries rows only, not the source table's config. When
/// `config` enforces constraints the rows are validated like any other bulk
/// load, so a table built trusted (or with duplicate keys allowed) only
/// loads again if the caller passes that table's [`SortedRowStore::config`]
/// or [`TableConfig::trusted`].
pub fn decode<P, const N: usize>(bytes: &[u8], config: TableConfig) -> Result<SortedRowStore<P, N>>
where
	P: OrderingPolicy<N> + Default,
{
	let rows = decode_rows::<N>(bytes)?;
	Ok(SortedRowStore::from_rows(rows, config)?)
}

/// Replaces the contents of `table` with the decoded rows.
///
/// Observers see exactly one `Reset`. On any error `table` is untouched
/// and observers see nothing.
pub fn decode_into<P, const N: usize>(table: &mut SortedRowStore<P, N>, bytes: &[u8]) -> Result<()>
where
	P: OrderingPolicy<N>,
{
	let rows = decode_rows::<N>(bytes).inspect_err(|err| debug!(error = %err, "table decode failed"))?;
	table.with_suspended(|table| table.bulk_load(rows))?;
	Ok(())
}
