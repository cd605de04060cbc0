//! Core value types for profile tables: fixed-arity rows and sort keys.

/// Field and row index aliases plus key comparison.
pub mod key;
/// Fixed-arity numeric rows.
pub mod row;

pub use key::{FieldIdx, RowIdx, cmp_keys};
pub use row::Row;
