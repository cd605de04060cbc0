//! Self-sorting tuple tables for cross-section profiles.
//!
//! A table keeps fixed-arity numeric rows ascending by one key column,
//! repairs order after edits by moving a single row, and reports every
//! physical change as a typed [`TableEvent`] so derived views (grids,
//! charts) can update incrementally.
//!
//! ```
//! use xsect_table::{YzPolicy, YzTable};
//!
//! let mut table = YzTable::new();
//! for y in [100.0, 10.0, 50.0] {
//!     table.add_point(y, 0.0).unwrap();
//! }
//! assert_eq!(table.keys().collect::<Vec<_>>(), vec![10.0, 50.0, 100.0]);
//!
//! // Moving the first point past the others is one `Move`, not remove+insert.
//! let result = table.update_field(0, YzPolicy::Y, 75.0).unwrap();
//! assert_eq!(result.index(), 1);
//! ```

/// Per-table configuration.
pub mod config;
/// Error types.
pub mod error;
/// Change events and their fan-out.
pub mod notify;
/// Ordering and validation rules.
pub mod policy;
/// Derived profile quantities and default shapes.
pub mod profile;
/// The sorted row store.
pub mod store;
/// Concrete cross-section table variants.
pub mod variants;

pub use config::TableConfig;
pub use error::{ConfigError, ConstraintViolation, Result, TableError};
pub use notify::{Notifier, SubscriptionId, TableEvent};
pub use policy::OrderingPolicy;
pub use profile::{DEFAULT_SECTION_WIDTH, TabulatedLevel, default_yz_profile};
pub use store::{MutationResult, SortedRowStore};
pub use variants::{YzPolicy, YzStoragePolicy, YzStorageTable, YzTable, ZwPolicy, ZwTable};
pub use xsect_primitives::{FieldIdx, Row, RowIdx};
