//! Concrete table variants used by cross-section definitions.

mod yz;
mod yz_storage;
mod zw;

pub use yz::{YzPolicy, YzTable};
pub use yz_storage::{YzStoragePolicy, YzStorageTable};
pub use zw::{ZwPolicy, ZwTable};
