//! Per-table configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Behavior switches for a single table.
///
/// Tables are typically configured in bulk from an owning model, so the
/// struct is deserializable and every field has a default:
///
/// ```toml
/// enforce_constraints = false
/// reject_duplicate_keys = true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
	/// Validate rows against the ordering policy on every write.
	///
	/// Turning this off is the trusted bulk path: rows are accepted as-is and
	/// no [`ConstraintViolation`](crate::ConstraintViolation) can be raised.
	pub enforce_constraints: bool,
	/// Overrides the policy's duplicate-key rule when set.
	pub reject_duplicate_keys: Option<bool>,
}

impl Default for TableConfig {
	fn default() -> Self {
		Self {
			enforce_constraints: true,
			reject_duplicate_keys: None,
		}
	}
}

impl TableConfig {
	/// Config for trusted bulk construction: no validation.
	pub const fn trusted() -> Self {
		Self {
			enforce_constraints: false,
			reject_duplicate_keys: None,
		}
	}

	/// Parses a config from TOML.
	pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(src)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_enforce_constraints() {
		let config = TableConfig::default();
		assert!(config.enforce_constraints);
		assert_eq!(config.reject_duplicate_keys, None);
	}

	#[test]
	fn empty_toml_is_default() {
		assert_eq!(TableConfig::from_toml_str("").unwrap(), TableConfig::default());
	}

	#[test]
	fn parses_all_fields() {
		let config = TableConfig::from_toml_str("enforce_constraints = false\nreject_duplicate_keys = true\n").unwrap();
		assert!(!config.enforce_constraints);
		assert_eq!(config.reject_duplicate_keys, Some(true));
	}

	#[test]
	fn unknown_field_is_rejected() {
		let err = TableConfig::from_toml_str("enforce = true").unwrap_err();
		assert!(matches!(err, ConfigError::Toml(_)));
	}
}
