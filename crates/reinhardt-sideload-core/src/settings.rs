//! Serializer settings.
//!
//! Settings are plain serde structs so they can live in a project's TOML
//! configuration next to everything else.

use crate::error::{SideloadError, SideloadResult};
use serde::{Deserialize, Serialize};

/// Settings for a [`SideloadSerializer`](crate::SideloadSerializer).
///
/// # Examples
///
/// ```
/// use reinhardt_sideload_core::SideloadSettings;
///
/// let settings = SideloadSettings::from_toml_str(
///     r#"
///     max_depth = 2
///     proxy_prefixes = ["__lazy__::"]
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(settings.max_depth, Some(2));
/// assert!(settings.strict_sections);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideloadSettings {
	/// Default relationship depth for multi-entity serialization. `None` is unbounded.
	pub max_depth: Option<usize>,

	/// Prefixes stripped from entity type identities before adapter lookup.
	pub proxy_prefixes: Vec<String>,

	/// Reject writing a list into a singular section (and the reverse).
	/// When disabled a list write turns a singular section into a list headed
	/// by the former singular record, and a singular write replaces a list.
	pub strict_sections: bool,
}

impl Default for SideloadSettings {
	fn default() -> Self {
		Self {
			max_depth: None,
			proxy_prefixes: Vec::new(),
			strict_sections: true,
		}
	}
}

impl SideloadSettings {
	/// Creates default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses and validates settings from TOML.
	pub fn from_toml_str(source: &str) -> SideloadResult<Self> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Validates the settings.
	pub fn validate(&self) -> SideloadResult<()> {
		if self.proxy_prefixes.iter().any(|prefix| prefix.is_empty()) {
			return Err(SideloadError::InvalidSettings(
				"proxy prefix cannot be empty".to_string(),
			));
		}
		Ok(())
	}

	/// Sets the default depth.
	pub fn with_max_depth(mut self, depth: usize) -> Self {
		self.max_depth = Some(depth);
		self
	}

	/// Adds a proxy prefix.
	pub fn with_proxy_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.proxy_prefixes.push(prefix.into());
		self
	}

	/// Enables or disables strict section shapes.
	pub fn with_strict_sections(mut self, strict: bool) -> Self {
		self.strict_sections = strict;
		self
	}
}
