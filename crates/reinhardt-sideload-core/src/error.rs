//! Error types for side-loaded serialization.
//!
//! Only two families of failure exist. Invalid input covers malformed entity
//! collections and adapters that break the field extraction contract;
//! configuration errors cover adapters the provider cannot supply or supplies
//! for the wrong entity type. Denied access, duplicate identifiers, empty input
//! and an exhausted depth budget are ordinary control flow and never surface here.

use thiserror::Error;

/// Result type for serialization operations.
pub type SideloadResult<T> = Result<T, SideloadError>;

/// Coarse classification of a [`SideloadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// The entities handed to the engine, or the fields an adapter produced, are malformed.
	InvalidInput,
	/// The adapter wiring is wrong.
	Configuration,
}

impl std::fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidInput => write!(f, "invalid input"),
			Self::Configuration => write!(f, "configuration error"),
		}
	}
}

/// Serialization errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SideloadError {
	/// A collection passed to `format` mixes entity types.
	#[error("collection must contain a single entity type: expected {expected}, found {found}")]
	HeterogeneousCollection {
		/// Type identity of the first element.
		expected: String,
		/// Type identity of the offending element.
		found: String,
	},

	/// A to-many relationship mixes entity types.
	#[error("relationship '{field}' must contain a single entity type: expected {expected}, found {found}")]
	MixedRelation {
		/// Field name declared by the adapter.
		field: String,
		/// Type identity of the first related entity.
		expected: String,
		/// Type identity of the offending related entity.
		found: String,
	},

	/// An adapter failed to honor the field extraction contract.
	#[error("adapter '{adapter}' violated the field extraction contract: {message}")]
	ContractViolation {
		/// Adapter name as declared by the entity.
		adapter: String,
		/// What went wrong.
		message: String,
	},

	/// A section is written with the wrong shape (a list into a singular slot or the reverse).
	#[error("section '{section}' already holds a record of a different shape")]
	SectionConflict {
		/// Section key.
		section: String,
	},

	/// A field write addressed a record the document does not hold.
	#[error("section '{section}' has no record at the addressed slot")]
	MissingRecord {
		/// Section key.
		section: String,
	},

	/// The provider has no adapter registered under the requested name.
	#[error("no serializer adapter registered under '{name}'")]
	AdapterNotFound {
		/// Adapter name as declared by the entity.
		name: String,
	},

	/// The provider returned an adapter that cannot handle the entity.
	#[error("adapter '{adapter}' does not handle entities of type {type_identity}")]
	AdapterMismatch {
		/// Adapter name as declared by the entity.
		adapter: String,
		/// Type identity of the entity.
		type_identity: String,
	},

	/// Settings could not be parsed or failed validation.
	#[error("invalid settings: {0}")]
	InvalidSettings(String),
}

impl SideloadError {
	/// Shorthand for a contract violation.
	pub fn contract(adapter: impl Into<String>, message: impl Into<String>) -> Self {
		Self::ContractViolation {
			adapter: adapter.into(),
			message: message.into(),
		}
	}

	/// Returns the error family.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::HeterogeneousCollection { .. }
			| Self::MixedRelation { .. }
			| Self::ContractViolation { .. }
			| Self::SectionConflict { .. }
			| Self::MissingRecord { .. } => ErrorKind::InvalidInput,
			Self::AdapterNotFound { .. }
			| Self::AdapterMismatch { .. }
			| Self::InvalidSettings(_) => ErrorKind::Configuration,
		}
	}

	/// Check if this error belongs to the invalid input family
	pub fn is_invalid_input(&self) -> bool {
		self.kind() == ErrorKind::InvalidInput
	}

	/// Check if this error belongs to the configuration family
	pub fn is_configuration(&self) -> bool {
		self.kind() == ErrorKind::Configuration
	}
}

impl From<toml::de::Error> for SideloadError {
	fn from(err: toml::de::Error) -> Self {
		Self::InvalidSettings(err.to_string())
	}
}
