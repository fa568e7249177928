//! Entity identifiers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable, comparable identifier of an entity within its model.
///
/// Serializes untagged, so records carry `7` or `"abc"` exactly as the
/// client-side store expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
	/// Integer primary key.
	Int(i64),
	/// String key (slug, UUID, ...).
	Str(String),
}

impl Identifier {
	/// Converts the identifier into a JSON value for a record field.
	pub fn to_value(&self) -> Value {
		match self {
			Self::Int(id) => Value::from(*id),
			Self::Str(id) => Value::from(id.as_str()),
		}
	}
}

impl std::fmt::Display for Identifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Int(id) => write!(f, "{}", id),
			Self::Str(id) => write!(f, "{}", id),
		}
	}
}

impl From<i64> for Identifier {
	fn from(id: i64) -> Self {
		Self::Int(id)
	}
}

impl From<i32> for Identifier {
	fn from(id: i32) -> Self {
		Self::Int(i64::from(id))
	}
}

impl From<u32> for Identifier {
	fn from(id: u32) -> Self {
		Self::Int(i64::from(id))
	}
}

impl From<&str> for Identifier {
	fn from(id: &str) -> Self {
		Self::Str(id.to_string())
	}
}

impl From<String> for Identifier {
	fn from(id: String) -> Self {
		Self::Str(id)
	}
}

impl From<Identifier> for Value {
	fn from(id: Identifier) -> Self {
		match id {
			Identifier::Int(id) => Value::from(id),
			Identifier::Str(id) => Value::from(id),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(Identifier::from(7i64), json!(7))]
	#[case(Identifier::from(7i32), json!(7))]
	#[case(Identifier::from("ada"), json!("ada"))]
	fn test_identifier_to_value(#[case] id: Identifier, #[case] expected: Value) {
		assert_eq!(id.to_value(), expected);
		assert_eq!(serde_json::to_value(&id).unwrap(), expected);
	}

	#[rstest]
	fn test_int_and_string_identifiers_differ() {
		assert_ne!(Identifier::from(1i64), Identifier::from("1"));
	}

	#[rstest]
	fn test_identifier_display() {
		assert_eq!(Identifier::from(42i64).to_string(), "42");
		assert_eq!(Identifier::from("slug").to_string(), "slug");
	}
}
