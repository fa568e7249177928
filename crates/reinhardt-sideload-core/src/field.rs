//! Field values produced by adapters.
//!
//! Every field an adapter declares is a [`Field`]: a classified value plus the
//! recurse flag telling the walker whether related entities should get their
//! own records as well as being referenced by identifier.

use crate::entity::Entity;
use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

/// Classified field value.
#[derive(Clone)]
pub enum FieldValue {
	/// Plain value written as-is (strings, numbers, booleans, null, nested objects).
	Scalar(Value),
	/// Date/time, written in canonical ISO-8601 form.
	DateTime(DateTime<FixedOffset>),
	/// To-one relationship.
	Entity(Arc<dyn Entity>),
	/// To-many relationship. Elements must all be of one entity kind.
	Entities(Vec<Arc<dyn Entity>>),
	/// Array of plain values, written verbatim.
	Collection(Vec<Value>),
}

impl FieldValue {
	/// Renders a date/time the way records carry it: `2024-05-01T12:30:00+02:00`.
	pub fn canonical_datetime(value: &DateTime<FixedOffset>) -> String {
		value.to_rfc3339_opts(SecondsFormat::Secs, false)
	}

	/// Returns `true` for the two relationship variants.
	pub fn is_relation(&self) -> bool {
		matches!(self, Self::Entity(_) | Self::Entities(_))
	}
}

impl std::fmt::Debug for FieldValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
			Self::DateTime(value) => f.debug_tuple("DateTime").field(value).finish(),
			Self::Entity(entity) => f.debug_tuple("Entity").field(&entity.type_identity()).finish(),
			Self::Entities(entities) => f.debug_tuple("Entities").field(&entities.len()).finish(),
			Self::Collection(values) => f.debug_tuple("Collection").field(values).finish(),
		}
	}
}

/// A field value together with its traversal directive.
#[derive(Debug, Clone)]
pub struct Field {
	/// The value.
	pub value: FieldValue,
	/// Whether related entities should also be expanded into their own sections.
	pub recurse: bool,
}

impl Field {
	/// Creates a field.
	pub fn new(value: FieldValue, recurse: bool) -> Self {
		Self { value, recurse }
	}
}

/// Ordered mapping of field name to [`Field`], as declared by an adapter.
///
/// # Examples
///
/// ```
/// use reinhardt_sideload_core::FieldSet;
///
/// let fields = FieldSet::new()
///     .scalar("id", 1)
///     .scalar("name", "Ada")
///     .collection("aliases", vec!["Countess of Lovelace"]);
///
/// let names: Vec<&str> = fields.names().collect();
/// assert_eq!(names, vec!["id", "name", "aliases"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
	fields: IndexMap<String, Field>,
}

impl FieldSet {
	/// Creates an empty field set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a field. A later insert under the same name replaces the value but keeps its position.
	pub fn insert(&mut self, name: impl Into<String>, field: Field) {
		self.fields.insert(name.into(), field);
	}

	/// Adds a field with an explicit value and recurse flag.
	pub fn field(mut self, name: impl Into<String>, value: FieldValue, recurse: bool) -> Self {
		self.insert(name, Field::new(value, recurse));
		self
	}

	/// Adds a plain value.
	pub fn scalar(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.field(name, FieldValue::Scalar(value.into()), false)
	}

	/// Adds a date/time value in any time zone.
	pub fn datetime<Tz: TimeZone>(self, name: impl Into<String>, value: &DateTime<Tz>) -> Self {
		self.field(name, FieldValue::DateTime(value.fixed_offset()), false)
	}

	/// Adds a to-one relationship. `None` leaves the field as JSON null.
	pub fn belongs_to(
		self,
		name: impl Into<String>,
		related: Option<Arc<dyn Entity>>,
		recurse: bool,
	) -> Self {
		match related {
			Some(entity) => self.field(name, FieldValue::Entity(entity), recurse),
			None => self.field(name, FieldValue::Scalar(Value::Null), false),
		}
	}

	/// Adds a to-many relationship.
	pub fn has_many<I>(self, name: impl Into<String>, related: I, recurse: bool) -> Self
	where
		I: IntoIterator<Item = Arc<dyn Entity>>,
	{
		self.field(
			name,
			FieldValue::Entities(related.into_iter().collect()),
			recurse,
		)
	}

	/// Adds an array of plain values.
	pub fn collection<I, T>(self, name: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Value>,
	{
		let values = values.into_iter().map(Into::into).collect();
		self.field(name, FieldValue::Collection(values), false)
	}

	/// Number of declared fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns `true` when no field is declared.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Looks up a field by name.
	pub fn get(&self, name: &str) -> Option<&Field> {
		self.fields.get(name)
	}

	/// Field names in declaration order.
	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.fields.keys().map(String::as_str)
	}

	/// Fields in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> + '_ {
		self.fields.iter().map(|(name, field)| (name.as_str(), field))
	}
}

impl IntoIterator for FieldSet {
	type Item = (String, Field);
	type IntoIter = indexmap::map::IntoIter<String, Field>;

	fn into_iter(self) -> Self::IntoIter {
		self.fields.into_iter()
	}
}

impl FromIterator<(String, Field)> for FieldSet {
	fn from_iter<I: IntoIterator<Item = (String, Field)>>(iter: I) -> Self {
		Self {
			fields: iter.into_iter().collect(),
		}
	}
}
