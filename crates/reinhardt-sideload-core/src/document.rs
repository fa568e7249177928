//! The accumulated output document.
//!
//! A [`Document`] maps section keys (model names) to either a single record
//! or an ordered list of records, and keeps the index of identifiers already
//! present so the walker can tell whether an entity has been materialized.

use crate::error::{SideloadError, SideloadResult};
use crate::identifier::Identifier;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Flat representation of one entity.
pub type Record = Map<String, Value>;

/// A named slot in the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Section {
	/// The primary record of a single-entity serialization.
	Single(Record),
	/// Records of one model, in discovery order.
	Many(Vec<Record>),
}

impl Section {
	/// Number of records held by the section.
	pub fn len(&self) -> usize {
		match self {
			Self::Single(_) => 1,
			Self::Many(records) => records.len(),
		}
	}

	/// Returns `true` for an empty list section.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Location of a record that is still having its fields written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSlot {
	/// The record of a singular section.
	Singular(String),
	/// The record at `index` of a plural section.
	Plural(String, usize),
}

impl RecordSlot {
	/// Section key of the slot.
	pub fn section(&self) -> &str {
		match self {
			Self::Singular(key) | Self::Plural(key, _) => key,
		}
	}
}

/// Side-loaded output document.
///
/// # Examples
///
/// ```
/// use reinhardt_sideload_core::{Document, Identifier, RecordSlot};
/// use serde_json::json;
///
/// let mut document = Document::new();
/// let index = document
///     .append_record("books", Identifier::from(7i64), Default::default())
///     .unwrap();
/// document
///     .write_field(&RecordSlot::Plural("books".to_string(), index), "title", json!("X"))
///     .unwrap();
///
/// assert!(document.contains_identifier("books", &Identifier::from(7i64)));
/// assert_eq!(document.to_value(), json!({"books": [{"title": "X"}]}));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
	sections: IndexMap<String, Section>,
	plural_ids: HashMap<String, HashSet<Identifier>>,
	singular_ids: HashMap<String, Identifier>,
	// Singular sections turned into lists; their primary record sits at index 0.
	demoted: HashSet<String>,
	strict_sections: bool,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	/// Creates an empty document with strict section shapes.
	pub fn new() -> Self {
		Self {
			sections: IndexMap::new(),
			plural_ids: HashMap::new(),
			singular_ids: HashMap::new(),
			demoted: HashSet::new(),
			strict_sections: true,
		}
	}

	/// Sets whether writing a list into a singular section (or the reverse) is an error.
	pub fn with_strict_sections(mut self, strict: bool) -> Self {
		self.strict_sections = strict;
		self
	}

	/// Creates an empty list section unless one with this key already exists.
	pub fn ensure_section(&mut self, key: &str) {
		if !self.sections.contains_key(key) {
			self.sections
				.insert(key.to_string(), Section::Many(Vec::new()));
		}
	}

	/// Checks if `id` is already recorded in the plural section `key`.
	pub fn contains_identifier(&self, key: &str, id: &Identifier) -> bool {
		self.plural_ids
			.get(key)
			.is_some_and(|ids| ids.contains(id))
	}

	/// Identifier of the record held by the singular section `key`.
	pub fn singular_identifier(&self, key: &str) -> Option<&Identifier> {
		self.singular_ids.get(key)
	}

	/// Appends a record to the plural section `key` and returns its position.
	///
	/// With lenient section shapes, a singular section under `key` becomes a
	/// list whose first record is the former singular one. Writes addressed to
	/// the singular slot keep landing on that record.
	pub fn append_record(
		&mut self,
		key: &str,
		id: Identifier,
		record: Record,
	) -> SideloadResult<usize> {
		let index = match self.sections.get_mut(key) {
			Some(Section::Many(records)) => {
				records.push(record);
				records.len() - 1
			}
			Some(section @ Section::Single(_)) => {
				if self.strict_sections {
					return Err(SideloadError::SectionConflict {
						section: key.to_string(),
					});
				}
				let mut records = Vec::with_capacity(2);
				if let Section::Single(primary) =
					std::mem::replace(section, Section::Many(Vec::new()))
				{
					records.push(primary);
				}
				records.push(record);
				let index = records.len() - 1;
				*section = Section::Many(records);
				if let Some(primary_id) = self.singular_ids.remove(key) {
					self.plural_ids
						.entry(key.to_string())
						.or_default()
						.insert(primary_id);
				}
				self.demoted.insert(key.to_string());
				index
			}
			None => {
				self.sections
					.insert(key.to_string(), Section::Many(vec![record]));
				0
			}
		};
		self.plural_ids.entry(key.to_string()).or_default().insert(id);
		Ok(index)
	}

	/// Replaces the record of the singular section `key`.
	///
	/// An empty list section under the same key (from [`Document::ensure_section`])
	/// is replaced silently.
	pub fn set_singular_record(
		&mut self,
		key: &str,
		id: Identifier,
		record: Record,
	) -> SideloadResult<()> {
		match self.sections.get_mut(key) {
			Some(Section::Many(records)) if !records.is_empty() => {
				if self.strict_sections {
					return Err(SideloadError::SectionConflict {
						section: key.to_string(),
					});
				}
				self.plural_ids.remove(key);
				self.sections
					.insert(key.to_string(), Section::Single(record));
			}
			Some(section) => *section = Section::Single(record),
			None => {
				self.sections
					.insert(key.to_string(), Section::Single(record));
			}
		}
		self.demoted.remove(key);
		self.singular_ids.insert(key.to_string(), id);
		Ok(())
	}

	/// Writes one field of a record that was previously appended or set.
	pub fn write_field(
		&mut self,
		slot: &RecordSlot,
		name: impl Into<String>,
		value: Value,
	) -> SideloadResult<()> {
		let key = slot.section();
		let record = match (slot, self.sections.get_mut(key)) {
			(RecordSlot::Singular(_), Some(Section::Single(record))) => Some(record),
			(RecordSlot::Singular(_), Some(Section::Many(records)))
				if self.demoted.contains(key) =>
			{
				records.first_mut()
			}
			(RecordSlot::Plural(_, index), Some(Section::Many(records))) => records.get_mut(*index),
			(_, None) => None,
			_ => {
				return Err(SideloadError::SectionConflict {
					section: key.to_string(),
				});
			}
		};
		let record = record.ok_or_else(|| SideloadError::MissingRecord {
			section: key.to_string(),
		})?;
		record.insert(name.into(), value);
		Ok(())
	}

	/// Looks up a section.
	pub fn section(&self, key: &str) -> Option<&Section> {
		self.sections.get(key)
	}

	/// The record of a singular section.
	pub fn get_singular(&self, key: &str) -> Option<&Record> {
		match self.sections.get(key) {
			Some(Section::Single(record)) => Some(record),
			_ => None,
		}
	}

	/// The records of a plural section.
	pub fn get_plural(&self, key: &str) -> Option<&[Record]> {
		match self.sections.get(key) {
			Some(Section::Many(records)) => Some(records),
			_ => None,
		}
	}

	/// Sections in insertion order.
	pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> + '_ {
		self.sections
			.iter()
			.map(|(key, section)| (key.as_str(), section))
	}

	/// Number of sections.
	pub fn len(&self) -> usize {
		self.sections.len()
	}

	/// Returns `true` when the document has no sections.
	pub fn is_empty(&self) -> bool {
		self.sections.is_empty()
	}

	/// Removes all sections and identifiers.
	pub fn clear(&mut self) {
		self.sections.clear();
		self.plural_ids.clear();
		self.singular_ids.clear();
		self.demoted.clear();
	}

	/// Converts the document into a JSON value.
	pub fn to_value(&self) -> Value {
		Value::Object(
			self.sections
				.iter()
				.map(|(key, section)| {
					let value = match section {
						Section::Single(record) => Value::Object(record.clone()),
						Section::Many(records) => Value::Array(
							records.iter().cloned().map(Value::Object).collect(),
						),
					};
					(key.clone(), value)
				})
				.collect(),
		)
	}

	/// Renders the document as compact JSON.
	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}

	/// Renders the document as pretty-printed JSON.
	pub fn to_json_pretty(&self) -> serde_json::Result<String> {
		serde_json::to_string_pretty(self)
	}
}

impl Serialize for Document {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.sections.serialize(serializer)
	}
}
