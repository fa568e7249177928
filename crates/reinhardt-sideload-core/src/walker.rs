//! Depth-limited traversal of the entity graph.
//!
//! The walker turns entities into records and follows their relationships.
//! A record is appended, and its identifier registered, before any of its
//! fields are read, so a relationship that leads back to an entity already
//! on the current path finds it in the index and stops there.

use crate::adapter::SerializerAdapter;
use crate::depth::Depth;
use crate::document::{Document, Record, RecordSlot};
use crate::entity::Entity;
use crate::error::{SideloadError, SideloadResult};
use crate::field::{Field, FieldValue};
use crate::registry::AdapterRegistry;
use serde_json::Value;
use std::sync::Arc;

/// Walks entities into a [`Document`].
///
/// The walker borrows the session state for the duration of one top-level
/// call. On error the document keeps whatever was written before the failure.
pub struct GraphWalker<'s> {
	registry: &'s mut AdapterRegistry,
	document: &'s mut Document,
}

impl<'s> GraphWalker<'s> {
	/// Creates a walker over the given session state.
	pub fn new(registry: &'s mut AdapterRegistry, document: &'s mut Document) -> Self {
		Self { registry, document }
	}

	/// Serializes a homogeneous collection into its plural section.
	///
	/// Empty input is a no-op. Entities already present in their plural
	/// section are skipped, as are entities the adapter denies access to.
	pub fn serialize_many(&mut self, entities: &[&dyn Entity], depth: Depth) -> SideloadResult<()> {
		let Some(first) = entities.first() else {
			return Ok(());
		};

		let expected = self.registry.type_identity(*first);
		if let Some(other) = entities
			.iter()
			.find(|entity| self.registry.type_identity(**entity) != expected)
		{
			return Err(SideloadError::HeterogeneousCollection {
				expected: expected.to_string(),
				found: self.registry.type_identity(*other).to_string(),
			});
		}

		for entity in entities {
			self.record_or_skip(*entity, depth)?;
		}
		Ok(())
	}

	/// Writes the singular record for `entity`, replacing any previous one.
	///
	/// The plural dedup index is not consulted.
	pub fn serialize_one(&mut self, entity: &dyn Entity, depth: Depth) -> SideloadResult<()> {
		let Some(adapter) = self.registry.resolve(entity)? else {
			return Ok(());
		};

		let key = adapter.model_name_singular().to_string();
		let id = adapter.id(entity)?;
		tracing::debug!("serializing {} {} as primary record", key, id);
		self.document.set_singular_record(&key, id, Record::new())?;
		self.materialize(adapter.as_ref(), entity, RecordSlot::Singular(key), depth)
	}

	fn record_or_skip(&mut self, entity: &dyn Entity, depth: Depth) -> SideloadResult<()> {
		let Some(adapter) = self.registry.resolve(entity)? else {
			return Ok(());
		};

		let id = adapter.id(entity)?;
		let plural = adapter.model_name_plural();
		if self.document.contains_identifier(plural, &id)
			|| self.document.singular_identifier(adapter.model_name_singular()) == Some(&id)
		{
			tracing::debug!("{} {} already recorded, skipping", plural, id);
			return Ok(());
		}

		let key = plural.to_string();
		tracing::debug!("recording {} {}", key, id);
		self.document.ensure_section(&key);
		let index = self.document.append_record(&key, id, Record::new())?;
		self.materialize(adapter.as_ref(), entity, RecordSlot::Plural(key, index), depth)
	}

	fn materialize(
		&mut self,
		adapter: &dyn SerializerAdapter,
		entity: &dyn Entity,
		slot: RecordSlot,
		depth: Depth,
	) -> SideloadResult<()> {
		for (name, field) in adapter.fields(entity)? {
			let Field { value, recurse } = field;
			tracing::trace!("writing field '{}' of {}", name, slot.section());
			match value {
				FieldValue::Scalar(value) => self.document.write_field(&slot, name, value)?,
				FieldValue::DateTime(value) => self.document.write_field(
					&slot,
					name,
					Value::String(FieldValue::canonical_datetime(&value)),
				)?,
				FieldValue::Collection(values) => {
					self.document
						.write_field(&slot, name, Value::Array(values))?
				}
				FieldValue::Entity(related) => {
					self.to_one(&slot, name, related.as_ref(), recurse, depth)?
				}
				FieldValue::Entities(related) => {
					self.to_many(&slot, name, &related, recurse, depth)?
				}
			}
		}
		Ok(())
	}

	fn to_one(
		&mut self,
		slot: &RecordSlot,
		name: String,
		related: &dyn Entity,
		recurse: bool,
		depth: Depth,
	) -> SideloadResult<()> {
		let Some(adapter) = self.registry.resolve(related)? else {
			return Ok(());
		};

		let id = adapter.id(related)?;
		self.document.write_field(slot, name, id.to_value())?;
		if recurse {
			if depth.can_descend() {
				self.record_or_skip(related, depth.descend())?;
			} else {
				tracing::debug!("depth exhausted at {} {}", adapter.model_name_plural(), id);
			}
		}
		Ok(())
	}

	fn to_many(
		&mut self,
		slot: &RecordSlot,
		name: String,
		related: &[Arc<dyn Entity>],
		recurse: bool,
		depth: Depth,
	) -> SideloadResult<()> {
		let related: Vec<&dyn Entity> = related.iter().map(|entity| entity.as_ref()).collect();

		if let Some(first) = related.first() {
			let expected = self.registry.type_identity(*first);
			if let Some(other) = related
				.iter()
				.find(|entity| self.registry.type_identity(**entity) != expected)
			{
				return Err(SideloadError::MixedRelation {
					field: name,
					expected: expected.to_string(),
					found: self.registry.type_identity(*other).to_string(),
				});
			}
		}

		let mut ids = Vec::with_capacity(related.len());
		for entity in &related {
			if let Some(adapter) = self.registry.resolve(*entity)? {
				ids.push(adapter.id(*entity)?.to_value());
			}
		}
		self.document.write_field(slot, name, Value::Array(ids))?;

		if recurse {
			if depth.can_descend() {
				self.serialize_many(&related, depth.descend())?;
			} else if !related.is_empty() {
				tracing::debug!(
					"depth exhausted, {} related entities left as identifiers",
					related.len()
				);
			}
		}
		Ok(())
	}
}
