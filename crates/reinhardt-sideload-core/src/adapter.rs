//! The field extraction contract.
//!
//! An adapter is the only place that knows the shape of an entity type. The
//! walker asks it for model names, identifiers, visibility and fields, and
//! never inspects entities itself.
//!
//! Most adapters are written against [`ModelAdapter`], which is typed over the
//! concrete entity. The object-safe [`SerializerAdapter`] is what the registry
//! stores; every `ModelAdapter` is one through a blanket implementation.

use crate::entity::Entity;
use crate::error::{SideloadError, SideloadResult};
use crate::field::FieldSet;
use crate::identifier::Identifier;

/// Object-safe adapter contract used by the registry and the walker.
pub trait SerializerAdapter: Send + Sync {
	/// Section key for the primary record of a single-entity serialization.
	fn model_name_singular(&self) -> &str;

	/// Section key for the list of records of this model.
	fn model_name_plural(&self) -> &str;

	/// Whether this adapter can read the given entity.
	fn supports(&self, entity: &dyn Entity) -> bool;

	/// Identifier of the entity.
	fn id(&self, entity: &dyn Entity) -> SideloadResult<Identifier>;

	/// Visibility gate. Entities failing it are treated as absent from the graph.
	fn has_access(&self, entity: &dyn Entity) -> bool;

	/// Declared fields of the entity, in record order.
	fn fields(&self, entity: &dyn Entity) -> SideloadResult<FieldSet>;
}

impl std::fmt::Debug for dyn SerializerAdapter + '_ {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SerializerAdapter")
			.field("singular", &self.model_name_singular())
			.field("plural", &self.model_name_plural())
			.finish()
	}
}

/// Adapter written against one concrete entity type.
///
/// # Examples
///
/// ```
/// use reinhardt_sideload_core::{impl_entity, FieldSet, Identifier, ModelAdapter};
///
/// struct Tag {
///     slug: String,
/// }
///
/// impl_entity!(Tag, "tag_adapter");
///
/// struct TagAdapter;
///
/// impl ModelAdapter for TagAdapter {
///     type Model = Tag;
///
///     fn model_name_singular(&self) -> &str {
///         "tag"
///     }
///
///     fn model_name_plural(&self) -> &str {
///         "tags"
///     }
///
///     fn id(&self, tag: &Tag) -> Identifier {
///         Identifier::from(tag.slug.as_str())
///     }
///
///     fn fields(&self, tag: &Tag) -> FieldSet {
///         FieldSet::new().scalar("id", tag.slug.as_str())
///     }
/// }
/// ```
pub trait ModelAdapter: Send + Sync + 'static {
	/// Concrete entity type handled by this adapter.
	type Model: Entity;

	/// Section key for the primary record.
	fn model_name_singular(&self) -> &str;

	/// Section key for the list of records.
	fn model_name_plural(&self) -> &str;

	/// Identifier of the model.
	fn id(&self, model: &Self::Model) -> Identifier;

	/// Visibility gate. Defaults to always visible.
	fn has_access(&self, _model: &Self::Model) -> bool {
		true
	}

	/// Declared fields of the model.
	fn fields(&self, model: &Self::Model) -> FieldSet;
}

fn downcast<'a, A: ModelAdapter>(
	adapter: &A,
	entity: &'a dyn Entity,
) -> SideloadResult<&'a A::Model> {
	entity
		.as_any()
		.downcast_ref::<A::Model>()
		.ok_or_else(|| {
			SideloadError::contract(
				entity.adapter_name(),
				format!(
					"adapter for '{}' cannot read entity of type {}",
					ModelAdapter::model_name_singular(adapter),
					entity.type_identity()
				),
			)
		})
}

impl<A: ModelAdapter> SerializerAdapter for A {
	fn model_name_singular(&self) -> &str {
		ModelAdapter::model_name_singular(self)
	}

	fn model_name_plural(&self) -> &str {
		ModelAdapter::model_name_plural(self)
	}

	fn supports(&self, entity: &dyn Entity) -> bool {
		entity.as_any().is::<A::Model>()
	}

	fn id(&self, entity: &dyn Entity) -> SideloadResult<Identifier> {
		downcast(self, entity).map(|model| ModelAdapter::id(self, model))
	}

	fn has_access(&self, entity: &dyn Entity) -> bool {
		downcast(self, entity)
			.map(|model| ModelAdapter::has_access(self, model))
			.unwrap_or(false)
	}

	fn fields(&self, entity: &dyn Entity) -> SideloadResult<FieldSet> {
		downcast(self, entity).map(|model| ModelAdapter::fields(self, model))
	}
}
