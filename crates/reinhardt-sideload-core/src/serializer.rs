//! Public entry points.

use crate::depth::Depth;
use crate::document::Document;
use crate::entity::Entity;
use crate::error::SideloadResult;
use crate::registry::{AdapterProvider, AdapterRegistry};
use crate::settings::SideloadSettings;
use crate::walker::GraphWalker;

/// Input accepted by [`SideloadSerializer::format_without_recursion`].
#[derive(Debug, Clone, Copy)]
pub enum Formattable<'a> {
	/// A single primary entity.
	One(&'a dyn Entity),
	/// A homogeneous collection.
	Many(&'a [&'a dyn Entity]),
}

impl<'a> From<&'a dyn Entity> for Formattable<'a> {
	fn from(entity: &'a dyn Entity) -> Self {
		Self::One(entity)
	}
}

impl<'a> From<&'a [&'a dyn Entity]> for Formattable<'a> {
	fn from(entities: &'a [&'a dyn Entity]) -> Self {
		Self::Many(entities)
	}
}

impl<'a, const N: usize> From<&'a [&'a dyn Entity; N]> for Formattable<'a> {
	fn from(entities: &'a [&'a dyn Entity; N]) -> Self {
		Self::Many(entities)
	}
}

impl<'a> From<&'a Vec<&'a dyn Entity>> for Formattable<'a> {
	fn from(entities: &'a Vec<&'a dyn Entity>) -> Self {
		Self::Many(entities)
	}
}

/// Side-loading serializer session.
///
/// A session owns one output [`Document`] and one adapter cache. Calls
/// accumulate into the document until [`SideloadSerializer::reset`] is called;
/// the adapter cache survives resets. A failed call leaves the document
/// partially populated, so callers needing all-or-nothing output should
/// serialize into a fresh session and only keep it on success.
///
/// # Examples
///
/// ```
/// use reinhardt_sideload_core::{
///     impl_entity, AdapterContainer, FieldSet, Identifier, ModelAdapter, SideloadSerializer,
/// };
/// use serde_json::json;
///
/// struct Tag {
///     id: i64,
///     label: &'static str,
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
///         Identifier::from(tag.id)
///     }
///
///     fn fields(&self, tag: &Tag) -> FieldSet {
///         FieldSet::new().scalar("id", tag.id).scalar("label", tag.label)
///     }
/// }
///
/// let mut serializer =
///     SideloadSerializer::new(AdapterContainer::new().with("tag_adapter", TagAdapter));
/// let rust = Tag { id: 1, label: "rust" };
/// let serde = Tag { id: 2, label: "serde" };
///
/// let document = serializer.format(&[&rust, &serde], None, None).unwrap();
/// assert_eq!(
///     document.to_value(),
///     json!({"tags": [{"id": 1, "label": "rust"}, {"id": 2, "label": "serde"}]})
/// );
/// ```
#[derive(Debug)]
pub struct SideloadSerializer {
	registry: AdapterRegistry,
	document: Document,
	settings: SideloadSettings,
}

impl SideloadSerializer {
	/// Creates a session with default settings.
	pub fn new(provider: impl AdapterProvider + 'static) -> Self {
		Self::build(provider, SideloadSettings::default())
	}

	/// Creates a session with validated settings.
	pub fn with_settings(
		provider: impl AdapterProvider + 'static,
		settings: SideloadSettings,
	) -> SideloadResult<Self> {
		settings.validate()?;
		Ok(Self::build(provider, settings))
	}

	fn build(provider: impl AdapterProvider + 'static, settings: SideloadSettings) -> Self {
		Self {
			registry: AdapterRegistry::new(provider)
				.with_proxy_prefixes(settings.proxy_prefixes.clone()),
			document: Document::new().with_strict_sections(settings.strict_sections),
			settings,
		}
	}

	/// Serializes a primary entity into its singular section with unbounded depth.
	///
	/// `section` is created as an empty list first when given and absent.
	pub fn format_one(
		&mut self,
		entity: &dyn Entity,
		section: Option<&str>,
	) -> SideloadResult<&Document> {
		self.format_one_with_depth(entity, section, Depth::Unbounded)
	}

	/// Like [`SideloadSerializer::format_one`] with an explicit depth budget.
	pub fn format_one_with_depth(
		&mut self,
		entity: &dyn Entity,
		section: Option<&str>,
		depth: impl Into<Depth>,
	) -> SideloadResult<&Document> {
		if let Some(section) = section {
			self.document.ensure_section(section);
		}
		GraphWalker::new(&mut self.registry, &mut self.document)
			.serialize_one(entity, depth.into())?;
		Ok(&self.document)
	}

	/// Serializes a homogeneous collection into its plural section.
	///
	/// `max_depth` falls back to the configured default, which is unbounded
	/// unless set. Empty input leaves the document as it was, apart from
	/// priming `section`.
	pub fn format(
		&mut self,
		entities: &[&dyn Entity],
		section: Option<&str>,
		max_depth: Option<usize>,
	) -> SideloadResult<&Document> {
		if let Some(section) = section {
			self.document.ensure_section(section);
		}
		let depth = Depth::from(max_depth.or(self.settings.max_depth));
		GraphWalker::new(&mut self.registry, &mut self.document)
			.serialize_many(entities, depth)?;
		Ok(&self.document)
	}

	/// Serializes top-level fields only. Relationships become identifiers.
	pub fn format_without_recursion<'a>(
		&mut self,
		input: impl Into<Formattable<'a>>,
	) -> SideloadResult<&Document> {
		match input.into() {
			Formattable::One(entity) => self.format_one_with_depth(entity, None, Depth::none()),
			Formattable::Many(entities) => self.format(entities, None, Some(0)),
		}
	}

	/// Clears the document. Cached adapters are kept.
	pub fn reset(&mut self) {
		tracing::debug!("resetting side-loaded document");
		self.document.clear();
	}

	/// The accumulated document.
	pub fn document(&self) -> &Document {
		&self.document
	}

	/// Takes the accumulated document, leaving an empty one behind.
	pub fn take_document(&mut self) -> Document {
		let empty = Document::new().with_strict_sections(self.settings.strict_sections);
		std::mem::replace(&mut self.document, empty)
	}

	/// The adapter cache of this session.
	pub fn registry(&self) -> &AdapterRegistry {
		&self.registry
	}

	/// Settings this session was built with.
	pub fn settings(&self) -> &SideloadSettings {
		&self.settings
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::adapter::ModelAdapter;
	use crate::error::SideloadError;
	use crate::field::FieldSet;
	use crate::identifier::Identifier;
	use crate::impl_entity;
	use crate::registry::AdapterContainer;
	use rstest::{fixture, rstest};
	use serde_json::json;

	struct Crate {
		name: &'static str,
		downloads: u32,
	}

	impl_entity!(Crate, "crate_adapter");

	struct CrateAdapter;

	impl ModelAdapter for CrateAdapter {
		type Model = Crate;

		fn model_name_singular(&self) -> &str {
			"crate"
		}

		fn model_name_plural(&self) -> &str {
			"crates"
		}

		fn id(&self, krate: &Crate) -> Identifier {
			Identifier::from(krate.name)
		}

		fn fields(&self, krate: &Crate) -> FieldSet {
			FieldSet::new()
				.scalar("id", krate.name)
				.scalar("downloads", krate.downloads)
		}
	}

	#[fixture]
	fn serializer() -> SideloadSerializer {
		SideloadSerializer::new(AdapterContainer::new().with("crate_adapter", CrateAdapter))
	}

	#[rstest]
	fn test_forced_section_is_primed(mut serializer: SideloadSerializer) {
		let document = serializer.format(&[], Some("crates"), None).unwrap();
		assert_eq!(document.to_value(), json!({"crates": []}));
	}

	#[rstest]
	fn test_format_one_overwrites_primary(mut serializer: SideloadSerializer) {
		let serde = Crate {
			name: "serde",
			downloads: 10,
		};
		let tokio = Crate {
			name: "tokio",
			downloads: 5,
		};
		serializer.format_one(&serde, None).unwrap();
		let document = serializer.format_one(&tokio, None).unwrap();
		assert_eq!(
			document.to_value(),
			json!({"crate": {"id": "tokio", "downloads": 5}})
		);
	}

	#[rstest]
	fn test_reset_keeps_adapter_cache(mut serializer: SideloadSerializer) {
		let serde = Crate {
			name: "serde",
			downloads: 10,
		};
		serializer.format_without_recursion(&serde as &dyn Entity).unwrap();
		assert_eq!(serializer.registry().cached_len(), 1);

		serializer.reset();
		assert!(serializer.document().is_empty());
		assert_eq!(serializer.registry().cached_len(), 1);
	}

	#[rstest]
	fn test_take_document_leaves_empty(mut serializer: SideloadSerializer) {
		let serde = Crate {
			name: "serde",
			downloads: 10,
		};
		serializer.format(&[&serde], None, None).unwrap();
		let document = serializer.take_document();
		assert_eq!(document.get_plural("crates").unwrap().len(), 1);
		assert!(serializer.document().is_empty());
	}

	#[rstest]
	fn test_invalid_settings_rejected() {
		let settings = SideloadSettings::new().with_proxy_prefix("");
		let err = SideloadSerializer::with_settings(AdapterContainer::new(), settings).unwrap_err();
		assert!(matches!(err, SideloadError::InvalidSettings(_)));
	}

	#[rstest]
	fn test_unknown_adapter_is_configuration_error() {
		let mut serializer = SideloadSerializer::new(AdapterContainer::new());
		let serde = Crate {
			name: "serde",
			downloads: 10,
		};
		let err = serializer.format_one(&serde, None).unwrap_err();
		assert!(err.is_configuration());
	}
}
