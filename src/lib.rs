//! # Reinhardt Sideload
//!
//! Side-loading serializer for entity graphs.
//!
//! A primary entity (or a homogeneous collection of entities) is flattened
//! into a document keyed by model name. Related entities are side-loaded into
//! their own sections exactly once, and relationship fields carry identifiers.
//!
//! ## Feature Flags
//!
//! - `test` - Testing utilities: a sample library domain, adapters and rstest fixtures
//!
//! ## Quick Start
//!
//! ```
//! use reinhardt_sideload::prelude::*;
//! use serde_json::json;
//!
//! struct Tag {
//!     slug: &'static str,
//! }
//!
//! impl_entity!(Tag, "tag");
//!
//! struct TagAdapter;
//!
//! impl ModelAdapter for TagAdapter {
//!     type Model = Tag;
//!
//!     fn model_name_singular(&self) -> &str {
//!         "tag"
//!     }
//!
//!     fn model_name_plural(&self) -> &str {
//!         "tags"
//!     }
//!
//!     fn id(&self, tag: &Tag) -> Identifier {
//!         Identifier::from(tag.slug)
//!     }
//!
//!     fn fields(&self, tag: &Tag) -> FieldSet {
//!         FieldSet::new().scalar("id", tag.slug)
//!     }
//! }
//!
//! let mut serializer = SideloadSerializer::new(AdapterContainer::new().with("tag", TagAdapter));
//! let document = serializer.format_one(&Tag { slug: "rust" }, None).unwrap();
//! assert_eq!(document.to_value(), json!({"tag": {"id": "rust"}}));
//! ```

pub use reinhardt_sideload_core::*;

#[cfg(feature = "test")]
pub use reinhardt_sideload_test as test;

/// Prelude module for convenient imports
pub mod prelude {
	pub use reinhardt_sideload_core::{
		AdapterContainer, AdapterProvider, Depth, Document, Entity, FieldSet, FieldValue,
		Identifier, ModelAdapter, SerializerAdapter, SideloadError, SideloadResult,
		SideloadSerializer, SideloadSettings, impl_entity,
	};

	// External
	pub use serde::{Deserialize, Serialize};
}
