//! # Reinhardt Sideload Core
//!
//! Side-loading serializer for entity graphs.
//!
//! Entities are flattened into a [`Document`] keyed by model name. The primary
//! entity lands in a singular section, and every related entity reached through
//! a relationship gets exactly one record in its model's plural section.
//! Relationship fields carry identifiers instead of nested objects.
//!
//! ## Features
//!
//! - **Adapters**: per-type [`ModelAdapter`] implementations describe
//!   identity, model names, visibility and fields
//! - **Deduplication**: cycles and shared references are recorded once
//! - **Depth limits**: relationship expansion stops after a given number of hops
//! - **Access pruning**: hidden entities never appear, not even as identifiers
//!
//! ## Example
//!
//! ```
//! use reinhardt_sideload_core::{
//!     impl_entity, AdapterContainer, Entity, FieldSet, Identifier, ModelAdapter,
//!     SideloadSerializer,
//! };
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! struct Book {
//!     id: i64,
//!     title: String,
//! }
//!
//! struct Author {
//!     id: i64,
//!     name: String,
//!     book: Arc<Book>,
//! }
//!
//! impl_entity!(Book, "book");
//! impl_entity!(Author, "author");
//!
//! struct BookAdapter;
//!
//! impl ModelAdapter for BookAdapter {
//!     type Model = Book;
//!     fn model_name_singular(&self) -> &str { "book" }
//!     fn model_name_plural(&self) -> &str { "books" }
//!     fn id(&self, book: &Book) -> Identifier { Identifier::from(book.id) }
//!     fn fields(&self, book: &Book) -> FieldSet {
//!         FieldSet::new().scalar("id", book.id).scalar("title", book.title.as_str())
//!     }
//! }
//!
//! struct AuthorAdapter;
//!
//! impl ModelAdapter for AuthorAdapter {
//!     type Model = Author;
//!     fn model_name_singular(&self) -> &str { "author" }
//!     fn model_name_plural(&self) -> &str { "authors" }
//!     fn id(&self, author: &Author) -> Identifier { Identifier::from(author.id) }
//!     fn fields(&self, author: &Author) -> FieldSet {
//!         let book: Arc<dyn Entity> = author.book.clone();
//!         FieldSet::new()
//!             .scalar("id", author.id)
//!             .scalar("name", author.name.as_str())
//!             .belongs_to("book", Some(book), true)
//!     }
//! }
//!
//! let adapters = AdapterContainer::new()
//!     .with("author", AuthorAdapter)
//!     .with("book", BookAdapter);
//! let mut serializer = SideloadSerializer::new(adapters);
//!
//! let author = Author {
//!     id: 1,
//!     name: "Ada".to_string(),
//!     book: Arc::new(Book { id: 7, title: "X".to_string() }),
//! };
//!
//! let document = serializer.format_one(&author, None).unwrap();
//! assert_eq!(
//!     document.to_value(),
//!     json!({
//!         "author": {"id": 1, "name": "Ada", "book": 7},
//!         "books": [{"id": 7, "title": "X"}]
//!     })
//! );
//! ```

pub mod adapter;
pub mod depth;
pub mod document;
pub mod entity;
pub mod error;
pub mod field;
pub mod identifier;
pub mod registry;
pub mod serializer;
pub mod settings;
pub mod walker;

pub use adapter::{ModelAdapter, SerializerAdapter};
pub use depth::Depth;
pub use document::{Document, Record, RecordSlot, Section};
pub use entity::Entity;
pub use error::{ErrorKind, SideloadError, SideloadResult};
pub use field::{Field, FieldSet, FieldValue};
pub use identifier::Identifier;
pub use registry::{AdapterContainer, AdapterProvider, AdapterRegistry};
pub use serializer::{Formattable, SideloadSerializer};
pub use settings::SideloadSettings;
pub use walker::GraphWalker;
