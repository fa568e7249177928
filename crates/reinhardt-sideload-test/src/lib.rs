//! # Reinhardt Sideload Test
//!
//! Testing utilities for `reinhardt-sideload`.
//!
//! ## Features
//!
//! - **Library domain**: authors, books, publishers and tags with adapters
//! - **Graphs**: a cyclic sample library and generated shapes for property tests
//! - **Lazy proxies**: [`Lazy`] entities reporting a prefixed type identity
//! - **Fixtures**: rstest fixtures for graphs and serializers
//! - **Logging**: [`init_test_logging`] routes engine events to `env_logger`
//!
//! ## Quick Start
//!
//! ```
//! use reinhardt_sideload_test::{library_adapters, Library};
//! use reinhardt_sideload_core::SideloadSerializer;
//!
//! let library = Library::sample();
//! let mut serializer = SideloadSerializer::new(library_adapters());
//! let ada = library.author(1).unwrap();
//!
//! let document = serializer.format_one(&**ada, None).unwrap();
//! assert!(document.get_singular("author").is_some());
//! assert_eq!(document.get_plural("books").unwrap().len(), 2);
//! ```

pub mod adapters;
pub mod fixtures;
pub mod graphs;
pub mod logging;
pub mod models;

pub use adapters::{
	AuthorAdapter, BookAdapter, PublisherAdapter, TagAdapter, library_adapters,
	library_adapters_with,
};
pub use graphs::{Library, timestamp};
pub use logging::init_test_logging;
pub use models::{
	AUTHOR_ADAPTER, Author, BOOK_ADAPTER, Book, LAZY_PREFIX, Lazy, PUBLISHER_ADAPTER, Publisher,
	TAG_ADAPTER, Tag,
};
