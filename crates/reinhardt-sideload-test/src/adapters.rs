//! Adapters for the library domain and the container wiring them up.

use crate::models::{
	AUTHOR_ADAPTER, Author, BOOK_ADAPTER, Book, PUBLISHER_ADAPTER, Publisher, TAG_ADAPTER, Tag,
};
use reinhardt_sideload_core::{AdapterContainer, Entity, FieldSet, Identifier, ModelAdapter};
use std::sync::Arc;

/// Adapter for [`Author`].
///
/// `expand_books` is the recurse flag of the `books` relationship.
#[derive(Debug, Clone, Copy)]
pub struct AuthorAdapter {
	pub expand_books: bool,
}

impl Default for AuthorAdapter {
	fn default() -> Self {
		Self { expand_books: true }
	}
}

impl ModelAdapter for AuthorAdapter {
	type Model = Author;

	fn model_name_singular(&self) -> &str {
		"author"
	}

	fn model_name_plural(&self) -> &str {
		"authors"
	}

	fn id(&self, author: &Author) -> Identifier {
		Identifier::from(author.id)
	}

	fn has_access(&self, author: &Author) -> bool {
		!author.hidden
	}

	fn fields(&self, author: &Author) -> FieldSet {
		let books = author
			.books()
			.into_iter()
			.map(|book| book as Arc<dyn Entity>);
		FieldSet::new()
			.scalar("id", author.id)
			.scalar("name", author.name.as_str())
			.has_many("books", books, self.expand_books)
	}
}

/// Adapter for [`Book`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BookAdapter;

impl ModelAdapter for BookAdapter {
	type Model = Book;

	fn model_name_singular(&self) -> &str {
		"book"
	}

	fn model_name_plural(&self) -> &str {
		"books"
	}

	fn id(&self, book: &Book) -> Identifier {
		Identifier::from(book.id)
	}

	fn has_access(&self, book: &Book) -> bool {
		!book.hidden
	}

	fn fields(&self, book: &Book) -> FieldSet {
		let tags = book.tags().into_iter().map(|tag| tag as Arc<dyn Entity>);
		FieldSet::new()
			.scalar("id", book.id)
			.scalar("title", book.title.as_str())
			.datetime("published_at", &book.published_at)
			.belongs_to(
				"author",
				book.author().map(|author| author as Arc<dyn Entity>),
				true,
			)
			.belongs_to(
				"publisher",
				book.publisher().map(|publisher| publisher as Arc<dyn Entity>),
				true,
			)
			.has_many("tags", tags, false)
			.collection("keywords", book.keywords.iter().map(String::as_str))
	}
}

/// Adapter for [`Publisher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PublisherAdapter;

impl ModelAdapter for PublisherAdapter {
	type Model = Publisher;

	fn model_name_singular(&self) -> &str {
		"publisher"
	}

	fn model_name_plural(&self) -> &str {
		"publishers"
	}

	fn id(&self, publisher: &Publisher) -> Identifier {
		Identifier::from(publisher.id)
	}

	fn has_access(&self, publisher: &Publisher) -> bool {
		!publisher.hidden
	}

	fn fields(&self, publisher: &Publisher) -> FieldSet {
		FieldSet::new()
			.scalar("id", publisher.id)
			.scalar("name", publisher.name.as_str())
	}
}

/// Adapter for [`Tag`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TagAdapter;

impl ModelAdapter for TagAdapter {
	type Model = Tag;

	fn model_name_singular(&self) -> &str {
		"tag"
	}

	fn model_name_plural(&self) -> &str {
		"tags"
	}

	fn id(&self, tag: &Tag) -> Identifier {
		Identifier::from(tag.slug.as_str())
	}

	fn fields(&self, tag: &Tag) -> FieldSet {
		FieldSet::new()
			.scalar("id", tag.slug.as_str())
			.scalar("label", tag.label.as_str())
	}
}

/// Container with every library adapter registered under its entity's adapter name.
pub fn library_adapters() -> AdapterContainer {
	library_adapters_with(AuthorAdapter::default())
}

/// Like [`library_adapters`] with a custom author adapter.
pub fn library_adapters_with(author: AuthorAdapter) -> AdapterContainer {
	AdapterContainer::new()
		.with(AUTHOR_ADAPTER, author)
		.with(BOOK_ADAPTER, BookAdapter)
		.with(PUBLISHER_ADAPTER, PublisherAdapter)
		.with(TAG_ADAPTER, TagAdapter)
}
