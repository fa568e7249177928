//! Prebuilt entity graphs.

use crate::models::{Author, Book, Publisher, Tag};
use chrono::{DateTime, FixedOffset};
use std::sync::Arc;

/// Parses an RFC 3339 timestamp for fixtures.
///
/// # Panics
///
/// Panics if `value` is not valid RFC 3339.
pub fn timestamp(value: &str) -> DateTime<FixedOffset> {
	DateTime::parse_from_rfc3339(value).expect("fixture timestamp must be valid RFC 3339")
}

/// A fully wired library graph.
///
/// Every author lists its books and every book links back to its author, so
/// the graph is cyclic. The graph keeps strong references to all entities;
/// book-to-author links are weak.
pub struct Library {
	pub authors: Vec<Arc<Author>>,
	pub books: Vec<Arc<Book>>,
	pub publishers: Vec<Arc<Publisher>>,
	pub tags: Vec<Arc<Tag>>,
}

impl Library {
	/// The sample library.
	///
	/// | author      | books                                   |
	/// |-------------|-----------------------------------------|
	/// | 1 Ada       | 7 Notes (math, computing), 8 Sketch     |
	/// | 2 Charles   | 9 Engine (computing), 10 Drafts, hidden |
	///
	/// Books 7 and 9 are published by publisher 1. Book 8 has keywords.
	pub fn sample() -> Self {
		let press = Publisher::new(1, "Analytical Press");
		let math = Tag::new("math", "Mathematics");
		let computing = Tag::new("computing", "Computing");

		let ada = Author::new(1, "Ada");
		let charles = Author::new(2, "Charles");

		let notes = Book::new(7, "Notes", timestamp("1843-09-01T00:00:00+00:00")).into_arc();
		notes.set_publisher(Arc::clone(&press));
		notes.add_tag(Arc::clone(&math));
		notes.add_tag(Arc::clone(&computing));

		let sketch = Book::new(8, "Sketch", timestamp("1842-10-15T09:30:00+01:00"))
			.with_keywords(["engine", "translation"])
			.into_arc();

		let engine = Book::new(9, "Engine", timestamp("1837-01-01T12:00:00+00:00")).into_arc();
		engine.set_publisher(Arc::clone(&press));
		engine.add_tag(Arc::clone(&computing));

		let drafts = Book::new(10, "Drafts", timestamp("1840-01-01T00:00:00+00:00"))
			.with_hidden(true)
			.into_arc();

		ada.add_book(Arc::clone(&notes));
		ada.add_book(Arc::clone(&sketch));
		charles.add_book(Arc::clone(&engine));
		charles.add_book(Arc::clone(&drafts));

		Self {
			authors: vec![ada, charles],
			books: vec![notes, sketch, engine, drafts],
			publishers: vec![press],
			tags: vec![math, computing],
		}
	}

	/// A library shaped by `books_per_author`.
	///
	/// Author `i` (ids from 1) gets `books_per_author[i]` books. Book ids are
	/// assigned from 1 in creation order. All books share publisher 1 and are
	/// tagged `even` or `odd` by id.
	pub fn with_shape(books_per_author: &[usize]) -> Self {
		let press = Publisher::new(1, "Shared Press");
		let even = Tag::new("even", "Even");
		let odd = Tag::new("odd", "Odd");

		let mut authors = Vec::with_capacity(books_per_author.len());
		let mut books = Vec::new();
		let mut next_id = 1i64;

		for (index, count) in books_per_author.iter().enumerate() {
			let author = Author::new(index as i64 + 1, format!("Author {}", index + 1));
			for _ in 0..*count {
				let book = Book::new(
					next_id,
					format!("Book {}", next_id),
					timestamp("2024-05-01T12:30:00+02:00"),
				)
				.into_arc();
				book.set_publisher(Arc::clone(&press));
				book.add_tag(Arc::clone(if next_id % 2 == 0 { &even } else { &odd }));
				author.add_book(Arc::clone(&book));
				books.push(book);
				next_id += 1;
			}
			authors.push(author);
		}

		Self {
			authors,
			books,
			publishers: vec![press],
			tags: vec![even, odd],
		}
	}

	/// Looks up an author by id.
	pub fn author(&self, id: i64) -> Option<&Arc<Author>> {
		self.authors.iter().find(|author| author.id == id)
	}

	/// Looks up a book by id.
	pub fn book(&self, id: i64) -> Option<&Arc<Book>> {
		self.books.iter().find(|book| book.id == id)
	}
}
