//! A small library domain used across the test suites.
//!
//! Links between entities are held behind `RwLock` so graphs can be wired up
//! after construction, cycles included. Books point back at their author
//! through a `Weak` reference.

use chrono::{DateTime, FixedOffset};
use parking_lot::RwLock;
use reinhardt_sideload_core::Entity;
use std::any::Any;
use std::sync::{Arc, Weak};

/// Adapter name of [`Author`].
pub const AUTHOR_ADAPTER: &str = "library.author";
/// Adapter name of [`Book`].
pub const BOOK_ADAPTER: &str = "library.book";
/// Adapter name of [`Publisher`].
pub const PUBLISHER_ADAPTER: &str = "library.publisher";
/// Adapter name of [`Tag`].
pub const TAG_ADAPTER: &str = "library.tag";

/// Prefix reported by [`Lazy`] proxies in front of their target's type identity.
pub const LAZY_PREFIX: &str = "__lazy__::";

pub struct Author {
	pub id: i64,
	pub name: String,
	pub hidden: bool,
	books: RwLock<Vec<Arc<Book>>>,
}

impl Author {
	pub fn new(id: i64, name: impl Into<String>) -> Arc<Self> {
		Arc::new(Self {
			id,
			name: name.into(),
			hidden: false,
			books: RwLock::new(Vec::new()),
		})
	}

	/// An author the adapter refuses to expose.
	pub fn hidden(id: i64, name: impl Into<String>) -> Arc<Self> {
		Arc::new(Self {
			id,
			name: name.into(),
			hidden: true,
			books: RwLock::new(Vec::new()),
		})
	}

	pub fn books(&self) -> Vec<Arc<Book>> {
		self.books.read().clone()
	}

	/// Adds a book to the author and points the book back at the author.
	pub fn add_book(self: &Arc<Self>, book: Arc<Book>) {
		book.set_author(self);
		self.books.write().push(book);
	}
}

pub struct Book {
	pub id: i64,
	pub title: String,
	pub published_at: DateTime<FixedOffset>,
	pub keywords: Vec<String>,
	pub hidden: bool,
	author: RwLock<Weak<Author>>,
	publisher: RwLock<Option<Arc<Publisher>>>,
	tags: RwLock<Vec<Arc<Tag>>>,
}

impl Book {
	pub fn new(id: i64, title: impl Into<String>, published_at: DateTime<FixedOffset>) -> Self {
		Self {
			id,
			title: title.into(),
			published_at,
			keywords: Vec::new(),
			hidden: false,
			author: RwLock::new(Weak::new()),
			publisher: RwLock::new(None),
			tags: RwLock::new(Vec::new()),
		}
	}

	pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.keywords = keywords.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_hidden(mut self, hidden: bool) -> Self {
		self.hidden = hidden;
		self
	}

	pub fn into_arc(self) -> Arc<Self> {
		Arc::new(self)
	}

	pub fn author(&self) -> Option<Arc<Author>> {
		self.author.read().upgrade()
	}

	pub fn set_author(&self, author: &Arc<Author>) {
		*self.author.write() = Arc::downgrade(author);
	}

	pub fn publisher(&self) -> Option<Arc<Publisher>> {
		self.publisher.read().clone()
	}

	pub fn set_publisher(&self, publisher: Arc<Publisher>) {
		*self.publisher.write() = Some(publisher);
	}

	pub fn tags(&self) -> Vec<Arc<Tag>> {
		self.tags.read().clone()
	}

	pub fn add_tag(&self, tag: Arc<Tag>) {
		self.tags.write().push(tag);
	}
}

pub struct Publisher {
	pub id: i64,
	pub name: String,
	pub hidden: bool,
}

impl Publisher {
	pub fn new(id: i64, name: impl Into<String>) -> Arc<Self> {
		Arc::new(Self {
			id,
			name: name.into(),
			hidden: false,
		})
	}

	pub fn hidden(id: i64, name: impl Into<String>) -> Arc<Self> {
		Arc::new(Self {
			id,
			name: name.into(),
			hidden: true,
		})
	}
}

/// Tags are identified by their slug.
pub struct Tag {
	pub slug: String,
	pub label: String,
}

impl Tag {
	pub fn new(slug: impl Into<String>, label: impl Into<String>) -> Arc<Self> {
		Arc::new(Self {
			slug: slug.into(),
			label: label.into(),
		})
	}
}

reinhardt_sideload_core::impl_entity!(Author, AUTHOR_ADAPTER);
reinhardt_sideload_core::impl_entity!(Book, BOOK_ADAPTER);
reinhardt_sideload_core::impl_entity!(Publisher, PUBLISHER_ADAPTER);
reinhardt_sideload_core::impl_entity!(Tag, TAG_ADAPTER);

/// Stand-in for a lazily loaded reference.
///
/// The proxy has its own type identity (the target's, behind [`LAZY_PREFIX`])
/// but adapters read the loaded target through [`Entity::as_any`].
pub struct Lazy<T: Entity> {
	target: Arc<T>,
	identity: String,
}

impl<T: Entity> Lazy<T> {
	pub fn new(target: Arc<T>) -> Arc<Self> {
		let identity = format!("{}{}", LAZY_PREFIX, target.type_identity());
		Arc::new(Self { target, identity })
	}

	pub fn target(&self) -> &Arc<T> {
		&self.target
	}
}

impl<T: Entity> Entity for Lazy<T> {
	fn adapter_name(&self) -> &str {
		self.target.adapter_name()
	}

	fn type_identity(&self) -> &str {
		&self.identity
	}

	fn as_any(&self) -> &dyn Any {
		self.target.as_any()
	}
}
