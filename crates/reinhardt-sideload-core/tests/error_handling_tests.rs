//! Error handling tests
//!
//! Invalid input and configuration failures surfaced by the entry points.

use reinhardt_sideload_core::{
	AdapterContainer, Entity, ErrorKind, FieldSet, Identifier, ModelAdapter, SerializerAdapter,
	SideloadError, SideloadResult, SideloadSerializer, SideloadSettings, impl_entity,
};
use reinhardt_sideload_test::fixtures::*;
use reinhardt_sideload_test::{BOOK_ADAPTER, BookAdapter, Tag, init_test_logging, library_adapters};
use rstest::*;
use serde_json::json;
use std::sync::Arc;

/// A shelf holding whatever it is given.
struct Shelf {
	id: i64,
	items: Vec<Arc<dyn Entity>>,
}

impl_entity!(Shelf, "shelf");

struct ShelfAdapter;

impl ModelAdapter for ShelfAdapter {
	type Model = Shelf;

	fn model_name_singular(&self) -> &str {
		"shelf"
	}

	fn model_name_plural(&self) -> &str {
		"shelves"
	}

	fn id(&self, shelf: &Shelf) -> Identifier {
		Identifier::from(shelf.id)
	}

	fn fields(&self, shelf: &Shelf) -> FieldSet {
		FieldSet::new()
			.scalar("id", shelf.id)
			.has_many("items", shelf.items.iter().cloned(), true)
	}
}

/// Entity whose adapter cannot produce fields.
struct Broken;

impl_entity!(Broken, "broken");

struct BrokenAdapter;

impl SerializerAdapter for BrokenAdapter {
	fn model_name_singular(&self) -> &str {
		"broken"
	}

	fn model_name_plural(&self) -> &str {
		"brokens"
	}

	fn supports(&self, entity: &dyn Entity) -> bool {
		entity.as_any().is::<Broken>()
	}

	fn id(&self, _entity: &dyn Entity) -> SideloadResult<Identifier> {
		Ok(Identifier::from(1i64))
	}

	fn has_access(&self, _entity: &dyn Entity) -> bool {
		true
	}

	fn fields(&self, _entity: &dyn Entity) -> SideloadResult<FieldSet> {
		Err(SideloadError::contract(
			"broken",
			"field value does not decompose into a value and a recurse flag",
		))
	}
}

/// Entity whose singular and plural section keys coincide.
struct Sheep {
	id: i64,
	name: &'static str,
	friend: Option<Arc<Sheep>>,
}

impl Sheep {
	fn new(id: i64, name: &'static str) -> Self {
		Self {
			id,
			name,
			friend: None,
		}
	}

	fn with_friend(mut self, friend: Sheep) -> Self {
		self.friend = Some(Arc::new(friend));
		self
	}
}

impl_entity!(Sheep, "sheep");

struct SheepAdapter;

impl ModelAdapter for SheepAdapter {
	type Model = Sheep;

	fn model_name_singular(&self) -> &str {
		"sheep"
	}

	fn model_name_plural(&self) -> &str {
		"sheep"
	}

	fn id(&self, sheep: &Sheep) -> Identifier {
		Identifier::from(sheep.id)
	}

	fn fields(&self, sheep: &Sheep) -> FieldSet {
		FieldSet::new()
			.scalar("id", sheep.id)
			.belongs_to(
				"friend",
				sheep.friend.clone().map(|friend| friend as Arc<dyn Entity>),
				true,
			)
			.scalar("name", sheep.name)
	}
}

fn shelf_adapters() -> AdapterContainer {
	library_adapters()
		.with("shelf", ShelfAdapter)
		.with("broken", BrokenAdapter)
		.with("sheep", SheepAdapter)
}

#[fixture]
fn shelf_serializer() -> SideloadSerializer {
	init_test_logging();
	SideloadSerializer::new(shelf_adapters())
}

/// Test: mixed entity types passed to format are rejected
#[rstest]
fn test_heterogeneous_collection(library: Library, mut serializer: SideloadSerializer) {
	let ada = library.author(1).unwrap();
	let notes = library.book(7).unwrap();

	let err = serializer
		.format(&[&**ada as &dyn Entity, &**notes], None, None)
		.unwrap_err();

	assert!(matches!(err, SideloadError::HeterogeneousCollection { .. }));
	assert_eq!(err.kind(), ErrorKind::InvalidInput);
	assert!(serializer.document().is_empty());
}

/// Test: a to-many relationship mixing entity types is rejected
#[rstest]
fn test_mixed_relationship(library: Library, mut shelf_serializer: SideloadSerializer) {
	let shelf = Shelf {
		id: 1,
		items: vec![
			Arc::clone(library.book(7).unwrap()) as Arc<dyn Entity>,
			Tag::new("loose", "Loose") as Arc<dyn Entity>,
		],
	};

	let err = shelf_serializer.format_one(&shelf, None).unwrap_err();

	match &err {
		SideloadError::MixedRelation { field, .. } => assert_eq!(field, "items"),
		other => panic!("unexpected error: {}", other),
	}
	assert!(err.is_invalid_input());
}

/// Test: a homogeneous to-many relationship of any type is fine
#[rstest]
fn test_homogeneous_relationship(mut shelf_serializer: SideloadSerializer) {
	let shelf = Shelf {
		id: 1,
		items: vec![
			Tag::new("a", "A") as Arc<dyn Entity>,
			Tag::new("b", "B") as Arc<dyn Entity>,
		],
	};

	let document = shelf_serializer.format_one(&shelf, None).unwrap();

	assert_eq!(
		document.to_value(),
		json!({
			"shelf": {"id": 1, "items": ["a", "b"]},
			"tags": [{"id": "a", "label": "A"}, {"id": "b", "label": "B"}],
		})
	);
}

/// Test: an adapter breaking its contract aborts the call
#[rstest]
fn test_contract_violation_propagates(mut shelf_serializer: SideloadSerializer) {
	let err = shelf_serializer.format(&[&Broken], None, None).unwrap_err();

	assert!(matches!(err, SideloadError::ContractViolation { .. }));
	assert!(err.is_invalid_input());
	assert!(err.to_string().contains("broken"));
}

/// Test: partial output survives a failed call
#[rstest]
fn test_failed_call_keeps_partial_document(mut shelf_serializer: SideloadSerializer) {
	shelf_serializer.format(&[&Broken], None, None).unwrap_err();

	let document = shelf_serializer.document();
	assert_eq!(document.get_plural("brokens").map(<[_]>::len), Some(1));
}

/// Test: an entity naming an unknown adapter is a configuration error
#[rstest]
fn test_adapter_not_found(mut serializer: SideloadSerializer) {
	let err = serializer.format(&[&Broken], None, None).unwrap_err();

	match &err {
		SideloadError::AdapterNotFound { name } => assert_eq!(name, "broken"),
		other => panic!("unexpected error: {}", other),
	}
	assert!(err.is_configuration());
}

/// Test: a provider returning an adapter for another type is a configuration error
#[rstest]
fn test_adapter_mismatch() {
	init_test_logging();
	let mut serializer = SideloadSerializer::new(|name: &str| -> Option<Arc<dyn SerializerAdapter>> {
		(name == "shelf").then(|| Arc::new(BookAdapter) as Arc<dyn SerializerAdapter>)
	});
	let shelf = Shelf {
		id: 1,
		items: Vec::new(),
	};

	let err = serializer.format_one(&shelf, None).unwrap_err();

	assert!(matches!(err, SideloadError::AdapterMismatch { .. }));
	assert_eq!(err.kind(), ErrorKind::Configuration);
}

/// Test: writing a list into a singular section fails in strict mode
#[rstest]
fn test_section_conflict_in_strict_mode(mut shelf_serializer: SideloadSerializer) {
	shelf_serializer
		.format_one(&Sheep::new(1, "Dolly"), None)
		.unwrap();

	let err = shelf_serializer
		.format(&[&Sheep::new(2, "Polly")], None, None)
		.unwrap_err();

	assert!(matches!(err, SideloadError::SectionConflict { .. }));
}

/// Test: a related entity sharing the primary's section key fails in strict mode
#[rstest]
fn test_section_conflict_through_relation_in_strict_mode(
	mut shelf_serializer: SideloadSerializer,
) {
	let dolly = Sheep::new(1, "Dolly").with_friend(Sheep::new(2, "Polly"));

	let err = shelf_serializer.format_one(&dolly, None).unwrap_err();

	assert!(matches!(err, SideloadError::SectionConflict { ref section } if section == "sheep"));
}

#[fixture]
fn lenient_serializer() -> SideloadSerializer {
	init_test_logging();
	SideloadSerializer::with_settings(
		shelf_adapters(),
		SideloadSettings::new().with_strict_sections(false),
	)
	.unwrap()
}

/// Test: lenient mode turns the singular section into a list headed by the primary
#[rstest]
fn test_section_conflict_in_lenient_mode(mut lenient_serializer: SideloadSerializer) {
	lenient_serializer
		.format_one(&Sheep::new(1, "Dolly"), None)
		.unwrap();
	let document = lenient_serializer
		.format(&[&Sheep::new(2, "Polly")], None, None)
		.unwrap();

	assert_eq!(
		document.to_value(),
		json!({"sheep": [
			{"id": 1, "friend": null, "name": "Dolly"},
			{"id": 2, "friend": null, "name": "Polly"}
		]})
	);
}

/// Test: primary fields written after a same-section relation land on the primary
#[rstest]
fn test_lenient_primary_keeps_fields_after_same_section_relation(
	mut lenient_serializer: SideloadSerializer,
) {
	let dolly = Sheep::new(1, "Dolly").with_friend(Sheep::new(2, "Polly"));

	let document = lenient_serializer.format_one(&dolly, None).unwrap();

	assert_eq!(
		document.to_value(),
		json!({"sheep": [
			{"id": 1, "friend": 2, "name": "Dolly"},
			{"id": 2, "friend": null, "name": "Polly"}
		]})
	);
}

/// Test: a demoted primary is not recorded again by later calls
#[rstest]
fn test_lenient_demoted_primary_is_deduplicated(mut lenient_serializer: SideloadSerializer) {
	let dolly = Sheep::new(1, "Dolly").with_friend(Sheep::new(2, "Polly"));
	lenient_serializer.format_one(&dolly, None).unwrap();

	let document = lenient_serializer
		.format(&[&Sheep::new(1, "Dolly")], None, None)
		.unwrap();

	assert_eq!(document.get_plural("sheep").unwrap().len(), 2);
}

/// Test: malformed or invalid settings are rejected on load
#[rstest]
#[case("proxy_prefixes = [\"\"]")]
#[case("max_depth = -1")]
#[case("strict_sections = \"yes\"")]
fn test_invalid_settings(#[case] source: &str) {
	let err = SideloadSettings::from_toml_str(source).unwrap_err();
	assert!(err.is_configuration());
}

/// Test: the library adapter wiring resolves books by name
#[rstest]
fn test_book_adapter_registered() {
	assert!(library_adapters().contains(BOOK_ADAPTER));
}
