//! Adapter lookup and caching.
//!
//! The [`AdapterRegistry`] resolves the adapter responsible for an entity. It
//! caches adapters per entity type identity for the lifetime of a
//! serialization session and falls back to an injected [`AdapterProvider`],
//! keyed by the adapter name the entity declares, on a cache miss.

use crate::adapter::SerializerAdapter;
use crate::entity::Entity;
use crate::error::{SideloadError, SideloadResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Supplies adapter instances by name.
///
/// Implemented for closures and for [`AdapterContainer`].
pub trait AdapterProvider: Send + Sync {
	/// Returns the adapter registered under `name`, if any.
	fn provide(&self, name: &str) -> Option<Arc<dyn SerializerAdapter>>;
}

impl<F> AdapterProvider for F
where
	F: Fn(&str) -> Option<Arc<dyn SerializerAdapter>> + Send + Sync,
{
	fn provide(&self, name: &str) -> Option<Arc<dyn SerializerAdapter>> {
		self(name)
	}
}

/// Name-keyed adapter container.
///
/// Cloning is cheap and clones share the same registrations.
///
/// # Examples
///
/// ```
/// use reinhardt_sideload_core::{AdapterContainer, AdapterProvider};
/// # use reinhardt_sideload_core::{impl_entity, FieldSet, Identifier, ModelAdapter};
/// # struct Tag;
/// # impl_entity!(Tag, "tag_adapter");
/// # struct TagAdapter;
/// # impl ModelAdapter for TagAdapter {
/// #     type Model = Tag;
/// #     fn model_name_singular(&self) -> &str { "tag" }
/// #     fn model_name_plural(&self) -> &str { "tags" }
/// #     fn id(&self, _: &Tag) -> Identifier { Identifier::from(1i64) }
/// #     fn fields(&self, _: &Tag) -> FieldSet { FieldSet::new() }
/// # }
///
/// let container = AdapterContainer::new();
/// container.register("tag_adapter", TagAdapter);
///
/// assert!(container.contains("tag_adapter"));
/// assert!(container.provide("tag_adapter").is_some());
/// assert!(container.provide("author_adapter").is_none());
/// ```
#[derive(Clone, Default)]
pub struct AdapterContainer {
	adapters: Arc<RwLock<HashMap<String, Arc<dyn SerializerAdapter>>>>,
}

impl AdapterContainer {
	/// Creates an empty container.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers an adapter under `name`, replacing any previous registration.
	pub fn register<A>(&self, name: impl Into<String>, adapter: A)
	where
		A: SerializerAdapter + 'static,
	{
		self.register_arc(name, Arc::new(adapter));
	}

	/// Registers an already shared adapter under `name`.
	pub fn register_arc(&self, name: impl Into<String>, adapter: Arc<dyn SerializerAdapter>) {
		self.adapters.write().insert(name.into(), adapter);
	}

	/// Builder-style registration.
	pub fn with<A>(self, name: impl Into<String>, adapter: A) -> Self
	where
		A: SerializerAdapter + 'static,
	{
		self.register(name, adapter);
		self
	}

	/// Checks if an adapter is registered under `name`.
	pub fn contains(&self, name: &str) -> bool {
		self.adapters.read().contains_key(name)
	}

	/// Number of registered adapters.
	pub fn len(&self) -> usize {
		self.adapters.read().len()
	}

	/// Returns `true` when nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.adapters.read().is_empty()
	}
}

impl AdapterProvider for AdapterContainer {
	fn provide(&self, name: &str) -> Option<Arc<dyn SerializerAdapter>> {
		self.adapters.read().get(name).cloned()
	}
}

impl std::fmt::Debug for AdapterContainer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let adapters = self.adapters.read();
		let mut names: Vec<&String> = adapters.keys().collect();
		names.sort();
		f.debug_struct("AdapterContainer")
			.field("adapters", &names)
			.finish()
	}
}

/// Session-scoped adapter cache in front of an [`AdapterProvider`].
pub struct AdapterRegistry {
	provider: Arc<dyn AdapterProvider>,
	cache: HashMap<String, Arc<dyn SerializerAdapter>>,
	proxy_prefixes: Vec<String>,
}

impl AdapterRegistry {
	/// Creates a registry with an empty cache.
	pub fn new(provider: impl AdapterProvider + 'static) -> Self {
		Self::from_arc(Arc::new(provider))
	}

	/// Creates a registry from a shared provider.
	pub fn from_arc(provider: Arc<dyn AdapterProvider>) -> Self {
		Self {
			provider,
			cache: HashMap::new(),
			proxy_prefixes: Vec::new(),
		}
	}

	/// Sets the prefixes stripped from type identities of lazy proxy types.
	pub fn with_proxy_prefixes(mut self, prefixes: Vec<String>) -> Self {
		self.proxy_prefixes = prefixes;
		self
	}

	/// Canonical type identity of an entity, with any proxy prefix removed.
	pub fn type_identity<'e>(&self, entity: &'e dyn Entity) -> &'e str {
		let identity = entity.type_identity();
		self.proxy_prefixes
			.iter()
			.find_map(|prefix| identity.strip_prefix(prefix.as_str()))
			.unwrap_or(identity)
	}

	/// Returns the adapter for an entity without applying the access check.
	///
	/// Fails with a configuration error when the provider has no adapter under
	/// the entity's declared name, or supplies one that cannot read the entity.
	pub fn adapter_for(&mut self, entity: &dyn Entity) -> SideloadResult<Arc<dyn SerializerAdapter>> {
		let identity = self.type_identity(entity);

		let adapter = match self.cache.get(identity) {
			Some(adapter) => Arc::clone(adapter),
			None => {
				let name = entity.adapter_name();
				tracing::debug!(
					"resolving serializer adapter '{}' for {}",
					name,
					identity
				);
				let adapter =
					self.provider
						.provide(name)
						.ok_or_else(|| SideloadError::AdapterNotFound {
							name: name.to_string(),
						})?;
				if adapter.model_name_singular() == adapter.model_name_plural() {
					tracing::warn!(
						"adapter '{}' uses '{}' as both singular and plural section key",
						name,
						adapter.model_name_plural()
					);
				}
				self.cache.insert(identity.to_string(), Arc::clone(&adapter));
				adapter
			}
		};

		if !adapter.supports(entity) {
			return Err(SideloadError::AdapterMismatch {
				adapter: entity.adapter_name().to_string(),
				type_identity: identity.to_string(),
			});
		}

		Ok(adapter)
	}

	/// Resolves the adapter for an entity the caller is allowed to see.
	///
	/// Returns `Ok(None)` when the adapter's access check rejects the entity.
	pub fn resolve(
		&mut self,
		entity: &dyn Entity,
	) -> SideloadResult<Option<Arc<dyn SerializerAdapter>>> {
		let adapter = self.adapter_for(entity)?;
		if adapter.has_access(entity) {
			Ok(Some(adapter))
		} else {
			tracing::debug!(
				"access denied to {} entity, pruning it",
				self.type_identity(entity)
			);
			Ok(None)
		}
	}

	/// Checks if an adapter is cached for a type identity.
	pub fn is_cached(&self, type_identity: &str) -> bool {
		self.cache.contains_key(type_identity)
	}

	/// Number of cached adapters.
	pub fn cached_len(&self) -> usize {
		self.cache.len()
	}

	/// Drops all cached adapters.
	pub fn clear_cache(&mut self) {
		self.cache.clear();
	}
}

impl std::fmt::Debug for AdapterRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AdapterRegistry")
			.field("cached", &self.cache.keys().collect::<Vec<_>>())
			.field("proxy_prefixes", &self.proxy_prefixes)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::adapter::ModelAdapter;
	use crate::field::FieldSet;
	use crate::identifier::Identifier;
	use crate::impl_entity;
	use rstest::{fixture, rstest};
	use std::any::Any;
	use std::sync::atomic::{AtomicUsize, Ordering};

	struct Ship {
		id: i64,
		crewed: bool,
	}

	impl_entity!(Ship, "ship_adapter");

	struct Dock;

	impl_entity!(Dock, "ship_adapter");

	/// Stand-in for a generated lazy-loading proxy class.
	struct ShipProxy {
		target: Ship,
		generated_name: String,
	}

	impl Entity for ShipProxy {
		fn adapter_name(&self) -> &str {
			"ship_adapter"
		}

		fn type_identity(&self) -> &str {
			&self.generated_name
		}

		fn as_any(&self) -> &dyn Any {
			&self.target
		}
	}

	struct ShipAdapter;

	impl ModelAdapter for ShipAdapter {
		type Model = Ship;

		fn model_name_singular(&self) -> &str {
			"ship"
		}

		fn model_name_plural(&self) -> &str {
			"ships"
		}

		fn id(&self, ship: &Ship) -> Identifier {
			Identifier::from(ship.id)
		}

		fn has_access(&self, ship: &Ship) -> bool {
			ship.crewed
		}

		fn fields(&self, ship: &Ship) -> FieldSet {
			FieldSet::new().scalar("id", ship.id)
		}
	}

	#[fixture]
	fn container() -> AdapterContainer {
		AdapterContainer::new().with("ship_adapter", ShipAdapter)
	}

	#[rstest]
	fn test_resolve_caches_per_type_identity(container: AdapterContainer) {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		let mut registry = AdapterRegistry::new(move |name: &str| {
			counter.fetch_add(1, Ordering::SeqCst);
			container.provide(name)
		});

		let first = Ship { id: 1, crewed: true };
		let second = Ship { id: 2, crewed: true };
		assert!(registry.resolve(&first).unwrap().is_some());
		assert!(registry.resolve(&second).unwrap().is_some());

		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(registry.cached_len(), 1);
		assert!(registry.is_cached(first.type_identity()));
	}

	#[rstest]
	fn test_access_denied_is_absent_not_error(container: AdapterContainer) {
		let mut registry = AdapterRegistry::new(container);
		let ghost = Ship {
			id: 3,
			crewed: false,
		};
		assert!(registry.resolve(&ghost).unwrap().is_none());
		assert!(registry.adapter_for(&ghost).is_ok());
	}

	#[rstest]
	fn test_unknown_adapter_name_is_configuration_error() {
		let mut registry = AdapterRegistry::new(AdapterContainer::new());
		let err = registry
			.resolve(&Ship { id: 1, crewed: true })
			.unwrap_err();
		assert!(matches!(err, SideloadError::AdapterNotFound { ref name } if name == "ship_adapter"));
		assert!(err.is_configuration());
	}

	#[rstest]
	fn test_adapter_for_wrong_type_is_configuration_error(container: AdapterContainer) {
		let mut registry = AdapterRegistry::new(container);
		let err = registry.resolve(&Dock).unwrap_err();
		assert!(matches!(err, SideloadError::AdapterMismatch { .. }));
		assert!(err.is_configuration());
	}

	#[rstest]
	fn test_proxy_prefix_is_stripped(container: AdapterContainer) {
		let plain = Ship { id: 1, crewed: true };
		let proxy = ShipProxy {
			target: Ship { id: 2, crewed: true },
			generated_name: format!("__proxy__::{}", plain.type_identity()),
		};
		let mut registry =
			AdapterRegistry::new(container).with_proxy_prefixes(vec!["__proxy__::".to_string()]);

		assert_eq!(registry.type_identity(&proxy), registry.type_identity(&plain));
		assert!(registry.resolve(&proxy).unwrap().is_some());
		assert!(registry.resolve(&plain).unwrap().is_some());
		assert_eq!(registry.cached_len(), 1);
	}

	#[rstest]
	fn test_clear_cache(container: AdapterContainer) {
		let mut registry = AdapterRegistry::new(container);
		registry.resolve(&Ship { id: 1, crewed: true }).unwrap();
		assert_eq!(registry.cached_len(), 1);
		registry.clear_cache();
		assert_eq!(registry.cached_len(), 0);
	}

	#[rstest]
	fn test_container_len_and_debug(container: AdapterContainer) {
		assert_eq!(container.len(), 1);
		assert!(!container.is_empty());
		assert!(format!("{:?}", container).contains("ship_adapter"));
	}
}
