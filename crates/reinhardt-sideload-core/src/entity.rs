//! Serializable entities.
//!
//! An entity only needs to say which adapter describes it and what its stable
//! type identity is; everything else about its shape lives in the adapter.

use std::any::Any;

/// A domain object that can be written into a side-loaded document.
///
/// Lazily-loaded proxies should report the type identity of the type they
/// stand in for and return the loaded target from [`Entity::as_any`], so that
/// proxy and real instances resolve to the same adapter and compare as the
/// same kind in homogeneity checks.
///
/// # Examples
///
/// ```
/// use reinhardt_sideload_core::{Entity, impl_entity};
///
/// struct Author {
///     id: i64,
///     name: String,
/// }
///
/// impl_entity!(Author, "author_adapter");
///
/// let author = Author { id: 1, name: "Ada".to_string() };
/// assert_eq!(author.adapter_name(), "author_adapter");
/// assert!(author.type_identity().ends_with("Author"));
/// ```
pub trait Entity: Any {
	/// Name under which the adapter provider knows this entity's adapter.
	fn adapter_name(&self) -> &str;

	/// Stable identity of the entity's type.
	///
	/// Used as the adapter cache key and for homogeneity checks.
	fn type_identity(&self) -> &str {
		std::any::type_name::<Self>()
	}

	/// The concrete value adapters read fields from.
	fn as_any(&self) -> &dyn Any;
}

impl std::fmt::Debug for dyn Entity + '_ {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Entity")
			.field("type_identity", &self.type_identity())
			.field("adapter_name", &self.adapter_name())
			.finish()
	}
}

/// Implements [`Entity`] for a plain struct.
///
/// ```
/// use reinhardt_sideload_core::impl_entity;
///
/// struct Tag {
///     slug: String,
/// }
///
/// impl_entity!(Tag, "tag_adapter");
/// ```
#[macro_export]
macro_rules! impl_entity {
	($ty:ty, $adapter:expr) => {
		impl $crate::Entity for $ty {
			fn adapter_name(&self) -> &str {
				$adapter
			}

			fn as_any(&self) -> &dyn ::std::any::Any {
				self
			}
		}
	};
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	struct Planet {
		name: &'static str,
	}

	impl_entity!(Planet, "planet_adapter");

	struct LazyPlanet {
		target: Planet,
	}

	impl Entity for LazyPlanet {
		fn adapter_name(&self) -> &str {
			self.target.adapter_name()
		}

		fn type_identity(&self) -> &str {
			self.target.type_identity()
		}

		fn as_any(&self) -> &dyn Any {
			&self.target
		}
	}

	#[rstest]
	fn test_default_type_identity_is_type_name() {
		let planet = Planet { name: "earth" };
		assert_eq!(planet.type_identity(), std::any::type_name::<Planet>());
		assert_eq!(planet.name, "earth");
	}

	#[rstest]
	fn test_proxy_reports_target_identity() {
		let proxy = LazyPlanet {
			target: Planet { name: "mars" },
		};
		let plain = Planet { name: "venus" };
		assert_eq!(proxy.type_identity(), plain.type_identity());

		let target = proxy.as_any().downcast_ref::<Planet>().unwrap();
		assert_eq!(target.name, "mars");
	}

	#[rstest]
	fn test_dyn_entity_debug() {
		let planet = Planet { name: "earth" };
		let entity: &dyn Entity = &planet;
		let debug_str = format!("{:?}", entity);
		assert!(debug_str.contains("planet_adapter"));
	}
}
