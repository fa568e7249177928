//! rstest fixtures.
//!
//! ```rust,ignore
//! use reinhardt_sideload_test::fixtures::*;
//! use rstest::*;
//!
//! #[rstest]
//! fn test_something(library: Library, mut serializer: SideloadSerializer) {
//!     // ...
//! }
//! ```

use crate::adapters::library_adapters;
use crate::logging::init_test_logging;
use crate::models::LAZY_PREFIX;
use reinhardt_sideload_core::{SideloadSerializer, SideloadSettings};
use rstest::fixture;

pub use crate::graphs::Library;

/// The sample library graph.
#[fixture]
pub fn library() -> Library {
	init_test_logging();
	Library::sample()
}

/// Serializer over the library adapters with default settings.
#[fixture]
pub fn serializer() -> SideloadSerializer {
	init_test_logging();
	SideloadSerializer::new(library_adapters())
}

/// Serializer that treats [`Lazy`](crate::models::Lazy) proxies as their targets.
#[fixture]
pub fn lazy_aware_serializer() -> SideloadSerializer {
	init_test_logging();
	let settings = SideloadSettings::new().with_proxy_prefix(LAZY_PREFIX);
	SideloadSerializer::with_settings(library_adapters(), settings)
		.expect("lazy proxy settings must be valid")
}
