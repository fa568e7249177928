//! Test logging utilities.
//!
//! The engine reports through `tracing`. With the `log` feature enabled and no
//! subscriber installed, those events are forwarded to `log`, which
//! `env_logger` prints when `RUST_LOG` asks for it.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (call once)
///
/// # Examples
///
/// ```
/// use reinhardt_sideload_test::logging::init_test_logging;
///
/// init_test_logging();
/// init_test_logging();
/// ```
pub fn init_test_logging() {
	INIT.call_once(|| {
		let _ = env_logger::builder().is_test(true).try_init();
		tracing::debug!("test logging initialized");
	});
}
