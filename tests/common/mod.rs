//! Shared setup for integration tests: logging so `RUST_LOG=debug` surfaces
//! the scheme parsers' trace output while debugging a failing scenario.

use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
