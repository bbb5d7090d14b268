//! Logger setup
//!
//! `RUST_LOG` follows the `env_logger` filter syntax (e.g. "debug",
//! "sanity_sprites=debug"). Without it only warnings and errors are shown, so
//! the progress lines on stdout stay the only output of a normal run.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else if verbose {
            builder.filter_level(log::LevelFilter::Debug);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        builder.init();

        log::debug!("logging initialized");
    });
}
