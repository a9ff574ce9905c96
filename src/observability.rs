// In: src/observability.rs

//! Logging bootstrap for embedding applications, tests, and benches.
//!
//! The engine itself only emits through the `log` facade (segment commits at
//! `debug`); this module wires up `env_logger` for callers that want to see
//! those messages without bringing their own logger.

use std::sync::Once;

use log::LevelFilter;

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` backend at `debug` level, once. Safe to call from
/// multiple threads or repeatedly; later calls are no-ops, and an already
/// installed global logger wins.
pub fn enable_verbose_logging() {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Debug);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        let _ = builder.try_init();
    });
}
