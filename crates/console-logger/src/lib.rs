//! Console Logger
//!
//! Installs `tracing-wasm` as the global subscriber so `tracing` events land
//! in the browser devtools console, filtered by a configured level name.

use tracing::Level;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_wasm::{WASMLayer, WASMLayerConfigBuilder};

/// Level used when the configured string is missing or unknown
pub const DEFAULT_LEVEL: Level = Level::INFO;

/// Install the console subscriber.
///
/// # Arguments
/// * `level` - level name such as `"debug"` or `"warn"`; unknown names fall back to `info`
pub fn init(level: &str) -> Result<(), SetGlobalDefaultError> {
    let config = WASMLayerConfigBuilder::new()
        .set_max_level(parse_level(level))
        // Span timings clutter the console; events are all the app emits
        .set_report_logs_in_timings(false)
        .build();
    let subscriber = tracing_subscriber::registry().with(WASMLayer::new(config));
    tracing::subscriber::set_global_default(subscriber)
}

/// Parse a level name, case-insensitive
pub fn parse_level(level: &str) -> Level {
    level.trim().parse().unwrap_or(DEFAULT_LEVEL)
}
