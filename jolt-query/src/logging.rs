//! Logging infrastructure for Jolt.
//!
//! Resolution is instrumented with `tracing`; nothing is printed unless a
//! subscriber is installed. With the `tracing-subscriber` feature enabled,
//! [`init`] installs one controlled by environment variables:
//!
//! - `JOLT_DEBUG=true` - Enable debug logging
//! - `JOLT_LOG_LEVEL=debug|info|warn|error|trace` - Set specific log level
//! - `JOLT_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! ```rust,no_run
//! use jolt_query::logging;
//!
//! // Initialize logging (call once at startup)
//! logging::init();
//! ```

use std::env;
use std::sync::Once;

use jolt_schema::DebugConfig;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `JOLT_DEBUG`.
///
/// Returns `true` if `JOLT_DEBUG` is set to "true", "1", or "yes" (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("JOLT_DEBUG")
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

/// Get the configured log level from `JOLT_LOG_LEVEL`.
///
/// Defaults to "debug" if `JOLT_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    resolve_log_level(env::var("JOLT_LOG_LEVEL").ok().as_deref(), is_debug_enabled())
}

/// Get the configured log format from `JOLT_LOG_FORMAT`.
///
/// Defaults to "json" for structured logging.
pub fn get_log_format() -> &'static str {
    resolve_log_format(env::var("JOLT_LOG_FORMAT").ok().as_deref())
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn resolve_log_level(level: Option<&str>, debug: bool) -> &'static str {
    let fallback = if debug { "debug" } else { "warn" };

    match level.map(str::to_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => fallback,
    }
}

fn resolve_log_format(format: Option<&str>) -> &'static str {
    match format.map(str::to_lowercase).as_deref() {
        Some("pretty") => "pretty",
        Some("compact") => "compact",
        _ => "json",
    }
}

/// Initialize the Jolt logging system from the environment.
///
/// Subsequent calls are no-ops. Nothing is installed unless `JOLT_DEBUG` or
/// `JOLT_LOG_LEVEL` is set.
pub fn init() {
    if !is_debug_enabled() && env::var("JOLT_LOG_LEVEL").is_err() {
        return;
    }
    install(get_log_level(), get_log_format());
}

/// Initialize logging from the `[debug]` section of `jolt.toml`.
///
/// Environment variables still take precedence over the file.
pub fn init_with_config(config: &DebugConfig) {
    let level = match env::var("JOLT_LOG_LEVEL") {
        Ok(level) => resolve_log_level(Some(&level), is_debug_enabled()),
        Err(_) => resolve_log_level(Some(&config.log_level), is_debug_enabled()),
    };
    let format = match env::var("JOLT_LOG_FORMAT") {
        Ok(format) => resolve_log_format(Some(&format)),
        Err(_) => config.log_format.as_str(),
    };
    install(level, format);
}

/// Initialize logging with a specific level.
///
/// # Safety
///
/// This function modifies environment variables, which is unsafe in
/// multi-threaded programs. Call this early in your program before
/// spawning threads.
pub fn init_with_level(level: &str) {
    // SAFETY: This should only be called at program startup before threads are spawned.
    unsafe {
        env::set_var("JOLT_LOG_LEVEL", level);
    }
    init();
}

/// Initialize logging for debugging (convenience function).
///
/// Equivalent to setting `JOLT_DEBUG=true` and calling `init()`.
///
/// # Safety
///
/// This function modifies environment variables, which is unsafe in
/// multi-threaded programs. Call this early in your program before
/// spawning threads.
pub fn init_debug() {
    // SAFETY: This should only be called at program startup before threads are spawned.
    unsafe {
        env::set_var("JOLT_DEBUG", "true");
    }
    init();
}

#[allow(unused_variables)]
fn install(level: &'static str, format: &'static str) {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let filter = EnvFilter::try_new(format!(
                "jolt={level},jolt_query={level},jolt_schema={level}"
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            let result = match format {
                "json" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json())
                    .try_init(),
                "compact" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact())
                    .try_init(),
                _ => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty())
                    .try_init(),
            };

            if result.is_ok() {
                tracing::info!(level = level, format = format, "Jolt logging initialized");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("YES"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_log_level_default() {
        assert_eq!(resolve_log_level(None, false), "warn");
        assert_eq!(resolve_log_level(None, true), "debug");
    }

    #[test]
    fn test_log_level_override() {
        assert_eq!(resolve_log_level(Some("TRACE"), false), "trace");
        assert_eq!(resolve_log_level(Some("error"), true), "error");
        assert_eq!(resolve_log_level(Some("verbose"), true), "debug");
    }

    #[test]
    fn test_log_format() {
        assert_eq!(resolve_log_format(None), "json");
        assert_eq!(resolve_log_format(Some("Pretty")), "pretty");
        assert_eq!(resolve_log_format(Some("compact")), "compact");
        assert_eq!(resolve_log_format(Some("xml")), "json");
    }
}
