//! BuildOnAWS Provider Logging
//!
//! Structured logging for the BuildOnAWS provider. Log output follows the
//! conventions Terraform applies to provider plugins: the level comes from
//! `TF_LOG_PROVIDER` (or `TF_LOG`) and entries are written to stderr as JSON
//! lines in the shape Terraform's plugin host understands.
//!
//! # Usage
//!
//! ```rust
//! use buildonaws_log::{debug, info, warn, error, trace};
//!
//! info!("Configuring the BuildOnAWS provider");
//! debug!("Backend URL set: {}", "http://localhost:9200");
//!
//! // Structured fields are attached as top-level JSON keys
//! let status = 200;
//! debug!("ping_request_status" = status; "Response from the ping request");
//!
//! // With an explicit target
//! warn!(target: "buildonaws::resource", "Character {} was already gone", "abc");
//! ```
//!
//! # Environment Variables
//!
//! - `TF_LOG_PROVIDER=trace|debug|info|warn|error|off` - Provider log level
//! - `TF_LOG=...` - Fallback log level shared with Terraform core
//! - `BUILDONAWS_LOG_FORMAT=json|pretty` - Output format (JSON by default)

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{Map, Value};
use std::env;
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};

// ============================================================================
// Log Levels
// ============================================================================

/// Log level for provider logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    /// Trace level (most verbose)
    Trace = 0,
    /// Debug level
    Debug = 1,
    /// Info level
    Info = 2,
    /// Warning level
    Warn = 3,
    /// Error level (least verbose)
    Error = 4,
    /// Off (no logging)
    Off = 5,
}

impl Level {
    /// Get level from string, as accepted by `TF_LOG`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" | "json" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// Level name as it appears in the `@level` key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.as_str().to_uppercase())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human readable single-line format with `key=value` fields
    Pretty,
    /// JSON lines understood by the Terraform plugin host
    Json,
}

impl Format {
    /// Get format from string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Global Configuration
// ============================================================================

/// Module name reported in the `@module` key.
pub const MODULE: &str = "provider.buildonaws";

/// Global log level.
static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

/// Global configuration (lazy initialized).
static CONFIG: Lazy<LogConfig> = Lazy::new(|| {
    let config = LogConfig::from_env();
    LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);
    config
});

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum log level
    pub level: Level,
    /// Output format
    pub format: Format,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: Format::Json,
        }
    }
}

impl LogConfig {
    /// Create config from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(env::vars())
    }

    /// Create config from an arbitrary set of variables.
    ///
    /// `TF_LOG_PROVIDER` wins over `TF_LOG` when both carry a valid level.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut provider_level = None;
        let mut core_level = None;
        let mut format = None;

        for (key, value) in vars {
            match key.as_ref() {
                "TF_LOG_PROVIDER" => provider_level = Level::from_str(value.as_ref()),
                "TF_LOG" => core_level = Level::from_str(value.as_ref()),
                "BUILDONAWS_LOG_FORMAT" => format = Format::from_str(value.as_ref()),
                _ => {}
            }
        }

        let defaults = Self::default();
        Self {
            level: provider_level.or(core_level).unwrap_or(defaults.level),
            format: format.unwrap_or(defaults.format),
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Initialize the logging system.
///
/// This is called automatically when the first log macro is used,
/// but can be called explicitly for eager initialization.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// Check if a log level is enabled.
#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    init();
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

/// Get current log level.
pub fn current_level() -> Level {
    init();
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Set log level at runtime.
pub fn set_level(level: Level) {
    init();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Get the global configuration.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

/// Convert any serializable value into a structured field value.
#[doc(hidden)]
pub fn field_value<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| Value::String(format!("<unserializable: {e}>")))
}

// ============================================================================
// Log Output
// ============================================================================

/// Log a message with the given level and structured fields.
#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str, fields: &[(&str, Value)]) {
    if !is_level_enabled(level) {
        return;
    }

    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true);
    let line = match config().format {
        Format::Json => format_json(&timestamp, level, target, message, fields),
        Format::Pretty => format_pretty(&timestamp, level, target, message, fields),
    };

    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "{}", line);
}

/// Render one entry as a JSON line.
///
/// The reserved `@` keys are written first; fields never overwrite them.
pub fn format_json(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    fields: &[(&str, Value)],
) -> String {
    let mut entry = Map::new();
    entry.insert("@timestamp".to_string(), Value::from(timestamp));
    entry.insert("@level".to_string(), Value::from(level.as_str()));
    entry.insert("@module".to_string(), Value::from(MODULE));
    entry.insert("@caller".to_string(), Value::from(target));
    entry.insert("@message".to_string(), Value::from(message));

    for (key, value) in fields {
        if key.starts_with('@') {
            continue;
        }
        entry.insert((*key).to_string(), value.clone());
    }

    Value::Object(entry).to_string()
}

/// Render one entry as a human readable line.
pub fn format_pretty(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    fields: &[(&str, Value)],
) -> String {
    let mut line = format!("{} [{:5}] {}: {}", timestamp, level, target, message);
    for (key, value) in fields {
        match value {
            Value::String(s) => line.push_str(&format!(" {}={:?}", key, s)),
            other => line.push_str(&format!(" {}={}", key, other)),
        }
    }
    line
}

// ============================================================================
// Macros
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($level:expr, target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($level) {
            $crate::log($level, $target, &format!($($arg)+), &[]);
        }
    };
    ($level:expr, $($key:literal = $value:expr),+ ; $($arg:tt)+) => {
        if $crate::is_level_enabled($level) {
            $crate::log(
                $level,
                module_path!(),
                &format!($($arg)+),
                &[$(($key, $crate::field_value(&$value))),+],
            );
        }
    };
    ($level:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($level) {
            $crate::log($level, module_path!(), &format!($($arg)+), &[]);
        }
    };
}

/// Log a trace message.
///
/// Only enabled when `TF_LOG_PROVIDER=trace` (or `TF_LOG=trace`).
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Trace, $($arg)+) };
}

/// Log a debug message.
///
/// # Example
///
/// ```rust
/// use buildonaws_log::debug;
///
/// let address = "http://localhost:9200";
/// debug!("Backend URL set: {}", address);
/// debug!("ping_request_status" = 200u16; "Response from the ping request");
/// debug!(target: "buildonaws::provider", "NOT doing TLS certificate validation");
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Debug, $($arg)+) };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Info, $($arg)+) };
}

/// Log a warning message.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Warn, $($arg)+) };
}

/// Log an error message.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Error, $($arg)+) };
}

// ============================================================================
// Tests
// ============================================================================
