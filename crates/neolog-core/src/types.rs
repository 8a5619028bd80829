//! Core log record types.
//!
//! A [`LogRecord`] is what the host hands over, possibly with gaps.
//! A [`LogEntry`] is the same record after defaulting, and a [`LogNode`]
//! is the exact shape persisted as a graph node.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Severity ──────────────────────────────────────────────────────

/// npm-style severity levels, most severe first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warn,
    Info,
    Http,
    Verbose,
    Debug,
    Silly,
}

impl Severity {
    /// Parse a level name. Case-insensitive; `trace` is accepted as `silly`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "http" => Some(Self::Http),
            "verbose" => Some(Self::Verbose),
            "debug" => Some(Self::Debug),
            "silly" | "trace" => Some(Self::Silly),
            _ => None,
        }
    }

    /// Numeric rank: 0 for `error` up to 6 for `silly`.
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Http => "http",
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Silly => "silly",
        }
    }

    /// Whether a record at `level` passes a `min` threshold.
    ///
    /// Unknown names on either side are admitted so custom levels are
    /// never dropped silently.
    pub fn admits(min: &str, level: &str) -> bool {
        match (Self::parse(min), Self::parse(level)) {
            (Some(min), Some(level)) => level <= min,
            _ => true,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Records ───────────────────────────────────────────────────────

/// A log record as received from the host. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl LogRecord {
    pub fn new(level: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: Some(level.into()),
            message: Some(message.into()),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Fill the gaps: level falls back to `default_level`, message to the
    /// empty string, metadata to an empty object.
    pub fn into_entry(self, default_level: &str) -> LogEntry {
        LogEntry {
            level: self.level.unwrap_or_else(|| default_level.to_string()),
            message: self.message.unwrap_or_default(),
            metadata: self
                .metadata
                .unwrap_or_else(|| Value::Object(serde_json::Map::new())),
        }
    }
}

/// A fully populated log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub metadata: Value,
}

/// The node persisted for each accepted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogNode {
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub message: String,
    pub meta: String,
}

impl LogNode {
    /// Stamp an entry with `now` and serialize its metadata.
    pub fn from_entry(entry: LogEntry, now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now,
            meta: serialize_metadata(&entry.metadata),
            level: entry.level,
            message: entry.message,
        }
    }
}

/// Serialize metadata to compact JSON text.
///
/// `null` and the empty object both become the empty string.
pub fn serialize_metadata(metadata: &Value) -> String {
    match metadata {
        Value::Null => String::new(),
        Value::Object(map) if map.is_empty() => String::new(),
        other => other.to_string(),
    }
}
