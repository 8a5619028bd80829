//! neolog-core: Shared types, configuration, and error handling for neolog.
//!
//! This crate provides the foundational types used across all neolog components:
//! - Severity levels and the incoming log record shape
//! - The persisted log node written to the graph
//! - Transport lifecycle events
//! - Configuration loading and validation
//! - Common error types

pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::{ConnectionConfig, TransportOptions};
pub use error::ConfigurationError;
pub use events::TransportEvent;
pub use types::{LogEntry, LogNode, LogRecord, Severity};
