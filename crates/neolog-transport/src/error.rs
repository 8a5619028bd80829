//! Error types for the neolog-transport crate.

use thiserror::Error;

use neolog_graph::GraphError;

/// A write that did not make it into the graph. Only ever delivered
/// through a completion callback.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to persist {label} node: {source}")]
    Write {
        label: String,
        #[source]
        source: GraphError,
    },

    #[error("Write of {label} node aborted: {reason}")]
    Aborted { label: String, reason: String },
}

/// Entry-point arguments that could not be normalized into a record.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MalformedInput {
    #[error("No completion callback in the final argument slot")]
    MissingCallback,

    #[error("Completion callback in slot {slot} is not the final argument")]
    CallbackNotLast { slot: usize },

    #[error("Expected text for the {field} in slot {slot}")]
    NotText { field: &'static str, slot: usize },

    #[error("Too many arguments: {0} (at most level, message, metadata, callback)")]
    TooManyArgs(usize),
}
