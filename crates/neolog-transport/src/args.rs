//! Entry-point argument shapes and their normalization.
//!
//! Hosts hand records over either as a named record plus callback, or as a
//! positional list `(level, message, metadata, callback)` where the
//! metadata slot may be skipped by putting the callback third. Both shapes
//! are normalized into a [`Normalized`] value before anything else happens.

use serde_json::Value;

use neolog_core::LogRecord;

use crate::error::{MalformedInput, PersistenceError};

/// Continuation invoked exactly once per submitted record.
///
/// `Ok(())` means the node was written; `Err` carries the failed write.
pub type Completion = Box<dyn FnOnce(Result<(), PersistenceError>) + Send + 'static>;

/// One positional argument.
pub enum LogArg {
    Text(String),
    Value(Value),
    Callback(Completion),
}

impl std::fmt::Debug for LogArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl From<&str> for LogArg {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for LogArg {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Value> for LogArg {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

/// The argument shapes accepted by [`Transport::log`](crate::Transport::log).
pub enum LogArgs {
    Record(LogRecord, Completion),
    Positional(Vec<LogArg>),
}

/// A record and its continuation, ready for submission.
pub struct Normalized {
    pub record: LogRecord,
    pub on_complete: Completion,
}

impl LogArgs {
    pub fn record(record: LogRecord, on_complete: Completion) -> Self {
        Self::Record(record, on_complete)
    }

    pub fn positional(args: impl IntoIterator<Item = LogArg>) -> Self {
        Self::Positional(args.into_iter().collect())
    }

    pub fn normalize(self) -> Result<Normalized, MalformedInput> {
        match self {
            Self::Record(record, on_complete) => Ok(Normalized {
                record,
                on_complete,
            }),
            Self::Positional(args) => normalize_positional(args),
        }
    }
}

fn normalize_positional(mut args: Vec<LogArg>) -> Result<Normalized, MalformedInput> {
    let total = args.len();
    let on_complete = match args.pop() {
        Some(LogArg::Callback(cb)) => cb,
        _ => return Err(MalformedInput::MissingCallback),
    };
    if total > 4 {
        return Err(MalformedInput::TooManyArgs(total));
    }

    let mut record = LogRecord::default();
    for (slot, arg) in args.into_iter().enumerate() {
        if matches!(arg, LogArg::Callback(_)) {
            return Err(MalformedInput::CallbackNotLast { slot });
        }
        match slot {
            0 => record.level = text(arg, "level", slot)?,
            1 => record.message = text(arg, "message", slot)?,
            _ => record.metadata = metadata(arg),
        }
    }

    Ok(Normalized {
        record,
        on_complete,
    })
}

fn text(arg: LogArg, field: &'static str, slot: usize) -> Result<Option<String>, MalformedInput> {
    match arg {
        LogArg::Text(s) | LogArg::Value(Value::String(s)) => Ok(Some(s)),
        LogArg::Value(Value::Null) => Ok(None),
        _ => Err(MalformedInput::NotText { field, slot }),
    }
}

fn metadata(arg: LogArg) -> Option<Value> {
    match arg {
        LogArg::Value(Value::Null) => None,
        LogArg::Value(v) => Some(v),
        LogArg::Text(s) => Some(Value::String(s)),
        LogArg::Callback(_) => None,
    }
}
