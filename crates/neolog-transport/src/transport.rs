//! The capability set a host logging framework relies on.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use neolog_core::{LogRecord, TransportEvent};

use crate::args::{Completion, LogArgs, Normalized};
use crate::error::MalformedInput;

/// A log destination the host can register and dispatch to.
///
/// The host is responsible for honouring [`Transport::level`]; transports
/// persist whatever they are handed.
pub trait Transport: Send + Sync {
    /// Identifier of this transport kind.
    fn name(&self) -> &str;

    /// Minimum severity the host should forward.
    fn level(&self) -> &str;

    /// Whether `Logged` notifications are suppressed.
    fn silent(&self) -> bool;

    /// Accept one record. Returns immediately; the outcome is reported once
    /// through `on_complete`. The returned handle resolves after the
    /// callback has run and may be dropped.
    fn submit(&self, record: LogRecord, on_complete: Completion) -> JoinHandle<()>;

    /// Listen for lifecycle events.
    fn subscribe(&self) -> broadcast::Receiver<TransportEvent>;

    /// Entry point accepting either argument shape.
    fn log(&self, args: LogArgs) -> Result<JoinHandle<()>, MalformedInput> {
        let Normalized {
            record,
            on_complete,
        } = args.normalize()?;
        Ok(self.submit(record, on_complete))
    }
}
