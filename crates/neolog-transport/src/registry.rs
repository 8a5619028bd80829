//! Host-side registry: level filtering and fan-out to transports.

use std::sync::Arc;

use tokio::task::JoinHandle;

use neolog_core::{LogRecord, Severity};

use crate::transport::Transport;

/// The set of transports a host dispatches records to.
///
/// Enforces each transport's minimum level before handing a record over.
/// Clone is cheap.
#[derive(Clone, Default)]
pub struct TransportRegistry {
    transports: Vec<Arc<dyn Transport>>,
}

impl TransportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, transport: Arc<dyn Transport>) -> Self {
        self.add(transport);
        self
    }

    pub fn add(&mut self, transport: Arc<dyn Transport>) {
        tracing::debug!(
            name = transport.name(),
            level = transport.level(),
            "Registered transport"
        );
        self.transports.push(transport);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Transport>> {
        self.transports.iter().find(|t| t.name() == name)
    }

    pub fn len(&self) -> usize {
        self.transports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transports.is_empty()
    }

    /// Forward `record` to every transport whose level admits it.
    ///
    /// A record without a level is judged at each transport's own level,
    /// which always admits it. Failed writes are logged at debug and
    /// otherwise dropped.
    pub fn dispatch(&self, record: LogRecord) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::new();

        for transport in &self.transports {
            let min = transport.level();
            let level = record.level.as_deref().unwrap_or(min);
            if !Severity::admits(min, level) {
                continue;
            }

            let name = transport.name().to_string();
            let handle = transport.submit(
                record.clone(),
                Box::new(move |result| {
                    if let Err(e) = result {
                        tracing::debug!(transport = %name, error = %e, "Log write dropped");
                    }
                }),
            );
            handles.push(handle);
        }

        handles
    }
}
