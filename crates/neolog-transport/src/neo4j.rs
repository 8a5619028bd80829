//! The Neo4j transport.

use std::sync::Arc;

use chrono::Utc;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use neolog_core::{
    ConfigurationError, ConnectionConfig, LogNode, LogRecord, TransportEvent, TransportOptions,
};
use neolog_graph::store::log_node_properties;
use neolog_graph::{GraphClient, GraphConfig, NodeSchema, NodeStore};

use crate::args::Completion;
use crate::error::PersistenceError;
use crate::transport::Transport;

/// Buffered `Logged` events per subscriber before the oldest are dropped.
const EVENT_CAPACITY: usize = 1024;

/// Writes each submitted record as one node under the configured label.
///
/// All concurrent submissions share one store handle; nothing is queued or
/// serialized here, so writes may complete in any order.
pub struct Neo4jTransport {
    config: ConnectionConfig,
    store: Arc<dyn NodeStore>,
    events: broadcast::Sender<TransportEvent>,
    runtime: Handle,
}

impl Neo4jTransport {
    pub const NAME: &'static str = "Neo4jTransport";

    /// Validate options and build a transport over a lazily connecting
    /// Neo4j client. Must be called inside a Tokio runtime.
    pub fn connect(options: TransportOptions) -> Result<Self, ConfigurationError> {
        let config = options.validate()?;
        let client = GraphClient::lazy(GraphConfig::from(&config));
        Self::new(config, Arc::new(client))
    }

    /// Build a transport over any store, driven by the current runtime.
    pub fn new(
        config: ConnectionConfig,
        store: Arc<dyn NodeStore>,
    ) -> Result<Self, ConfigurationError> {
        let runtime = Handle::try_current().map_err(|_| ConfigurationError::NoRuntime)?;
        Ok(Self::with_runtime(config, store, runtime))
    }

    /// Build a transport whose writes run on `runtime`. Submissions may then
    /// come from any thread.
    pub fn with_runtime(
        config: ConnectionConfig,
        store: Arc<dyn NodeStore>,
        runtime: Handle,
    ) -> Self {
        store.declare_model(NodeSchema::log_node(config.node_label()));
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        tracing::info!(
            endpoint = %config.endpoint(),
            label = %config.node_label(),
            level = %config.min_level(),
            silent = config.silent(),
            "Neo4j transport ready"
        );

        Self {
            config,
            store,
            events,
            runtime,
        }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}

impl Transport for Neo4jTransport {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn level(&self) -> &str {
        self.config.min_level()
    }

    fn silent(&self) -> bool {
        self.config.silent()
    }

    fn submit(&self, record: LogRecord, on_complete: Completion) -> JoinHandle<()> {
        let entry = record.into_entry(self.config.min_level());

        if !self.config.silent() {
            let events = self.events.clone();
            let level = entry.level.clone();
            self.runtime.spawn(async move {
                // No subscribers is fine.
                let _ = events.send(TransportEvent::Logged { level });
            });
        }

        let node = LogNode::from_entry(entry, Utc::now());
        let label = self.config.node_label().to_string();
        let store = Arc::clone(&self.store);
        tracing::debug!(label = %label, level = %node.level, "Submitting log node");

        self.runtime.spawn(async move {
            // A panic in `create` surfaces here as a JoinError.
            let write_label = label.clone();
            let write = tokio::spawn(async move {
                store
                    .create(&write_label, log_node_properties(node))
                    .await
            });

            let result = match write.await {
                Ok(written) => written.map_err(|source| PersistenceError::Write { label, source }),
                Err(e) => Err(PersistenceError::Aborted {
                    label,
                    reason: e.to_string(),
                }),
            };
            on_complete(result);
        })
    }

    fn subscribe(&self) -> broadcast::Receiver<TransportEvent> {
        self.events.subscribe()
    }
}
