//! `tracing` events flowing through `GraphLayer` into the store.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing_subscriber::layer::SubscriberExt;

use neolog_core::{LogRecord, TransportOptions};
use neolog_graph::NodeStore;
use neolog_transport::{GraphLayer, Neo4jTransport, Transport, TransportRegistry};

use common::{options, MemoryStore};

fn registry(store: Arc<MemoryStore>, opts: TransportOptions) -> TransportRegistry {
    let config = opts.validate().unwrap();
    let transport = Neo4jTransport::new(config, store as Arc<dyn NodeStore>).unwrap();
    TransportRegistry::new().with(Arc::new(transport))
}

async fn wait_for_writes(store: &MemoryStore, n: usize) {
    for _ in 0..100 {
        if store.writes().len() >= n {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expected {n} writes, saw {}", store.writes().len());
}

#[tokio::test]
async fn events_become_log_nodes() {
    let store = MemoryStore::new();
    let subscriber =
        tracing_subscriber::registry().with(GraphLayer::new(registry(store.clone(), options())));

    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!(target: "billing", invoice = 42, paid = false, "invoice overdue");
    });

    wait_for_writes(&store, 1).await;
    let (label, props) = &store.writes()[0];
    assert_eq!(label, "Log");
    assert_eq!(props["level"].as_str(), Some("warn"));
    assert_eq!(props["message"].as_str(), Some("invoice overdue"));

    let meta: Value = serde_json::from_str(props["meta"].as_str().unwrap()).unwrap();
    assert_eq!(meta["invoice"], 42);
    assert_eq!(meta["paid"], false);
    assert_eq!(meta["target"], "billing");
}

#[tokio::test]
async fn events_below_transport_level_are_not_forwarded() {
    let store = MemoryStore::new();
    let subscriber =
        tracing_subscriber::registry().with(GraphLayer::new(registry(store.clone(), options())));

    tracing::subscriber::with_default(subscriber, || {
        tracing::debug!(target: "billing", "too chatty");
        tracing::error!(target: "billing", "payment gateway down");
    });

    wait_for_writes(&store, 1).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let writes = store.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].1["level"].as_str(), Some("error"));
}

#[tokio::test]
async fn internal_targets_are_not_forwarded() {
    let store = MemoryStore::new();
    let subscriber =
        tracing_subscriber::registry().with(GraphLayer::new(registry(store.clone(), options())));

    tracing::subscriber::with_default(subscriber, || {
        tracing::error!(target: "neo4rs::pool", "connection reset");
        tracing::error!(target: "neolog_transport::neo4j", "write failed");
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn registry_filters_per_transport_level() {
    let verbose = MemoryStore::new();
    let quiet = MemoryStore::new();

    let mut registry = registry(
        verbose.clone(),
        TransportOptions {
            min_level: Some("debug".to_string()),
            ..options()
        },
    );
    let quiet_transport = Neo4jTransport::new(
        TransportOptions {
            min_level: Some("error".to_string()),
            ..options()
        }
        .validate()
        .unwrap(),
        quiet.clone() as Arc<dyn NodeStore>,
    )
    .unwrap();
    registry.add(Arc::new(quiet_transport));
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get("Neo4jTransport").unwrap().level(), "debug");

    let handles = registry.dispatch(LogRecord::new("info", "user signed in"));
    assert_eq!(handles.len(), 1);
    for handle in handles {
        handle.await.unwrap();
    }

    let handles = registry.dispatch(LogRecord::new("error", "disk failure"));
    assert_eq!(handles.len(), 2);
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(verbose.writes().len(), 2);
    assert_eq!(quiet.writes().len(), 1);
    assert_eq!(quiet.writes()[0].1["message"].as_str(), Some("disk failure"));
}

#[tokio::test]
async fn registry_dispatches_levelless_records_everywhere() {
    let store = MemoryStore::new();
    let registry = registry(store.clone(), options());

    for handle in registry.dispatch(LogRecord::default()) {
        handle.await.unwrap();
    }

    let writes = store.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].1["level"].as_str(), Some("info"));
}
