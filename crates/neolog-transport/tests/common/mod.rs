//! In-memory node stores for exercising transports without Neo4j.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::oneshot;

use neolog_core::TransportOptions;
use neolog_graph::store::validate;
use neolog_graph::{GraphError, NodeSchema, NodeStore, Properties};
use neolog_transport::{Completion, PersistenceError};

/// Records every declared model and successful write.
#[derive(Default)]
pub struct MemoryStore {
    models: Mutex<Vec<NodeSchema>>,
    writes: Mutex<Vec<(String, Properties)>>,
    calls: AtomicUsize,
    fail: bool,
    jitter: bool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A store whose every write is rejected.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Default::default()
        })
    }

    /// A store that delays each write by a varying amount, so completions
    /// arrive out of submission order.
    pub fn jittery() -> Arc<Self> {
        Arc::new(Self {
            jitter: true,
            ..Default::default()
        })
    }

    pub fn models(&self) -> Vec<NodeSchema> {
        self.models.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<(String, Properties)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NodeStore for MemoryStore {
    fn declare_model(&self, schema: NodeSchema) {
        self.models.lock().unwrap().push(schema);
    }

    async fn create(&self, label: &str, props: Properties) -> Result<(), GraphError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.jitter {
            tokio::time::sleep(Duration::from_millis(((n * 7) % 5) as u64)).await;
        }
        if self.fail {
            return Err(GraphError::Connection("connection refused".to_string()));
        }

        let schema = self
            .models
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.label == label)
            .cloned();
        if let Some(schema) = schema {
            validate(&schema, &props)?;
        }

        self.writes.lock().unwrap().push((label.to_string(), props));
        Ok(())
    }
}

/// A store whose writes panic mid-flight.
pub struct PanickingStore;

#[async_trait]
impl NodeStore for PanickingStore {
    fn declare_model(&self, _schema: NodeSchema) {}

    async fn create(&self, _label: &str, _props: Properties) -> Result<(), GraphError> {
        panic!("driver bug");
    }
}

/// A completion that counts its invocations and forwards the first result.
pub fn completion() -> (
    Completion,
    Arc<AtomicUsize>,
    oneshot::Receiver<Result<(), PersistenceError>>,
) {
    let count = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = oneshot::channel();
    let seen = Arc::clone(&count);
    let cb: Completion = Box::new(move |result| {
        seen.fetch_add(1, Ordering::SeqCst);
        let _ = tx.send(result);
    });
    (cb, count, rx)
}

pub fn options() -> TransportOptions {
    TransportOptions::new("bolt://localhost:7687", "neo4j", "secret")
}
