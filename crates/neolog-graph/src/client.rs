//! Neo4j connection management and shared graph client.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use neo4rs::{ConfigBuilder, Graph, Query};
use tokio::sync::OnceCell;

use neolog_core::ConnectionConfig;

use crate::schema::NodeSchema;

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Invalid {label} node: field {field:?} {reason}")]
    Validation {
        label: String,
        field: String,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "neolog-dev".to_string(),
            max_connections: 16,
            fetch_size: 256,
        }
    }
}

impl From<&ConnectionConfig> for GraphConfig {
    fn from(config: &ConnectionConfig) -> Self {
        Self {
            uri: config.endpoint().to_string(),
            user: config.username().to_string(),
            password: config.password().to_string(),
            max_connections: config.max_connections(),
            fetch_size: config.fetch_size(),
        }
    }
}

/// Thread-safe Neo4j graph client with connection pooling.
///
/// The pool is opened either eagerly by [`GraphClient::connect`] or on the
/// first operation for clients built with [`GraphClient::lazy`]. Declared
/// node models are shared between clones. Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    config: Arc<GraphConfig>,
    graph: Arc<OnceCell<Graph>>,
    pub(crate) models: Arc<RwLock<HashMap<String, NodeSchema>>>,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let client = Self::lazy(config.clone());
        client.graph().await?;
        Ok(client)
    }

    /// Build a client without touching the network.
    pub fn lazy(config: GraphConfig) -> Self {
        Self {
            config: Arc::new(config),
            graph: Arc::new(OnceCell::new()),
            models: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Whether the connection pool has been opened.
    pub fn is_connected(&self) -> bool {
        self.graph.initialized()
    }

    /// Get the underlying neo4rs Graph, opening the pool if needed.
    pub async fn graph(&self) -> Result<&Graph, GraphError> {
        self.graph
            .get_or_try_init(|| open(&self.config))
            .await
    }

    /// Execute a write-only query (CREATE, MERGE, DELETE, SET).
    pub async fn run(&self, query: Query) -> Result<(), GraphError> {
        self.graph().await?.run(query).await?;
        Ok(())
    }

    /// Execute a read query and collect all rows.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        let mut stream = self.graph().await?.execute(query).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }
}

async fn open(config: &GraphConfig) -> Result<Graph, GraphError> {
    let neo_config = ConfigBuilder::default()
        .uri(&config.uri)
        .user(&config.user)
        .password(&config.password)
        .max_connections(config.max_connections as usize)
        .fetch_size(config.fetch_size)
        .build()
        .map_err(|e| GraphError::Connection(e.to_string()))?;

    let graph = Graph::connect(neo_config)
        .await
        .map_err(|e| GraphError::Connection(e.to_string()))?;

    tracing::info!(uri = %config.uri, "Connected to Neo4j");
    Ok(graph)
}
