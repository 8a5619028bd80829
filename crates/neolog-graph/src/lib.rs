//! neolog graph — Neo4j persistence for log nodes.
//!
//! This crate owns the only path by which log records reach Neo4j:
//! connection handling, node schema declaration, and the `CREATE` that
//! writes each record as a single node.

pub mod client;
pub mod schema;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use schema::{FieldSpec, FieldType, NodeSchema};
pub use store::{NodeStore, Properties, PropertyValue};
