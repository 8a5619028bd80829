//! neolog transport — persists host log records as Neo4j nodes.
//!
//! [`Neo4jTransport`] is the adapter: it accepts one record per call,
//! schedules a `Logged` notification, writes a single node, and reports the
//! outcome through a completion callback. [`TransportRegistry`] and
//! [`GraphLayer`] are the host side that feeds it from `tracing`.

pub mod args;
pub mod error;
pub mod layer;
pub mod neo4j;
pub mod registry;
pub mod transport;

pub use args::{Completion, LogArg, LogArgs, Normalized};
pub use error::{MalformedInput, PersistenceError};
pub use layer::GraphLayer;
pub use neo4j::Neo4jTransport;
pub use registry::TransportRegistry;
pub use transport::Transport;
