//! The node store seam and its Neo4j implementation.
//!
//! Writes are plain `CREATE`s: each call produces exactly one node and no
//! relationships. Properties are checked against the model declared for
//! the label, if there is one.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use neo4rs::query;

use neolog_core::LogNode;

use crate::client::{GraphClient, GraphError};
use crate::schema::{quote_label, FieldType, NodeSchema};

/// A single property value bound into a write.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    DateTime(DateTime<Utc>),
}

impl PropertyValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::String(_) => FieldType::String,
            Self::DateTime(_) => FieldType::DateTime,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::DateTime(_) => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            Self::String(_) => None,
        }
    }
}

/// Property mapping for one node, keyed by property name.
pub type Properties = BTreeMap<String, PropertyValue>;

/// Map a log node onto its persisted properties.
pub fn log_node_properties(node: LogNode) -> Properties {
    let mut props = Properties::new();
    props.insert(
        "timestamp".to_string(),
        PropertyValue::DateTime(node.timestamp),
    );
    props.insert("level".to_string(), PropertyValue::String(node.level));
    props.insert("message".to_string(), PropertyValue::String(node.message));
    props.insert("meta".to_string(), PropertyValue::String(node.meta));
    props
}

/// A graph store that log nodes are written to.
///
/// Implementations must accept concurrent `create` calls; callers do not
/// serialize them.
#[async_trait]
pub trait NodeStore: Send + Sync {
    /// Register the model for `schema.label`, replacing any earlier one.
    fn declare_model(&self, schema: NodeSchema);

    /// Create one node under `label`.
    async fn create(&self, label: &str, props: Properties) -> Result<(), GraphError>;
}

#[async_trait]
impl NodeStore for GraphClient {
    fn declare_model(&self, schema: NodeSchema) {
        tracing::debug!(label = %schema.label, fields = schema.fields.len(), "Declared node model");
        let mut models = self.models.write().unwrap_or_else(|e| e.into_inner());
        models.insert(schema.label.clone(), schema);
    }

    async fn create(&self, label: &str, props: Properties) -> Result<(), GraphError> {
        let schema = {
            let models = self.models.read().unwrap_or_else(|e| e.into_inner());
            models.get(label).cloned()
        };
        if let Some(schema) = &schema {
            validate(schema, &props)?;
        }

        let (cypher, params) = create_statement(label, &props);
        let mut q = query(&cypher);
        for (param, value) in params {
            q = match value {
                PropertyValue::String(s) => q.param(&param, s.clone()),
                PropertyValue::DateTime(dt) => q.param(&param, dt.fixed_offset()),
            };
        }

        self.run(q).await
    }
}

/// Check properties against a declared model.
pub fn validate(schema: &NodeSchema, props: &Properties) -> Result<(), GraphError> {
    let invalid = |field: &str, reason: &str| GraphError::Validation {
        label: schema.label.clone(),
        field: field.to_string(),
        reason: reason.to_string(),
    };

    for spec in &schema.fields {
        match props.get(&spec.name) {
            Some(value) if value.field_type() != spec.field_type => {
                return Err(invalid(&spec.name, "has the wrong type"));
            }
            None if spec.required => return Err(invalid(&spec.name, "is required")),
            _ => {}
        }
    }

    if let Some(key) = props.keys().find(|k| schema.field(k).is_none()) {
        return Err(invalid(key, "is not declared"));
    }

    Ok(())
}

/// Build the `CREATE` statement and its positional parameters.
fn create_statement<'a>(
    label: &str,
    props: &'a Properties,
) -> (String, Vec<(String, &'a PropertyValue)>) {
    let mut assignments = Vec::with_capacity(props.len());
    let mut params = Vec::with_capacity(props.len());

    for (i, (key, value)) in props.iter().enumerate() {
        let param = format!("p{i}");
        assignments.push(format!("{}: ${param}", quote_label(key)));
        params.push((param, value));
    }

    let cypher = format!(
        "CREATE (n:{} {{{}}})",
        quote_label(label),
        assignments.join(", ")
    );
    (cypher, params)
}
