//! Node model declarations.

use serde::{Deserialize, Serialize};

/// Property types a declared field may hold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    DateTime,
    String,
}

/// One declared property of a node model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldSpec {
    pub fn required(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            required: true,
        }
    }

    pub fn optional(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            required: false,
        }
    }
}

/// A node label together with the properties written under it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeSchema {
    pub label: String,
    pub fields: Vec<FieldSpec>,
}

impl NodeSchema {
    /// The model every log node is written with.
    pub fn log_node(label: &str) -> Self {
        Self {
            label: label.to_string(),
            fields: vec![
                FieldSpec::required("timestamp", FieldType::DateTime),
                FieldSpec::required("level", FieldType::String),
                FieldSpec::required("message", FieldType::String),
                FieldSpec::optional("meta", FieldType::String),
            ],
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Quote a label for interpolation into Cypher.
pub(crate) fn quote_label(label: &str) -> String {
    format!("`{}`", label.replace('`', "``"))
}
