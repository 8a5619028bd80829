//! `tracing` integration: every event becomes a log record.

use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use neolog_core::LogRecord;

use crate::registry::TransportRegistry;

/// Targets whose events are never forwarded. Writing them would log the
/// act of logging.
const INTERNAL_TARGETS: &[&str] = &["neo4rs", "neolog_"];

/// A `tracing-subscriber` layer that dispatches events to a registry.
///
/// The `message` field becomes the record message; every other field,
/// plus the event target, lands in the metadata object.
pub struct GraphLayer {
    registry: TransportRegistry,
}

impl GraphLayer {
    pub fn new(registry: TransportRegistry) -> Self {
        Self { registry }
    }
}

impl<S: Subscriber> Layer<S> for GraphLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if is_internal(meta.target()) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        visitor
            .fields
            .insert("target".to_string(), Value::String(meta.target().to_string()));

        let record = LogRecord {
            level: Some(level_name(meta.level()).to_string()),
            message: visitor.message,
            metadata: Some(Value::Object(visitor.fields)),
        };
        self.registry.dispatch(record);
    }
}

fn is_internal(target: &str) -> bool {
    INTERNAL_TARGETS.iter().any(|prefix| target.starts_with(prefix))
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "error",
        Level::WARN => "warn",
        Level::INFO => "info",
        Level::DEBUG => "debug",
        _ => "trace",
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl FieldVisitor {
    fn put(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(match value {
                Value::String(s) => s,
                other => other.to_string(),
            });
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, Value::String(value.to_string()));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, Value::Bool(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, Value::String(format!("{value:?}")));
    }
}
