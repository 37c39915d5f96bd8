//! Custom tracing layer for streaming workflow events to a front end
//!
//! The REPL shows shell decisions (denied gates, escalations, hand-offs)
//! inline with its own output. This layer captures events from the `a2s_*`
//! crates and forwards them over a tokio channel.

use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Event data sent to the front end
#[derive(Debug, Clone, serde::Serialize)]
pub struct WorkflowLogEvent {
    /// Event target (e.g., "a2s_core::workflow::shell")
    pub target: String,
    /// Log level (INFO, DEBUG, WARN, ERROR)
    pub level: String,
    /// Human-readable message
    pub message: String,
    /// Structured fields from the event
    pub fields: HashMap<String, Value>,
    /// Timestamp
    pub timestamp: String,
}

/// A tracing layer that sends events from the workflow crates to a channel
pub struct WorkflowEventLayer {
    sender: mpsc::UnboundedSender<WorkflowLogEvent>,
    target_prefix: &'static str,
}

impl WorkflowEventLayer {
    /// Create a new layer forwarding events whose target starts with `a2s`
    pub fn new(sender: mpsc::UnboundedSender<WorkflowLogEvent>) -> Self {
        Self {
            sender,
            target_prefix: "a2s",
        }
    }
}

impl<S> Layer<S> for WorkflowEventLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();
        if !target.starts_with(self.target_prefix) {
            return;
        }

        let mut fields = HashMap::new();
        let mut visitor = FieldVisitor(&mut fields);
        event.record(&mut visitor);

        let log_event = WorkflowLogEvent {
            target: target.to_string(),
            level: event.metadata().level().to_string(),
            message: fields
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // Receiver may be gone during shutdown; dropping the event is fine
        let _ = self.sender.send(log_event);
    }
}

/// Field visitor that extracts tracing event fields into a HashMap
struct FieldVisitor<'a>(&'a mut HashMap<String, Value>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(
            field.name().to_string(),
            serde_json::json!(format!("{:?}", value)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_forwards_only_workflow_targets() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let subscriber = tracing_subscriber::registry().with(WorkflowEventLayer::new(tx));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "a2s_core::workflow", budget = 30000_u64, "escalated");
            tracing::info!(target: "hyper::proto", "ignored");
        });

        let event = rx.try_recv().unwrap();
        assert_eq!(event.target, "a2s_core::workflow");
        assert_eq!(event.level, "INFO");
        assert_eq!(event.message, "escalated");
        assert_eq!(event.fields.get("budget"), Some(&serde_json::json!(30000)));
        assert!(rx.try_recv().is_err());
    }
}
