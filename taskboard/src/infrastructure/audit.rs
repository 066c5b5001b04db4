use serde::Serialize;
use tracing::{info, info_span};

use crate::domain::Entity;

/// Domain event for audit logging.
/// Serialized as JSON so the audit trail stays machine-readable.
#[derive(Debug, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum AuditEvent {
    /// The service finished wiring and is about to accept requests.
    SystemStartup {
        /// Component that started.
        component: String,
    },
    /// The service stopped accepting requests.
    SystemShutdown {
        /// Why the service stopped.
        reason: String,
    },
    /// Every table was dropped and recreated.
    SchemaReset,
    /// A parent row and its dependents were removed.
    CascadeDelete {
        /// Kind of the root row.
        entity: Entity,
        /// Root row id.
        id: i64,
        /// Dependent rows removed with it.
        dependents: u64,
    },
}

/// Logs an audit event on the `audit` target as structured JSON.
/// Subscribers can filter on the target to route these records separately.
pub fn log_audit(event: &AuditEvent) {
    let span = info_span!(target: "audit", "audit_event");
    let _enter = span.enter();

    let json = serde_json::to_string(event).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"));
    info!(target: "audit", audit_json = %json, "Audit event");
}
