/// Structured audit events.
pub mod audit;
/// Layered configuration from defaults and environment.
pub mod config;
/// HTTP server lifecycle, health probes and metrics exposition.
pub mod server;
/// Logging and trace export setup.
pub mod telemetry;
