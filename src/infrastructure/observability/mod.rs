/// Observability - metrics and health endpoints
///
/// Runs on its own port, separate from the public API, so probes and
/// scrapers never compete with auction traffic.

pub mod health;
pub mod http_server;

pub use health::{HealthChecker, HealthStatus};
pub use http_server::ObservabilityServer;
