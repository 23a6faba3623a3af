//! Health check state.
//!
//! Backs the `/health`, `/health/ready` and `/health/live` endpoints used
//! by load balancers and orchestrators.
//!
//! ## Response format
//! ```json
//! {
//!   "status": "healthy",
//!   "uptime_seconds": 3600,
//!   "version": "0.1.0",
//!   "timestamp": 1234567890
//! }
//! ```

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Running but some functionality is impaired.
    Degraded,
    Unhealthy,
}

/// Health check response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub uptime_seconds: u64,
    pub version: String,
    pub timestamp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Detailed health information: current table sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDetails {
    pub users: usize,
    pub items: usize,
    pub open_auctions: usize,
    pub bids: usize,
    pub comments: usize,
    pub buy_nows: usize,
}

/// Tracks process health and uptime.
pub struct HealthChecker {
    start_time: SystemTime,
    status: Arc<RwLock<HealthStatus>>,
    version: String,
}

impl HealthChecker {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            start_time: SystemTime::now(),
            status: Arc::new(RwLock::new(HealthStatus::Healthy)),
            version: version.into(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().map(|d| d.as_secs()).unwrap_or(0)
    }

    fn current_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    pub fn set_status(&self, status: HealthStatus) {
        *self.status.write() = status;
    }

    pub fn get_status(&self) -> HealthStatus {
        *self.status.read()
    }

    pub fn check_health(&self) -> HealthResponse {
        HealthResponse {
            status: self.get_status(),
            uptime_seconds: self.uptime_seconds(),
            version: self.version.clone(),
            timestamp: Self::current_timestamp(),
            details: None,
        }
    }

    pub fn check_health_detailed(&self, details: HealthDetails) -> HealthResponse {
        HealthResponse {
            status: self.get_status(),
            uptime_seconds: self.uptime_seconds(),
            version: self.version.clone(),
            timestamp: Self::current_timestamp(),
            details: Some(details),
        }
    }

    /// Liveness probe: the process is running.
    pub fn check_liveness(&self) -> bool {
        true
    }

    /// Readiness probe: the service can accept traffic.
    pub fn check_readiness(&self) -> bool {
        matches!(self.get_status(), HealthStatus::Healthy)
    }
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_checker_creation() {
        let checker = HealthChecker::new("1.0.0");
        assert_eq!(checker.version, "1.0.0");
        assert_eq!(checker.get_status(), HealthStatus::Healthy);
    }

    #[test]
    fn test_status_change() {
        let checker = HealthChecker::new("1.0.0");
        checker.set_status(HealthStatus::Degraded);
        assert_eq!(checker.get_status(), HealthStatus::Degraded);

        checker.set_status(HealthStatus::Unhealthy);
        assert_eq!(checker.get_status(), HealthStatus::Unhealthy);
    }

    #[test]
    fn test_health_response() {
        let checker = HealthChecker::new("1.0.0");
        let response = checker.check_health();

        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(response.version, "1.0.0");
        assert!(response.timestamp > 0);
        assert!(response.details.is_none());
    }

    #[test]
    fn test_liveness_passes_even_when_unhealthy() {
        let checker = HealthChecker::new("1.0.0");
        checker.set_status(HealthStatus::Unhealthy);
        assert!(checker.check_liveness());
        assert!(!checker.check_readiness());
    }

    #[test]
    fn test_readiness_tracks_status() {
        let checker = HealthChecker::new("1.0.0");
        assert!(checker.check_readiness());

        checker.set_status(HealthStatus::Degraded);
        assert!(!checker.check_readiness());

        checker.set_status(HealthStatus::Healthy);
        assert!(checker.check_readiness());
    }

    #[test]
    fn test_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            uptime_seconds: 3600,
            version: "1.0.0".to_string(),
            timestamp: 1234567890,
            details: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("3600"));
    }
}
