//! Health check responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Individual dependency checks
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub services: HashMap<String, ServiceHealth>,

    pub timestamp: DateTime<Utc>,

    /// Server version
    pub version: String,
}

impl HealthResponse {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            services: HashMap::new(),
            timestamp: Utc::now(),
            version: version.into(),
        }
    }

    /// Records a dependency check; any unhealthy dependency degrades the
    /// overall status
    pub fn with_service(mut self, name: impl Into<String>, health: ServiceHealth) -> Self {
        if health.status != HealthStatus::Healthy {
            self.status = HealthStatus::Degraded;
        }
        self.services.insert(name.into(), health);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual service health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: HealthStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Response time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

impl ServiceHealth {
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: None,
            response_time_ms: Some(response_time_ms),
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            response_time_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_degrades_on_unhealthy_service() {
        let health = HealthResponse::new("0.1.0")
            .with_service("database", ServiceHealth::unhealthy("connection refused"));
        assert_eq!(health.status, HealthStatus::Degraded);

        let health =
            HealthResponse::new("0.1.0").with_service("database", ServiceHealth::healthy(3));
        assert_eq!(health.status, HealthStatus::Healthy);
    }

    #[test]
    fn test_health_omits_empty_services() {
        let json = serde_json::to_value(HealthResponse::new("0.1.0")).unwrap();
        assert_eq!(json["status"], "healthy");
        assert!(json.get("services").is_none());
    }
}
