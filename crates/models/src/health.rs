//! Service health and metadata models.

use serde::{Deserialize, Serialize};

/// The reported status of the service or one of its checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Up,
    Down,
}

impl HealthStatus {
    /// `true` when the service is running.
    pub fn is_up(self) -> bool {
        matches!(self, Self::Up)
    }
}

/// One named sub-check of the service health report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    /// The name of the check.
    pub name: String,

    /// The status the check reported.
    pub status: HealthStatus,

    /// Free-form details attached to the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// The health report of the backing service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthInfo {
    /// The aggregated status of the service.
    pub status: HealthStatus,

    /// The named sub-checks, in report order.
    #[serde(default)]
    pub checks: Vec<HealthCheck>,
}

/// Free-form metadata about the backing service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// The version of the API.
    #[serde(default)]
    pub version: String,

    /// The profile the platform runs with.
    #[serde(default)]
    pub profile: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_wire_tokens() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Up).expect("should serialise"),
            "\"UP\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Down).expect("should serialise"),
            "\"DOWN\""
        );
        assert!(HealthStatus::Up.is_up());
        assert!(!HealthStatus::Down.is_up());
    }

    #[test]
    fn test_health_info_deserialises_a_quarkus_style_report() {
        let json = serde_json::json!({
            "status": "UP",
            "checks": [
                { "name": "Database connections health check", "status": "UP" },
                { "name": "Message broker", "status": "DOWN", "data": { "reason": "timeout" } }
            ]
        });

        let info: HealthInfo = serde_json::from_value(json).expect("report should deserialise");
        assert_eq!(info.status, HealthStatus::Up);
        assert_eq!(info.checks.len(), 2);
        assert_eq!(info.checks[1].status, HealthStatus::Down);
        assert!(info.checks[1].data.is_some());
    }
}
