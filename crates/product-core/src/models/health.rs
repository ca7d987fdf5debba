use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Body of the liveness and readiness checks.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn new(status: &str, service: &str) -> Self {
        Self {
            status: status.to_string(),
            service: service.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_rfc3339() {
        let response = HealthResponse::new("healthy", "product-service");

        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "product-service");
        chrono::DateTime::parse_from_rfc3339(&response.timestamp).expect("rfc3339 timestamp");
    }
}
