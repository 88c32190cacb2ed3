//! Health and probe endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::app::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub success: bool,
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseHealth {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
}

async fn ping_database(state: &AppState) -> DatabaseHealth {
    let start = std::time::Instant::now();
    let connected = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();

    DatabaseHealth {
        connected,
        latency_ms: connected.then(|| start.elapsed().as_millis() as u64),
    }
}

/// `GET /api/health`
pub async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = ping_database(&state).await;

    let (code, status) = if database.connected {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        code,
        Json(HealthResponse {
            success: database.connected,
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

/// `GET /api/health/live`: the process is up.
pub async fn live() -> Json<ProbeResponse> {
    Json(ProbeResponse { status: "alive" })
}

/// `GET /api/health/ready`: the service can take traffic.
pub async fn ready(State(state): State<AppState>) -> Result<Json<ProbeResponse>, StatusCode> {
    if ping_database(&state).await.connected {
        Ok(Json(ProbeResponse { status: "ready" }))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy_response_shape() {
        let response = HealthResponse {
            success: true,
            status: "healthy",
            version: "0.4.0",
            database: DatabaseHealth {
                connected: true,
                latency_ms: Some(3),
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["database"]["latency_ms"], 3);
    }

    #[test]
    fn test_disconnected_database_omits_latency() {
        let json = serde_json::to_value(DatabaseHealth {
            connected: false,
            latency_ms: None,
        })
        .unwrap();
        assert_eq!(json["connected"], false);
        assert!(json.get("latency_ms").is_none());
    }
}
