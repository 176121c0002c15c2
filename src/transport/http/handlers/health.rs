use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (DB reachable)", body = ApiResponse),
        (status = 503, description = "Service is unhealthy (DB unreachable)", body = ApiResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse>) {
    // Reported as-is; a failed gateway does not make the service unhealthy,
    // the chain endpoints degrade to 503 on their own.
    let gateway = state.gateway.status_label().await;

    match sqlx::query("SELECT 1").execute(state.store.pool()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success_data(serde_json::json!({
                "database": "ok",
                "gateway": gateway,
            }))),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::error(format!("DB ping failed: {}", e))),
        ),
    }
}
