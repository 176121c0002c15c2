//! Read endpoints: decode on-chain structs and hand them back as JSON.

use crate::transport::http::handlers::common::{error_json, read_failure};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value as JsonValue;

fn success(data: impl serde::Serialize) -> (StatusCode, Json<ApiResponse>) {
    let data = serde_json::to_value(&data).unwrap_or(JsonValue::Null);
    (StatusCode::OK, Json(ApiResponse::success_data(data)))
}

/// Unpacks a numeric path segment, turning axum's rejection into the JSON
/// error shape. Also the place where "-1" and "abc" get their 400.
fn numeric_path(
    id: Result<Path<u64>, PathRejection>,
    what: &str,
) -> Result<u64, (StatusCode, Json<ApiResponse>)> {
    match id {
        Ok(Path(id)) => Ok(id),
        Err(_) => Err(error_json(
            StatusCode::BAD_REQUEST,
            format!("{} must be a non-negative integer", what),
        )),
    }
}

#[utoipa::path(
    get,
    path = "/api/user/{address}",
    params(
        ("address" = String, Path, description = "Wallet address (0x-prefixed, checksum validated when mixed-case)")
    ),
    responses(
        (status = 200, description = "On-chain user info", body = ApiResponse),
        (status = 400, description = "Malformed address", body = ApiResponse),
        (status = 404, description = "Lookup failed on-chain", body = ApiResponse),
        (status = 503, description = "Gateway not ready", body = ApiResponse)
    )
)]
pub async fn user_info_handler(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    match state.gateway.user_info(&address).await {
        Ok(user) => success(user),
        Err(err) => read_failure(err, StatusCode::NOT_FOUND),
    }
}

#[utoipa::path(
    get,
    path = "/api/property/{property_id}",
    params(
        ("property_id" = u64, Path, description = "On-chain property id")
    ),
    responses(
        (status = 200, description = "On-chain property info", body = ApiResponse),
        (status = 400, description = "Malformed id", body = ApiResponse),
        (status = 404, description = "Lookup failed on-chain", body = ApiResponse),
        (status = 503, description = "Gateway not ready", body = ApiResponse)
    )
)]
pub async fn property_info_handler(
    State(state): State<AppState>,
    property_id: Result<Path<u64>, PathRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let property_id = match numeric_path(property_id, "property id") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.gateway.property_info(property_id).await {
        Ok(property) => success(property),
        Err(err) => read_failure(err, StatusCode::NOT_FOUND),
    }
}

#[utoipa::path(
    get,
    path = "/api/property/{property_id}/reviews",
    params(
        ("property_id" = u64, Path, description = "On-chain property id")
    ),
    responses(
        (status = 200, description = "Reviews submitted for the property", body = ApiResponse),
        (status = 400, description = "Malformed id", body = ApiResponse),
        (status = 404, description = "Lookup failed on-chain", body = ApiResponse),
        (status = 503, description = "Gateway not ready", body = ApiResponse)
    )
)]
pub async fn property_reviews_handler(
    State(state): State<AppState>,
    property_id: Result<Path<u64>, PathRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let property_id = match numeric_path(property_id, "property id") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.gateway.property_reviews(property_id).await {
        Ok(reviews) => success(reviews),
        Err(err) => read_failure(err, StatusCode::NOT_FOUND),
    }
}

#[utoipa::path(
    get,
    path = "/api/booking/{booking_id}",
    params(
        ("booking_id" = u64, Path, description = "On-chain booking id")
    ),
    responses(
        (status = 200, description = "On-chain booking info", body = ApiResponse),
        (status = 400, description = "Malformed id", body = ApiResponse),
        (status = 404, description = "Lookup failed on-chain", body = ApiResponse),
        (status = 503, description = "Gateway not ready", body = ApiResponse)
    )
)]
pub async fn booking_info_handler(
    State(state): State<AppState>,
    booking_id: Result<Path<u64>, PathRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let booking_id = match numeric_path(booking_id, "booking id") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.gateway.booking_info(booking_id).await {
        Ok(booking) => success(booking),
        Err(err) => read_failure(err, StatusCode::NOT_FOUND),
    }
}

#[utoipa::path(
    get,
    path = "/api/property/count",
    responses(
        (status = 200, description = "Total number of registered properties", body = ApiResponse),
        (status = 500, description = "Count read failed", body = ApiResponse),
        (status = 503, description = "Gateway not ready", body = ApiResponse)
    )
)]
pub async fn property_count_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse>) {
    match state.gateway.property_count().await {
        Ok(count) => success(serde_json::json!({ "property_count": count })),
        Err(err) => read_failure(err, StatusCode::INTERNAL_SERVER_ERROR),
    }
}
