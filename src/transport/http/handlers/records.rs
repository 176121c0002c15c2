//! CRUD endpoints for the mirrored record tables.
//!
//! Plain bookkeeping: these handlers never call the gateway, and the gateway
//! never calls these tables.

use crate::domain::records::{
    NewBookingRecord, NewChainTransactionRecord, NewPropertyRecord, NewReviewRecord,
    NewUserRecord, StatusUpdate, UserVerification, BOOKING_STATUSES, TRANSACTION_KINDS,
    TRANSACTION_STATUSES,
};
use crate::infra::ethereum::parse_address;
use crate::transport::http::handlers::common::{db_failure, error_json, json_400};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value as JsonValue;

const DEFAULT_LIST_LIMIT: i64 = 100;

fn created(data: impl serde::Serialize) -> (StatusCode, Json<ApiResponse>) {
    let data = serde_json::to_value(&data).unwrap_or(JsonValue::Null);
    (StatusCode::CREATED, Json(ApiResponse::success_data(data)))
}

fn fetched(data: impl serde::Serialize) -> (StatusCode, Json<ApiResponse>) {
    let data = serde_json::to_value(&data).unwrap_or(JsonValue::Null);
    (StatusCode::OK, Json(ApiResponse::success_data(data)))
}

fn not_found(what: &str) -> (StatusCode, Json<ApiResponse>) {
    error_json(StatusCode::NOT_FOUND, format!("{} not found", what))
}

fn check_address(field: &str, value: &str) -> Result<(), (StatusCode, Json<ApiResponse>)> {
    parse_address(value)
        .map(|_| ())
        .map_err(|e| error_json(StatusCode::BAD_REQUEST, format!("{}: {}", field, e)))
}

fn check_one_of(
    field: &str,
    value: &str,
    allowed: &[&str],
) -> Result<(), (StatusCode, Json<ApiResponse>)> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(error_json(
            StatusCode::BAD_REQUEST,
            format!("{} must be one of: {}", field, allowed.join(", ")),
        ))
    }
}

// --- users ---

#[utoipa::path(
    post,
    path = "/api/records/users",
    request_body = NewUserRecord,
    responses(
        (status = 201, description = "Mirrored user created", body = ApiResponse),
        (status = 400, description = "Invalid body", body = ApiResponse),
        (status = 409, description = "Address already mirrored", body = ApiResponse)
    )
)]
pub async fn create_user_record_handler(
    State(state): State<AppState>,
    request: Result<Json<NewUserRecord>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(user) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e, r#"{"wallet_address": ..., "username": ..., "email": ...}"#),
    };
    if let Err(resp) = check_address("wallet_address", &user.wallet_address) {
        return resp;
    }

    match state.store.insert_user(&user).await {
        Ok(record) => created(record),
        Err(err) => db_failure(err),
    }
}

#[utoipa::path(
    get,
    path = "/api/records/users/{address}",
    params(("address" = String, Path, description = "Mirrored wallet address")),
    responses(
        (status = 200, description = "Mirrored user", body = ApiResponse),
        (status = 404, description = "No such user", body = ApiResponse)
    )
)]
pub async fn get_user_record_handler(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    match state.store.user_by_address(&address).await {
        Ok(Some(record)) => fetched(record),
        Ok(None) => not_found("user"),
        Err(err) => db_failure(err),
    }
}

#[utoipa::path(
    post,
    path = "/api/records/users/{address}/verify",
    params(("address" = String, Path, description = "Mirrored wallet address")),
    request_body = UserVerification,
    responses(
        (status = 200, description = "User marked identity-verified", body = ApiResponse),
        (status = 400, description = "Invalid body", body = ApiResponse),
        (status = 404, description = "No such user", body = ApiResponse)
    )
)]
pub async fn verify_user_record_handler(
    State(state): State<AppState>,
    Path(address): Path<String>,
    request: Result<Json<UserVerification>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(verification) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e, r#"{"identity_verification_hash": ...}"#),
    };
    if verification.identity_verification_hash.trim().is_empty() {
        return error_json(
            StatusCode::BAD_REQUEST,
            "identity_verification_hash must not be empty",
        );
    }

    match state
        .store
        .mark_user_verified(&address, &verification.identity_verification_hash)
        .await
    {
        Ok(Some(record)) => fetched(record),
        Ok(None) => not_found("user"),
        Err(err) => db_failure(err),
    }
}

// --- properties ---

#[utoipa::path(
    post,
    path = "/api/records/properties",
    request_body = NewPropertyRecord,
    responses(
        (status = 201, description = "Mirrored property created", body = ApiResponse),
        (status = 400, description = "Invalid body", body = ApiResponse)
    )
)]
pub async fn create_property_record_handler(
    State(state): State<AppState>,
    request: Result<Json<NewPropertyRecord>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(property) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_400(
                e,
                r#"{"owner_address": ..., "title": ..., "description": ..., "price_per_night": ...}"#,
            )
        }
    };
    if let Err(resp) = check_address("owner_address", &property.owner_address) {
        return resp;
    }
    if property.price_per_night < 0 {
        return error_json(StatusCode::BAD_REQUEST, "price_per_night must not be negative");
    }

    match state.store.insert_property(&property).await {
        Ok(record) => created(record),
        Err(err) => db_failure(err),
    }
}

#[utoipa::path(
    get,
    path = "/api/records/properties",
    responses((status = 200, description = "Most recent mirrored properties", body = ApiResponse))
)]
pub async fn list_property_records_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse>) {
    match state.store.list_properties(DEFAULT_LIST_LIMIT).await {
        Ok(records) => fetched(records),
        Err(err) => db_failure(err),
    }
}

#[utoipa::path(
    get,
    path = "/api/records/properties/{id}",
    params(("id" = i64, Path, description = "Local property id")),
    responses(
        (status = 200, description = "Mirrored property", body = ApiResponse),
        (status = 404, description = "No such property", body = ApiResponse)
    )
)]
pub async fn get_property_record_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<ApiResponse>) {
    match state.store.property_by_id(id).await {
        Ok(Some(record)) => fetched(record),
        Ok(None) => not_found("property"),
        Err(err) => db_failure(err),
    }
}

// --- bookings ---

#[utoipa::path(
    post,
    path = "/api/records/bookings",
    request_body = NewBookingRecord,
    responses(
        (status = 201, description = "Mirrored booking created (status starts at 'pending')", body = ApiResponse),
        (status = 400, description = "Invalid body or unknown property", body = ApiResponse)
    )
)]
pub async fn create_booking_record_handler(
    State(state): State<AppState>,
    request: Result<Json<NewBookingRecord>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(booking) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_400(
                e,
                r#"{"property_id": ..., "tenant_address": ..., "check_in": ..., "check_out": ..., "total_price": ...}"#,
            )
        }
    };
    if let Err(resp) = check_address("tenant_address", &booking.tenant_address) {
        return resp;
    }
    if booking.check_out < booking.check_in {
        return error_json(StatusCode::BAD_REQUEST, "check_out must not precede check_in");
    }
    if booking.total_price < 0 {
        return error_json(StatusCode::BAD_REQUEST, "total_price must not be negative");
    }

    match state.store.insert_booking(&booking).await {
        Ok(record) => created(record),
        Err(err) => db_failure(err),
    }
}

#[utoipa::path(
    get,
    path = "/api/records/bookings/{id}",
    params(("id" = i64, Path, description = "Local booking id")),
    responses(
        (status = 200, description = "Mirrored booking", body = ApiResponse),
        (status = 404, description = "No such booking", body = ApiResponse)
    )
)]
pub async fn get_booking_record_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<ApiResponse>) {
    match state.store.booking_by_id(id).await {
        Ok(Some(record)) => fetched(record),
        Ok(None) => not_found("booking"),
        Err(err) => db_failure(err),
    }
}

#[utoipa::path(
    post,
    path = "/api/records/bookings/{id}/status",
    params(("id" = i64, Path, description = "Local booking id")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse),
        (status = 400, description = "Unknown status value", body = ApiResponse),
        (status = 404, description = "No such booking", body = ApiResponse)
    )
)]
pub async fn update_booking_status_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    request: Result<Json<StatusUpdate>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(update) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e, r#"{"status": ...}"#),
    };
    if let Err(resp) = check_one_of("status", &update.status, BOOKING_STATUSES) {
        return resp;
    }

    match state.store.set_booking_status(id, &update.status).await {
        Ok(Some(record)) => fetched(record),
        Ok(None) => not_found("booking"),
        Err(err) => db_failure(err),
    }
}

#[utoipa::path(
    get,
    path = "/api/records/bookings/{id}/reviews",
    params(("id" = i64, Path, description = "Local booking id")),
    responses((status = 200, description = "Reviews attached to the booking", body = ApiResponse))
)]
pub async fn list_booking_reviews_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<ApiResponse>) {
    match state.store.reviews_for_booking(id).await {
        Ok(records) => fetched(records),
        Err(err) => db_failure(err),
    }
}

// --- reviews ---

#[utoipa::path(
    post,
    path = "/api/records/reviews",
    request_body = NewReviewRecord,
    responses(
        (status = 201, description = "Mirrored review created", body = ApiResponse),
        (status = 400, description = "Invalid body or unknown booking", body = ApiResponse)
    )
)]
pub async fn create_review_record_handler(
    State(state): State<AppState>,
    request: Result<Json<NewReviewRecord>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(review) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_400(
                e,
                r#"{"booking_id": ..., "reviewer_address": ..., "receiver_address": ..., "rating": ..., "comment": ...}"#,
            )
        }
    };
    if let Err(resp) = check_address("reviewer_address", &review.reviewer_address) {
        return resp;
    }
    if let Err(resp) = check_address("receiver_address", &review.receiver_address) {
        return resp;
    }
    if !(1..=5).contains(&review.rating) {
        return error_json(StatusCode::BAD_REQUEST, "rating must be between 1 and 5");
    }

    match state.store.insert_review(&review).await {
        Ok(record) => created(record),
        Err(err) => db_failure(err),
    }
}

// --- chain transactions ---

#[utoipa::path(
    post,
    path = "/api/records/transactions",
    request_body = NewChainTransactionRecord,
    responses(
        (status = 201, description = "Transaction recorded (status starts at 'pending')", body = ApiResponse),
        (status = 400, description = "Invalid body", body = ApiResponse),
        (status = 409, description = "Hash already recorded", body = ApiResponse)
    )
)]
pub async fn create_transaction_record_handler(
    State(state): State<AppState>,
    request: Result<Json<NewChainTransactionRecord>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(tx) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_400(e, r#"{"sender_address": ..., "kind": ..., "tx_hash": ...}"#)
        }
    };
    if let Err(resp) = check_address("sender_address", &tx.sender_address) {
        return resp;
    }
    if let Err(resp) = check_one_of("kind", &tx.kind, TRANSACTION_KINDS) {
        return resp;
    }
    if !crate::domain::records::is_tx_hash(&tx.tx_hash) {
        return error_json(
            StatusCode::BAD_REQUEST,
            "tx_hash must be a 0x-prefixed 32-byte hex string",
        );
    }

    match state.store.insert_transaction(&tx).await {
        Ok(record) => created(record),
        Err(err) => db_failure(err),
    }
}

#[utoipa::path(
    get,
    path = "/api/records/transactions/{hash}",
    params(("hash" = String, Path, description = "Transaction hash")),
    responses(
        (status = 200, description = "Recorded transaction", body = ApiResponse),
        (status = 404, description = "No such transaction", body = ApiResponse)
    )
)]
pub async fn get_transaction_record_handler(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    match state.store.transaction_by_hash(&hash).await {
        Ok(Some(record)) => fetched(record),
        Ok(None) => not_found("transaction"),
        Err(err) => db_failure(err),
    }
}

#[utoipa::path(
    post,
    path = "/api/records/transactions/{hash}/status",
    params(("hash" = String, Path, description = "Transaction hash")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Status updated (confirmed_at stamped on first confirm)", body = ApiResponse),
        (status = 400, description = "Unknown status value", body = ApiResponse),
        (status = 404, description = "No such transaction", body = ApiResponse)
    )
)]
pub async fn update_transaction_status_handler(
    State(state): State<AppState>,
    Path(hash): Path<String>,
    request: Result<Json<StatusUpdate>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(update) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e, r#"{"status": ...}"#),
    };
    if let Err(resp) = check_one_of("status", &update.status, TRANSACTION_STATUSES) {
        return resp;
    }

    match state.store.set_transaction_status(&hash, &update.status).await {
        Ok(Some(record)) => fetched(record),
        Ok(None) => not_found("transaction"),
        Err(err) => db_failure(err),
    }
}
