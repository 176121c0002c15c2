//! Write-preparation endpoints.
//!
//! Each handler validates/coerces its fields, asks the gateway for an
//! unsigned transaction descriptor and returns it for the front-end wallet
//! to sign. Nothing here (or below) ever signs or broadcasts.

use crate::transport::http::handlers::common::{
    coerce_u256, coerce_u64, error_json, json_400, prepare_failure,
};
use crate::transport::http::types::{
    ApiResponse, AppState, PrepareBookingActionRequest, PrepareBookingCreationRequest,
    PreparePropertyRegistrationRequest, PrepareReviewSubmissionRequest,
    PrepareUserRegistrationRequest,
};
use alloy_primitives::U256;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

const SIGN_AND_SEND: &str = "Sign and send it with your wallet.";

fn prepared(action: &str, params: crate::domain::chain::TransactionParams) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success_transaction(
            &format!("{} transaction prepared. {}", action, SIGN_AND_SEND),
            params,
        )),
    )
}

#[utoipa::path(
    post,
    path = "/api/prepare/user-registration",
    request_body = PrepareUserRegistrationRequest,
    responses(
        (status = 200, description = "Unsigned registerUser transaction", body = ApiResponse),
        (status = 400, description = "Invalid body or contract rejection", body = ApiResponse),
        (status = 503, description = "Gateway not ready", body = ApiResponse)
    )
)]
pub async fn prepare_user_registration_handler(
    State(state): State<AppState>,
    request: Result<Json<PrepareUserRegistrationRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e, r#"{"name": ..., "email": ..., "fromAddress"?: ...}"#),
    };

    match state
        .gateway
        .register_user(&request.name, &request.email, request.from_address.as_deref())
        .await
    {
        Ok(params) => prepared("User registration", params),
        Err(err) => prepare_failure(err),
    }
}

#[utoipa::path(
    post,
    path = "/api/prepare/property-registration",
    request_body = PreparePropertyRegistrationRequest,
    responses(
        (status = 200, description = "Unsigned registerProperty transaction", body = ApiResponse),
        (status = 400, description = "Invalid body or contract rejection", body = ApiResponse),
        (status = 503, description = "Gateway not ready", body = ApiResponse)
    )
)]
pub async fn prepare_property_registration_handler(
    State(state): State<AppState>,
    request: Result<Json<PreparePropertyRegistrationRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_400(
                e,
                r#"{"title": ..., "description": ..., "price": ..., "fromAddress"?: ...}"#,
            )
        }
    };

    let price = match coerce_u256("price", &request.price) {
        Ok(v) => v,
        Err(e) => return error_json(StatusCode::BAD_REQUEST, e),
    };

    match state
        .gateway
        .register_property(
            &request.title,
            &request.description,
            price,
            request.from_address.as_deref(),
        )
        .await
    {
        Ok(params) => prepared("Property registration", params),
        Err(err) => prepare_failure(err),
    }
}

#[utoipa::path(
    post,
    path = "/api/prepare/booking-creation",
    request_body = PrepareBookingCreationRequest,
    responses(
        (status = 200, description = "Unsigned createBooking transaction", body = ApiResponse),
        (status = 400, description = "Invalid body or contract rejection", body = ApiResponse),
        (status = 503, description = "Gateway not ready", body = ApiResponse)
    )
)]
pub async fn prepare_booking_creation_handler(
    State(state): State<AppState>,
    request: Result<Json<PrepareBookingCreationRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_400(
                e,
                r#"{"property_id": ..., "start_date": ..., "end_date": ..., "value"?: ..., "fromAddress"?: ...}"#,
            )
        }
    };

    let property_id = match coerce_u64("property_id", &request.property_id) {
        Ok(v) => v,
        Err(e) => return error_json(StatusCode::BAD_REQUEST, e),
    };
    let start_date = match coerce_u64("start_date", &request.start_date) {
        Ok(v) => v,
        Err(e) => return error_json(StatusCode::BAD_REQUEST, e),
    };
    let end_date = match coerce_u64("end_date", &request.end_date) {
        Ok(v) => v,
        Err(e) => return error_json(StatusCode::BAD_REQUEST, e),
    };
    let value = match &request.value {
        Some(raw) => match coerce_u256("value", raw) {
            Ok(v) => v,
            Err(e) => return error_json(StatusCode::BAD_REQUEST, e),
        },
        None => U256::ZERO,
    };

    match state
        .gateway
        .create_booking(
            property_id,
            start_date,
            end_date,
            value,
            request.from_address.as_deref(),
        )
        .await
    {
        Ok(params) => prepared("Booking creation", params),
        Err(err) => prepare_failure(err),
    }
}

#[utoipa::path(
    post,
    path = "/api/prepare/booking-confirmation",
    request_body = PrepareBookingActionRequest,
    responses(
        (status = 200, description = "Unsigned confirmBooking transaction", body = ApiResponse),
        (status = 400, description = "Invalid body or contract rejection", body = ApiResponse),
        (status = 503, description = "Gateway not ready", body = ApiResponse)
    )
)]
pub async fn prepare_booking_confirmation_handler(
    State(state): State<AppState>,
    request: Result<Json<PrepareBookingActionRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e, r#"{"booking_id": ..., "fromAddress"?: ...}"#),
    };

    let booking_id = match coerce_u64("booking_id", &request.booking_id) {
        Ok(v) => v,
        Err(e) => return error_json(StatusCode::BAD_REQUEST, e),
    };

    match state
        .gateway
        .confirm_booking(booking_id, request.from_address.as_deref())
        .await
    {
        Ok(params) => prepared("Booking confirmation", params),
        Err(err) => prepare_failure(err),
    }
}

#[utoipa::path(
    post,
    path = "/api/prepare/booking-completion",
    request_body = PrepareBookingActionRequest,
    responses(
        (status = 200, description = "Unsigned completeBooking transaction", body = ApiResponse),
        (status = 400, description = "Invalid body or contract rejection", body = ApiResponse),
        (status = 503, description = "Gateway not ready", body = ApiResponse)
    )
)]
pub async fn prepare_booking_completion_handler(
    State(state): State<AppState>,
    request: Result<Json<PrepareBookingActionRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e, r#"{"booking_id": ..., "fromAddress"?: ...}"#),
    };

    let booking_id = match coerce_u64("booking_id", &request.booking_id) {
        Ok(v) => v,
        Err(e) => return error_json(StatusCode::BAD_REQUEST, e),
    };

    match state
        .gateway
        .complete_booking(booking_id, request.from_address.as_deref())
        .await
    {
        Ok(params) => prepared("Booking completion", params),
        Err(err) => prepare_failure(err),
    }
}

#[utoipa::path(
    post,
    path = "/api/prepare/review-submission",
    request_body = PrepareReviewSubmissionRequest,
    responses(
        (status = 200, description = "Unsigned submitReview transaction", body = ApiResponse),
        (status = 400, description = "Invalid body or contract rejection", body = ApiResponse),
        (status = 503, description = "Gateway not ready", body = ApiResponse)
    )
)]
pub async fn prepare_review_submission_handler(
    State(state): State<AppState>,
    request: Result<Json<PrepareReviewSubmissionRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_400(
                e,
                r#"{"property_id": ..., "rating": ..., "comment"?: ..., "fromAddress"?: ...}"#,
            )
        }
    };

    let property_id = match coerce_u64("property_id", &request.property_id) {
        Ok(v) => v,
        Err(e) => return error_json(StatusCode::BAD_REQUEST, e),
    };
    let rating = match coerce_u64("rating", &request.rating) {
        Ok(v) => v,
        Err(e) => return error_json(StatusCode::BAD_REQUEST, e),
    };

    match state
        .gateway
        .submit_review(
            property_id,
            rating,
            request.comment.as_deref().unwrap_or(""),
            request.from_address.as_deref(),
        )
        .await
    {
        Ok(params) => prepared("Review submission", params),
        Err(err) => prepare_failure(err),
    }
}
