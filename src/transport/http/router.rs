use crate::domain::chain::{
    ChainBooking, ChainProperty, ChainReview, ChainUser, TransactionParams,
};
use crate::domain::records::{
    BookingRecord, ChainTransactionRecord, NewBookingRecord, NewChainTransactionRecord,
    NewPropertyRecord, NewReviewRecord, NewUserRecord, PropertyRecord, ReviewRecord,
    StatusUpdate, UserRecord, UserVerification,
};
use crate::transport::http::handlers::{chain, health, prepare, records};
use crate::transport::http::types::{
    ApiResponse, PrepareBookingActionRequest, PrepareBookingCreationRequest,
    PreparePropertyRegistrationRequest, PrepareReviewSubmissionRequest,
    PrepareUserRegistrationRequest,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        prepare::prepare_user_registration_handler,
        prepare::prepare_property_registration_handler,
        prepare::prepare_booking_creation_handler,
        prepare::prepare_booking_confirmation_handler,
        prepare::prepare_booking_completion_handler,
        prepare::prepare_review_submission_handler,
        chain::user_info_handler,
        chain::property_info_handler,
        chain::property_reviews_handler,
        chain::booking_info_handler,
        chain::property_count_handler,
        records::create_user_record_handler,
        records::get_user_record_handler,
        records::verify_user_record_handler,
        records::create_property_record_handler,
        records::list_property_records_handler,
        records::get_property_record_handler,
        records::create_booking_record_handler,
        records::get_booking_record_handler,
        records::update_booking_status_handler,
        records::list_booking_reviews_handler,
        records::create_review_record_handler,
        records::create_transaction_record_handler,
        records::get_transaction_record_handler,
        records::update_transaction_status_handler
    ),
    components(schemas(
        ApiResponse,
        TransactionParams,
        ChainUser,
        ChainProperty,
        ChainBooking,
        ChainReview,
        PrepareUserRegistrationRequest,
        PreparePropertyRegistrationRequest,
        PrepareBookingCreationRequest,
        PrepareBookingActionRequest,
        PrepareReviewSubmissionRequest,
        UserRecord,
        NewUserRecord,
        PropertyRecord,
        NewPropertyRecord,
        BookingRecord,
        NewBookingRecord,
        ReviewRecord,
        NewReviewRecord,
        ChainTransactionRecord,
        NewChainTransactionRecord,
        StatusUpdate,
        UserVerification
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        // Transaction preparation (wallet signs and sends)
        .route(
            "/api/prepare/user-registration",
            post(prepare::prepare_user_registration_handler),
        )
        .route(
            "/api/prepare/property-registration",
            post(prepare::prepare_property_registration_handler),
        )
        .route(
            "/api/prepare/booking-creation",
            post(prepare::prepare_booking_creation_handler),
        )
        .route(
            "/api/prepare/booking-confirmation",
            post(prepare::prepare_booking_confirmation_handler),
        )
        .route(
            "/api/prepare/booking-completion",
            post(prepare::prepare_booking_completion_handler),
        )
        .route(
            "/api/prepare/review-submission",
            post(prepare::prepare_review_submission_handler),
        )
        // On-chain reads
        .route("/api/user/:address", get(chain::user_info_handler))
        .route("/api/property/count", get(chain::property_count_handler))
        .route("/api/property/:property_id", get(chain::property_info_handler))
        .route(
            "/api/property/:property_id/reviews",
            get(chain::property_reviews_handler),
        )
        .route("/api/booking/:booking_id", get(chain::booking_info_handler))
        // Mirrored records
        .route(
            "/api/records/users",
            post(records::create_user_record_handler),
        )
        .route(
            "/api/records/users/:address",
            get(records::get_user_record_handler),
        )
        .route(
            "/api/records/users/:address/verify",
            post(records::verify_user_record_handler),
        )
        .route(
            "/api/records/properties",
            post(records::create_property_record_handler)
                .get(records::list_property_records_handler),
        )
        .route(
            "/api/records/properties/:id",
            get(records::get_property_record_handler),
        )
        .route(
            "/api/records/bookings",
            post(records::create_booking_record_handler),
        )
        .route(
            "/api/records/bookings/:id",
            get(records::get_booking_record_handler),
        )
        .route(
            "/api/records/bookings/:id/status",
            post(records::update_booking_status_handler),
        )
        .route(
            "/api/records/bookings/:id/reviews",
            get(records::list_booking_reviews_handler),
        )
        .route(
            "/api/records/reviews",
            post(records::create_review_record_handler),
        )
        .route(
            "/api/records/transactions",
            post(records::create_transaction_record_handler),
        )
        .route(
            "/api/records/transactions/:hash",
            get(records::get_transaction_record_handler),
        )
        .route(
            "/api/records/transactions/:hash/status",
            post(records::update_transaction_status_handler),
        )
        .with_state(app_state)
}
