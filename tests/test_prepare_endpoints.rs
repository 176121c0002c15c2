//! Write-preparation endpoints against a mocked chain node: descriptor shape,
//! validation short-circuits, revert surfacing, readiness reporting.

mod common;

use alloy_primitives::hex;
use alloy_sol_types::{Revert, SolCall, SolError};
use common::MockChain;
use rental_platform_api::infra::ethereum::abi::RentalPlatform;
use serde_json::{json, Value as JsonValue};

async fn post_json(url: &str, body: JsonValue) -> (reqwest::StatusCode, JsonValue) {
    let response = reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

fn selector_hex(selector: [u8; 4]) -> String {
    format!("0x{}", hex::encode(selector))
}

#[tokio::test]
async fn user_registration_returns_full_descriptor() {
    let server = MockChain::new().start().await;
    let base = common::spawn_app(&server.uri()).await;

    let (status, body) = post_json(
        &format!("{}/api/prepare/user-registration", base),
        json!({ "name": "Alice", "email": "a@example.com" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "success");
    let params = &body["transaction_params"];
    assert_eq!(params["to"], common::checksummed_contract());
    let data = params["data"].as_str().unwrap();
    assert!(data.starts_with(&selector_hex(RentalPlatform::registerUserCall::SELECTOR)));
    assert!(params["estimated_gas"].as_u64().unwrap() > 0);
    assert_eq!(params["value"], "0");
    assert!(params["error"].is_null());
}

#[tokio::test]
async fn missing_required_field_is_rejected_before_any_network_call() {
    let server = MockChain::new().start().await;
    let base = common::spawn_app(&server.uri()).await;

    let (status, body) = post_json(
        &format!("{}/api/prepare/user-registration", base),
        json!({ "name": "Alice" }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["status"], "error");
    assert!(!common::saw_rpc_method(&server, "eth_estimateGas").await);
    assert!(!common::saw_rpc_method(&server, "eth_chainId").await);
}

#[tokio::test]
async fn empty_name_is_rejected_locally() {
    let server = MockChain::new().start().await;
    let base = common::spawn_app(&server.uri()).await;

    let (status, _) = post_json(
        &format!("{}/api/prepare/user-registration", base),
        json!({ "name": "", "email": "a@example.com" }),
    )
    .await;

    assert_eq!(status, 400);
    assert!(!common::saw_rpc_method(&server, "eth_estimateGas").await);
}

#[tokio::test]
async fn review_rating_boundaries() {
    let server = MockChain::new().start().await;
    let base = common::spawn_app(&server.uri()).await;
    let url = format!("{}/api/prepare/review-submission", base);

    for rating in [0, 6] {
        let (status, body) = post_json(
            &url,
            json!({ "property_id": 1, "rating": rating, "comment": "ok" }),
        )
        .await;
        assert_eq!(status, 400, "rating {}", rating);
        assert!(body["message"].as_str().unwrap().contains("rating"));
    }

    for rating in [1, 5] {
        let (status, body) = post_json(
            &url,
            json!({ "property_id": 1, "rating": rating, "comment": "ok" }),
        )
        .await;
        assert_eq!(status, 200, "rating {}", rating);
        let data = body["transaction_params"]["data"].as_str().unwrap();
        assert!(data.starts_with(&selector_hex(RentalPlatform::submitReviewCall::SELECTOR)));
    }
}

#[tokio::test]
async fn numeric_strings_are_coerced() {
    let server = MockChain::new().start().await;
    let base = common::spawn_app(&server.uri()).await;

    let (status, body) = post_json(
        &format!("{}/api/prepare/property-registration", base),
        json!({ "title": "Loft", "description": "Sunny", "price": "12000000000000000000" }),
    )
    .await;

    assert_eq!(status, 200);
    let data = body["transaction_params"]["data"].as_str().unwrap();
    assert!(data.starts_with(&selector_hex(RentalPlatform::registerPropertyCall::SELECTOR)));
}

#[tokio::test]
async fn booking_creation_passes_value_through() {
    let server = MockChain::new().start().await;
    let base = common::spawn_app(&server.uri()).await;

    let wei = "12000000000000000000";
    let (status, body) = post_json(
        &format!("{}/api/prepare/booking-creation", base),
        json!({
            "property_id": 3,
            "start_date": 1_900_000_000u64,
            "end_date": 1_900_600_000u64,
            "value": wei,
        }),
    )
    .await;

    assert_eq!(status, 200);
    let params = &body["transaction_params"];
    let data = params["data"].as_str().unwrap();
    assert!(data.starts_with(&selector_hex(RentalPlatform::createBookingCall::SELECTOR)));
    assert_eq!(params["value"], wei);
}

#[tokio::test]
async fn booking_actions_share_the_descriptor_contract() {
    let server = MockChain::new().start().await;
    let base = common::spawn_app(&server.uri()).await;

    for (path, selector) in [
        (
            "booking-confirmation",
            RentalPlatform::confirmBookingCall::SELECTOR,
        ),
        (
            "booking-completion",
            RentalPlatform::completeBookingCall::SELECTOR,
        ),
    ] {
        let (status, body) = post_json(
            &format!("{}/api/prepare/{}", base, path),
            json!({ "booking_id": 12 }),
        )
        .await;
        assert_eq!(status, 200, "{}", path);
        let data = body["transaction_params"]["data"].as_str().unwrap();
        assert!(data.starts_with(&selector_hex(selector)), "{}", path);
    }
}

#[tokio::test]
async fn revert_reason_is_surfaced_on_estimation_failure() {
    let revert = Revert {
        reason: "User already registered".to_string(),
    }
    .abi_encode();
    let server = MockChain::new()
        .with_estimate_error("execution reverted", Some(revert))
        .start()
        .await;
    let base = common::spawn_app(&server.uri()).await;

    let (status, body) = post_json(
        &format!("{}/api/prepare/user-registration", base),
        json!({ "name": "Alice", "email": "a@example.com" }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("User already registered"));
}

#[tokio::test]
async fn bad_from_address_is_rejected() {
    let server = MockChain::new().start().await;
    let base = common::spawn_app(&server.uri()).await;

    let (status, _) = post_json(
        &format!("{}/api/prepare/user-registration", base),
        json!({ "name": "Alice", "email": "a@example.com", "fromAddress": "0x1234" }),
    )
    .await;

    assert_eq!(status, 400);
    assert!(!common::saw_rpc_method(&server, "eth_estimateGas").await);
}

#[tokio::test]
async fn unreachable_configuration_yields_503_with_reason() {
    let base = common::spawn_app("not-a-url").await;

    let (status, body) = post_json(
        &format!("{}/api/prepare/user-registration", base),
        json!({ "name": "Alice", "email": "a@example.com" }),
    )
    .await;

    assert_eq!(status, 503);
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("RPC URL"));
}
