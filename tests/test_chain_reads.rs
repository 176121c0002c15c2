//! Read endpoints against a mocked chain node: struct decoding, status-code
//! mapping, idempotence.

mod common;

use alloy_primitives::{Address, U256};
use alloy_sol_types::{SolCall, SolValue};
use common::MockChain;
use rental_platform_api::infra::ethereum::abi::{self, RentalPlatform};
use serde_json::Value as JsonValue;

const ALICE: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";

async fn get_json(url: &str) -> (reqwest::StatusCode, JsonValue) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn user_info_decodes_the_on_chain_struct() {
    let user = abi::User {
        name: "Alice".to_string(),
        email: "a@example.com".to_string(),
        isVerified: true,
        reputation: U256::from(42u64),
        joinDate: U256::from(1_700_000_000u64),
    };
    let server = MockChain::new()
        .with_call_result(RentalPlatform::getUserInfoCall::SELECTOR, user.abi_encode())
        .start()
        .await;
    let base = common::spawn_app(&server.uri()).await;

    let (status, body) = get_json(&format!("{}/api/user/{}", base, ALICE)).await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "success");
    let data = &body["data"];
    assert_eq!(data["name"], "Alice");
    assert_eq!(data["email"], "a@example.com");
    assert_eq!(data["isVerified"], true);
    assert_eq!(data["reputation"], 42);
    assert_eq!(data["joinDate"], 1_700_000_000u64);
}

#[tokio::test]
async fn malformed_address_is_rejected_before_any_rpc_call() {
    let server = MockChain::new().start().await;
    let base = common::spawn_app(&server.uri()).await;

    let (status, body) = get_json(&format!("{}/api/user/0xABC", base)).await;

    assert_eq!(status, 400);
    assert_eq!(body["status"], "error");
    assert!(!common::saw_rpc_method(&server, "eth_call").await);
    assert!(!common::saw_rpc_method(&server, "eth_chainId").await);
}

#[tokio::test]
async fn bad_checksum_is_rejected() {
    let server = MockChain::new().start().await;
    let base = common::spawn_app(&server.uri()).await;

    // Valid hex, wrong EIP-55 casing on the last character.
    let (status, _) = get_json(&format!(
        "{}/api/user/0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD",
        base
    ))
    .await;

    assert_eq!(status, 400);
}

#[tokio::test]
async fn property_info_maps_reverts_to_not_found() {
    // No eth_call result configured: the mock node reverts every read.
    let server = MockChain::new().start().await;
    let base = common::spawn_app(&server.uri()).await;

    let (status, body) = get_json(&format!("{}/api/property/9", base)).await;

    assert_eq!(status, 404);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn property_info_decodes_dynamic_fields() {
    let property = abi::Property {
        owner: ALICE.parse::<Address>().unwrap(),
        title: "Harbor loft".to_string(),
        description: "Two rooms, bright".to_string(),
        price: U256::from(10u8).pow(U256::from(19u8)),
        isAvailable: true,
        bookingIds: vec![U256::from(1u8), U256::from(4u8)],
        reputation: U256::from(5u8),
    };
    let server = MockChain::new()
        .with_call_result(
            RentalPlatform::getPropertyInfoCall::SELECTOR,
            property.abi_encode(),
        )
        .start()
        .await;
    let base = common::spawn_app(&server.uri()).await;

    let (status, body) = get_json(&format!("{}/api/property/2", base)).await;

    assert_eq!(status, 200);
    let data = &body["data"];
    assert_eq!(data["title"], "Harbor loft");
    assert_eq!(data["price"], "10000000000000000000");
    assert_eq!(data["bookingIds"], serde_json::json!([1, 4]));
    assert_eq!(data["isAvailable"], true);
}

#[tokio::test]
async fn booking_info_decodes_the_static_struct() {
    let booking = abi::Booking {
        tenant: ALICE.parse::<Address>().unwrap(),
        propertyId: U256::from(2u8),
        startDate: U256::from(1_900_000_000u64),
        endDate: U256::from(1_900_600_000u64),
        totalPrice: U256::from(500_000u64),
        isConfirmed: true,
        isCompleted: false,
    };
    let server = MockChain::new()
        .with_call_result(
            RentalPlatform::getBookingInfoCall::SELECTOR,
            booking.abi_encode(),
        )
        .start()
        .await;
    let base = common::spawn_app(&server.uri()).await;

    let (status, body) = get_json(&format!("{}/api/booking/7", base)).await;

    assert_eq!(status, 200);
    let data = &body["data"];
    assert_eq!(data["propertyId"], 2);
    assert_eq!(data["isConfirmed"], true);
    assert_eq!(data["isCompleted"], false);
    assert_eq!(data["totalPrice"], "500000");
}

#[tokio::test]
async fn property_reviews_decode_as_a_list() {
    let reviews = vec![
        abi::Review {
            reviewer: ALICE.parse::<Address>().unwrap(),
            propertyId: U256::from(2u8),
            rating: U256::from(5u8),
            comment: "Great stay".to_string(),
            timestamp: U256::from(1_700_000_000u64),
        },
        abi::Review {
            reviewer: ALICE.parse::<Address>().unwrap(),
            propertyId: U256::from(2u8),
            rating: U256::from(3u8),
            comment: "Noisy street".to_string(),
            timestamp: U256::from(1_700_100_000u64),
        },
    ];
    let server = MockChain::new()
        .with_call_result(
            RentalPlatform::getPropertyReviewsCall::SELECTOR,
            reviews.abi_encode(),
        )
        .start()
        .await;
    let base = common::spawn_app(&server.uri()).await;

    let (status, body) = get_json(&format!("{}/api/property/2/reviews", base)).await;

    assert_eq!(status, 200);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["rating"], 5);
    assert_eq!(data[1]["comment"], "Noisy street");
}

#[tokio::test]
async fn property_count_is_idempotent() {
    let server = MockChain::new()
        .with_call_result(
            RentalPlatform::propertyCountCall::SELECTOR,
            U256::from(7u64).abi_encode(),
        )
        .start()
        .await;
    let base = common::spawn_app(&server.uri()).await;
    let url = format!("{}/api/property/count", base);

    let (status_a, first) = get_json(&url).await;
    let (status_b, second) = get_json(&url).await;

    assert_eq!(status_a, 200);
    assert_eq!(status_b, 200);
    assert_eq!(first["data"]["property_count"], 7);
    assert_eq!(first, second);
}

#[tokio::test]
async fn count_failure_maps_to_internal_error() {
    let server = MockChain::new().start().await;
    let base = common::spawn_app(&server.uri()).await;

    let (status, _) = get_json(&format!("{}/api/property/count", base)).await;

    assert_eq!(status, 500);
}

#[tokio::test]
async fn negative_property_id_is_rejected() {
    let server = MockChain::new().start().await;
    let base = common::spawn_app(&server.uri()).await;

    let (status, body) = get_json(&format!("{}/api/property/-1", base)).await;

    assert_eq!(status, 400);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn all_read_endpoints_report_503_when_gateway_cannot_initialize() {
    let base = common::spawn_app("not-a-url").await;

    for path in [
        format!("/api/user/{}", ALICE),
        "/api/property/1".to_string(),
        "/api/property/count".to_string(),
        "/api/booking/1".to_string(),
    ] {
        let (status, body) = get_json(&format!("{}{}", base, path)).await;
        assert_eq!(status, 503, "{}", path);
        assert_eq!(body["status"], "error", "{}", path);
        assert!(body["message"].as_str().unwrap().contains("RPC URL"), "{}", path);
    }
}
