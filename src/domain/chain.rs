//! JSON-facing views of on-chain data.
//!
//! Field names mirror the contract structs (camelCase on the wire). 256-bit
//! amounts (prices, wei values) are serialized as decimal strings so clients
//! never hit JSON number precision limits; counters and epoch timestamps are
//! clamped into `u64`.

use alloy_primitives::{Bytes, U256};
use serde::Serialize;
use utoipa::ToSchema;

use crate::infra::ethereum::abi;

/// Saturating narrowing for on-chain counters/timestamps that fit `u64` in
/// any realistic deployment.
pub fn clamp_u64(value: U256) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

fn clamp_u8(value: U256) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

/// Serializes a `U256` as a decimal string (`"12000000000000000000"`).
pub mod u256_dec {
    use alloy_primitives::U256;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainUser {
    pub name: String,
    pub email: String,
    pub is_verified: bool,
    pub reputation: u64,
    pub join_date: u64,
}

impl From<abi::User> for ChainUser {
    fn from(user: abi::User) -> Self {
        Self {
            name: user.name,
            email: user.email,
            is_verified: user.isVerified,
            reputation: clamp_u64(user.reputation),
            join_date: clamp_u64(user.joinDate),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainProperty {
    pub owner: String,
    pub title: String,
    pub description: String,
    #[serde(serialize_with = "u256_dec::serialize")]
    #[schema(value_type = String)]
    pub price: U256,
    pub is_available: bool,
    pub booking_ids: Vec<u64>,
    pub reputation: u64,
}

impl From<abi::Property> for ChainProperty {
    fn from(property: abi::Property) -> Self {
        Self {
            owner: property.owner.to_checksum(None),
            title: property.title,
            description: property.description,
            price: property.price,
            is_available: property.isAvailable,
            booking_ids: property.bookingIds.into_iter().map(clamp_u64).collect(),
            reputation: clamp_u64(property.reputation),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainBooking {
    pub tenant: String,
    pub property_id: u64,
    pub start_date: u64,
    pub end_date: u64,
    #[serde(serialize_with = "u256_dec::serialize")]
    #[schema(value_type = String)]
    pub total_price: U256,
    pub is_confirmed: bool,
    pub is_completed: bool,
}

impl From<abi::Booking> for ChainBooking {
    fn from(booking: abi::Booking) -> Self {
        Self {
            tenant: booking.tenant.to_checksum(None),
            property_id: clamp_u64(booking.propertyId),
            start_date: clamp_u64(booking.startDate),
            end_date: clamp_u64(booking.endDate),
            total_price: booking.totalPrice,
            is_confirmed: booking.isConfirmed,
            is_completed: booking.isCompleted,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainReview {
    pub reviewer: String,
    pub property_id: u64,
    pub rating: u8,
    pub comment: String,
    pub timestamp: u64,
}

impl From<abi::Review> for ChainReview {
    fn from(review: abi::Review) -> Self {
        Self {
            reviewer: review.reviewer.to_checksum(None),
            property_id: clamp_u64(review.propertyId),
            rating: clamp_u8(review.rating),
            comment: review.comment,
            timestamp: clamp_u64(review.timestamp),
        }
    }
}

/// Unsigned transaction descriptor handed to the caller's wallet.
///
/// Deliberately excludes nonce, gas price and `from`: those belong to the
/// wallet. `error` is always present (and `null` on success) so wallet-side
/// code can check a single field.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransactionParams {
    /// Checksummed contract address.
    pub to: String,
    /// ABI-encoded calldata, 0x-prefixed.
    #[schema(value_type = String)]
    pub data: Bytes,
    pub estimated_gas: u64,
    /// Wei to attach, decimal string.
    #[serde(serialize_with = "u256_dec::serialize")]
    #[schema(value_type = String)]
    pub value: U256,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;

    #[test]
    fn clamp_saturates() {
        assert_eq!(clamp_u64(U256::from(7u64)), 7);
        assert_eq!(clamp_u64(U256::MAX), u64::MAX);
        assert_eq!(clamp_u8(U256::from(300u64)), u8::MAX);
    }

    #[test]
    fn transaction_params_serialize_with_explicit_null_error() {
        let params = TransactionParams {
            to: Address::ZERO.to_checksum(None),
            data: vec![0xa8, 0x7d, 0x94, 0x2c].into(),
            estimated_gas: 100_000,
            value: U256::ZERO,
            error: None,
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["data"], "0xa87d942c");
        assert_eq!(json["estimated_gas"], 100_000);
        assert_eq!(json["value"], "0");
        assert!(json["error"].is_null());
    }

    #[test]
    fn chain_user_uses_camel_case_keys() {
        let user = ChainUser {
            name: "Alice".to_string(),
            email: "a@example.com".to_string(),
            is_verified: true,
            reputation: 10,
            join_date: 1_700_000_000,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["isVerified"], true);
        assert_eq!(json["joinDate"], 1_700_000_000u64);
    }

    #[test]
    fn big_price_survives_as_decimal_string() {
        let property = ChainProperty::from(abi::Property {
            owner: Address::ZERO,
            title: "Loft".to_string(),
            description: "Sunny".to_string(),
            price: U256::from(10u8).pow(U256::from(19u8)), // 10 ETH in wei
            isAvailable: true,
            bookingIds: vec![U256::from(1u8), U256::from(2u8)],
            reputation: U256::from(4u8),
        });
        let json = serde_json::to_value(&property).unwrap();
        assert_eq!(json["price"], "10000000000000000000");
        assert_eq!(json["bookingIds"], serde_json::json!([1, 2]));
    }
}
