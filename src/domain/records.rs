//! Mirrored local entities.
//!
//! These rows duplicate a subset of on-chain fields for application
//! bookkeeping (listings, dashboards, audit trails). They are never read by
//! the contract gateway; reconciling them with chain truth is the caller's
//! job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const BOOKING_STATUSES: &[&str] =
    &["pending", "confirmed", "completed", "cancelled", "disputed"];

pub const TRANSACTION_KINDS: &[&str] =
    &["identity", "property", "booking", "review", "payment", "other"];

pub const TRANSACTION_STATUSES: &[&str] = &["pending", "confirmed", "failed"];

/// `0x` + 32 bytes of hex, the only tx-hash shape the chain produces.
pub fn is_tx_hash(value: &str) -> bool {
    let Some(digits) = value.strip_prefix("0x") else {
        return false;
    };
    digits.len() == 64 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct UserRecord {
    pub id: i64,
    pub wallet_address: String,
    pub username: String,
    pub email: String,
    pub identity_verification_hash: Option<String>,
    pub is_identity_verified: bool,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewUserRecord {
    pub wallet_address: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub identity_verification_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PropertyRecord {
    pub id: i64,
    pub owner_address: String,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    /// Smallest currency unit per night, as mirrored off-chain.
    pub price_per_night: i64,
    /// Id assigned by the contract once the listing is registered on-chain.
    pub chain_property_id: Option<i64>,
    pub verification_hash: Option<String>,
    pub is_verified: bool,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewPropertyRecord {
    pub owner_address: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    pub price_per_night: i64,
    #[serde(default)]
    pub chain_property_id: Option<i64>,
    #[serde(default)]
    pub verification_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookingRecord {
    pub id: i64,
    pub property_id: i64,
    pub tenant_address: String,
    /// Check-in/check-out as epoch days or seconds; the contract treats them
    /// as opaque ordered integers and so do we.
    pub check_in: i64,
    pub check_out: i64,
    pub total_price: i64,
    pub status: String,
    pub chain_booking_id: Option<i64>,
    pub contract_hash: Option<String>,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewBookingRecord {
    pub property_id: i64,
    pub tenant_address: String,
    pub check_in: i64,
    pub check_out: i64,
    pub total_price: i64,
    #[serde(default)]
    pub chain_booking_id: Option<i64>,
    #[serde(default)]
    pub contract_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ReviewRecord {
    pub id: i64,
    pub booking_id: i64,
    pub reviewer_address: String,
    pub receiver_address: String,
    pub rating: i16,
    pub comment: String,
    pub review_hash: Option<String>,
    pub chain_verified: bool,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewReviewRecord {
    pub booking_id: i64,
    pub reviewer_address: String,
    pub receiver_address: String,
    pub rating: i16,
    pub comment: String,
    #[serde(default)]
    pub review_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ChainTransactionRecord {
    pub id: i64,
    pub sender_address: String,
    pub kind: String,
    pub tx_hash: String,
    pub related_object_id: Option<i64>,
    pub related_object_type: Option<String>,
    pub status: String,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = Option<String>)]
    pub confirmed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewChainTransactionRecord {
    pub sender_address: String,
    pub kind: String,
    pub tx_hash: String,
    #[serde(default)]
    pub related_object_id: Option<i64>,
    #[serde(default)]
    pub related_object_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StatusUpdate {
    pub status: String,
}

/// Marks a mirrored user as identity-verified once the on-chain registration
/// went through.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UserVerification {
    pub identity_verification_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_hash_shape() {
        assert!(is_tx_hash(&format!("0x{}", "ab".repeat(32))));
        assert!(!is_tx_hash(&format!("0x{}", "ab".repeat(31))));
        assert!(!is_tx_hash(&"ab".repeat(33)));
        assert!(!is_tx_hash("0xzz"));
    }
}
