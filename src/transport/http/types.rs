use crate::domain::chain::TransactionParams;
use crate::infra::ethereum::ContractGateway;
use crate::storage::records::RecordStore;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

/// Injected into every handler: one shared gateway and one shared pool per
/// process. No global mutable state.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ContractGateway>,
    pub store: Arc<RecordStore>,
}

/// Uniform response envelope: `status` is `"success"` or `"error"`; errors
/// always carry `message`; reads put their payload in `data`;
/// write-preparation endpoints put the unsigned descriptor in
/// `transaction_params`.
#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_params: Option<TransactionParams>,
}

impl ApiResponse {
    pub fn success_data(data: JsonValue) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            data: Some(data),
            transaction_params: None,
        }
    }

    pub fn success_transaction(message: &str, params: TransactionParams) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.to_string()),
            data: None,
            transaction_params: Some(params),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
            data: None,
            transaction_params: None,
        }
    }
}

// Write-preparation request bodies. Numeric fields are accepted as JSON
// numbers or numeric strings (coerced server-side); `fromAddress` is only
// used for gas estimation and is always optional.

#[derive(Deserialize, Debug, ToSchema)]
pub struct PrepareUserRegistrationRequest {
    pub name: String,
    pub email: String,
    #[serde(rename = "fromAddress")]
    pub from_address: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct PreparePropertyRegistrationRequest {
    pub title: String,
    pub description: String,
    /// uint256 price in the smallest unit; number or decimal string.
    #[schema(value_type = Object)]
    pub price: JsonValue,
    #[serde(rename = "fromAddress")]
    pub from_address: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct PrepareBookingCreationRequest {
    #[schema(value_type = Object)]
    pub property_id: JsonValue,
    #[schema(value_type = Object)]
    pub start_date: JsonValue,
    #[schema(value_type = Object)]
    pub end_date: JsonValue,
    /// Optional wei to attach if the booking method is payable.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub value: Option<JsonValue>,
    #[serde(rename = "fromAddress")]
    pub from_address: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct PrepareBookingActionRequest {
    #[schema(value_type = Object)]
    pub booking_id: JsonValue,
    #[serde(rename = "fromAddress")]
    pub from_address: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct PrepareReviewSubmissionRequest {
    #[schema(value_type = Object)]
    pub property_id: JsonValue,
    #[schema(value_type = Object)]
    pub rating: JsonValue,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "fromAddress")]
    pub from_address: Option<String>,
}
