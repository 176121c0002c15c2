use crate::infra::ethereum::GatewayError;
use crate::transport::http::types::ApiResponse;
use alloy_primitives::U256;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value as JsonValue;

pub fn error_json(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ApiResponse>) {
    (status, Json(ApiResponse::error(message)))
}

/// Malformed or incomplete JSON body. Rejected before the gateway is touched.
pub fn json_400(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    error_json(
        StatusCode::BAD_REQUEST,
        format!("Invalid JSON body: {} (expected: {})", err, expected),
    )
}

/// Maps a gateway failure on a read path. Not-ready is always 503 so clients
/// can tell an outage from a bad key; contract-level failures use the
/// caller-chosen status (404 for keyed lookups, 500 for aggregates).
pub fn read_failure(
    err: GatewayError,
    contract_error_status: StatusCode,
) -> (StatusCode, Json<ApiResponse>) {
    let status = match &err {
        GatewayError::Configuration(_) | GatewayError::Connection(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
        GatewayError::ContractCall(_) => contract_error_status,
    };
    error_json(status, err.to_string())
}

/// Maps a gateway failure on a write-preparation path: 503 when not ready,
/// 400 for everything else (bad fields and reverts alike).
pub fn prepare_failure(err: GatewayError) -> (StatusCode, Json<ApiResponse>) {
    if err.is_not_ready() {
        return error_json(StatusCode::SERVICE_UNAVAILABLE, err.to_string());
    }
    if matches!(err, GatewayError::Validation(_)) {
        return error_json(StatusCode::BAD_REQUEST, err.to_string());
    }
    error_json(
        StatusCode::BAD_REQUEST,
        format!("Failed to prepare transaction: {}", err),
    )
}

/// Maps a storage failure on a record path.
pub fn db_failure(err: sqlx::Error) -> (StatusCode, Json<ApiResponse>) {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return error_json(StatusCode::CONFLICT, "record already exists");
        }
        if db_err.is_foreign_key_violation() {
            return error_json(StatusCode::BAD_REQUEST, "referenced record does not exist");
        }
    }
    error_json(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("database error: {}", err),
    )
}

/// Accepts a JSON number or a numeric string (e.g. `"1440"` -> 1440), the
/// shapes front-ends actually send.
pub fn coerce_u64(field: &str, value: &JsonValue) -> Result<u64, String> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    if let Some(s) = value.as_str() {
        if let Ok(n) = s.trim().parse::<u64>() {
            return Ok(n);
        }
    }
    Err(format!("{} must be a non-negative integer", field))
}

/// Like [`coerce_u64`] but full uint256 range, for wei amounts and prices.
pub fn coerce_u256(field: &str, value: &JsonValue) -> Result<U256, String> {
    if let Some(n) = value.as_u64() {
        return Ok(U256::from(n));
    }
    if let Some(s) = value.as_str() {
        if let Ok(n) = s.trim().parse::<U256>() {
            return Ok(n);
        }
    }
    Err(format!("{} must be a non-negative integer", field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_numbers_and_numeric_strings() {
        assert_eq!(coerce_u64("d", &json!(42)).unwrap(), 42);
        assert_eq!(coerce_u64("d", &json!("1440")).unwrap(), 1440);
        assert_eq!(coerce_u64("d", &json!(" 7 ")).unwrap(), 7);
    }

    #[test]
    fn rejects_negative_and_non_numeric() {
        assert!(coerce_u64("d", &json!(-1)).is_err());
        assert!(coerce_u64("d", &json!(1.5)).is_err());
        assert!(coerce_u64("d", &json!("abc")).is_err());
        assert!(coerce_u64("d", &json!(null)).is_err());
        assert!(coerce_u64("d", &json!({})).is_err());
    }

    #[test]
    fn u256_coercion_covers_wei_scale() {
        let wei = "12000000000000000000"; // > u64::MAX
        assert_eq!(
            coerce_u256("value", &json!(wei)).unwrap().to_string(),
            wei
        );
        assert!(coerce_u256("value", &json!("-3")).is_err());
    }
}
