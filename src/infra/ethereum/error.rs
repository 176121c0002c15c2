//! Gateway error taxonomy and best-effort revert reason extraction.

use alloy_sol_types::{Revert, SolError};
use alloy_transport::TransportError;
use thiserror::Error;

/// Errors surfaced by [`super::ContractGateway`].
///
/// `Configuration` and `Connection` mean the gateway is not ready; both are
/// retried lazily on the next call. `Validation` is raised locally before any
/// network traffic. `ContractCall` wraps an RPC-level or contract-level
/// failure, with the revert reason extracted when possible.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    ContractCall(String),
}

impl GatewayError {
    /// True for the two readiness failures that map to 503 at the HTTP layer.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Connection(_))
    }

    pub(crate) fn contract_call(context: &str, err: &TransportError) -> Self {
        let reason = revert_reason(err).unwrap_or_else(|| err.to_string());
        Self::ContractCall(format!("{}: {}", context, reason))
    }
}

/// Extracts a human-readable revert reason from a transport error.
///
/// Tries the ABI-encoded revert payload first (`Error(string)`, then the
/// generic decoder which also understands `Panic(uint256)`), and only then
/// falls back to scanning the node's error message for text after "revert".
/// The fallback is inherently best-effort and may misparse exotic messages.
pub fn revert_reason(err: &TransportError) -> Option<String> {
    let payload = err.as_error_resp()?;

    if let Some(data) = payload.as_revert_data() {
        if let Ok(decoded) = Revert::abi_decode(&data) {
            return Some(decoded.reason);
        }
        if let Some(reason) = alloy_sol_types::decode_revert_reason(&data) {
            return Some(reason);
        }
    }

    reason_after_revert_token(&payload.message)
}

/// Scans `message` for the token "revert" and returns the trimmed text that
/// follows it, e.g. `"execution reverted: not the owner"` -> `"not the owner"`.
fn reason_after_revert_token(message: &str) -> Option<String> {
    let lower = message.to_lowercase();
    let start = lower.find("revert")? + "revert".len();
    let mut rest = message[start..].trim_start();
    rest = rest.strip_prefix("ed").unwrap_or(rest).trim_start();
    rest = rest.strip_prefix(':').unwrap_or(rest).trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_json_rpc::{ErrorPayload, RpcError};

    fn error_resp(message: &str, revert_data: Option<Vec<u8>>) -> TransportError {
        let data = revert_data.map(|bytes| {
            serde_json::value::RawValue::from_string(format!(
                "\"0x{}\"",
                alloy_primitives::hex::encode(bytes)
            ))
            .unwrap()
        });
        RpcError::ErrorResp(ErrorPayload {
            code: 3,
            message: message.to_string().into(),
            data,
        })
    }

    #[test]
    fn decodes_structured_revert_payload() {
        let data = Revert {
            reason: "User already registered".to_string(),
        }
        .abi_encode();
        let err = error_resp("execution reverted", Some(data));
        assert_eq!(revert_reason(&err).as_deref(), Some("User already registered"));
    }

    #[test]
    fn falls_back_to_message_scan() {
        let err = error_resp("execution reverted: Booking not found", None);
        assert_eq!(revert_reason(&err).as_deref(), Some("Booking not found"));
    }

    #[test]
    fn message_scan_handles_bare_revert_token() {
        assert_eq!(
            reason_after_revert_token("VM Exception: revert Property unavailable"),
            Some("Property unavailable".to_string())
        );
        assert_eq!(reason_after_revert_token("execution reverted"), None);
        assert_eq!(reason_after_revert_token("gas too low"), None);
    }

    #[test]
    fn non_error_responses_yield_no_reason() {
        let err: TransportError = RpcError::NullResp;
        assert!(revert_reason(&err).is_none());
    }
}
