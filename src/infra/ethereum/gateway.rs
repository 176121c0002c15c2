//! The contract gateway: read calls and unsigned-transaction preparation
//! against the rental platform contract.
//!
//! The gateway never holds a private key, never signs and never broadcasts.
//! Every write-preparation call returns a descriptor (`to`, `data`,
//! `estimated_gas`, `value`) for the caller's wallet to sign; nonce and gas
//! price selection stay with the wallet. Preparing a transaction has no side
//! effect anywhere and is safe to repeat concurrently.

use alloy_primitives::{address, Address, Bytes, TxKind, U256};
use alloy_provider::{Provider, ProviderBuilder, RootProvider};
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_sol_types::SolCall;
use tokio::sync::RwLock;
use tracing::{info, warn};
use url::Url;

use crate::domain::chain::{
    ChainBooking, ChainProperty, ChainReview, ChainUser, TransactionParams,
};
use crate::infra::config::AppConfig;

use super::abi::RentalPlatform;
use super::address::parse_address;
use super::error::GatewayError;

/// Stand-in sender for gas estimation when the caller does not supply one, so
/// estimation never fails purely for lack of a `from` address.
pub const GAS_ESTIMATION_PLACEHOLDER: Address =
    address!("0x0000000000000000000000000000000000000001");

/// `Uninitialized -> Ready | Failed(reason)`. `Failed` keeps the last reason
/// for reporting, but is not sticky: any call that finds the gateway not
/// `Ready` re-attempts the connection from scratch. The only way out of
/// `Ready` is a process restart.
enum GatewayState {
    Uninitialized,
    Ready(Connection),
    Failed(String),
}

#[derive(Clone)]
struct Connection {
    provider: RootProvider,
    contract: Address,
}

/// One instance is shared per process through the axum state; all methods
/// take `&self` and the connection handle is guarded by an async lock, so
/// concurrent first-use initialization converges to a single outcome.
pub struct ContractGateway {
    rpc_url: String,
    contract_address: String,
    state: RwLock<GatewayState>,
}

impl ContractGateway {
    pub fn new(rpc_url: &str, contract_address: &str) -> Self {
        Self {
            rpc_url: rpc_url.to_string(),
            contract_address: contract_address.to_string(),
            state: RwLock::new(GatewayState::Uninitialized),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.rpc_url, &config.contract_address)
    }

    /// Eagerly runs the lazy initialization, surfacing configuration problems
    /// at startup instead of on the first request.
    pub async fn warm_up(&self) -> Result<(), GatewayError> {
        self.ensure_ready().await.map(|_| ())
    }

    /// Current state, for health reporting. Does not trigger initialization.
    pub async fn status_label(&self) -> String {
        match &*self.state.read().await {
            GatewayState::Uninitialized => "uninitialized".to_string(),
            GatewayState::Ready(_) => "ready".to_string(),
            GatewayState::Failed(reason) => format!("failed: {}", reason),
        }
    }

    /// Compare-and-initialize entry point. Fast path is a shared read of the
    /// established connection; otherwise one writer connects while the other
    /// in-flight callers wait and then reuse (or re-report) its outcome.
    async fn ensure_ready(&self) -> Result<Connection, GatewayError> {
        {
            let state = self.state.read().await;
            if let GatewayState::Ready(conn) = &*state {
                return Ok(conn.clone());
            }
        }

        let mut state = self.state.write().await;
        // Another request may have initialized while we waited for the lock.
        if let GatewayState::Ready(conn) = &*state {
            return Ok(conn.clone());
        }

        match self.connect().await {
            Ok(conn) => {
                *state = GatewayState::Ready(conn.clone());
                Ok(conn)
            }
            Err(err) => {
                warn!(error = %err, "contract gateway initialization failed");
                *state = GatewayState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    async fn connect(&self) -> Result<Connection, GatewayError> {
        if self.rpc_url.trim().is_empty() {
            return Err(GatewayError::Configuration(
                "RPC_URL is not configured".to_string(),
            ));
        }
        let url = Url::parse(self.rpc_url.trim()).map_err(|e| {
            GatewayError::Configuration(format!("invalid RPC URL '{}': {}", self.rpc_url, e))
        })?;

        if self.contract_address.trim().is_empty() {
            return Err(GatewayError::Configuration(
                "CONTRACT_ADDRESS is not configured".to_string(),
            ));
        }
        let contract = parse_address(&self.contract_address).map_err(|e| {
            GatewayError::Configuration(format!("invalid contract address: {}", e))
        })?;

        let provider: RootProvider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_http(url);

        // Connectivity probe; also tells us which chain we are talking to.
        let chain_id = provider.get_chain_id().await.map_err(|e| {
            GatewayError::Connection(format!(
                "cannot reach chain node at {}: {}",
                self.rpc_url, e
            ))
        })?;

        info!(chain_id, contract = %contract, "contract gateway connected");
        Ok(Connection { provider, contract })
    }

    // --- Read operations ---

    pub async fn user_info(&self, user_address: &str) -> Result<ChainUser, GatewayError> {
        let user = parse_address(user_address).map_err(GatewayError::Validation)?;
        let conn = self.ensure_ready().await?;

        let call = RentalPlatform::getUserInfoCall { _user: user };
        let data = self.read_call(&conn, call.abi_encode(), "getUserInfo").await?;
        let decoded = RentalPlatform::getUserInfoCall::abi_decode_returns(&data).map_err(|e| {
            GatewayError::ContractCall(format!("could not decode getUserInfo response: {}", e))
        })?;
        Ok(ChainUser::from(decoded))
    }

    pub async fn property_info(&self, property_id: u64) -> Result<ChainProperty, GatewayError> {
        let conn = self.ensure_ready().await?;

        let call = RentalPlatform::getPropertyInfoCall {
            _propertyId: U256::from(property_id),
        };
        let data = self
            .read_call(&conn, call.abi_encode(), "getPropertyInfo")
            .await?;
        let decoded =
            RentalPlatform::getPropertyInfoCall::abi_decode_returns(&data).map_err(|e| {
                GatewayError::ContractCall(format!(
                    "could not decode getPropertyInfo response: {}",
                    e
                ))
            })?;
        Ok(ChainProperty::from(decoded))
    }

    pub async fn booking_info(&self, booking_id: u64) -> Result<ChainBooking, GatewayError> {
        let conn = self.ensure_ready().await?;

        let call = RentalPlatform::getBookingInfoCall {
            _bookingId: U256::from(booking_id),
        };
        let data = self
            .read_call(&conn, call.abi_encode(), "getBookingInfo")
            .await?;
        let decoded =
            RentalPlatform::getBookingInfoCall::abi_decode_returns(&data).map_err(|e| {
                GatewayError::ContractCall(format!(
                    "could not decode getBookingInfo response: {}",
                    e
                ))
            })?;
        Ok(ChainBooking::from(decoded))
    }

    pub async fn property_reviews(
        &self,
        property_id: u64,
    ) -> Result<Vec<ChainReview>, GatewayError> {
        let conn = self.ensure_ready().await?;

        let call = RentalPlatform::getPropertyReviewsCall {
            _propertyId: U256::from(property_id),
        };
        let data = self
            .read_call(&conn, call.abi_encode(), "getPropertyReviews")
            .await?;
        let decoded =
            RentalPlatform::getPropertyReviewsCall::abi_decode_returns(&data).map_err(|e| {
                GatewayError::ContractCall(format!(
                    "could not decode getPropertyReviews response: {}",
                    e
                ))
            })?;
        Ok(decoded.into_iter().map(ChainReview::from).collect())
    }

    pub async fn property_count(&self) -> Result<u64, GatewayError> {
        let conn = self.ensure_ready().await?;

        let call = RentalPlatform::propertyCountCall {};
        let data = self
            .read_call(&conn, call.abi_encode(), "propertyCount")
            .await?;
        let count = RentalPlatform::propertyCountCall::abi_decode_returns(&data).map_err(|e| {
            GatewayError::ContractCall(format!("could not decode propertyCount response: {}", e))
        })?;
        Ok(crate::domain::chain::clamp_u64(count))
    }

    // --- Write-preparation operations ---

    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        from: Option<&str>,
    ) -> Result<TransactionParams, GatewayError> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(GatewayError::Validation(
                "name and email must not be empty".to_string(),
            ));
        }
        let call = RentalPlatform::registerUserCall {
            _name: name.to_string(),
            _email: email.to_string(),
        };
        self.prepare(call.abi_encode(), from, U256::ZERO, "registerUser")
            .await
    }

    pub async fn register_property(
        &self,
        title: &str,
        description: &str,
        price: U256,
        from: Option<&str>,
    ) -> Result<TransactionParams, GatewayError> {
        if title.trim().is_empty() || description.trim().is_empty() {
            return Err(GatewayError::Validation(
                "title and description must not be empty".to_string(),
            ));
        }
        let call = RentalPlatform::registerPropertyCall {
            _title: title.to_string(),
            _description: description.to_string(),
            _price: price,
        };
        self.prepare(call.abi_encode(), from, U256::ZERO, "registerProperty")
            .await
    }

    pub async fn create_booking(
        &self,
        property_id: u64,
        start_date: u64,
        end_date: u64,
        value: U256,
        from: Option<&str>,
    ) -> Result<TransactionParams, GatewayError> {
        let call = RentalPlatform::createBookingCall {
            _propertyId: U256::from(property_id),
            _startDate: U256::from(start_date),
            _endDate: U256::from(end_date),
        };
        self.prepare(call.abi_encode(), from, value, "createBooking")
            .await
    }

    pub async fn confirm_booking(
        &self,
        booking_id: u64,
        from: Option<&str>,
    ) -> Result<TransactionParams, GatewayError> {
        let call = RentalPlatform::confirmBookingCall {
            _bookingId: U256::from(booking_id),
        };
        self.prepare(call.abi_encode(), from, U256::ZERO, "confirmBooking")
            .await
    }

    pub async fn complete_booking(
        &self,
        booking_id: u64,
        from: Option<&str>,
    ) -> Result<TransactionParams, GatewayError> {
        let call = RentalPlatform::completeBookingCall {
            _bookingId: U256::from(booking_id),
        };
        self.prepare(call.abi_encode(), from, U256::ZERO, "completeBooking")
            .await
    }

    pub async fn submit_review(
        &self,
        property_id: u64,
        rating: u64,
        comment: &str,
        from: Option<&str>,
    ) -> Result<TransactionParams, GatewayError> {
        if !(1..=5).contains(&rating) {
            return Err(GatewayError::Validation(
                "rating must be between 1 and 5".to_string(),
            ));
        }
        let call = RentalPlatform::submitReviewCall {
            _propertyId: U256::from(property_id),
            _rating: U256::from(rating),
            _comment: comment.to_string(),
        };
        self.prepare(call.abi_encode(), from, U256::ZERO, "submitReview")
            .await
    }

    // --- Helpers ---

    async fn read_call(
        &self,
        conn: &Connection,
        call_data: Vec<u8>,
        method: &'static str,
    ) -> Result<Bytes, GatewayError> {
        let request = TransactionRequest {
            to: Some(TxKind::Call(conn.contract)),
            input: TransactionInput::new(call_data.into()),
            ..Default::default()
        };
        conn.provider.call(request).await.map_err(|e| {
            warn!(method, error = %e, "contract read call failed");
            GatewayError::contract_call(method, &e)
        })
    }

    /// Estimates gas for the encoded call and assembles the unsigned
    /// transaction descriptor. Pure query: nothing is signed or sent.
    async fn prepare(
        &self,
        call_data: Vec<u8>,
        from: Option<&str>,
        value: U256,
        method: &'static str,
    ) -> Result<TransactionParams, GatewayError> {
        let from = match from {
            Some(raw) => parse_address(raw).map_err(GatewayError::Validation)?,
            None => GAS_ESTIMATION_PLACEHOLDER,
        };
        let conn = self.ensure_ready().await?;

        let data: Bytes = call_data.into();
        let request = TransactionRequest {
            from: Some(from),
            to: Some(TxKind::Call(conn.contract)),
            input: TransactionInput::new(data.clone()),
            value: (!value.is_zero()).then_some(value),
            ..Default::default()
        };

        let estimated_gas = conn.provider.estimate_gas(request).await.map_err(|e| {
            warn!(method, error = %e, "gas estimation failed");
            GatewayError::contract_call(method, &e)
        })?;

        Ok(TransactionParams {
            to: conn.contract.to_checksum(None),
            data,
            estimated_gas,
            value,
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured() -> ContractGateway {
        ContractGateway::new("", "")
    }

    #[tokio::test]
    async fn missing_rpc_url_fails_configuration() {
        let gateway = unconfigured();
        let err = gateway.property_count().await.unwrap_err();
        assert!(matches!(err, GatewayError::Configuration(_)));
        assert!(err.to_string().contains("RPC_URL"));
        assert!(gateway.status_label().await.starts_with("failed:"));
    }

    #[tokio::test]
    async fn bad_contract_address_fails_configuration() {
        let gateway = ContractGateway::new("http://localhost:8545", "not-an-address");
        let err = gateway.property_count().await.unwrap_err();
        assert!(matches!(err, GatewayError::Configuration(_)));
    }

    #[tokio::test]
    async fn rating_bounds_are_validated_locally() {
        // No RPC endpoint configured: a validation error proves the check
        // runs before any network traffic.
        let gateway = unconfigured();
        for rating in [0u64, 6] {
            let err = gateway.submit_review(1, rating, "fine", None).await.unwrap_err();
            assert!(matches!(err, GatewayError::Validation(_)), "rating {}", rating);
        }
    }

    #[tokio::test]
    async fn empty_user_fields_are_validated_locally() {
        let gateway = unconfigured();
        let err = gateway.register_user("", "a@example.com", None).await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
        let err = gateway.register_user("Alice", " ", None).await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
    }

    #[tokio::test]
    async fn bad_from_address_is_rejected_before_estimation() {
        let gateway = unconfigured();
        let err = gateway
            .confirm_booking(1, Some("0x1234"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
    }

    #[tokio::test]
    async fn gateway_starts_uninitialized() {
        let gateway = unconfigured();
        assert_eq!(gateway.status_label().await, "uninitialized");
    }
}
