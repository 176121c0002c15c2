pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use infra::config::AppConfig;
pub use infra::ethereum::{ContractGateway, GatewayError};
pub use storage::records::RecordStore;
