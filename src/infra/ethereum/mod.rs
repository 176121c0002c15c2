// Responsible for all communication with the EVM chain.

pub mod abi;
pub mod address;
pub mod error;
pub mod gateway;

pub use address::parse_address;
pub use error::GatewayError;
pub use gateway::ContractGateway;
