//! Centralized configuration (environment variables + defaults).

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Runtime configuration, read once at startup.
///
/// Chain-related values are deliberately read leniently: a missing `RPC_URL`
/// or `CONTRACT_ADDRESS` must not prevent the HTTP server from starting. The
/// gateway reports the problem per-request instead (503 with the reason).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP(S) JSON-RPC endpoint of the chain node (`RPC_URL`).
    pub rpc_url: String,
    /// Deployed rental platform contract address (`CONTRACT_ADDRESS`).
    pub contract_address: String,
    /// PostgreSQL connection string for the mirrored record store
    /// (`DATABASE_URL`).
    pub database_url: String,
    /// Socket address the API server binds to (`BIND_ADDRESS`).
    pub bind_address: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            rpc_url: optional("RPC_URL"),
            contract_address: optional("CONTRACT_ADDRESS"),
            database_url: optional("DATABASE_URL"),
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
        }
    }
}

fn optional(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}
