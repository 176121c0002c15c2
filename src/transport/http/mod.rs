pub mod router;
pub mod types;
pub mod handlers {
    pub mod chain;
    pub mod common;
    pub mod health;
    pub mod prepare;
    pub mod records;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
