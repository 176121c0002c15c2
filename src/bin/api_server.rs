// src/bin/api_server.rs

use rental_platform_api::transport;
use rental_platform_api::{AppConfig, ContractGateway, RecordStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    if config.database_url.is_empty() {
        anyhow::bail!("DATABASE_URL must be set");
    }

    let store = RecordStore::connect_lazy(&config.database_url)?;
    store.ensure_schema().await?;
    info!("record store schema ready");

    let gateway = Arc::new(ContractGateway::from_config(&config));
    // Surfaces configuration problems in the log right away; requests retry
    // lazily either way, so a down RPC node does not block startup.
    if let Err(err) = gateway.warm_up().await {
        warn!(error = %err, "contract gateway not ready at startup");
    }

    let app_state = transport::http::AppState {
        gateway,
        store: Arc::new(store),
    };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url(
            "/api-docs/openapi.json",
            transport::http::ApiDoc::openapi(),
        ))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
