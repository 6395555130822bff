use subway_server::config::{DEFAULT_LOG_FILTER, ServerConfig};
use subway_server::store::SubwayStore;
use subway_server::web::{AppState, create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(2);
        }
    };

    let state = AppState::new(SubwayStore::new());
    let app = create_router(state);

    tracing::info!("Subway line server listening on http://{}", config.bind_addr);
    tracing::info!("API Endpoints:");
    tracing::info!("  GET    /health");
    tracing::info!("  POST   /stations, GET /stations, DELETE /stations/:id");
    tracing::info!("  POST   /lines, GET /lines");
    tracing::info!("  GET    /lines/:id, PUT /lines/:id, DELETE /lines/:id");
    tracing::info!("  POST   /lines/:id/sections");
    tracing::info!("  DELETE /lines/:id/sections?stationId=");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
