use hirenow_backend::{
    config::{get_config, init_config},
    middleware::cors::permissive_cors,
    routes,
    storage::{MemStore, Storage},
    AppState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let store: Arc<dyn Storage> = Arc::new(MemStore::new());
    let app_state = AppState::new(store);

    app_state.user_service.seed_users().await?;

    let app = routes::api_router(app_state.clone())
        .with_state(app_state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
