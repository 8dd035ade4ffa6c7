// src/main.rs
use axum::serve;
use student_view::{api::BackendClient, config::Config, state::AppState, web};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- Logging ---
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "student_view=debug,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    // --- Configuration ---
    let config = Config::from_env()?;
    tracing::info!("Starting student view, backend at {}", config.backend_url);

    // --- Backend client & state ---
    let api = BackendClient::new(&config.backend_url, config.backend_timeout)?;
    let app_state = AppState::with_view_capacity(api, config.view_capacity);

    // --- Listener ---
    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Could not bind {}: {}", config.bind_addr, e);
            return Err(e.into());
        }
    };
    tracing::info!("Listening on http://{}", config.bind_addr);

    // --- Router & middleware ---
    let app = web::routes::create_router(app_state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
