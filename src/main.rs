use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glimpse::vision::VisionClient;
use glimpse::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // -----------------------------
    // Logging
    // -----------------------------
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // -----------------------------
    // Shared state / Dependencies
    // -----------------------------
    let vision = Arc::new(VisionClient::from_env());
    let state = AppState { vision };

    let port = dotenvy::var("PORT").unwrap_or_else(|_| "3000".into());
    let addr = format!("0.0.0.0:{port}");

    println!("🌐 HTTP listening on http://{addr}");
    println!("🖼 Upload endpoint at http://{addr}/api/generate/stream");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state).into_make_service()).await?;

    Ok(())
}
