use axum::{extract::Path, http::StatusCode, routing::get, Router};
use log::info;
use tokio::signal;
use tower::ServiceBuilder;
use tower_signed_url::{config::SignedUrlConfig, server::SignedUrlGuard};

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = SignedUrlConfig::from_env().expect("SIGNED_URL_SECRET must be set");
    let guard = SignedUrlGuard::builder()
        .config(config)
        .build()
        .expect("Failed to build SignedUrlGuard");

    let app = Router::new()
        .route("/files/{name}", get(file))
        .layer(ServiceBuilder::new().layer(guard.into_layer()));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Running axum on port: 3000");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn file(Path(name): Path<String>) -> (StatusCode, String) {
    (StatusCode::OK, format!("Contents of {}", name))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
