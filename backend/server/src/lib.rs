//! Documentation of the portfolio web server.
//!
//! Serves the static site under `public/` with a handful of hardening layers in front.
//! The interactive parts of the page are documented in the `page` crate.
//!
//!
//!
//! # Request Path
//! - Tracing span per request (`RUST_LOG=tower_http=debug` to see them)
//! - Security headers added on the way out, unless a handler already set them
//! - Fixed window rate limit per client, 429 once exhausted
//! - gzip/deflate compression when the client accepts it
//! - Panics in a handler become a plain 500, no details leak
//! - `/` is `index.html`, any other existing file is served as is
//! - Unknown paths get `index.html` with a 404 status
//!
//!
//!
//! # Configuration
//!
//! Read from the environment, a `.env` file next to the binary is loaded first if present.
//!
//! | Variable                 | Default   |
//! |--------------------------|-----------|
//! | `PORT`                   | `3000`    |
//! | `BIND_ADDRESS`           | `0.0.0.0` |
//! | `PUBLIC_DIR`             | `public`  |
//! | `RATE_LIMIT_MAX`         | `100`     |
//! | `RATE_LIMIT_WINDOW_SECS` | `900`     |
//! | `TRUST_PROXY`            | `false`   |
//!
//! Set `TRUST_PROXY=true` only when running behind the Cloudflare tunnel or another reverse proxy,
//! otherwise clients could pick their own rate limit key with `X-Forwarded-For`.
//!
//!
//!
//! # Setup
//!
//! Run locally.
//! ```sh
//! RUST_LOG=info cargo run -p portfolio
//! ```
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
use std::net::SocketAddr;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod security;
pub mod state;

use error::AppError;
use routes::router;
use state::AppState;

pub async fn start_server() -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    info!("Loading configuration...");
    let state = AppState::load()?;

    info!("Starting server...");
    let app = router(state.clone());

    let address = SocketAddr::new(state.config.bind_address, state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(address).await?;
    info!("Portfolio running at http://{address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;

                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
