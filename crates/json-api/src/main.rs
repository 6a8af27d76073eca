//! Inventory JSON Server
//!
//! Serves the admin page and the product API backed by `inventory-app`.

use std::{process, time::Duration};

use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};
use tracing::{error, info, warn};

use inventory_app::context::AppContext;

use crate::{config::ServerConfig, observability::RequestLogging, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod config;
mod csrf;
mod extensions;
mod healthcheck;
mod observability;
mod page;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Inventory JSON server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, so stderr is all that is left"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.database.max_connections,
        config.database.run_migrations,
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    if config.security.csrf_secret.is_none() {
        warn!("CSRF_SECRET not set, tokens will not survive a restart");
    }

    let csrf_key = match csrf::resolve_key(config.security.csrf_secret.as_deref()) {
        Ok(key) => key,
        Err(key_error) => {
            error!("invalid csrf configuration: {key_error}");

            process::exit(1);
        }
    };

    let state = State::new(app, config.import.policy);

    info!(import_policy = ?state.import_policy, "import policy configured");

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(RequestLogging::new(Duration::from_millis(
            config.logging.slow_request_threshold_ms,
        )))
        .hoop(remove_slash())
        .hoop(inject(state.shared()))
        .push(router::app_router(config.server.max_upload_bytes, csrf_key));

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;
}
