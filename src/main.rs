use dotenv::dotenv;
use salvo::conn::tcp::TcpAcceptor;
use salvo::prelude::*;
use salvo::serve_static::StaticDir;
use std::time::Duration;
use tokio::signal;

use pbi_embed_backend::api;
use pbi_embed_backend::utils::middleware::inject_state;
use pbi_embed_backend::{AppState, Config};

/// Bind to address with retry logic by adding delay before binding
async fn bind_with_retry(address: &str, max_retries: u32) -> TcpAcceptor {
    for attempt in 1..=max_retries {
        let socket_addr: std::net::SocketAddr = match address.parse() {
            Ok(addr) => addr,
            Err(_) => {
                eprintln!("Invalid address format: {}", address);
                std::process::exit(1);
            }
        };

        // Test if the port is available before handing it to Salvo
        match tokio::net::TcpListener::bind(socket_addr).await {
            Ok(test_listener) => {
                drop(test_listener);
                return TcpListener::new(address).bind().await;
            }
            Err(e) => {
                if e.kind() == std::io::ErrorKind::AddrInUse {
                    eprintln!(
                        "Port {} is in use (attempt {}/{}), retrying in 1 second...",
                        socket_addr.port(),
                        attempt,
                        max_retries
                    );

                    if attempt < max_retries {
                        tokio::time::sleep(Duration::from_secs(1)).await;
                        continue;
                    }
                }

                eprintln!("Failed to bind to {}: {}", address, e);
                std::process::exit(1);
            }
        }
    }

    eprintln!("Failed to bind to {} after {} attempts", address, max_retries);
    std::process::exit(1);
}

/// Wait for shutdown signal (SIGTERM, SIGINT, or Ctrl+C)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pbi_embed_backend=info".parse()?)
                .add_directive("salvo=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let state = AppState::new(&config)?;

    let api_router = Router::new()
        .hoop(inject_state(state))
        .push(Router::with_path("/health").get(health_check))
        .push(api::api_routes());

    // Static file serving for the embedding front-end
    let static_path = config.static_files_path.clone();
    tracing::info!("Static files path: {}", static_path);

    let assets_service = StaticDir::new(&static_path)
        .include_dot_files(false)
        .fallback("index.html");

    let router = Router::new()
        .push(Router::with_path("/api").push(api_router))
        .push(Router::with_path("{**path}").get(assets_service));

    let acceptor = bind_with_retry(&config.server_address, 5).await;

    tracing::info!(
        "Power BI embed backend listening on {}",
        config.server_address
    );

    let service = Service::new(router);
    let server = Server::new(acceptor);

    tokio::select! {
        _ = server.serve(service) => {
            tracing::info!("Server stopped");
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutting down gracefully");
        }
    }

    Ok(())
}

#[handler]
async fn health_check(res: &mut Response) {
    res.render(Json(serde_json::json!({
        "status": "ok",
        "service": "pbi-embed-backend"
    })));
}
