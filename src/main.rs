/**
 * Scriptorium Server Entry Point
 *
 * This is the main entry point for the Scriptorium backend server.
 * It loads configuration from the environment, initializes the Axum
 * HTTP server, and serves until shutdown.
 */

use scriptorium::server::config::ServerConfig;
use scriptorium::server::init::create_app;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("Server initialization started");

    // Configuration errors (missing or short JWT secret, bad numeric
    // values) are fatal at startup.
    let config = ServerConfig::from_env()?;
    let port = config.port;

    let app = create_app(&config).await?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
