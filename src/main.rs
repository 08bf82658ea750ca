use clap::Parser;
use std::net::SocketAddr;
use trajan::{
    AppState,
    config::Config,
    error::{AppError, AppResult},
};

/// Trajan: a lightweight developer workspace API server.
#[derive(Parser, Debug)]
#[command(name = "trajan", version, about)]
struct Cli {
    /// Bind host (overrides SERVER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides SERVER_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Log level or filter directive (overrides LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server_host = host;
        }
        if let Some(port) = self.port {
            config.server_port = port;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("trajan: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    cli.apply(&mut config);
    trajan::init_tracing(&config);

    let server_config = config.server();
    let addr: SocketAddr = server_config
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

    let store = trajan::store::from_config(&config)?;
    let docs_enabled = config.docs_enabled;
    let app = trajan::build_app(AppState::new(store, config));

    let server = axum::Server::try_bind(&addr)
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?
        .serve(app.into_make_service());

    tracing::info!(
        address = %server.local_addr(),
        cors_origins = ?server_config.cors_origins,
        "Server running"
    );
    if docs_enabled {
        tracing::info!("API docs available at http://{}/docs", server.local_addr());
    }

    server
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
