//! faunakey function host.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request        ┌───────────────────────────────────────────┐
//!     ──────────────────────┼─▶ http::server ──▶ function::handler      │
//!                           │   (request id,      (claim expiry check)  │
//!                           │    timeout, trace)          │              │
//!                           │                             ▼              │
//!     Client Response       │                     function::secret       │
//!     ◀─────────────────────┼── http::response ◀── (env var lookup)      │
//!                           │                                            │
//!                           │   config · observability · lifecycle       │
//!                           └───────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use faunakey_function::config::{load_or_default, CONFIG_PATH_ENV_VAR};
use faunakey_function::lifecycle::{signals::spawn_signal_listener, Shutdown};
use faunakey_function::observability::{logging, metrics};
use faunakey_function::FunctionServer;

#[derive(Parser)]
#[command(name = "faunakey")]
#[command(about = "Serve the faunakey function over HTTP", long_about = None)]
struct Args {
    /// Path to a TOML config file.
    #[arg(short, long, env = CONFIG_PATH_ENV_VAR)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_or_default(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!("faunakey v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        path = %config.function.path,
        secret_env_var = %config.secret.env_var,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if std::env::var_os(&config.secret.env_var).is_none() {
        tracing::warn!(
            secret_env_var = %config.secret.env_var,
            "Secret variable is not set; authorized callers will receive no key"
        );
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_listener(&shutdown);

    FunctionServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
