//! Wicket entrypoint serving the ticket viewer over HTTP.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use ortho_config::OrthoConfig;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use wicket::server::{self, AppState};
use wicket::{ApiTicketSource, SourceError, WicketConfig};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), SourceError> {
    let config = load_config()?;

    let account = config.account()?;
    let credentials = config.credentials()?;
    let options = config.source_options()?;
    let listen_addr = config.resolve_listen_addr();

    let source = ApiTicketSource::new(account, credentials, options)?;
    let state = AppState::new(Arc::new(source))?;
    let app = server::router(state);

    let listener = TcpListener::bind(&listen_addr).await.map_err(|error| SourceError::Io {
        message: format!("failed to bind {listen_addr}: {error}"),
    })?;
    tracing::info!("serving ticket pages at http://{listen_addr}");
    server::serve(listener, app).await.map_err(|error| SourceError::Io {
        message: error.to_string(),
    })
}

/// Installs the process-wide tracing subscriber.
///
/// Honours `RUST_LOG` when set and falls back to `info` level otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

/// Merges the viewer configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`SourceError::Configuration`] when ortho-config cannot parse
/// the command line or read a configuration file.
fn load_config() -> Result<WicketConfig, SourceError> {
    WicketConfig::load().map_err(|error| SourceError::Configuration {
        message: error.to_string(),
    })
}
