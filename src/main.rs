use authswitch::application::gateway::PaymentGateway;
use authswitch::application::report::OutcomeReporter;
use authswitch::config::AppConfig;
use authswitch::domain::lookup::MsisdnLookup;
use authswitch::domain::ports::AuthResponseStoreRef;
use authswitch::error::StartupError;
use authswitch::infrastructure::http_remote::HttpRemoteApi;
use authswitch::infrastructure::in_memory::InMemoryAuthResponseStore;
#[cfg(feature = "storage-rocksdb")]
use authswitch::infrastructure::rocksdb::RocksDbAuthResponseStore;
use authswitch::infrastructure::telemetry::{TracingObserver, init_tracing};
use authswitch::interfaces::http::{AppState, router};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Path to persistent database. Overrides `dbPath` from the config file.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?;
    if cli.db_path.is_some() {
        config.db_path = cli.db_path;
    }

    init_tracing(&config.log_level);
    info!(version = env!("CARGO_PKG_VERSION"), "Application started");

    let store = open_store(config.db_path.clone(), &config.tran_rsp_bucket)?;

    let lookup =
        MsisdnLookup::load(&config.lookup_file_name).map_err(|source| StartupError::LookupRead {
            path: config.lookup_file_name.clone(),
            source,
        })?;
    if lookup.is_empty() {
        return Err(StartupError::EmptyLookup.into());
    }
    info!(count = lookup.len(), "Numbers loaded in lookup table");

    let remote = HttpRemoteApi::new(
        config.remote_url.clone(),
        config.api_username.clone(),
        config.api_password.clone(),
        config.request_timeout(),
    )
    .map_err(StartupError::from)?;

    let gateway = PaymentGateway::new(
        config.api_client_id.clone(),
        Arc::new(lookup),
        store.clone(),
        Box::new(remote),
        Box::new(TracingObserver),
    );
    let state = Arc::new(AppState {
        gateway,
        reporter: OutcomeReporter::new(store),
    });

    let listener = tokio::net::TcpListener::bind(&config.listen_address)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.listen_address.clone(),
            source,
        })?;
    info!(addr = %config.listen_address, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_diagnostic()?;

    Ok(())
}

fn open_store(db_path: Option<PathBuf>, bucket: &str) -> Result<AuthResponseStoreRef, StartupError> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = RocksDbAuthResponseStore::open(&path, bucket).map_err(StartupError::Store)?;
            info!(path = %path.display(), bucket, "Using RocksDB transaction store");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(path) => Err(StartupError::StorageUnavailable { path }),
        None => {
            info!(bucket, "Using in-memory transaction store");
            Ok(Arc::new(InMemoryAuthResponseStore::new(bucket)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
