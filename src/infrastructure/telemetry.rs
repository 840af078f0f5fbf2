use crate::domain::ports::PersistenceObserver;
use crate::error::StoreError;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Reports persistence failures through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PersistenceObserver for TracingObserver {
    fn persistence_failed(&self, tran_id: &str, err: &StoreError) {
        warn!(tran_id, error = %err, "Could not save transaction response to database");
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
