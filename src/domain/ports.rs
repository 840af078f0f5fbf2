use super::transaction::AuthTransactionResponse;
use crate::error::{RemoteError, Result, StoreError};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

/// Durable record of remote authorization replies, keyed by transaction id.
#[async_trait]
pub trait AuthResponseStore: Send + Sync {
    /// Writes `rsp` under `tran_id`, replacing any previous value.
    async fn put(&self, tran_id: &str, rsp: &AuthTransactionResponse) -> Result<()>;
    /// Fails with [`StoreError::NotFound`] when the namespace or key is missing,
    /// or when the stored value no longer decodes.
    async fn get(&self, tran_id: &str) -> Result<AuthTransactionResponse>;
}

/// Raw access to the remote verification service.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Returns the response body whatever the HTTP status; only transport
    /// failures are errors.
    async fn call(
        &self,
        method: Method,
        function: &str,
        payload: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, RemoteError>;
}

/// Receives best-effort persistence failures from the pipeline.
pub trait PersistenceObserver: Send + Sync {
    fn persistence_failed(&self, tran_id: &str, err: &StoreError);
}

pub type AuthResponseStoreRef = Arc<dyn AuthResponseStore>;
pub type RemoteApiBox = Box<dyn RemoteApi>;
pub type PersistenceObserverBox = Box<dyn PersistenceObserver>;
