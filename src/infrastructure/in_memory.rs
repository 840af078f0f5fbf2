use crate::domain::ports::AuthResponseStore;
use crate::domain::transaction::AuthTransactionResponse;
use crate::error::{Result, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type Namespaces = HashMap<String, HashMap<String, Vec<u8>>>;

/// A thread-safe in-memory transaction store.
///
/// Keeps the same encoded representation and namespace rules as the durable
/// store so the two are interchangeable behind [`AuthResponseStore`]. Ideal for
/// tests or deployments where losing the audit trail on restart is acceptable.
#[derive(Default, Clone)]
pub struct InMemoryAuthResponseStore {
    bucket: String,
    namespaces: Arc<RwLock<Namespaces>>,
}

impl InMemoryAuthResponseStore {
    /// Creates an empty store writing into `bucket`.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            namespaces: Arc::default(),
        }
    }

    /// Number of records held in this store's bucket.
    pub async fn len(&self) -> usize {
        let namespaces = self.namespaces.read().await;
        namespaces.get(&self.bucket).map_or(0, HashMap::len)
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    #[cfg(test)]
    async fn put_raw(&self, tran_id: &str, bytes: Vec<u8>) {
        let mut namespaces = self.namespaces.write().await;
        namespaces
            .entry(self.bucket.clone())
            .or_default()
            .insert(tran_id.to_string(), bytes);
    }
}

#[async_trait]
impl AuthResponseStore for InMemoryAuthResponseStore {
    async fn put(&self, tran_id: &str, rsp: &AuthTransactionResponse) -> Result<()> {
        let encoded = serde_json::to_vec(rsp)?;
        let mut namespaces = self.namespaces.write().await;
        namespaces
            .entry(self.bucket.clone())
            .or_default()
            .insert(tran_id.to_string(), encoded);
        Ok(())
    }

    async fn get(&self, tran_id: &str) -> Result<AuthTransactionResponse> {
        let namespaces = self.namespaces.read().await;
        let bytes = namespaces
            .get(&self.bucket)
            .and_then(|bucket| bucket.get(tran_id))
            .ok_or(StoreError::NotFound)?;
        serde_json::from_slice(bytes).map_err(|_| StoreError::NotFound)
    }
}
