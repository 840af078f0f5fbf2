use crate::domain::ports::AuthResponseStoreRef;
use crate::domain::transaction::AuthTransactionResponse;
use crate::error::Result;

/// Read side over recorded authorization replies. Never calls the remote service.
#[derive(Clone)]
pub struct OutcomeReporter {
    store: AuthResponseStoreRef,
}

impl OutcomeReporter {
    pub fn new(store: AuthResponseStoreRef) -> Self {
        Self { store }
    }

    pub async fn report(&self, tran_id: &str) -> Result<AuthTransactionResponse> {
        self.store.get(tran_id).await
    }
}
