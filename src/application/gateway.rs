use crate::domain::lookup::MsisdnLookup;
use crate::domain::outcome::Outcome;
use crate::domain::ports::{AuthResponseStoreRef, PersistenceObserverBox, RemoteApiBox};
use crate::domain::transaction::{
    AuthTransactionRequest, AuthTransactionResponse, PaymentRequest, PingResponse,
};
use crate::error::GatewayError;
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, info};

/// Translates local payment calls into calls on the remote verification service.
///
/// Built once at startup and shared between handlers. It holds no per-request
/// state, so concurrent calls need no coordination beyond what the store does.
pub struct PaymentGateway {
    client_id: String,
    lookup: Arc<MsisdnLookup>,
    store: AuthResponseStoreRef,
    remote: RemoteApiBox,
    observer: PersistenceObserverBox,
}

impl PaymentGateway {
    /// Creates a new `PaymentGateway`.
    ///
    /// # Arguments
    ///
    /// * `client_id` - Identifier sent as `clientid` on every authorization.
    /// * `lookup` - MSISDN to user id table.
    /// * `store` - Where remote authorization replies are recorded.
    /// * `remote` - The remote verification service.
    /// * `observer` - Receives persistence failures.
    pub fn new(
        client_id: impl Into<String>,
        lookup: Arc<MsisdnLookup>,
        store: AuthResponseStoreRef,
        remote: RemoteApiBox,
        observer: PersistenceObserverBox,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            lookup,
            store,
            remote,
            observer,
        }
    }

    /// Checks that the remote service is alive.
    pub async fn ping(&self) -> Result<Outcome, GatewayError> {
        let rsp = self.remote.call(Method::GET, "isAlive", None).await?;
        let ping: PingResponse = serde_json::from_slice(&rsp).map_err(GatewayError::Decode)?;

        Ok(Outcome::from(&ping))
    }

    /// Authorizes a raw payment request body.
    ///
    /// A body that does not decode, or an MSISDN without a user, is answered
    /// with an outcome and nothing else happens. Otherwise the remote reply is
    /// recorded under `deviceID-tsn` and classified. Failing to record it is
    /// reported to the observer but does not change the outcome.
    pub async fn authorize(&self, body: &[u8]) -> Result<Outcome, GatewayError> {
        let Ok(payment) = serde_json::from_slice::<PaymentRequest>(body) else {
            return Ok(Outcome::invalid_request());
        };

        info!(
            device_id = %payment.device_id,
            tsn = %payment.tsn,
            amount = payment.amount,
            msisdn = %payment.msisdn,
            "Rx Auth Request"
        );

        let Some(user_id) = self.lookup.resolve(&payment.msisdn) else {
            return Ok(Outcome::no_user_for_msisdn());
        };

        let tran_id = payment.transaction_id();
        let auth_req = AuthTransactionRequest {
            amount: payment.amount,
            client_id: self.client_id.clone(),
            transaction_id: tran_id.clone(),
            user_id: user_id.to_string(),
        };

        let payload = serde_json::to_vec(&auth_req).map_err(GatewayError::Encode)?;
        debug!(payload = %String::from_utf8_lossy(&payload), "Tx Auth Request");

        let rsp = self.remote.call(Method::POST, "auth", Some(payload)).await?;
        debug!(reply = %String::from_utf8_lossy(&rsp), "Auth Response");

        let auth_rsp: AuthTransactionResponse =
            serde_json::from_slice(&rsp).map_err(GatewayError::Decode)?;

        if let Err(e) = self.store.put(&tran_id, &auth_rsp).await {
            self.observer.persistence_failed(&tran_id, &e);
        }

        Ok(Outcome::from(&auth_rsp))
    }

    /// Re-queries the remote service for a transaction. Nothing is stored.
    ///
    /// The id is sent as one escaped path segment under `auth/`. Ids that URL
    /// normalization would collapse (empty, `.`, `..`) are answered with an
    /// invalid-request outcome without calling the remote service.
    pub async fn query(&self, tran_id: &str) -> Result<Outcome, GatewayError> {
        let Some(segment) = path_segment(tran_id) else {
            return Ok(Outcome::invalid_request());
        };

        let rsp = self
            .remote
            .call(Method::GET, &format!("auth/{segment}"), None)
            .await?;
        let auth_rsp: AuthTransactionResponse =
            serde_json::from_slice(&rsp).map_err(GatewayError::Decode)?;

        Ok(Outcome::from(&auth_rsp))
    }
}

fn path_segment(raw: &str) -> Option<String> {
    if raw.is_empty() || raw.chars().all(|c| c == '.') {
        return None;
    }
    Some(urlencoding::encode(raw).into_owned())
}
