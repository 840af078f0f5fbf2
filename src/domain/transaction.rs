use serde::{Deserialize, Serialize};

/// Local payment request as posted by a terminal.
///
/// Every field is required. A body with a missing or `null` field is not a
/// payment request and is answered as invalid.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PaymentRequest {
    pub amount: i64,
    #[serde(rename = "deviceID")]
    pub device_id: String,
    pub msisdn: String,
    pub tsn: String,
}

impl PaymentRequest {
    /// Transaction identifier shared by the remote call and the stored record.
    ///
    /// Deterministic: replaying the same device/sequence pair addresses the
    /// same record, which is then overwritten.
    pub fn transaction_id(&self) -> String {
        transaction_id(&self.device_id, &self.tsn)
    }
}

pub fn transaction_id(device_id: &str, tsn: &str) -> String {
    format!("{device_id}-{tsn}")
}

/// Body of `POST auth` on the remote verification service.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct AuthTransactionRequest {
    #[serde(rename = "amount_in_cents")]
    pub amount: i64,
    #[serde(rename = "clientid")]
    pub client_id: String,
    #[serde(rename = "tranid")]
    pub transaction_id: String,
    #[serde(rename = "userid")]
    pub user_id: String,
}

/// Reply of `POST auth` and `GET auth/<tranid>`. This is also the persisted record.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct AuthTransactionResponse {
    pub success: bool,
    #[serde(rename = "resultText", default)]
    pub result_text: String,
    #[serde(rename = "amount_in_cents", default)]
    pub amount: i64,
    #[serde(rename = "tranid", default)]
    pub transaction_id: String,
    #[serde(rename = "userid", default)]
    pub user_id: String,
    #[serde(default)]
    pub authorized: bool,
}

/// Reply of `GET isAlive`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PingResponse {
    pub success: bool,
    #[serde(rename = "resultText", default)]
    pub result_text: String,
}
