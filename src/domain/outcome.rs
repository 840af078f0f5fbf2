use super::transaction::{AuthTransactionResponse, PingResponse};
use serde::{Deserialize, Serialize};

/// Caller-facing result codes. These numbers are part of the public API.
pub mod code {
    pub const APPROVED: i32 = 0;
    pub const FAILED: i32 = 1;
    pub const DECLINED: i32 = 2;
    pub const SERVICE_UNAVAILABLE: i32 = 99;
    pub const INVALID_REQUEST: i32 = 400;
    pub const NO_USER_FOR_MSISDN: i32 = 403;
}

/// Normalized result returned by every pipeline operation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Outcome {
    pub code: i32,
    pub text: String,
}

impl Outcome {
    pub fn new(code: i32, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
        }
    }

    pub fn invalid_request() -> Self {
        Self::new(code::INVALID_REQUEST, "Invalid request")
    }

    pub fn no_user_for_msisdn() -> Self {
        Self::new(code::NO_USER_FOR_MSISDN, "No UserID found for MSISDN")
    }

    pub fn is_approved(&self) -> bool {
        self.code == code::APPROVED
    }
}

impl From<&PingResponse> for Outcome {
    fn from(rsp: &PingResponse) -> Self {
        if rsp.success {
            Outcome::new(code::APPROVED, "Service is up")
        } else {
            Outcome::new(
                code::SERVICE_UNAVAILABLE,
                format!("Service not available Status=[{}]", rsp.result_text),
            )
        }
    }
}

impl From<&AuthTransactionResponse> for Outcome {
    /// Total over the success/authorized truth table: exactly one of
    /// FAILED, APPROVED or DECLINED.
    fn from(rsp: &AuthTransactionResponse) -> Self {
        match (rsp.success, rsp.authorized) {
            (false, _) => Outcome::new(code::FAILED, format!("FAILED ({})", rsp.result_text)),
            (true, true) => Outcome::new(code::APPROVED, "APPROVED"),
            (true, false) => Outcome::new(
                code::DECLINED,
                format!("DECLINED ({})", rsp.result_text),
            ),
        }
    }
}
