//! Application layer: the translation pipeline and its read side.
//!
//! `PaymentGateway` owns the write path (ping, authorize, query) and
//! `OutcomeReporter` reads back what the gateway recorded. Both receive their
//! collaborators explicitly and are shared across request handlers.

pub mod gateway;
pub mod report;
