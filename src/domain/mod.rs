//! Wire types, outcome classification and the ports the pipeline depends on.

pub mod lookup;
pub mod outcome;
pub mod ports;
pub mod transaction;
