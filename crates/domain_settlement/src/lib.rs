//! Settlement Domain
//!
//! Turns a sheet of net balances into a small set of point-to-point
//! payments that settles everyone. Plans are recommendations only; no
//! money moves here.

pub mod error;
pub mod plan;
pub mod solver;

pub use error::SettlementError;
pub use plan::{SettlementPlan, SettlementTransaction};
pub use solver::solve;
