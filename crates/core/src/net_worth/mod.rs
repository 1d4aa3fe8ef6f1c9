//! Net worth module - monthly rollups of fiat, crypto and broker positions
//! with expected-versus-real discrepancies and allocation percentages.

mod net_worth_model;
mod net_worth_service;
mod net_worth_traits;


pub use net_worth_model::{NetWorthSnapshot, NewNetWorthSnapshot};
pub use net_worth_service::NetWorthService;
pub use net_worth_traits::{NetWorthServiceTrait, SnapshotRepositoryTrait};
