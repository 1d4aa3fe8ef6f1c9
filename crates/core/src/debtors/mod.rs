//! Debtors module - domain models, services, and traits.

mod debtors_model;
mod debtors_service;
mod debtors_traits;

pub use debtors_model::{Debtor, NewDebtor};
pub use debtors_service::DebtorService;
pub use debtors_traits::{DebtorRepositoryTrait, DebtorServiceTrait};
