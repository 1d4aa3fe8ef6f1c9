//! Debtor repository and service traits.

use async_trait::async_trait;

use super::debtors_model::{Debtor, NewDebtor};
use crate::errors::Result;

#[async_trait]
pub trait DebtorRepositoryTrait: Send + Sync {
    async fn create(&self, new_debtor: NewDebtor) -> Result<Debtor>;

    fn get_by_id(&self, debtor_id: &str) -> Result<Debtor>;

    /// Lists all debtors ordered by name.
    fn list(&self) -> Result<Vec<Debtor>>;
}

#[async_trait]
pub trait DebtorServiceTrait: Send + Sync {
    async fn create_debtor(&self, new_debtor: NewDebtor) -> Result<Debtor>;

    fn list_debtors(&self) -> Result<Vec<Debtor>>;
}
