//! Debtor service implementation.

use std::sync::Arc;

use super::debtors_model::{Debtor, NewDebtor};
use super::debtors_traits::{DebtorRepositoryTrait, DebtorServiceTrait};
use crate::errors::Result;

pub struct DebtorService {
    repository: Arc<dyn DebtorRepositoryTrait>,
}

impl DebtorService {
    pub fn new(repository: Arc<dyn DebtorRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl DebtorServiceTrait for DebtorService {
    async fn create_debtor(&self, new_debtor: NewDebtor) -> Result<Debtor> {
        new_debtor.validate()?;
        self.repository.create(new_debtor).await
    }

    fn list_debtors(&self) -> Result<Vec<Debtor>> {
        self.repository.list()
    }
}
