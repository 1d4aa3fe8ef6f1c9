//! Net worth repository and service traits.

use async_trait::async_trait;

use super::net_worth_model::{NetWorthSnapshot, NewNetWorthSnapshot};
use crate::errors::Result;

#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// Creates or updates the snapshot for (year, month). A second upsert for
    /// the same period overwrites the stored values in place; there is never
    /// more than one row per period.
    async fn upsert(&self, snapshot: NewNetWorthSnapshot) -> Result<NetWorthSnapshot>;

    fn get(&self, year: i32, month: u32) -> Result<Option<NetWorthSnapshot>>;

    /// All snapshots ordered by (year, month).
    fn history(&self) -> Result<Vec<NetWorthSnapshot>>;
}

#[async_trait]
pub trait NetWorthServiceTrait: Send + Sync {
    /// Computes a point-in-time rollup across all accounts. Does not persist.
    fn compute_snapshot(&self, year: i32, month: u32) -> Result<NewNetWorthSnapshot>;

    async fn upsert_snapshot(&self, snapshot: NewNetWorthSnapshot) -> Result<NetWorthSnapshot>;

    fn history(&self) -> Result<Vec<NetWorthSnapshot>>;
}
