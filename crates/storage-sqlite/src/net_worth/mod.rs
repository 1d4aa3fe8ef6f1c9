//! SQLite storage implementation for net worth snapshots.

mod model;
mod repository;

pub use model::NetWorthSnapshotDB;
pub use repository::SnapshotRepository;
