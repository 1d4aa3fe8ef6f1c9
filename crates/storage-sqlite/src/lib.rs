//! SQLite storage implementation for the Fintrack ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `fintrack-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific row types (with Diesel derives)
//!
//! This is the only crate in the workspace where Diesel dependencies exist;
//! `core` is database-agnostic and works with traits.
//!
//! Writes go through a single writer actor holding one connection, one
//! immediate transaction per job. Reads go straight to the pool and run
//! concurrently under WAL.

pub mod db;
pub mod errors;
pub mod schema;

mod utils;

// Repository implementations
pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod debtors;
pub mod goals;
pub mod ledger;
pub mod mirror;
pub mod net_worth;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, run_migrations, spawn_writer, DbConnection, DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from fintrack-core for convenience
pub use fintrack_core::errors::{DatabaseError, Error, Result};
