//! SQLite storage implementation for the sheet mirror configuration.

mod model;
mod repository;

pub use model::SheetConfigDB;
pub use repository::SheetConfigRepository;
