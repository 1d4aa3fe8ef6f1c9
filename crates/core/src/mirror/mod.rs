//! Mirror module - best-effort propagation of committed ledger events to the
//! external spreadsheet.
//!
//! The mirror is an at-most-once observer: it runs after the ledger write
//! commits and its failure never rolls back or retries the ledger operation.

mod mirror_event;
mod mirror_sink;
mod spreadsheet;

pub use mirror_event::LedgerEvent;
pub use mirror_sink::{MirrorSink, MockMirrorSink, NoOpMirrorSink};
pub use spreadsheet::{
    monthly_cell, offset_cell, SheetConfig, SheetConfigRepositoryTrait, SheetTarget,
    SpreadsheetClientTrait, SpreadsheetMirror,
};
