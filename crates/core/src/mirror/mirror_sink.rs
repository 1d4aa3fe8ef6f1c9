//! Mirror sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::mirror_event::LedgerEvent;

/// Trait for receiving committed ledger events.
///
/// Implementations translate events into external mirror writes (the
/// spreadsheet). Services emit events through this trait after successful
/// mutations.
///
/// # Design Rules
///
/// - `emit()` must be fast and non-blocking (no network calls, no DB writes)
/// - Implementations should queue events for async processing
/// - Failure to emit must not affect ledger operations (best-effort)
pub trait MirrorSink: Send + Sync {
    /// Emit a single ledger event.
    fn emit(&self, event: LedgerEvent);

    /// Emit multiple ledger events.
    ///
    /// Default implementation calls `emit()` for each event.
    fn emit_batch(&self, events: Vec<LedgerEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// No-op implementation for tests or contexts that don't mirror.
#[derive(Clone, Default)]
pub struct NoOpMirrorSink;

impl MirrorSink for NoOpMirrorSink {
    fn emit(&self, _event: LedgerEvent) {
        // Intentionally empty - events are discarded
    }
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockMirrorSink {
    events: Arc<Mutex<Vec<LedgerEvent>>>,
}

impl MockMirrorSink {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Clears collected events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Returns the number of collected events.
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Returns true if no events have been collected.
    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl MirrorSink for MockMirrorSink {
    fn emit(&self, event: LedgerEvent) {
        self.events.lock().unwrap().push(event);
    }
}
