use tracing::info;

use crate::events::CirculationEvent;

/// Trait for circulation event observation
pub trait CirculationObserver {
    /// Called after a change has been applied
    fn on_event(&self, event: &CirculationEvent);
}

/// Logs every event through `tracing`
#[derive(Debug)]
pub struct EventLogger;

impl CirculationObserver for EventLogger {
    fn on_event(&self, event: &CirculationEvent) {
        match event {
            CirculationEvent::BookIssued { record, member, book } => {
                info!(record = %record, member = %member, book = %book, "book issued");
            }
            CirculationEvent::BookReturned { member, book, overdue_days } => {
                info!(member = %member, book = %book, overdue_days, "book returned");
            }
            CirculationEvent::FineCharged { member, amount } => {
                info!(member = %member, amount = %amount, "fine charged");
            }
            CirculationEvent::FineCleared { member, amount } => {
                info!(member = %member, amount = %amount, "fine cleared");
            }
        }
    }
}
