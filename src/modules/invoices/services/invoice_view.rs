use std::sync::{Mutex, PoisonError};

use crate::modules::invoices::models::Invoice;

/// Ticket handed out by [`SnapshotView::begin`]; only the newest one applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ViewTicket(u64);

#[derive(Debug)]
struct ViewState<T> {
    generation: u64,
    closed: bool,
    snapshot: Option<T>,
}

/// Holder for the snapshot a screen is currently showing.
///
/// Responses arrive out of order and after the screen is gone. Each load
/// takes a ticket first; a response is applied only if its ticket is still
/// the latest and the view has not been closed.
#[derive(Debug)]
pub struct SnapshotView<T> {
    state: Mutex<ViewState<T>>,
}

/// The invoice detail screen
pub type InvoiceView = SnapshotView<Invoice>;

impl<T: Clone> SnapshotView<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ViewState {
                generation: 0,
                closed: false,
                snapshot: None,
            }),
        }
    }

    /// Starts a load, superseding every earlier ticket
    pub fn begin(&self) -> ViewTicket {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.generation += 1;
        ViewTicket(state.generation)
    }

    /// Applies the snapshot if the ticket is current. Returns whether it was applied.
    pub fn apply(&self, ticket: ViewTicket, snapshot: T) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.closed || ticket.0 != state.generation {
            return false;
        }
        state.snapshot = Some(snapshot);
        true
    }

    /// The screen was left; later responses are dropped
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .closed
    }

    pub fn snapshot(&self) -> Option<T> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .clone()
    }
}

impl<T: Clone> Default for SnapshotView<T> {
    fn default() -> Self {
        Self::new()
    }
}
