use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use super::error::{AppError, Result};

/// Keys of mutating actions that have been submitted but not yet settled.
///
/// Acquiring a permit is the "disable the control" step: a second action on
/// the same key is refused with [`AppError::Busy`] until the permit drops,
/// whether the first action succeeded or failed.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self, key: impl Into<String>) -> Result<InFlightPermit> {
        let key = key.into();
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        if !keys.insert(key.clone()) {
            return Err(AppError::Busy(key));
        }
        Ok(InFlightPermit {
            keys: Arc::clone(&self.keys),
            key,
        })
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }
}

/// Releases its key when dropped
#[derive(Debug)]
pub struct InFlightPermit {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
