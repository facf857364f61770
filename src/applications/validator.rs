use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use super::domain::ValidationMode;

/// License key reported by a validator whose service must not be trusted.
pub const LICENSE_KEY_EXPIRED: &str = "EXPIRED";

/// External frequent flyer number lookup service.
///
/// Implementations own their service state and must tolerate shared access,
/// so every method takes `&self`. A successful validity check notifies each
/// subscribed [`LookupListener`] once, on the calling thread, before returning.
pub trait FrequentFlyerNumberValidator: Send + Sync {
    fn is_valid(&self, frequent_flyer_number: &str) -> Result<bool, ValidatorError>;

    /// Output-parameter flavour of [`is_valid`](Self::is_valid).
    fn is_valid_into(
        &self,
        frequent_flyer_number: &str,
        is_valid: &mut bool,
    ) -> Result<(), ValidatorError> {
        *is_valid = self.is_valid(frequent_flyer_number)?;
        Ok(())
    }

    /// Current license key of the backing service.
    fn license_key(&self) -> String;

    fn validation_mode(&self) -> ValidationMode;

    fn set_validation_mode(&self, mode: ValidationMode);

    fn subscribe_lookup_performed(&self, listener: LookupListener) -> LookupSubscription;

    /// Returns `false` when the subscription was already removed.
    fn unsubscribe_lookup_performed(&self, subscription: LookupSubscription) -> bool;
}

/// Failure raised by the validator instead of an answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidatorError {
    #[error("validator unavailable: {0}")]
    Unavailable(String),
    #[error("validator lookup timed out")]
    Timeout,
    #[error("validator rejected lookup: {0}")]
    Rejected(String),
}

/// Notification payload fired after each completed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupPerformed {
    pub frequent_flyer_number: String,
    pub mode: ValidationMode,
}

pub type LookupListener = Box<dyn Fn(&LookupPerformed) + Send + Sync>;

/// Handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupSubscription(u64);

/// Subscriber registry a validator implementation embeds to honour the
/// lookup notification contract.
///
/// Listeners must not subscribe or unsubscribe from inside a callback.
#[derive(Default)]
pub struct LookupListeners {
    next_id: AtomicU64,
    listeners: RwLock<Vec<(LookupSubscription, LookupListener)>>,
}

impl LookupListeners {
    pub fn subscribe(&self, listener: LookupListener) -> LookupSubscription {
        let subscription = LookupSubscription(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((subscription, listener));
        subscription
    }

    pub fn unsubscribe(&self, subscription: LookupSubscription) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match listeners.iter().position(|(id, _)| *id == subscription) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn notify(&self, event: &LookupPerformed) {
        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        for (_, listener) in listeners.iter() {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for LookupListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupListeners")
            .field("listeners", &self.len())
            .finish()
    }
}
