pub mod policy;

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{CreditCardApplication, CreditCardApplicationDecision};
use super::validator::{
    FrequentFlyerNumberValidator, LookupSubscription, ValidatorError, LICENSE_KEY_EXPIRED,
};

static EVALUATOR_SEQUENCE: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static ACTIVE_EVALUATOR: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Marks the current thread as running a lookup on behalf of one evaluator,
/// so notifications raised by a shared validator reach the right counter.
struct ActiveLookup {
    previous: Option<u64>,
}

impl ActiveLookup {
    fn enter(evaluator_id: u64) -> Self {
        let previous = ACTIVE_EVALUATOR.with(|active| active.replace(Some(evaluator_id)));
        Self { previous }
    }
}

impl Drop for ActiveLookup {
    fn drop(&mut self) {
        ACTIVE_EVALUATOR.with(|active| active.set(self.previous));
    }
}

/// How the validity answer is collected from the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupStyle {
    Return,
    OutParameter,
}

impl LookupStyle {
    fn lookup<V>(self, validator: &V, frequent_flyer_number: &str) -> Result<bool, ValidatorError>
    where
        V: FrequentFlyerNumberValidator + ?Sized,
    {
        match self {
            LookupStyle::Return => validator.is_valid(frequent_flyer_number),
            LookupStyle::OutParameter => {
                let mut is_valid = false;
                validator.is_valid_into(frequent_flyer_number, &mut is_valid)?;
                Ok(is_valid)
            }
        }
    }
}

/// Decides credit card applications, consulting the validator only when
/// income alone is not conclusive.
///
/// The evaluator subscribes to the validator's lookup notifications on
/// construction and counts those raised by its own lookups. The subscription
/// is removed when the evaluator is dropped.
pub struct CreditCardApplicationEvaluator<V: FrequentFlyerNumberValidator + ?Sized> {
    id: u64,
    validator: Arc<V>,
    subscription: LookupSubscription,
    lookup_count: Arc<AtomicU64>,
}

impl<V> CreditCardApplicationEvaluator<V>
where
    V: FrequentFlyerNumberValidator + ?Sized,
{
    pub fn new(validator: Arc<V>) -> Self {
        let id = EVALUATOR_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let lookup_count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&lookup_count);
        let subscription = validator.subscribe_lookup_performed(Box::new(move |_event| {
            if ACTIVE_EVALUATOR.with(Cell::get) == Some(id) {
                counter.fetch_add(1, Ordering::Relaxed);
            }
        }));

        Self {
            id,
            validator,
            subscription,
            lookup_count,
        }
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Number of successful lookups this evaluator has performed.
    pub fn validator_lookup_count(&self) -> u64 {
        self.lookup_count.load(Ordering::Relaxed)
    }

    pub fn evaluate(&self, application: &CreditCardApplication) -> CreditCardApplicationDecision {
        self.decide(application, LookupStyle::Return)
    }

    /// Same decision as [`evaluate`](Self::evaluate), reading the validity
    /// answer through [`FrequentFlyerNumberValidator::is_valid_into`].
    pub fn evaluate_using_out(
        &self,
        application: &CreditCardApplication,
    ) -> CreditCardApplicationDecision {
        self.decide(application, LookupStyle::OutParameter)
    }

    fn decide(
        &self,
        application: &CreditCardApplication,
        style: LookupStyle,
    ) -> CreditCardApplicationDecision {
        if policy::is_high_income(application) {
            debug!(
                income = application.gross_annual_income,
                "high income application accepted without lookup"
            );
            return CreditCardApplicationDecision::AutoAccepted;
        }

        if self.validator.license_key() == LICENSE_KEY_EXPIRED {
            info!("validator license expired; referring application");
            return CreditCardApplicationDecision::ReferredToHuman;
        }

        let mode = policy::lookup_mode(application);
        self.validator.set_validation_mode(mode);

        let lookup = {
            let _active = ActiveLookup::enter(self.id);
            style.lookup(&*self.validator, &application.frequent_flyer_number)
        };
        let is_valid = match lookup {
            Ok(is_valid) => is_valid,
            Err(error) => {
                warn!(%error, ?style, "frequent flyer lookup failed; referring application");
                return CreditCardApplicationDecision::ReferredToHuman;
            }
        };

        let decision = policy::decide_after_lookup(application, is_valid);
        debug!(
            age = application.age,
            ?mode,
            is_valid,
            decision = decision.label(),
            "application evaluated"
        );
        decision
    }
}

impl<V> Drop for CreditCardApplicationEvaluator<V>
where
    V: FrequentFlyerNumberValidator + ?Sized,
{
    fn drop(&mut self) {
        self.validator.unsubscribe_lookup_performed(self.subscription);
    }
}
