//! Credit card application decisions backed by a frequent flyer number validator.

pub mod domain;
pub mod evaluation;
pub mod validator;

#[cfg(test)]
mod tests;

pub use domain::{CreditCardApplication, CreditCardApplicationDecision, ValidationMode};
pub use evaluation::policy::{
    DETAILED_LOOKUP_AGE_THRESHOLD, HIGH_INCOME_THRESHOLD, LOW_AGE_THRESHOLD, LOW_INCOME_THRESHOLD,
};
pub use evaluation::CreditCardApplicationEvaluator;
pub use validator::{
    FrequentFlyerNumberValidator, LookupListener, LookupListeners, LookupPerformed,
    LookupSubscription, ValidatorError, LICENSE_KEY_EXPIRED,
};
