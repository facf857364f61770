//! Credit card application evaluation.
//!
//! [`CreditCardApplicationEvaluator`] decides each application by combining the
//! applicant's income and age with the answer of an external
//! [`FrequentFlyerNumberValidator`]. Validator faults and an expired service
//! license never escape evaluation; both resolve to a referral for human review.

pub mod applications;
pub mod config;
pub mod error;
pub mod telemetry;

pub use applications::{
    CreditCardApplication, CreditCardApplicationDecision, CreditCardApplicationEvaluator,
    FrequentFlyerNumberValidator, LookupListener, LookupListeners, LookupPerformed,
    LookupSubscription, ValidationMode, ValidatorError, DETAILED_LOOKUP_AGE_THRESHOLD,
    HIGH_INCOME_THRESHOLD, LICENSE_KEY_EXPIRED, LOW_AGE_THRESHOLD, LOW_INCOME_THRESHOLD,
};

use config::AppConfig;
use error::AppError;

/// Load configuration and install the tracing subscriber.
pub fn bootstrap() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    tracing::info!(environment = config.environment.label(), "telemetry initialised");
    Ok(config)
}
