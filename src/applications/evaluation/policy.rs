use super::super::domain::{CreditCardApplication, CreditCardApplicationDecision, ValidationMode};

/// Income at or above which an application is accepted without a lookup.
pub const HIGH_INCOME_THRESHOLD: u64 = 100_000;

/// Income below which a validated applicant is declined.
pub const LOW_INCOME_THRESHOLD: u64 = 20_000;

/// Age from which the validator is asked for a detailed lookup.
pub const DETAILED_LOOKUP_AGE_THRESHOLD: u32 = 30;

/// Applicants younger than this (20 and under) are referred once their
/// frequent flyer number has been validated.
pub const LOW_AGE_THRESHOLD: u32 = 21;

pub(crate) fn is_high_income(application: &CreditCardApplication) -> bool {
    application.gross_annual_income >= HIGH_INCOME_THRESHOLD
}

pub(crate) fn lookup_mode(application: &CreditCardApplication) -> ValidationMode {
    if application.age >= DETAILED_LOOKUP_AGE_THRESHOLD {
        ValidationMode::Detailed
    } else {
        ValidationMode::Quick
    }
}

/// Remaining guards once the validator has answered.
pub(crate) fn decide_after_lookup(
    application: &CreditCardApplication,
    frequent_flyer_number_valid: bool,
) -> CreditCardApplicationDecision {
    if !frequent_flyer_number_valid {
        return CreditCardApplicationDecision::ReferredToHuman;
    }

    if application.age < LOW_AGE_THRESHOLD {
        return CreditCardApplicationDecision::ReferredToHuman;
    }

    if application.gross_annual_income < LOW_INCOME_THRESHOLD {
        return CreditCardApplicationDecision::AutoDeclined;
    }

    CreditCardApplicationDecision::ReferredToHuman
}
