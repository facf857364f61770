use serde::{Deserialize, Serialize};

/// Applicant snapshot submitted for a credit card decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCardApplication {
    pub gross_annual_income: u64,
    pub age: u32,
    #[serde(default)]
    pub frequent_flyer_number: String,
}

impl CreditCardApplication {
    pub fn with_income(mut self, gross_annual_income: u64) -> Self {
        self.gross_annual_income = gross_annual_income;
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_frequent_flyer_number(mut self, number: impl Into<String>) -> Self {
        self.frequent_flyer_number = number.into();
        self
    }
}

/// Outcome of evaluating a single application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditCardApplicationDecision {
    AutoAccepted,
    AutoDeclined,
    ReferredToHuman,
}

impl CreditCardApplicationDecision {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AutoAccepted => "auto_accepted",
            Self::AutoDeclined => "auto_declined",
            Self::ReferredToHuman => "referred_to_human",
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Self::AutoAccepted => "application accepted automatically".to_string(),
            Self::AutoDeclined => "application declined automatically".to_string(),
            Self::ReferredToHuman => "requires manual review".to_string(),
        }
    }
}

/// Lookup depth hint the validator reads before checking a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    Quick,
    Detailed,
    #[default]
    None,
}
