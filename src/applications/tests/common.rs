use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::applications::domain::{CreditCardApplication, ValidationMode};
use crate::applications::evaluation::CreditCardApplicationEvaluator;
use crate::applications::validator::{
    FrequentFlyerNumberValidator, LookupListener, LookupListeners, LookupPerformed,
    LookupSubscription, ValidatorError,
};

type Answer = Box<dyn Fn(&str) -> Result<bool, ValidatorError> + Send + Sync>;

/// Validator double that answers from a script and records every interaction.
pub(super) struct ScriptedValidator {
    license_key: String,
    answer: Answer,
    raises_lookup_events: bool,
    mode: Mutex<ValidationMode>,
    mode_writes: Mutex<Vec<ValidationMode>>,
    license_reads: AtomicUsize,
    lookups: Mutex<Vec<String>>,
    out_lookups: Mutex<Vec<String>>,
    listeners: LookupListeners,
}

impl Default for ScriptedValidator {
    fn default() -> Self {
        Self {
            license_key: "OK".to_string(),
            answer: Box::new(|_| Ok(false)),
            raises_lookup_events: true,
            mode: Mutex::new(ValidationMode::None),
            mode_writes: Mutex::new(Vec::new()),
            license_reads: AtomicUsize::new(0),
            lookups: Mutex::new(Vec::new()),
            out_lookups: Mutex::new(Vec::new()),
            listeners: LookupListeners::default(),
        }
    }
}

impl ScriptedValidator {
    pub(super) fn answering(is_valid: bool) -> Self {
        Self::default().with_answer(move |_| Ok(is_valid))
    }

    pub(super) fn failing(error: ValidatorError) -> Self {
        Self::default().with_answer(move |_| Err(error.clone()))
    }

    pub(super) fn with_answer<F>(mut self, answer: F) -> Self
    where
        F: Fn(&str) -> Result<bool, ValidatorError> + Send + Sync + 'static,
    {
        self.answer = Box::new(answer);
        self
    }

    pub(super) fn with_license_key(mut self, key: &str) -> Self {
        self.license_key = key.to_string();
        self
    }

    pub(super) fn silent(mut self) -> Self {
        self.raises_lookup_events = false;
        self
    }

    pub(super) fn license_reads(&self) -> usize {
        self.license_reads.load(Ordering::SeqCst)
    }

    pub(super) fn mode_writes(&self) -> Vec<ValidationMode> {
        self.mode_writes.lock().expect("mode mutex poisoned").clone()
    }

    pub(super) fn lookups(&self) -> Vec<String> {
        self.lookups.lock().expect("lookup mutex poisoned").clone()
    }

    pub(super) fn out_lookups(&self) -> Vec<String> {
        self.out_lookups.lock().expect("lookup mutex poisoned").clone()
    }

    pub(super) fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn answer_and_raise(&self, frequent_flyer_number: &str) -> Result<bool, ValidatorError> {
        let is_valid = (self.answer)(frequent_flyer_number)?;
        if self.raises_lookup_events {
            self.listeners.notify(&LookupPerformed {
                frequent_flyer_number: frequent_flyer_number.to_string(),
                mode: self.validation_mode(),
            });
        }
        Ok(is_valid)
    }
}

impl FrequentFlyerNumberValidator for ScriptedValidator {
    fn is_valid(&self, frequent_flyer_number: &str) -> Result<bool, ValidatorError> {
        self.lookups
            .lock()
            .expect("lookup mutex poisoned")
            .push(frequent_flyer_number.to_string());
        self.answer_and_raise(frequent_flyer_number)
    }

    fn is_valid_into(
        &self,
        frequent_flyer_number: &str,
        is_valid: &mut bool,
    ) -> Result<(), ValidatorError> {
        self.out_lookups
            .lock()
            .expect("lookup mutex poisoned")
            .push(frequent_flyer_number.to_string());
        *is_valid = self.answer_and_raise(frequent_flyer_number)?;
        Ok(())
    }

    fn license_key(&self) -> String {
        self.license_reads.fetch_add(1, Ordering::SeqCst);
        self.license_key.clone()
    }

    fn validation_mode(&self) -> ValidationMode {
        *self.mode.lock().expect("mode mutex poisoned")
    }

    fn set_validation_mode(&self, mode: ValidationMode) {
        *self.mode.lock().expect("mode mutex poisoned") = mode;
        self.mode_writes
            .lock()
            .expect("mode mutex poisoned")
            .push(mode);
    }

    fn subscribe_lookup_performed(&self, listener: LookupListener) -> LookupSubscription {
        self.listeners.subscribe(listener)
    }

    fn unsubscribe_lookup_performed(&self, subscription: LookupSubscription) -> bool {
        self.listeners.unsubscribe(subscription)
    }
}

pub(super) fn build_evaluator(
    validator: ScriptedValidator,
) -> (
    CreditCardApplicationEvaluator<ScriptedValidator>,
    Arc<ScriptedValidator>,
) {
    let validator = Arc::new(validator);
    let evaluator = CreditCardApplicationEvaluator::new(validator.clone());
    (evaluator, validator)
}

pub(super) fn application(income: u64, age: u32) -> CreditCardApplication {
    CreditCardApplication::default()
        .with_income(income)
        .with_age(age)
}

/// Accepts any number containing a lowercase ASCII letter.
pub(super) fn has_lowercase_letter(frequent_flyer_number: &str) -> Result<bool, ValidatorError> {
    Ok(frequent_flyer_number
        .chars()
        .any(|character| character.is_ascii_lowercase()))
}
