use payments_client::error::Error;
use payments_client::models::{Currency, Language, PaymentRequest, PaymentType};
use payments_client::Gateway;

use crate::i18n::{t, Key};

pub const MIN_AMOUNT: f64 = 10.0;
pub const MAX_AMOUNT: f64 = 10000.0;

/// Request-state of the submit action. Only `submit` and its resolution
/// transition this; a submit arriving while `InFlight` is dropped, not
/// queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A submission was already in flight; nothing happened.
    Ignored,
    /// Local validation failed; no network call was issued.
    Rejected(String),
    /// Backend accepted the payment. Any visible conversion preview must
    /// be hidden by the caller.
    Completed(String),
    /// Backend or transport failure; form fields are left untouched.
    Failed(String),
}

pub struct PaymentForm {
    pub email: String,
    pub name: String,
    /// Amount as typed; parsed only at validation time.
    pub amount: String,
    pub currency: Currency,
    pub payment_type: PaymentType,
    pub card_number: String,
    pub exp_month: String,
    pub exp_year: String,
    pub cvc: String,
    pub language: Language,
    state: SubmitState,
    status: Option<String>,
}

impl PaymentForm {
    pub fn new(currency: Currency, language: Language) -> Self {
        PaymentForm {
            email: String::new(),
            name: String::new(),
            amount: String::new(),
            currency,
            payment_type: PaymentType::Unique,
            card_number: String::new(),
            exp_month: String::new(),
            exp_year: String::new(),
            cvc: String::new(),
            language,
            state: SubmitState::Idle,
            status: None,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Last success or error message surfaced to the user.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn amount_value(&self) -> Option<f64> {
        self.amount.trim().parse().ok()
    }

    /// Local validation, run before any network call. A non-numeric amount
    /// counts as missing.
    pub fn validate(&self) -> Result<PaymentRequest, Error> {
        if self.email.trim().is_empty() || self.name.trim().is_empty() {
            return Err(Error::Validation(
                t(self.language, Key::FillAllFields).to_string(),
            ));
        }
        let amount = match self.amount_value() {
            Some(amount) => amount,
            None => {
                return Err(Error::Validation(
                    t(self.language, Key::FillAllFields).to_string(),
                ))
            }
        };
        if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&amount) {
            return Err(Error::Validation(
                t(self.language, Key::AmountBounds).to_string(),
            ));
        }

        Ok(PaymentRequest {
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
            amount,
            currency: self.currency,
            payment_type: self.payment_type,
            card_number: self.card_number.trim().to_string(),
            exp_month: self.exp_month.trim().parse().unwrap_or(0),
            exp_year: self.exp_year.trim().parse().unwrap_or(0),
            cvc: self.cvc.trim().to_string(),
            language: self.language,
        })
    }

    pub async fn submit<G: Gateway>(&mut self, gateway: &G) -> SubmitOutcome {
        if self.state == SubmitState::InFlight {
            return SubmitOutcome::Ignored;
        }

        let request = match self.validate() {
            Ok(request) => request,
            Err(error) => {
                let message = error.to_string();
                self.state = SubmitState::Failed;
                self.status = Some(message.clone());
                return SubmitOutcome::Rejected(message);
            }
        };

        self.state = SubmitState::InFlight;
        match gateway.create_payment(&request).await {
            Ok(message) => {
                self.email.clear();
                self.name.clear();
                self.amount.clear();
                self.state = SubmitState::Succeeded;
                self.status = Some(message.clone());
                SubmitOutcome::Completed(message)
            }
            Err(Error::Backend(message)) => {
                self.state = SubmitState::Failed;
                self.status = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
            Err(error) => {
                log::error!("payment request failed: {error}");
                let message = t(self.language, Key::ProcessingError).to_string();
                self.state = SubmitState::Failed;
                self.status = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    #[cfg(test)]
    pub fn set_state(&mut self, state: SubmitState) {
        self.state = state;
    }
}
