use log::{debug, warn};

use payments_client::error::Error;
use payments_client::models::{ConversionPreview, Currency, Language};

use crate::components::form::MIN_AMOUNT;
use crate::i18n::{t, Key};
use crate::utils::fmt;

/// What the caller must do after an amount change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewAction {
    /// Fetch a preview for `amount` and resolve it under `token`.
    Fetch { token: u64, amount: f64 },
    /// Amount is below the preview threshold; the preview was cleared and
    /// no fetch must be issued.
    Hide,
}

/// Holds the currently displayed conversion preview. Preview fetches race
/// with fast typing, so every fetch carries a monotonically increasing
/// token and only the latest issued token may apply its response.
pub struct PreviewFetcher {
    next_token: u64,
    latest: Option<u64>,
    current: Option<ConversionPreview>,
}

impl PreviewFetcher {
    pub fn new() -> Self {
        PreviewFetcher {
            next_token: 0,
            latest: None,
            current: None,
        }
    }

    pub fn on_amount_change(&mut self, amount: Option<f64>) -> PreviewAction {
        match amount {
            Some(amount) if amount >= MIN_AMOUNT => {
                self.next_token += 1;
                self.latest = Some(self.next_token);
                PreviewAction::Fetch {
                    token: self.next_token,
                    amount,
                }
            }
            _ => {
                self.hide();
                PreviewAction::Hide
            }
        }
    }

    /// Applies a resolved fetch. Superseded responses are discarded; failed
    /// fetches are logged and leave the last-shown preview untouched.
    pub fn resolve(&mut self, token: u64, result: Result<ConversionPreview, Error>) {
        if self.latest != Some(token) {
            debug!("discarding superseded preview response (token {token})");
            return;
        }
        match result {
            Ok(preview) => self.current = Some(preview),
            Err(error) => warn!("preview fetch failed: {error}"),
        }
    }

    pub fn current(&self) -> Option<&ConversionPreview> {
        self.current.as_ref()
    }

    /// Clears the preview and invalidates any fetch still in flight.
    pub fn hide(&mut self) {
        self.latest = None;
        self.current = None;
    }
}

pub fn render(preview: &ConversionPreview, currency: Currency, language: Language) -> Vec<String> {
    vec![
        format!(
            "{}: {}",
            t(language, Key::OriginalAmount),
            fmt::money(currency, preview.original_amount)
        ),
        format!(
            "{}: {}",
            t(language, Key::Fee),
            fmt::money(currency, preview.fee_amount)
        ),
        format!(
            "{}: {}",
            t(language, Key::NetAmount),
            fmt::money(currency, preview.amount_after_fee)
        ),
        format!(
            "{}: {}",
            t(language, Key::BtcReceived),
            fmt::btc(preview.btc_amount)
        ),
        format!(
            "{}: {}",
            t(language, Key::BtcPrice),
            fmt::money(currency, preview.btc_price)
        ),
    ]
}
