use std::sync::Arc;
use std::time::Duration;

use log::warn;
use tokio::sync::watch;

use payments_client::models::{Currency, Language};
use payments_client::Gateway;

use crate::components::Poller;
use crate::i18n::{t, Key};
use crate::utils::fmt;

/// Current Bitcoin price display. Fetch failures keep the last-known price
/// on screen; the value is never reset to zero.
pub struct PriceTicker {
    price: Option<f64>,
    poller: Option<Poller>,
}

impl PriceTicker {
    pub fn new() -> Self {
        PriceTicker {
            price: None,
            poller: None,
        }
    }

    /// One-shot fetch, used on mount and whenever the currency changes.
    pub async fn refresh<G: Gateway>(&mut self, gateway: &G, currency: Currency) {
        match gateway.bitcoin_price(currency).await {
            Ok(price) => self.price = Some(price),
            Err(error) => warn!("price fetch failed: {error}"),
        }
    }

    /// Periodic variant: fetches immediately and then on every interval
    /// tick, publishing successful fetches on the returned channel. The
    /// task stops when this ticker is dropped.
    pub fn start<G: Gateway + 'static>(
        &mut self,
        gateway: Arc<G>,
        currency: Currency,
        every: Duration,
    ) -> watch::Receiver<Option<f64>> {
        let (tx, rx) = watch::channel(None);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                match gateway.bitcoin_price(currency).await {
                    Ok(price) => {
                        let _ = tx.send(Some(price));
                    }
                    Err(error) => warn!("price poll failed: {error}"),
                }
            }
        });
        self.poller = Some(Poller::new(handle));
        rx
    }

    pub fn apply(&mut self, price: f64) {
        self.price = Some(price);
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn render(&self, currency: Currency, language: Language) -> String {
        match self.price {
            Some(price) => format!(
                "{}: {}",
                t(language, Key::BtcPrice),
                fmt::money(currency, price)
            ),
            None => format!(
                "{}: {}",
                t(language, Key::BtcPrice),
                t(language, Key::PriceUnavailable)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::{MockGateway, Reply};

    #[tokio::test]
    async fn refresh_stores_the_fetched_price() {
        let gateway = MockGateway::default();
        let mut ticker = PriceTicker::new();
        ticker.refresh(&gateway, Currency::Brl).await;
        assert_eq!(ticker.price(), Some(650000.0));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_last_known_price() {
        let mut gateway = MockGateway::default();
        let mut ticker = PriceTicker::new();
        ticker.refresh(&gateway, Currency::Brl).await;

        gateway.price_reply = Reply::Transport;
        ticker.refresh(&gateway, Currency::Brl).await;
        assert_eq!(ticker.price(), Some(650000.0));

        gateway.price_reply = Reply::Backend("rate source offline");
        ticker.refresh(&gateway, Currency::Brl).await;
        assert_eq!(ticker.price(), Some(650000.0));
    }

    #[tokio::test]
    async fn periodic_ticker_publishes_prices() {
        let gateway = Arc::new(MockGateway::default());
        let mut ticker = PriceTicker::new();
        let mut rx = ticker.start(gateway, Currency::Usd, Duration::from_secs(300));

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(650000.0));
    }

    #[test]
    fn render_shows_placeholder_before_first_fetch() {
        let ticker = PriceTicker::new();
        assert_eq!(
            ticker.render(Currency::Brl, Language::En),
            "Bitcoin price: price unavailable"
        );
    }

    #[tokio::test]
    async fn render_formats_price_in_the_selected_currency() {
        let gateway = MockGateway::default();
        let mut ticker = PriceTicker::new();
        ticker.refresh(&gateway, Currency::Brl).await;
        assert_eq!(
            ticker.render(Currency::Brl, Language::Pt),
            "Preço Bitcoin: R$ 650.000,00"
        );
    }
}
