use std::sync::Arc;
use std::time::Duration;

use log::warn;
use tokio::sync::watch;

use payments_client::models::{Currency, DashboardStats, Language};
use payments_client::Gateway;

use crate::components::Poller;
use crate::i18n::{t, Key};
use crate::utils::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Payments,
    Subscriptions,
    Conversions,
}

/// Dashboard view state. Stats are a read-only snapshot replaced on every
/// successful poll tick; a failed poll keeps the previous snapshot.
pub struct Dashboard {
    stats: Option<DashboardStats>,
    poller: Option<Poller>,
}

impl Dashboard {
    pub fn new() -> Self {
        Dashboard {
            stats: None,
            poller: None,
        }
    }

    /// Starts the stats poller: one fetch immediately (mount) and then one
    /// per interval tick. The task is aborted when this view is dropped.
    pub fn start<G: Gateway + 'static>(
        &mut self,
        gateway: Arc<G>,
        every: Duration,
    ) -> watch::Receiver<Option<DashboardStats>> {
        let (tx, rx) = watch::channel(None);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                match gateway.stats().await {
                    Ok(stats) => {
                        let _ = tx.send(Some(stats));
                    }
                    Err(error) => warn!("stats poll failed: {error}"),
                }
            }
        });
        self.poller = Some(Poller::new(handle));
        rx
    }

    /// One-shot refetch, used at mount and by tab activation.
    pub async fn refresh<G: Gateway>(&mut self, gateway: &G) {
        match gateway.stats().await {
            Ok(stats) => self.stats = Some(stats),
            Err(error) => warn!("stats fetch failed: {error}"),
        }
    }

    pub fn apply(&mut self, stats: DashboardStats) {
        self.stats = Some(stats);
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    /// Tab activation triggers an on-demand refetch for that tab's detail
    /// view, then renders it.
    pub async fn activate_tab<G: Gateway>(
        &mut self,
        gateway: &G,
        tab: Tab,
        currency: Currency,
        language: Language,
    ) -> Vec<String> {
        self.refresh(gateway).await;
        self.render_tab(tab, currency, language)
    }

    pub fn render_summary(&self, currency: Currency, language: Language) -> Vec<String> {
        let Some(stats) = &self.stats else {
            return Vec::new();
        };
        vec![
            format!(
                "{}: {}",
                t(language, Key::TotalConverted),
                fmt::money(currency, stats.total_converted)
            ),
            format!(
                "{}: {}",
                t(language, Key::BtcReceived),
                fmt::btc(stats.btc_received)
            ),
            format!(
                "{}: {}",
                t(language, Key::ActiveSubscriptions),
                stats.active_subs
            ),
        ]
    }

    /// A zero count renders an explicit placeholder row, never an empty
    /// table body.
    pub fn render_tab(&self, tab: Tab, currency: Currency, language: Language) -> Vec<String> {
        match tab {
            Tab::Payments => {
                let count = self.stats.as_ref().map_or(0, |s| s.total_payments);
                if count == 0 {
                    vec![t(language, Key::NoPaymentsFound).to_string()]
                } else {
                    vec![format!("{}: {count}", t(language, Key::TotalPayments))]
                }
            }
            Tab::Subscriptions => {
                let count = self.stats.as_ref().map_or(0, |s| s.active_subs);
                if count == 0 {
                    vec![t(language, Key::NoSubscriptionsFound).to_string()]
                } else {
                    vec![format!("{}: {count}", t(language, Key::ActiveSubscriptions))]
                }
            }
            Tab::Conversions => match &self.stats {
                Some(stats) if stats.total_payments > 0 => vec![
                    format!(
                        "{}: {}",
                        t(language, Key::TotalConverted),
                        fmt::money(currency, stats.total_converted)
                    ),
                    format!(
                        "{}: {}",
                        t(language, Key::BtcReceived),
                        fmt::btc(stats.btc_received)
                    ),
                ],
                _ => vec![t(language, Key::NoConversionsFound).to_string()],
            },
        }
    }
}
