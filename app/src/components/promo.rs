use log::warn;

use payments_client::error::Error;
use payments_client::models::{DropshipOrder, DropshipProduct, Language};
use payments_client::Gateway;

use crate::i18n::{t, Key};
use crate::utils::fmt;

// Placeholders used when the form is empty; promo actions run regardless
// of form validity.
pub const FALLBACK_EMAIL: &str = "test@example.com";
pub const FALLBACK_NAME: &str = "Test Customer";
pub const FALLBACK_AMOUNT: f64 = 100.0;
pub const FALLBACK_PRODUCT: &str = "Test Product";

/// Raw form fields feeding a promo action.
pub struct PromoInput<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub amount: &'a str,
}

impl PromoInput<'_> {
    fn email(&self) -> &str {
        if self.email.trim().is_empty() {
            FALLBACK_EMAIL
        } else {
            self.email
        }
    }
    fn name(&self) -> &str {
        if self.name.trim().is_empty() {
            FALLBACK_NAME
        } else {
            self.name
        }
    }
    fn amount(&self) -> f64 {
        self.amount.trim().parse().unwrap_or(FALLBACK_AMOUNT)
    }
}

pub async fn dropship_order<G: Gateway>(
    gateway: &G,
    input: &PromoInput<'_>,
    product: Option<&DropshipProduct>,
    language: Language,
) -> String {
    let (product_name, amount) = match product {
        Some(product) => (product.name.as_str(), product.price),
        None => (FALLBACK_PRODUCT, input.amount()),
    };
    let order = DropshipOrder {
        email: input.email().to_string(),
        name: input.name().to_string(),
        product_name: product_name.to_string(),
        amount,
    };
    match gateway.dropship_order(&order).await {
        Ok(btc_amount) => format!(
            "{} {}",
            t(language, Key::DropshipSuccess),
            fmt::btc(btc_amount)
        ),
        Err(error) => render_error(error, language),
    }
}

pub async fn upsell<G: Gateway>(gateway: &G, input: &PromoInput<'_>, language: Language) -> String {
    match gateway
        .upsell(input.email(), input.name(), input.amount())
        .await
    {
        Ok(()) => t(language, Key::UpsellSuccess).to_string(),
        Err(error) => render_error(error, language),
    }
}

pub async fn fee_optimization<G: Gateway>(
    gateway: &G,
    input: &PromoInput<'_>,
    language: Language,
    currency: payments_client::models::Currency,
) -> Vec<String> {
    match gateway.fee_optimization(input.amount()).await {
        Ok(report) => vec![
            format!(
                "{}: {} ({})",
                t(language, Key::OptimizedFee),
                fmt::percent(report.fee_info.fee_percent),
                fmt::money(currency, report.fee_info.fee_amount)
            ),
            format!(
                "{}: {}",
                t(language, Key::Savings),
                fmt::money(currency, report.fee_info.savings)
            ),
            format!(
                "{}: {}",
                t(language, Key::KeysUsed),
                report.bypass_stats.keys_used
            ),
            format!(
                "{}: {}",
                t(language, Key::TotalSaved),
                fmt::money(currency, report.bypass_stats.total_savings)
            ),
        ],
        Err(error) => vec![render_error(error, language)],
    }
}

pub async fn products<G: Gateway>(
    gateway: &G,
    language: Language,
    currency: payments_client::models::Currency,
) -> Vec<String> {
    match gateway.dropship_products().await {
        Ok(products) => products
            .iter()
            .map(|product| {
                format!(
                    "{} [{}] {} ({} {:.0}%)",
                    product.name,
                    product.category,
                    fmt::money(currency, product.price),
                    t(language, Key::Profit),
                    product.profit_margin * 100.0
                )
            })
            .collect(),
        Err(error) => vec![render_error(error, language)],
    }
}

fn render_error(error: Error, language: Language) -> String {
    match error {
        Error::Backend(message) => message,
        other => {
            warn!("promo action failed: {other}");
            t(language, Key::ProcessingError).to_string()
        }
    }
}
