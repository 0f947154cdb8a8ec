use serde::{Deserialize, Serialize};

/// Currencies accepted by the payment backend. Wire codes are lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Brl,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Brl => "brl",
            Currency::Usd => "usd",
        }
    }
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Brl => "R$",
            Currency::Usd => "$",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Brl
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Unique,
    Subscription,
}

/// Display language, transmitted with `create_payment` so the backend can
/// localize its own messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Pt,
    En,
    Es,
}

impl Default for Language {
    fn default() -> Self {
        Language::Pt
    }
}

/// Payload for `/api/create_payment`. Card fields are passed through as
/// entered; tokenization happens (or doesn't) on the backend side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub email: String,
    pub name: String,
    pub amount: f64,
    pub currency: Currency,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub card_number: String,
    pub exp_month: u32,
    pub exp_year: u32,
    pub cvc: String,
    pub language: Language,
}

/// Fee and Bitcoin-equivalent breakdown for a candidate amount. Read-only,
/// replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConversionPreview {
    pub original_amount: f64,
    pub fee_amount: f64,
    pub amount_after_fee: f64,
    pub btc_amount: f64,
    pub btc_price: f64,
    #[serde(default)]
    pub btc_amount_satoshi: Option<u64>,
}

/// Aggregate snapshot from `/api/stats`, re-fetched on every poll tick.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardStats {
    pub total_converted: f64,
    pub btc_received: f64,
    pub active_subs: u64,
    pub total_payments: u64,
    #[serde(default)]
    pub btc_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DropshipProduct {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub profit_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropshipOrder {
    pub email: String,
    pub name: String,
    pub product_name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeeOptimization {
    pub fee_info: FeeInfo,
    pub bypass_stats: BypassStats,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeeInfo {
    pub fee_percent: f64,
    pub fee_amount: f64,
    pub savings: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BypassStats {
    pub keys_used: u64,
    pub total_savings: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_wire_codes_are_lowercase() {
        assert_eq!(Currency::Brl.code(), "brl");
        assert_eq!(Currency::Usd.code(), "usd");
        assert_eq!(Currency::Brl.symbol(), "R$");
    }

    #[test]
    fn payment_request_serializes_contract_field_names() {
        let request = PaymentRequest {
            email: "a@b.c".into(),
            name: "Ana".into(),
            amount: 50.0,
            currency: Currency::Brl,
            payment_type: PaymentType::Subscription,
            card_number: "4111111111111111".into(),
            exp_month: 12,
            exp_year: 2030,
            cvc: "123".into(),
            language: Language::Pt,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["currency"], "brl");
        assert_eq!(value["type"], "subscription");
        assert_eq!(value["language"], "pt");
        assert_eq!(value["exp_month"], 12);
        assert_eq!(value["amount"], 50.0);
    }

    #[test]
    fn preview_tolerates_missing_satoshi_field() {
        let preview: ConversionPreview = serde_json::from_value(serde_json::json!({
            "original_amount": 100.0,
            "fee_amount": 1.0,
            "amount_after_fee": 99.0,
            "btc_amount": 0.00015,
            "btc_price": 650000.0
        }))
        .unwrap();
        assert_eq!(preview.btc_amount_satoshi, None);
    }
}
