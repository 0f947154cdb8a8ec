use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::error::Error;
use crate::models::{
    ConversionPreview, Currency, DashboardStats, DropshipOrder, DropshipProduct, FeeOptimization,
    PaymentRequest,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The backend HTTP contract. Components talk to this trait so tests can
/// substitute a recording gateway without a network.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn bitcoin_price(&self, currency: Currency) -> Result<f64, Error>;
    async fn preview_conversion(
        &self,
        amount: f64,
        currency: Currency,
    ) -> Result<ConversionPreview, Error>;
    /// Returns the backend's success message.
    async fn create_payment(&self, request: &PaymentRequest) -> Result<String, Error>;
    async fn dropship_products(&self) -> Result<Vec<DropshipProduct>, Error>;
    /// Returns the Bitcoin amount the order proceeds converted into.
    async fn dropship_order(&self, order: &DropshipOrder) -> Result<f64, Error>;
    async fn upsell(&self, email: &str, name: &str, amount: f64) -> Result<(), Error>;
    async fn fee_optimization(&self, amount: f64) -> Result<FeeOptimization, Error>;
    async fn stats(&self) -> Result<DashboardStats, Error>;
}

pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// The backend contract specifies no timeout; a fixed per-request
    /// timeout is applied here so a stalled backend surfaces as a transport
    /// error instead of hanging the action forever.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let base = Url::parse(base_url)?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base.as_str().trim_end_matches('/'), path)
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, Error> {
        debug!("GET {path}");
        let response = self.http.get(self.endpoint(path)).query(query).send().await?;
        Ok(response.json().await?)
    }

    async fn post<B: serde::Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, Error> {
        debug!("POST {path}");
        let response = self.http.post(self.endpoint(path)).json(body).send().await?;
        Ok(response.json().await?)
    }
}

/// Every backend response carries a `success` discriminator; failures carry
/// an `error` string next to it. Payload fields are only decoded once the
/// discriminator says the call succeeded.
fn decode<T: DeserializeOwned>(body: Value) -> Result<T, Error> {
    ensure_success(&body)?;
    Ok(serde_json::from_value(body)?)
}

fn ensure_success(body: &Value) -> Result<(), Error> {
    if body.get("success").and_then(Value::as_bool) == Some(true) {
        return Ok(());
    }
    let message = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("backend reported failure")
        .to_string();
    Err(Error::Backend(message))
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    price: f64,
}

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Deserialize)]
struct ProductsResponse {
    products: Vec<DropshipProduct>,
}

#[derive(Deserialize)]
struct OrderResponse {
    btc_amount: f64,
}

#[async_trait]
impl Gateway for ApiClient {
    async fn bitcoin_price(&self, currency: Currency) -> Result<f64, Error> {
        let body = self
            .get("/api/bitcoin_price", &[("currency", currency.code().to_string())])
            .await?;
        Ok(decode::<PriceResponse>(body)?.price)
    }

    async fn preview_conversion(
        &self,
        amount: f64,
        currency: Currency,
    ) -> Result<ConversionPreview, Error> {
        let body = self
            .post(
                "/api/preview_conversion",
                &json!({ "amount": amount, "currency": currency.code() }),
            )
            .await?;
        decode(body)
    }

    async fn create_payment(&self, request: &PaymentRequest) -> Result<String, Error> {
        let body = self.post("/api/create_payment", request).await?;
        Ok(decode::<MessageResponse>(body)?.message)
    }

    async fn dropship_products(&self) -> Result<Vec<DropshipProduct>, Error> {
        let body = self.get("/api/dropship_products", &[]).await?;
        Ok(decode::<ProductsResponse>(body)?.products)
    }

    async fn dropship_order(&self, order: &DropshipOrder) -> Result<f64, Error> {
        let body = self.post("/api/dropship_order", order).await?;
        Ok(decode::<OrderResponse>(body)?.btc_amount)
    }

    async fn upsell(&self, email: &str, name: &str, amount: f64) -> Result<(), Error> {
        let body = self
            .post(
                "/api/upsell",
                &json!({ "email": email, "name": name, "amount": amount }),
            )
            .await?;
        ensure_success(&body)
    }

    async fn fee_optimization(&self, amount: f64) -> Result<FeeOptimization, Error> {
        let body = self
            .get("/api/fee_optimization", &[("amount", amount.to_string())])
            .await?;
        decode(body)
    }

    async fn stats(&self) -> Result<DashboardStats, Error> {
        let body = self.get("/api/stats", &[]).await?;
        decode(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_accepts_successful_envelope() {
        let body = json!({ "success": true, "price": 650000.0 });
        let response: PriceResponse = decode(body).unwrap();
        assert_eq!(response.price, 650000.0);
    }

    #[test]
    fn decode_maps_failure_to_backend_error() {
        let body = json!({ "success": false, "error": "card declined" });
        let result = decode::<PriceResponse>(body);
        match result {
            Err(Error::Backend(message)) => assert_eq!(message, "card declined"),
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[test]
    fn decode_treats_missing_discriminator_as_failure() {
        let body = json!({ "price": 650000.0 });
        assert!(matches!(decode::<PriceResponse>(body), Err(Error::Backend(_))));
    }

    #[test]
    fn decode_falls_back_when_error_text_is_missing() {
        let body = json!({ "success": false });
        match decode::<PriceResponse>(body) {
            Err(Error::Backend(message)) => assert_eq!(message, "backend reported failure"),
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[test]
    fn decode_reports_malformed_payload_as_decode_error() {
        let body = json!({ "success": true, "price": "not a number" });
        assert!(matches!(decode::<PriceResponse>(body), Err(Error::Decode(_))));
    }

    #[test]
    fn endpoint_joins_base_without_double_slash() {
        let client = ApiClient::new("http://localhost:5000/").unwrap();
        assert_eq!(
            client.endpoint("/api/stats"),
            "http://localhost:5000/api/stats"
        );
    }
}
