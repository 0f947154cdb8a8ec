pub mod dashboard;
pub mod form;
pub mod preview;
pub mod promo;
pub mod ticker;

use tokio::task::JoinHandle;

/// Owns a background polling task and aborts it on drop, so a poller can
/// never outlive the view that started it.
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use payments_client::error::Error;
    use payments_client::models::{
        BypassStats, ConversionPreview, Currency, DashboardStats, DropshipOrder, DropshipProduct,
        FeeInfo, FeeOptimization, PaymentRequest,
    };
    use payments_client::Gateway;

    /// Canned reply for one gateway endpoint.
    #[derive(Clone)]
    pub enum Reply<T> {
        Ok(T),
        Backend(&'static str),
        Transport,
    }

    impl<T: Clone> Reply<T> {
        fn produce(&self) -> Result<T, Error> {
            match self {
                Reply::Ok(value) => Ok(value.clone()),
                Reply::Backend(message) => Err(Error::Backend((*message).to_string())),
                Reply::Transport => Err(Error::Transport("connection refused".into())),
            }
        }
    }

    /// Records every call and answers from configurable canned replies.
    pub struct MockGateway {
        pub payment_calls: Mutex<Vec<PaymentRequest>>,
        pub preview_calls: Mutex<Vec<(f64, Currency)>>,
        pub order_calls: Mutex<Vec<DropshipOrder>>,
        pub upsell_calls: Mutex<Vec<(String, String, f64)>>,
        pub stats_calls: Mutex<u32>,
        pub price_reply: Reply<f64>,
        pub preview_reply: Reply<ConversionPreview>,
        pub payment_reply: Reply<String>,
        pub products_reply: Reply<Vec<DropshipProduct>>,
        pub order_reply: Reply<f64>,
        pub upsell_reply: Reply<()>,
        pub fee_reply: Reply<FeeOptimization>,
        pub stats_reply: Reply<DashboardStats>,
    }

    impl Default for MockGateway {
        fn default() -> Self {
            MockGateway {
                payment_calls: Mutex::new(Vec::new()),
                preview_calls: Mutex::new(Vec::new()),
                order_calls: Mutex::new(Vec::new()),
                upsell_calls: Mutex::new(Vec::new()),
                stats_calls: Mutex::new(0),
                price_reply: Reply::Ok(650000.0),
                preview_reply: Reply::Ok(sample_preview()),
                payment_reply: Reply::Ok("Payment processed!".into()),
                products_reply: Reply::Ok(Vec::new()),
                order_reply: Reply::Ok(0.0015),
                upsell_reply: Reply::Ok(()),
                fee_reply: Reply::Ok(sample_fee_optimization()),
                stats_reply: Reply::Ok(sample_stats()),
            }
        }
    }

    pub fn sample_preview() -> ConversionPreview {
        ConversionPreview {
            original_amount: 100.0,
            fee_amount: 1.0,
            amount_after_fee: 99.0,
            btc_amount: 0.00015,
            btc_price: 650000.0,
            btc_amount_satoshi: None,
        }
    }

    pub fn sample_stats() -> DashboardStats {
        DashboardStats {
            total_converted: 1500.0,
            btc_received: 0.0025,
            active_subs: 2,
            total_payments: 7,
            btc_price: None,
        }
    }

    pub fn sample_fee_optimization() -> FeeOptimization {
        FeeOptimization {
            fee_info: FeeInfo {
                fee_percent: 2.4,
                fee_amount: 2.4,
                savings: 0.5,
            },
            bypass_stats: BypassStats {
                keys_used: 3,
                total_savings: 12.34,
            },
        }
    }

    #[async_trait]
    impl Gateway for MockGateway {
        async fn bitcoin_price(&self, _currency: Currency) -> Result<f64, Error> {
            self.price_reply.produce()
        }

        async fn preview_conversion(
            &self,
            amount: f64,
            currency: Currency,
        ) -> Result<ConversionPreview, Error> {
            self.preview_calls.lock().unwrap().push((amount, currency));
            self.preview_reply.produce()
        }

        async fn create_payment(&self, request: &PaymentRequest) -> Result<String, Error> {
            self.payment_calls.lock().unwrap().push(request.clone());
            self.payment_reply.produce()
        }

        async fn dropship_products(&self) -> Result<Vec<DropshipProduct>, Error> {
            self.products_reply.produce()
        }

        async fn dropship_order(&self, order: &DropshipOrder) -> Result<f64, Error> {
            self.order_calls.lock().unwrap().push(order.clone());
            self.order_reply.produce()
        }

        async fn upsell(&self, email: &str, name: &str, amount: f64) -> Result<(), Error> {
            self.upsell_calls
                .lock()
                .unwrap()
                .push((email.to_string(), name.to_string(), amount));
            self.upsell_reply.produce()
        }

        async fn fee_optimization(&self, _amount: f64) -> Result<FeeOptimization, Error> {
            self.fee_reply.produce()
        }

        async fn stats(&self) -> Result<DashboardStats, Error> {
            *self.stats_calls.lock().unwrap() += 1;
            self.stats_reply.produce()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::Poller;

    #[tokio::test]
    async fn dropping_the_poller_stops_its_task() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = ticks.clone();
        let poller = Poller::new(tokio::spawn(async move {
            loop {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        }));

        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(poller);
        tokio::time::sleep(Duration::from_millis(20)).await;

        let after_drop = ticks.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), after_drop);
    }
}
