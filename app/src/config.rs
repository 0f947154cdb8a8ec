use std::fs;

use serde::Deserialize;

use payments_client::models::{Currency, Language};

#[derive(Deserialize)]
pub struct Config {
    pub api: Api,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub poll: Poll,
}
impl Config {
    pub fn read() -> Self {
        let path = std::env::var("PAYMENTS_APP_CONFIG").unwrap_or_else(|_| "config.toml".into());
        let contents = fs::read_to_string(&path).expect("Cannot read configuration file");
        toml::from_str(&contents).expect("Cannot parse configuration file")
    }
}

#[derive(Deserialize)]
pub struct Api {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Default)]
pub struct Ui {
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Deserialize)]
pub struct Poll {
    #[serde(default = "default_price_interval")]
    pub price_interval_secs: u64,
    #[serde(default = "default_stats_interval")]
    pub stats_interval_secs: u64,
}

impl Default for Poll {
    fn default() -> Self {
        Poll {
            price_interval_secs: default_price_interval(),
            stats_interval_secs: default_stats_interval(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

// 5 minutes for the price ticker, 30 seconds for dashboard stats.
fn default_price_interval() -> u64 {
    300
}
fn default_stats_interval() -> u64 {
    30
}
