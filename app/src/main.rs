mod components;
mod config;
mod i18n;
mod utils;

use std::io::{self, BufRead, Write as _};
use std::sync::Arc;
use std::time::Duration;

use payments_client::models::{Currency, PaymentType};
use payments_client::{ApiClient, Gateway};

use components::dashboard::{Dashboard, Tab};
use components::form::{PaymentForm, SubmitOutcome};
use components::preview::{self, PreviewAction, PreviewFetcher};
use components::promo::{self, PromoInput};
use components::ticker::PriceTicker;
use config::Config;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let cli_args: Vec<String> = std::env::args().collect();
    let conf = Config::read();
    let gateway = ApiClient::with_timeout(
        &conf.api.base_url,
        Duration::from_secs(conf.api.timeout_secs),
    )?;

    if cli_args.contains(&String::from("--dashboard")) {
        run_dashboard(gateway, &conf).await
    } else {
        run_payment_form(gateway, &conf).await
    }
}

/// Interactive payment form: price on mount, preview as the amount
/// changes, one submission in flight at a time.
async fn run_payment_form(gateway: ApiClient, conf: &Config) -> Result<(), Error> {
    let language = conf.ui.language;
    let mut currency = conf.ui.currency;

    let mut ticker = PriceTicker::new();
    ticker.refresh(&gateway, currency).await;
    println!("{}", ticker.render(currency, language));

    let mut form = PaymentForm::new(currency, language);
    let mut fetcher = PreviewFetcher::new();

    print_form_help();
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "email" => form.email = rest.to_string(),
            "name" => form.name = rest.to_string(),
            "amount" => {
                form.amount = rest.to_string();
                match fetcher.on_amount_change(form.amount_value()) {
                    PreviewAction::Fetch { token, amount } => {
                        let result = gateway.preview_conversion(amount, currency).await;
                        fetcher.resolve(token, result);
                        if let Some(current) = fetcher.current() {
                            for row in preview::render(current, currency, language) {
                                println!("{row}");
                            }
                        }
                    }
                    PreviewAction::Hide => {}
                }
            }
            "currency" => match rest.trim() {
                "brl" => switch_currency(&mut currency, &mut form, &mut ticker, &gateway, Currency::Brl).await,
                "usd" => switch_currency(&mut currency, &mut form, &mut ticker, &gateway, Currency::Usd).await,
                other => println!("unknown currency: {other}"),
            },
            "type" => match rest.trim() {
                "unique" => form.payment_type = PaymentType::Unique,
                "subscription" => form.payment_type = PaymentType::Subscription,
                other => println!("unknown payment type: {other}"),
            },
            "card" => {
                let mut parts = rest.split_whitespace();
                if let (Some(number), Some(month), Some(year), Some(cvc)) =
                    (parts.next(), parts.next(), parts.next(), parts.next())
                {
                    form.card_number = number.to_string();
                    form.exp_month = month.to_string();
                    form.exp_year = year.to_string();
                    form.cvc = cvc.to_string();
                } else {
                    println!("usage: card <number> <exp-month> <exp-year> <cvc>");
                }
            }
            "pay" => match form.submit(&gateway).await {
                SubmitOutcome::Completed(message) => {
                    fetcher.hide();
                    println!("{message}");
                }
                SubmitOutcome::Rejected(message) | SubmitOutcome::Failed(message) => {
                    println!("{message}")
                }
                SubmitOutcome::Ignored => {}
            },
            "price" => {
                ticker.refresh(&gateway, currency).await;
                println!("{}", ticker.render(currency, language));
            }
            "products" => {
                for row in promo::products(&gateway, language, currency).await {
                    println!("{row}");
                }
            }
            "dropship" => {
                let input = promo_input(&form);
                println!("{}", promo::dropship_order(&gateway, &input, None, language).await);
            }
            "upsell" => {
                let input = promo_input(&form);
                println!("{}", promo::upsell(&gateway, &input, language).await);
            }
            "fees" => {
                let input = promo_input(&form);
                for row in promo::fee_optimization(&gateway, &input, language, currency).await {
                    println!("{row}");
                }
            }
            "quit" | "exit" => break,
            "" => {}
            _ => print_form_help(),
        }
    }

    Ok(())
}

fn promo_input(form: &PaymentForm) -> PromoInput<'_> {
    PromoInput {
        email: &form.email,
        name: &form.name,
        amount: &form.amount,
    }
}

async fn switch_currency(
    currency: &mut Currency,
    form: &mut PaymentForm,
    ticker: &mut PriceTicker,
    gateway: &ApiClient,
    next: Currency,
) {
    *currency = next;
    form.currency = next;
    // Currency changes refetch the price immediately, like the mobile app.
    ticker.refresh(gateway, next).await;
}

fn print_form_help() {
    println!("commands: email <addr> | name <name> | amount <value> | currency brl|usd");
    println!("          type unique|subscription | card <number> <mm> <yyyy> <cvc>");
    println!("          pay | price | products | dropship | upsell | fees | quit");
}

/// Dashboard surface: stats every 30s, price every 5 minutes, tab names on
/// stdin trigger on-demand detail refreshes.
async fn run_dashboard(gateway: ApiClient, conf: &Config) -> Result<(), Error> {
    let language = conf.ui.language;
    let currency = conf.ui.currency;
    let gateway = Arc::new(gateway);

    let mut dashboard = Dashboard::new();
    let mut stats_rx = dashboard.start(
        gateway.clone(),
        Duration::from_secs(conf.poll.stats_interval_secs),
    );

    let mut ticker = PriceTicker::new();
    let mut price_rx = ticker.start(
        gateway.clone(),
        currency,
        Duration::from_secs(conf.poll.price_interval_secs),
    );

    let (tab_tx, mut tab_rx) = tokio::sync::mpsc::channel::<Tab>(8);
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let tab = match line.trim() {
                "payments" => Tab::Payments,
                "subscriptions" | "subs" => Tab::Subscriptions,
                "conversions" => Tab::Conversions,
                "quit" | "exit" => break,
                "" => continue,
                other => {
                    println!("unknown tab: {other} (payments | subscriptions | conversions | quit)");
                    continue;
                }
            };
            if tab_tx.blocking_send(tab).is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            changed = stats_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = stats_rx.borrow_and_update().clone();
                if let Some(stats) = snapshot {
                    dashboard.apply(stats);
                    for row in dashboard.render_summary(currency, language) {
                        println!("{row}");
                    }
                }
            }
            changed = price_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let price = *price_rx.borrow_and_update();
                if let Some(price) = price {
                    ticker.apply(price);
                    println!("{}", ticker.render(currency, language));
                }
            }
            tab = tab_rx.recv() => {
                match tab {
                    Some(tab) => {
                        for row in dashboard
                            .activate_tab(gateway.as_ref(), tab, currency, language)
                            .await
                        {
                            println!("{row}");
                        }
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}
