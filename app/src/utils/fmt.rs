use payments_client::models::Currency;

/// Renders a monetary value in the locale style of its currency:
/// `R$ 1.234,56` for BRL, `$ 1,234.56` for USD.
pub fn money(currency: Currency, value: f64) -> String {
    let number = match currency {
        Currency::Brl => grouped(value, '.', ','),
        Currency::Usd => grouped(value, ',', '.'),
    };
    format!("{} {}", currency.symbol(), number)
}

/// Bitcoin amounts are always shown with 8 decimal places.
pub fn btc(value: f64) -> String {
    format!("{value:.8} BTC")
}

pub fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

fn grouped(value: f64, thousands: char, decimal: char) -> String {
    let rendered = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rendered
        .split_once('.')
        .unwrap_or((rendered.as_str(), "00"));

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(thousands);
        }
        out.push(digit);
    }
    out.push(decimal);
    out.push_str(frac_part);
    out
}
