use crate::config::CurrencyFormat;

/// Render an amount the way a US-locale currency formatter would, e.g. `$1,234.50`.
pub fn format_currency(amount: f64, currency: &CurrencyFormat) -> String {
    if !amount.is_finite() {
        return "N/A".to_string();
    }

    let fixed = format!("{:.*}", currency.fraction_digits, amount.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(currency.thousands_separator);
        }
        grouped.push(digit);
    }

    // Rounding can turn a tiny negative into zero; don't print "-$0.00".
    let negative = amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&currency.symbol);
    out.push_str(&grouped);
    if let Some(fraction) = fraction {
        out.push(currency.decimal_separator);
        out.push_str(fraction);
    }
    out
}
