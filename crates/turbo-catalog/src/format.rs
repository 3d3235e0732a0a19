//! Display formatting for prices, ratings and titles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies the catalog can be displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Format an amount with symbol and thousands separators (e.g. "$1,234.50").
pub fn format_currency(amount: f64, currency: Currency) -> String {
    let places = currency.decimal_places();
    let scale = 10_i64.pow(places);
    let minor = (amount.abs() * scale as f64).round() as i64;
    let whole = group_thousands(minor / scale);
    let sign = if amount < 0.0 && minor != 0 { "-" } else { "" };

    if places == 0 {
        format!("{sign}{}{whole}", currency.symbol())
    } else {
        let frac = minor % scale;
        format!(
            "{sign}{}{whole}.{frac:0width$}",
            currency.symbol(),
            width = places as usize
        )
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a rating with one decimal place.
pub fn format_rating(rate: f64) -> String {
    format!("{rate:.1}")
}

/// Five-glyph star display: full stars, an optional half, then empties.
///
/// Half stars render with the empty glyph, so a 3.5 shows as three full and
/// two empty.
pub fn star_rating(rate: f64) -> String {
    let rate = rate.clamp(0.0, 5.0);
    let full = rate.floor() as usize;
    let half = usize::from(rate.fract() >= 0.5);
    let empty = 5 - full - half;
    format!("{}{}{}", "★".repeat(full), "☆".repeat(half), "☆".repeat(empty))
}

/// Truncate to `max_chars` characters, appending "..." when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim())
}

/// Uppercase the first character.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// URL-friendly slug from a title.
pub fn slugify(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ' || *c == '-')
        .collect();

    let mut slug = String::with_capacity(cleaned.len());
    for c in cleaned.chars() {
        let c = if c == ' ' { '-' } else { c };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }
    slug
}

/// Percentage saved going from `original` to `sale`, rounded.
pub fn discount_percentage(original: f64, sale: f64) -> i64 {
    if original <= 0.0 {
        return 0;
    }
    (((original - sale) / original) * 100.0).round() as i64
}
