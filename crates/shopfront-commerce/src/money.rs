//! Money and currency presentation.
//!
//! Catalog prices are authored in the base currency (USD) and stored as
//! integer minor units. Other currencies exist for display only: a base
//! amount is multiplied by a static exchange rate and formatted with the
//! target currency's symbol. Rates are constants, never fetched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display currencies offered by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
}

impl Currency {
    /// The currency all catalog prices and order totals are kept in.
    pub const BASE: Currency = Currency::USD;

    /// Currencies in currency-picker order.
    pub const ALL: [Currency; 6] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
        Currency::CAD,
        Currency::AUD,
    ];

    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
            Currency::CAD => "C$",
            Currency::AUD => "A$",
        }
    }

    /// Name shown in the currency picker.
    pub fn display_name(&self) -> &'static str {
        match self {
            Currency::USD => "US Dollar",
            Currency::EUR => "Euro",
            Currency::GBP => "British Pound",
            Currency::JPY => "Japanese Yen",
            Currency::CAD => "Canadian Dollar",
            Currency::AUD => "Australian Dollar",
        }
    }

    /// Units of this currency per one unit of the base currency.
    pub fn exchange_rate(&self) -> f64 {
        match self {
            Currency::USD => 1.0,
            Currency::EUR => 0.92,
            Currency::GBP => 0.79,
            Currency::JPY => 149.5,
            Currency::CAD => 1.35,
            Currency::AUD => 1.52,
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
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            _ => None,
        }
    }

    /// Parse a currency code, treating anything unrecognized as the base currency.
    pub fn resolve(code: &str) -> Self {
        Self::from_code(code).unwrap_or(Self::BASE)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (cents for USD,
/// whole yen for JPY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a base-currency amount from whole units.
    pub fn base(units: i64) -> Self {
        Self::new(units.saturating_mul(100), Currency::BASE)
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use shopfront_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Convert into another display currency using the static rate table.
    pub fn convert_to(&self, target: Currency) -> Money {
        if self.currency == target {
            return *self;
        }
        let base_units = self.to_decimal() / self.currency.exchange_rate();
        Money::from_decimal(base_units * target.exchange_rate(), target)
    }

    /// Format as a display string (e.g., "$49.99", "¥14,950").
    pub fn display(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        format!("{}{}{}", sign, self.currency.symbol(), self.display_amount())
    }

    /// Format the absolute amount without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let magnitude = self.amount_cents.unsigned_abs();
        if places == 0 {
            return group_thousands(magnitude);
        }
        let divisor = 10_u64.pow(places);
        format!(
            "{}.{:0width$}",
            magnitude / divisor,
            magnitude % divisor,
            width = places as usize
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Convert a base-currency amount into the currency named by `code`.
///
/// Unrecognized codes convert at rate 1 into the base currency.
pub fn convert_price(amount: Money, code: &str) -> Money {
    amount.convert_to(Currency::resolve(code))
}

/// Convert and format a base-currency amount for the currency named by `code`.
///
/// Unrecognized codes fall back to the base currency's rate and symbol.
pub fn format_price(amount: Money, code: &str) -> String {
    convert_price(amount, code).display()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(100.0, Currency::JPY);
        assert_eq!(m.amount_cents, 100); // JPY has no decimals
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
        assert_eq!(Money::new(-500, Currency::USD).display(), "-$5.00");
        assert_eq!(Money::new(5, Currency::GBP).display(), "\u{00a3}0.05");
    }

    #[test]
    fn test_format_price_jpy_groups_thousands() {
        assert_eq!(format_price(Money::base(100), "JPY"), "\u{00a5}14,950");
        assert_eq!(format_price(Money::base(10_000), "JPY"), "\u{00a5}1,495,000");
    }

    #[test]
    fn test_format_price_two_decimals() {
        assert_eq!(format_price(Money::base(100), "EUR"), "\u{20ac}92.00");
        assert_eq!(format_price(Money::base(55), "GBP"), "\u{00a3}43.45");
        assert_eq!(format_price(Money::base(145), "CAD"), "C$195.75");
        assert_eq!(format_price(Money::base(40), "AUD"), "A$60.80");
    }

    #[test]
    fn test_format_price_unknown_code_falls_back() {
        assert_eq!(format_price(Money::base(100), "ZZZ"), "$100.00");
        assert_eq!(convert_price(Money::base(100), "ZZZ"), Money::base(100));
    }

    #[test]
    fn test_convert_price_rounds_to_whole_yen() {
        let converted = convert_price(Money::new(4999, Currency::USD), "JPY");
        assert_eq!(converted.currency, Currency::JPY);
        assert_eq!(converted.amount_cents, 7474); // 49.99 * 149.5 = 7473.505
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(123456789), "123,456,789");
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("CHF"), None);
        assert_eq!(Currency::resolve("CHF"), Currency::USD);
    }
}
