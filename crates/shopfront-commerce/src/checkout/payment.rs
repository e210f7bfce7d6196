//! Payment form and its input formatters.
//!
//! The payment step only captures card-like input for the order record.
//! Nothing here authorizes or validates a card: the formatters reshape
//! keystrokes and the form only checks that each field is present.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest formatted card number: 16 digits and 3 spaces.
pub const CARD_NUMBER_MAX_LEN: usize = 19;
/// Formatted expiry length (`MM/YY`).
pub const EXPIRY_MAX_LEN: usize = 5;
/// CVV digit count.
pub const CVV_MAX_LEN: usize = 3;

/// Fields of the payment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentField {
    CardNumber,
    CardName,
    ExpiryDate,
    Cvv,
}

impl PaymentField {
    pub const ALL: [PaymentField; 4] = [
        PaymentField::CardNumber,
        PaymentField::CardName,
        PaymentField::ExpiryDate,
        PaymentField::Cvv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentField::CardNumber => "card_number",
            PaymentField::CardName => "card_name",
            PaymentField::ExpiryDate => "expiry_date",
            PaymentField::Cvv => "cvv",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    /// Reshape raw input for this field.
    pub fn format(&self, raw: &str) -> String {
        match self {
            PaymentField::CardNumber => format_card_number(raw),
            PaymentField::CardName => raw.to_string(),
            PaymentField::ExpiryDate => format_expiry_date(raw),
            PaymentField::Cvv => format_cvv(raw),
        }
    }
}

impl fmt::Display for PaymentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment details as displayed in the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentInfo {
    pub card_number: String,
    pub card_name: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl PaymentInfo {
    /// Get a field's current value.
    pub fn get(&self, field: PaymentField) -> &str {
        match field {
            PaymentField::CardNumber => &self.card_number,
            PaymentField::CardName => &self.card_name,
            PaymentField::ExpiryDate => &self.expiry_date,
            PaymentField::Cvv => &self.cvv,
        }
    }

    /// Format raw input and store it.
    pub fn set(&mut self, field: PaymentField, raw: &str) {
        let value = field.format(raw);
        match field {
            PaymentField::CardNumber => self.card_number = value,
            PaymentField::CardName => self.card_name = value,
            PaymentField::ExpiryDate => self.expiry_date = value,
            PaymentField::Cvv => self.cvv = value,
        }
    }

    /// Names of blank fields, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        PaymentField::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .map(|f| f.as_str())
            .collect()
    }

    /// Card number with all but the last four digits hidden.
    pub fn masked_card_number(&self) -> String {
        let digits = digits_only(&self.card_number);
        let tail: String = digits.chars().skip(digits.len().saturating_sub(4)).collect();
        format!("**** {}", tail)
    }
}

/// Digits grouped in fours, capped at 19 characters.
///
/// ```
/// use shopfront_commerce::checkout::format_card_number;
/// assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
/// ```
pub fn format_card_number(raw: &str) -> String {
    let digits = digits_only(raw);
    let grouped: Vec<String> = digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect();
    truncate(grouped.join(" "), CARD_NUMBER_MAX_LEN)
}

/// `MM/YY`: a slash after the first two digits, capped at 5 characters.
pub fn format_expiry_date(raw: &str) -> String {
    let digits = digits_only(raw);
    let formatted = if digits.len() >= 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    };
    truncate(formatted, EXPIRY_MAX_LEN)
}

/// Up to three digits.
pub fn format_cvv(raw: &str) -> String {
    truncate(digits_only(raw), CVV_MAX_LEN)
}

fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn truncate(mut value: String, max: usize) -> String {
    // Formatter output is ASCII, so byte and char offsets agree.
    value.truncate(max);
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_number_grouping() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111-1111 1111x1111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("41111"), "4111 1");
        assert_eq!(format_card_number("4111"), "4111");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn test_card_number_truncates() {
        let formatted = format_card_number("41111111111111112222");
        assert_eq!(formatted, "4111 1111 1111 1111");
        assert_eq!(formatted.len(), CARD_NUMBER_MAX_LEN);
    }

    #[test]
    fn test_expiry() {
        assert_eq!(format_expiry_date("1225"), "12/25");
        assert_eq!(format_expiry_date("12/25"), "12/25");
        assert_eq!(format_expiry_date("122599"), "12/25");
        assert_eq!(format_expiry_date("1"), "1");
        assert_eq!(format_expiry_date("12"), "12/");
    }

    #[test]
    fn test_cvv() {
        assert_eq!(format_cvv("12a3"), "123");
        assert_eq!(format_cvv("98765"), "987");
    }

    #[test]
    fn test_formatters_are_idempotent() {
        for raw in ["4111111111111111", "12345", "4111 11", "abc"] {
            let once = format_card_number(raw);
            assert_eq!(format_card_number(&once), once);
        }
        for raw in ["1225", "1", "12", "0"] {
            let once = format_expiry_date(raw);
            assert_eq!(format_expiry_date(&once), once);
        }
        let once = format_cvv("1x2y3z4");
        assert_eq!(format_cvv(&once), once);
    }

    #[test]
    fn test_card_name_passthrough() {
        let mut info = PaymentInfo::default();
        info.set(PaymentField::CardName, "ADA L. 1815");
        assert_eq!(info.card_name, "ADA L. 1815");
    }

    #[test]
    fn test_missing_and_mask() {
        let mut info = PaymentInfo::default();
        info.set(PaymentField::CardNumber, "4242424242424242");
        info.set(PaymentField::Cvv, "12a");
        assert_eq!(info.missing_fields(), vec!["card_name", "expiry_date"]);
        assert_eq!(info.masked_card_number(), "**** 4242");
    }
}
