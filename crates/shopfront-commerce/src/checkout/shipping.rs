//! Shipping form.

use crate::checkout::ShippingAddress;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields of the shipping form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingField {
    Email,
    FirstName,
    LastName,
    Address,
    City,
    Country,
    PostalCode,
}

impl ShippingField {
    pub const ALL: [ShippingField; 7] = [
        ShippingField::Email,
        ShippingField::FirstName,
        ShippingField::LastName,
        ShippingField::Address,
        ShippingField::City,
        ShippingField::Country,
        ShippingField::PostalCode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingField::Email => "email",
            ShippingField::FirstName => "first_name",
            ShippingField::LastName => "last_name",
            ShippingField::Address => "address",
            ShippingField::City => "city",
            ShippingField::Country => "country",
            ShippingField::PostalCode => "postal_code",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for ShippingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact and shipping details entered at checkout.
///
/// Every field is required. Only presence is checked; email and postal code
/// formats are not validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingInfo {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
}

impl ShippingInfo {
    /// Get a field's current value.
    pub fn get(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::Email => &self.email,
            ShippingField::FirstName => &self.first_name,
            ShippingField::LastName => &self.last_name,
            ShippingField::Address => &self.address,
            ShippingField::City => &self.city,
            ShippingField::Country => &self.country,
            ShippingField::PostalCode => &self.postal_code,
        }
    }

    /// Store a field's value as typed.
    pub fn set(&mut self, field: ShippingField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ShippingField::Email => self.email = value,
            ShippingField::FirstName => self.first_name = value,
            ShippingField::LastName => self.last_name = value,
            ShippingField::Address => self.address = value,
            ShippingField::City => self.city = value,
            ShippingField::Country => self.country = value,
            ShippingField::PostalCode => self.postal_code = value,
        }
    }

    /// Names of blank fields, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        ShippingField::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .map(|f| f.as_str())
            .collect()
    }

    /// Check if every field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The address part recorded on the order.
    pub fn shipping_address(&self) -> ShippingAddress {
        ShippingAddress {
            address: self.address.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            postal_code: self.postal_code.clone(),
        }
    }
}
