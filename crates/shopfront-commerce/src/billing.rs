//! Payment-provider price book and subscription plan display.
//!
//! Independent of cart and checkout: the price book only maps provider
//! price ids to listings so an account page can name the shopper's plan.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ids::PriceId;
use crate::money::{Currency, Money};

/// Plan label when the shopper has no subscription.
pub const NO_SUBSCRIPTION_LABEL: &str = "No active subscription";
/// Plan label when the subscription's price id is not in the book.
pub const UNKNOWN_PLAN_LABEL: &str = "Unknown Plan";

/// How a listing is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    /// One-off payment.
    Payment,
    /// Recurring subscription.
    Subscription,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
            CheckoutMode::Subscription => "subscription",
        }
    }
}

/// A price the payment provider knows about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceListing {
    pub price_id: PriceId,
    pub name: String,
    pub description: String,
    pub mode: CheckoutMode,
    pub price: Money,
    pub image: Option<String>,
}

impl PriceListing {
    pub fn currency(&self) -> Currency {
        self.price.currency
    }
}

/// Lookup table of provider listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBook {
    listings: Vec<PriceListing>,
}

impl PriceBook {
    pub fn new(listings: Vec<PriceListing>) -> Self {
        Self { listings }
    }

    /// The storefront's provider listings.
    pub fn builtin() -> Self {
        const PHOTO_HAT: &str = "https://images.pexels.com/photos/3755706/pexels-photo-3755706.jpeg?auto=compress&cs=tinysrgb&w=800";
        const PHOTO_HOODIE: &str = "https://images.pexels.com/photos/7679454/pexels-photo-7679454.jpeg?auto=compress&cs=tinysrgb&w=800";
        const PHOTO_CROP: &str = "https://images.pexels.com/photos/8532616/pexels-photo-8532616.jpeg?auto=compress&cs=tinysrgb&w=800";

        let listing = |id: &str, name: &str, description: &str, units: i64, image: &str| PriceListing {
            price_id: PriceId::new(id),
            name: name.to_string(),
            description: description.to_string(),
            mode: CheckoutMode::Payment,
            price: Money::base(units),
            image: Some(image.to_string()),
        };

        Self::new(vec![
            listing(
                "price_1SXPHHLzJJ40c4lgPtC6ZP3K",
                "NHH SIGNATURE CROP TOP",
                "Premium signature crop top with NHH branding",
                65,
                PHOTO_CROP,
            ),
            listing(
                "price_1SXPH2LzJJ40c4lgynk0qwyX",
                "TWITTER STATEMENT BEANIE",
                "Stylish beanie with Twitter statement design",
                40,
                PHOTO_HAT,
            ),
            listing(
                "price_1SXPGcLzJJ40c4lgKM0RmxB7",
                "NHH SIGNATURE HAT - WHITE",
                "Classic white signature hat with NHH logo",
                45,
                PHOTO_HAT,
            ),
            listing(
                "price_1SXPG8LzJJ40c4lg0jiV3BgA",
                "NHH SIGNATURE CAP - WHITE",
                "Premium white cap with signature NHH design",
                45,
                PHOTO_HAT,
            ),
            listing(
                "price_1SXPFyLzJJ40c4lgiObeRpKA",
                "NHH SIGNATURE CAP - BLACK",
                "Premium black cap with signature NHH design",
                45,
                PHOTO_HAT,
            ),
            listing(
                "price_1SXPFSLzJJ40c4lgqoB2h52m",
                "TWITTER STATEMENT HOODIE (Black)",
                "Premium black hoodie with Twitter statement design",
                145,
                PHOTO_HOODIE,
            ),
            listing(
                "price_1SXPEzLzJJ40c4lgdkFTrBlK",
                "NHH SIGNATURE HOODIE (White)",
                "Premium white hoodie with signature NHH design",
                145,
                PHOTO_HOODIE,
            ),
        ])
    }

    pub fn listings(&self) -> &[PriceListing] {
        &self.listings
    }

    /// Find a listing by provider price id.
    pub fn find(&self, price_id: &str) -> Option<&PriceListing> {
        self.listings.iter().find(|l| l.price_id.as_str() == price_id)
    }
}

/// The shopper's subscription as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSnapshot {
    pub price_id: Option<PriceId>,
    /// Provider status, e.g. `active` or `past_due`.
    pub status: Option<String>,
}

/// Result type for subscription lookups.
pub type BillingResult<T> = Result<T, BillingError>;

/// Subscription provider errors.
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    /// The provider could not be reached.
    #[error("subscription provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with something unreadable.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl From<serde_json::Error> for BillingError {
    fn from(e: serde_json::Error) -> Self {
        BillingError::InvalidResponse(e.to_string())
    }
}

/// Source of the current shopper's subscription.
#[async_trait]
pub trait SubscriptionSource: Send + Sync {
    /// Fetch the current subscription, if the shopper has one.
    async fn current_subscription(&self) -> BillingResult<Option<SubscriptionSnapshot>>;
}

/// Name of the subscribed plan.
pub fn plan_label<'a>(book: &'a PriceBook, snapshot: Option<&SubscriptionSnapshot>) -> &'a str {
    match snapshot.and_then(|s| s.price_id.as_ref()) {
        None => NO_SUBSCRIPTION_LABEL,
        Some(price_id) => book
            .find(price_id.as_str())
            .map(|l| l.name.as_str())
            .unwrap_or(UNKNOWN_PLAN_LABEL),
    }
}

/// Provider status for display: only the first `_` becomes a space.
pub fn status_label(status: &str) -> String {
    status.replacen('_', " ", 1)
}
