//! Product types.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::warn;

/// A unique product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Create a new ID.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Promotional label assigned to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    New,
    Sale,
    Premium,
}

impl Badge {
    /// Get the badge label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Badge::New => "New",
            Badge::Sale => "Sale",
            Badge::Premium => "Premium",
        }
    }

    /// Parse a badge label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "New" => Some(Badge::New),
            "Sale" => Some(Badge::Sale),
            "Premium" => Some(Badge::Premium),
            _ => None,
        }
    }

    /// Badge for a zero-based position in a freshly loaded collection.
    ///
    /// Rules are checked in order (every 4th is New, then every 5th Sale,
    /// then every 7th Premium); the first match wins.
    pub fn for_position(index: usize) -> Option<Self> {
        if index % 4 == 0 {
            Some(Badge::New)
        } else if index % 5 == 0 {
            Some(Badge::Sale)
        } else if index % 7 == 0 {
            Some(Badge::Premium)
        } else {
            None
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overwrite every product's badge with the positional badge.
pub fn assign_badges(products: &mut [Product]) {
    for (index, product) in products.iter_mut().enumerate() {
        product.badge = Badge::for_position(index);
    }
}

/// Customer rating summary.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    /// Average rate in `[0, 5]`.
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

/// Star breakdown for rendering a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stars {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl Rating {
    /// Create a new rating.
    pub fn new(rate: f64, count: u32) -> Self {
        Self { rate, count }
    }

    /// Full, half and empty stars out of five.
    pub fn stars(&self) -> Stars {
        let rate = if self.rate.is_finite() {
            self.rate.clamp(0.0, 5.0)
        } else {
            0.0
        };
        let full = rate.floor() as u8;
        let half = full < 5 && rate.fract() >= 0.5;
        Stars {
            full,
            half,
            empty: 5 - full - u8::from(half),
        }
    }
}

/// A product in the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Price in the store's base currency unit.
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
    /// URI of the display image.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
    #[serde(
        default,
        deserialize_with = "deserialize_badge",
        skip_serializing_if = "Option::is_none"
    )]
    pub badge: Option<Badge>,
}

impl Product {
    /// Price formatted with the currency symbol, e.g. `$109.95`.
    pub fn formatted_price(&self) -> String {
        format!("${:.2}", self.price)
    }

    /// Price as shown on a product card. Pricing is only revealed to
    /// signed-in users.
    pub fn price_label(&self, signed_in: bool) -> String {
        if signed_in {
            self.formatted_price()
        } else {
            "Sign in or Create an account to see pricing".to_string()
        }
    }

    /// Case-insensitive substring match against title, description and
    /// category. `needle` must already be lower-cased.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}

/// Accepts a missing badge, `null`, `""` or one of the known labels.
/// Unknown labels decode as no badge.
fn deserialize_badge<'de, D>(deserializer: D) -> Result<Option<Badge>, D::Error>
where
    D: Deserializer<'de>,
{
    let label: Option<String> = Option::deserialize(deserializer)?;
    match label.as_deref() {
        None | Some("") => Ok(None),
        Some(label) => {
            let badge = Badge::from_label(label);
            if badge.is_none() {
                warn!(label, "ignoring unknown product badge");
            }
            Ok(badge)
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build a product with the fields the projector cares about.
    pub fn product(id: u64, title: &str, price: f64, category: &str, rate: f64) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price,
            description: format!("{} description", title),
            category: category.to_string(),
            image: format!("https://example.test/{}.jpg", id),
            rating: Rating::new(rate, 10),
            badge: None,
        }
    }
}
