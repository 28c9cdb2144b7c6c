use serde::{Deserialize, Serialize};

use super::EntityId;

/// A room type offered by the hotel.
///
/// Store documents with `deleted: true` are tombstones: they hide a built-in
/// room from the catalog instead of describing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    /// Nightly rate.
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,
}

impl Room {
    pub fn tombstone(mut self) -> Self {
        self.deleted = true;
        self
    }
}

/// Nightly rate bands offered by the room search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceRange {
    #[default]
    All,
    /// Under 150.
    Budget,
    /// 150 up to, not including, 250.
    Moderate,
    /// 250 and over.
    Luxury,
}

impl PriceRange {
    pub fn contains(self, price: f64) -> bool {
        match self {
            PriceRange::All => true,
            PriceRange::Budget => price < 150.0,
            PriceRange::Moderate => (150.0..250.0).contains(&price),
            PriceRange::Luxury => price >= 250.0,
        }
    }
}
