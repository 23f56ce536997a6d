use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One cart entry. Identity is the `(id, size)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: i64,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub size: String,
    pub quantity: u32,
}

impl LineItem {
    pub fn matches(&self, id: i64, size: &str) -> bool {
        self.id == id && self.size == size
    }

    /// `unit_price * quantity`, or `None` when it does not fit a `Decimal`.
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

/// What the storefront knows about a product when it is put in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl From<&MerchItem> for Product {
    fn from(item: &MerchItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            image_url: item.image_url.clone(),
            category: Some(item.category.clone()),
        }
    }
}

/// Payload delivered to cart subscribers after every save.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartChanged {
    pub items: Vec<LineItem>,
    pub count: u64,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub bpm: u32,
    pub duration: String,
    #[serde(default)]
    pub artwork: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub plays: u64,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ticket_url: Option<String>,
    #[serde(default)]
    pub ticket_price: Option<Decimal>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub is_past: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Tabled)]
pub struct CartTableRow {
    pub id: i64,
    pub name: String,
    pub size: String,
    pub quantity: u32,
    pub price: String,
    pub total: String,
}

#[derive(Tabled)]
pub struct FavoriteCountRow {
    pub bucket: String,
    pub count: usize,
    pub ids: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub bpm: u32,
}

#[derive(Tabled)]
pub struct EventTableRow {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub venue: String,
    pub city: String,
}

#[derive(Tabled)]
pub struct MerchTableRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: String,
}
