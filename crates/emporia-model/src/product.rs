//! Product catalog records.

use chrono::{DateTime, Utc};
use emporia_core::Identify;
use serde::{Deserialize, Serialize};

/// A catalog product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identity.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Long description shown on the product page.
    #[serde(default)]
    pub description: String,
    /// Catalog category.
    #[serde(default)]
    pub category: ProductCategory,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Primary image, if any.
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    /// Listing time.
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Catalog category for a product.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    /// Consumer electronics.
    Electronics,
    /// Furniture.
    Furniture,
    /// Home appliances.
    Appliances,
    /// Everything else.
    #[default]
    Other,
}

/// Fields for creating a product; the server assigns the identity.
#[derive(Clone, Debug, Serialize)]
pub struct ProductDraft {
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Catalog category.
    pub category: ProductCategory,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub stock: u32,
    /// Primary image.
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Identify for Product {
    fn id(&self) -> &str {
        &self.id
    }
}
