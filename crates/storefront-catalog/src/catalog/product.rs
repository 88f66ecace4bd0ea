//! Product records.

use super::Entity;
use crate::decode::RecordReader;
use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::schema::{self, product as fields};
use serde::{Deserialize, Serialize};
use storefront_gateway::Record;

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Gateway record id.
    #[serde(rename = "Id")]
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// Category name.
    pub category: String,
    /// Subcategory name.
    pub subcategory: String,
    /// List price.
    pub price: f64,
    /// Sale price, when discounted.
    pub sale_price: Option<f64>,
    /// Average rating.
    pub rating: f64,
    /// Number of reviews.
    pub review_count: i64,
    /// Full description.
    pub description: String,
    /// Whether the product can be ordered.
    pub in_stock: bool,
    /// Tags for filtering/search, in stored order.
    pub tags: Vec<String>,
    /// Image URLs, in stored order.
    pub images: Vec<String>,
    /// Not stored by the gateway; always empty.
    pub ingredients: Vec<String>,
}

impl Entity for Product {
    const TABLE: &'static str = fields::TABLE;
    const FIELDS: &'static [&'static str] = fields::FIELDS;

    fn from_record(record: &Record) -> Result<Self, CatalogError> {
        let r = RecordReader::new(record);
        Ok(Self {
            id: ProductId::new(r.integer(schema::ID)),
            name: r.text(fields::NAME),
            brand: r.text(fields::BRAND),
            category: r.text(fields::CATEGORY),
            subcategory: r.text(fields::SUBCATEGORY),
            price: r.number(fields::PRICE),
            sale_price: r.optional_number(fields::SALE_PRICE),
            rating: r.number(fields::RATING),
            review_count: r.integer(fields::REVIEW_COUNT),
            description: r.text(fields::DESCRIPTION),
            in_stock: r.flag(fields::IN_STOCK),
            tags: r.list(fields::TAGS),
            images: r.list(fields::IMAGES),
            ingredients: Vec::new(),
        })
    }
}

impl Product {
    /// Check if the product is on sale (sale price below list price).
    pub fn is_on_sale(&self) -> bool {
        self.sale_price.map(|sale| sale < self.price).unwrap_or(false)
    }

    /// The price a customer pays.
    pub fn effective_price(&self) -> f64 {
        if self.is_on_sale() {
            self.sale_price.unwrap_or(self.price)
        } else {
            self.price
        }
    }

    /// Calculate the discount percentage if on sale.
    pub fn discount_percentage(&self) -> Option<f64> {
        self.sale_price.and_then(|sale| {
            if sale < self.price && self.price > 0.0 {
                Some((self.price - sale) / self.price * 100.0)
            } else {
                None
            }
        })
    }

    /// First image, used as the listing thumbnail.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
