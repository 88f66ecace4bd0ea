//! Curated product collections.

use super::Entity;
use crate::decode::{encode_list, RecordReader};
use crate::error::CatalogError;
use crate::ids::{CollectionId, ProductId};
use crate::schema::{self, collection as fields};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_gateway::Record;
use tracing::warn;

/// A curated collection of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(rename = "Id")]
    pub id: CollectionId,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Shown on the home page when set.
    pub featured: bool,
    pub image: String,
    /// Member products, in stored order.
    pub product_ids: Vec<ProductId>,
}

impl Entity for Collection {
    const TABLE: &'static str = fields::TABLE;
    const FIELDS: &'static [&'static str] = fields::FIELDS;

    fn from_record(record: &Record) -> Result<Self, CatalogError> {
        let r = RecordReader::new(record);
        let id = CollectionId::new(r.integer(schema::ID));
        let product_ids = r
            .list(fields::PRODUCT_IDS)
            .iter()
            .filter_map(|raw| match raw.parse::<ProductId>() {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(collection = %id, value = %raw, error = %e, "skipping bad product id");
                    None
                }
            })
            .collect();

        Ok(Self {
            id,
            name: r.text(fields::NAME),
            slug: r.text(fields::SLUG),
            description: r.text(fields::DESCRIPTION),
            featured: r.flag(fields::FEATURED),
            image: r.text(fields::IMAGE),
            product_ids,
        })
    }
}

impl Collection {
    /// Check if a product belongs to this collection.
    pub fn contains(&self, product: ProductId) -> bool {
        self.product_ids.contains(&product)
    }
}

/// Writable collection fields for create and update.
///
/// `featured` left unset is omitted from updates and written as `false` on
/// create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDraft {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub product_ids: Vec<ProductId>,
}

impl CollectionDraft {
    /// Create a draft with a name and slug.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            ..Default::default()
        }
    }

    /// Encode into gateway field names.
    pub fn to_record(&self) -> Result<Record, CatalogError> {
        let mut record = Record::new();
        record.insert(fields::NAME.into(), Value::from(self.name.as_str()));
        record.insert(fields::SLUG.into(), Value::from(self.slug.as_str()));
        if let Some(description) = &self.description {
            record.insert(fields::DESCRIPTION.into(), Value::from(description.as_str()));
        }
        if let Some(featured) = self.featured {
            record.insert(fields::FEATURED.into(), Value::Bool(featured));
        }
        if let Some(image) = &self.image {
            record.insert(fields::IMAGE.into(), Value::from(image.as_str()));
        }
        let ids: Vec<String> = self.product_ids.iter().map(ToString::to_string).collect();
        record.insert(
            fields::PRODUCT_IDS.into(),
            Value::from(encode_list(fields::PRODUCT_IDS, &ids)?),
        );
        Ok(record)
    }
}
