//! Catalog entities.
//!
//! Each entity decodes from a raw gateway record; writable entities have a
//! draft type that encodes back into gateway field names.

mod category;
mod collection;
mod product;
mod review;

pub use category::{Category, CategoryDraft, Subcategory};
pub use collection::{Collection, CollectionDraft};
pub use product::Product;
pub use review::{Review, ReviewDraft};

use crate::error::CatalogError;
use storefront_gateway::{FieldSelector, Record};

/// A typed view of one gateway table.
pub trait Entity: Sized {
    /// Gateway table name.
    const TABLE: &'static str;
    /// Every field a fetch names.
    const FIELDS: &'static [&'static str];

    /// Decode a raw record.
    fn from_record(record: &Record) -> Result<Self, CatalogError>;

    /// Projection naming every field.
    fn projection() -> Vec<FieldSelector> {
        crate::schema::projection(Self::FIELDS)
    }

    /// Decode a page of records; the first bad record fails the page.
    fn from_records(records: &[Record]) -> Result<Vec<Self>, CatalogError> {
        records.iter().map(Self::from_record).collect()
    }
}

/// Derive a URL slug from a display name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
