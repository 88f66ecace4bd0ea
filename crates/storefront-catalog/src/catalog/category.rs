//! Category records and drafts.

use super::{slugify, Entity};
use crate::decode::{encode_json_list, RecordReader};
use crate::error::CatalogError;
use crate::ids::CategoryId;
use crate::schema::{self, category as fields};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_gateway::Record;

/// A subcategory listed under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SubcategoryRepr")]
pub struct Subcategory {
    pub name: String,
    pub slug: String,
}

impl Subcategory {
    /// Create a subcategory, deriving the slug from the name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self { name, slug }
    }
}

/// Stored subcategory entries are either bare names or `{name, slug}` objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum SubcategoryRepr {
    Name(String),
    Entry {
        name: String,
        #[serde(default)]
        slug: Option<String>,
    },
}

impl From<SubcategoryRepr> for Subcategory {
    fn from(repr: SubcategoryRepr) -> Self {
        match repr {
            SubcategoryRepr::Name(name) => Subcategory::named(name),
            SubcategoryRepr::Entry {
                name,
                slug: Some(slug),
            } if !slug.is_empty() => Subcategory { name, slug },
            SubcategoryRepr::Entry { name, .. } => Subcategory::named(name),
        }
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "Id")]
    pub id: CategoryId,
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
    pub description: String,
    /// Image URL.
    pub image: String,
    pub subcategories: Vec<Subcategory>,
}

impl Entity for Category {
    const TABLE: &'static str = fields::TABLE;
    const FIELDS: &'static [&'static str] = fields::FIELDS;

    fn from_record(record: &Record) -> Result<Self, CatalogError> {
        let r = RecordReader::new(record);
        Ok(Self {
            id: CategoryId::new(r.integer(schema::ID)),
            name: r.text(fields::NAME),
            slug: r.text(fields::SLUG),
            description: r.text(fields::DESCRIPTION),
            image: r.text(fields::IMAGE),
            subcategories: r.json_list(fields::SUBCATEGORIES)?,
        })
    }
}

impl Category {
    /// Find a subcategory by slug.
    pub fn subcategory(&self, slug: &str) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.slug == slug)
    }
}

/// Writable category fields for create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

impl CategoryDraft {
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
        if let Some(image) = &self.image {
            record.insert(fields::IMAGE.into(), Value::from(image.as_str()));
        }
        record.insert(
            fields::SUBCATEGORIES.into(),
            Value::from(encode_json_list(&self.subcategories)?),
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storefront_gateway::testing::record;

    #[test]
    fn test_from_record() {
        let rec = record(json!({
            "Id": 3,
            "name_c": "Skincare",
            "slug_c": "skincare",
            "subcategories_c": "[{\"name\":\"Face Serums\",\"slug\":\"serums\"},\"Cleansers\"]"
        }));
        let cat = Category::from_record(&rec).unwrap();
        assert_eq!(cat.id, CategoryId::new(3));
        assert_eq!(cat.description, "");
        assert_eq!(
            cat.subcategories,
            vec![
                Subcategory {
                    name: "Face Serums".into(),
                    slug: "serums".into()
                },
                Subcategory::named("Cleansers"),
            ]
        );
        assert_eq!(cat.subcategory("cleansers").unwrap().name, "Cleansers");
    }

    #[test]
    fn test_missing_subcategories() {
        let cat = Category::from_record(&record(json!({"Id": 1}))).unwrap();
        assert!(cat.subcategories.is_empty());
    }

    #[test]
    fn test_malformed_subcategories() {
        let err = Category::from_record(&record(json!({"subcategories_c": "[oops"}))).unwrap_err();
        assert!(matches!(err, CatalogError::Decode { .. }));
    }

    #[test]
    fn test_entry_without_slug() {
        let cat =
            Category::from_record(&record(json!({"subcategories_c": "[{\"name\":\"Lip Care\"}]"})))
                .unwrap();
        assert_eq!(cat.subcategories[0].slug, "lip-care");
    }

    #[test]
    fn test_draft_to_record() {
        let mut draft = CategoryDraft::new("Makeup", "makeup");
        draft.subcategories.push(Subcategory::named("Lipstick"));
        let rec = draft.to_record().unwrap();
        assert_eq!(rec["name_c"], json!("Makeup"));
        assert!(!rec.contains_key("description_c"));
        let subs: Vec<Subcategory> =
            serde_json::from_str(rec["subcategories_c"].as_str().unwrap()).unwrap();
        assert_eq!(subs, draft.subcategories);
    }

    #[test]
    fn test_empty_draft_subcategories() {
        let rec = CategoryDraft::new("A", "a").to_record().unwrap();
        assert_eq!(rec["subcategories_c"], json!("[]"));
    }
}
