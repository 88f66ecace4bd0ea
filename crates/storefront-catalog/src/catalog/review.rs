//! Product reviews.

use super::Entity;
use crate::decode::RecordReader;
use crate::error::CatalogError;
use crate::ids::{ProductId, ReviewId};
use crate::schema::{self, review as fields};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_gateway::Record;

/// Date format used by `date_c`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A customer review of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "Id")]
    pub id: ReviewId,
    pub product_id: ProductId,
    /// Star rating, nominally 1 to 5.
    pub rating: i64,
    pub title: String,
    pub content: String,
    pub reviewer_name: String,
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    /// Helpful votes.
    pub helpful: i64,
}

impl Entity for Review {
    const TABLE: &'static str = fields::TABLE;
    const FIELDS: &'static [&'static str] = fields::FIELDS;

    fn from_record(record: &Record) -> Result<Self, CatalogError> {
        let r = RecordReader::new(record);
        Ok(Self {
            id: ReviewId::new(r.integer(schema::ID)),
            product_id: ProductId::new(r.reference(fields::PRODUCT_ID)),
            rating: r.integer(fields::RATING),
            title: r.text(fields::TITLE),
            content: r.text(fields::CONTENT),
            reviewer_name: r.text(fields::REVIEWER_NAME),
            date: r.text(fields::DATE),
            helpful: r.integer(fields::HELPFUL),
        })
    }
}

impl Review {
    /// Parsed review date, if well-formed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}

/// A new review as submitted by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub product_id: ProductId,
    pub rating: i64,
    pub title: String,
    pub content: String,
    pub reviewer_name: String,
}

impl ReviewDraft {
    /// Encode into gateway field names, stamped with `date` and no votes.
    pub fn to_record(&self, date: NaiveDate) -> Record {
        let mut record = Record::new();
        record.insert(fields::PRODUCT_ID.into(), Value::from(self.product_id.get()));
        record.insert(fields::RATING.into(), Value::from(self.rating));
        record.insert(fields::TITLE.into(), Value::from(self.title.as_str()));
        record.insert(fields::CONTENT.into(), Value::from(self.content.as_str()));
        record.insert(
            fields::REVIEWER_NAME.into(),
            Value::from(self.reviewer_name.as_str()),
        );
        record.insert(
            fields::DATE.into(),
            Value::from(date.format(DATE_FORMAT).to_string()),
        );
        record.insert(fields::HELPFUL.into(), Value::from(0));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storefront_gateway::testing::record;

    #[test]
    fn test_from_record_loose_product_id() {
        let rec = record(json!({
            "Id": 30,
            "product_id_c": "7",
            "rating_c": "4",
            "title_c": "Lovely",
            "reviewer_name_c": "Sam",
            "date_c": "2024-03-09",
            "helpful_c": null
        }));
        let review = Review::from_record(&rec).unwrap();
        assert_eq!(review.product_id, ProductId::new(7));
        assert_eq!(review.rating, 4);
        assert_eq!(review.helpful, 0);
        assert_eq!(review.content, "");
        assert_eq!(review.parsed_date(), NaiveDate::from_ymd_opt(2024, 3, 9));
    }

    #[test]
    fn test_lookup_product_id() {
        let rec = record(json!({"product_id_c": {"Id": 12, "Name": "Glow Serum"}}));
        assert_eq!(
            Review::from_record(&rec).unwrap().product_id,
            ProductId::new(12)
        );
    }

    #[test]
    fn test_draft_to_record() {
        let draft = ReviewDraft {
            product_id: ProductId::new(5),
            rating: 5,
            title: "Great".into(),
            content: "Works well".into(),
            reviewer_name: "Ana".into(),
        };
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let rec = draft.to_record(date);
        assert_eq!(rec["product_id_c"], json!(5));
        assert_eq!(rec["date_c"], json!("2025-01-02"));
        assert_eq!(rec["helpful_c"], json!(0));
    }
}
