//! Product listing filters.

use super::query::{ProductQuery, SortKey};
use crate::schema::product as fields;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use storefront_gateway::{Condition, OrderBy};

/// Filter state of a product listing page.
///
/// Deserializes from the page's parameter names (`priceMin`, `inStock`,
/// `sortBy`, ...). Empty strings count as unset, and price bounds that do
/// not parse as numbers are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    #[serde(deserialize_with = "non_empty")]
    pub category: Option<String>,
    #[serde(deserialize_with = "non_empty")]
    pub subcategory: Option<String>,
    /// Any of these brands.
    #[serde(deserialize_with = "string_list")]
    pub brand: Vec<String>,
    /// Inclusive lower price bound.
    #[serde(deserialize_with = "price_bound")]
    pub price_min: Option<f64>,
    /// Inclusive upper price bound.
    #[serde(deserialize_with = "price_bound")]
    pub price_max: Option<f64>,
    #[serde(deserialize_with = "loose_flag")]
    pub in_stock: bool,
    #[serde(deserialize_with = "string_list")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "sort_param")]
    pub sort_by: Option<SortKey>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into()).filter(|c: &String| !c.is_empty());
        self
    }

    pub fn subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into()).filter(|s: &String| !s.is_empty());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand.push(brand.into());
        self
    }

    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn in_stock(mut self) -> Self {
        self.in_stock = true;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn sort_by(mut self, sort: SortKey) -> Self {
        self.sort_by = Some(sort);
        self
    }

    /// Gateway conditions, one per constrained dimension. All are ANDed.
    pub fn to_conditions(&self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            conditions.push(Condition::equal_to(fields::CATEGORY, category));
        }
        if let Some(subcategory) = self.subcategory.as_deref().filter(|s| !s.is_empty()) {
            conditions.push(Condition::equal_to(fields::SUBCATEGORY, subcategory));
        }
        if !self.brand.is_empty() {
            conditions.push(Condition::any_of(fields::BRAND, self.brand.iter().cloned()));
        }
        if let Some(min) = self.price_min {
            conditions.push(Condition::at_least(fields::PRICE, min));
        }
        if let Some(max) = self.price_max {
            conditions.push(Condition::at_most(fields::PRICE, max));
        }
        if self.in_stock {
            conditions.push(Condition::equal_to(fields::IN_STOCK, true));
        }
        if !self.tags.is_empty() {
            conditions.push(Condition::contains(fields::TAGS, self.tags.iter().cloned()));
        }
        conditions
    }

    /// Sort directive; rating descending when unset.
    pub fn order_by(&self) -> OrderBy {
        self.sort_by.unwrap_or_default().order_by()
    }

    /// Build the product query for this filter.
    pub fn to_query(&self) -> ProductQuery {
        ProductQuery::new()
            .with_conditions(self.to_conditions())
            .with_order(self.order_by())
    }
}

fn non_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// A list, a single string (comma-separated) or null.
fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let items = match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Value::String(s) => crate::decode::split_list(&s),
        _ => Vec::new(),
    };
    Ok(items.into_iter().filter(|s| !s.is_empty()).collect())
}

fn price_bound<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite()))
}

fn loose_flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => b,
        Value::String(s) => s == "true" || s == "1",
        _ => false,
    })
}

fn sort_param<'de, D: Deserializer<'de>>(d: D) -> Result<Option<SortKey>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value
        .filter(|s| !s.trim().is_empty())
        .map(|s| SortKey::from_param(&s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storefront_gateway::{Operator, SortType};

    #[test]
    fn test_empty_filter() {
        let filter = ProductFilter::new();
        assert!(filter.to_conditions().is_empty());
        assert_eq!(filter.order_by(), OrderBy::desc(fields::RATING));
    }

    #[test]
    fn test_full_filter() {
        let filter = ProductFilter::new()
            .category("Skincare")
            .subcategory("Serums")
            .brand("Lumen")
            .brand("Aura")
            .price_range(Some(10.0), Some(50.0))
            .in_stock()
            .tag("vegan")
            .sort_by(SortKey::PriceLow);

        let conditions = filter.to_conditions();
        assert_eq!(conditions.len(), 7);

        assert_eq!(conditions[0], Condition::equal_to("category_c", "Skincare"));
        assert_eq!(conditions[1], Condition::equal_to("subcategory_c", "Serums"));

        let brand = &conditions[2];
        assert_eq!(brand.operator, Operator::EqualTo);
        assert_eq!(brand.values, vec![json!("Lumen"), json!("Aura")]);
        assert_eq!(brand.include, Some(true));

        assert_eq!(conditions[3].operator, Operator::GreaterThanOrEqualTo);
        assert_eq!(conditions[3].values, vec![json!(10.0)]);
        assert_eq!(conditions[4].operator, Operator::LessThanOrEqualTo);
        assert_eq!(conditions[5].values, vec![json!(true)]);
        assert_eq!(conditions[6].operator, Operator::Contains);

        let order = filter.order_by();
        assert_eq!(order.field_name, "price_c");
        assert_eq!(order.sorttype, SortType::Asc);
    }

    #[test]
    fn test_deserialize_page_params() {
        let filter: ProductFilter = serde_json::from_value(json!({
            "category": "",
            "brand": ["Lumen"],
            "priceMin": "15",
            "priceMax": "abc",
            "inStock": "true",
            "tags": "vegan, cruelty-free",
            "sortBy": "newest"
        }))
        .unwrap();

        assert_eq!(filter.category, None);
        assert_eq!(filter.brand, vec!["Lumen"]);
        assert_eq!(filter.price_min, Some(15.0));
        assert_eq!(filter.price_max, None);
        assert!(filter.in_stock);
        assert_eq!(filter.tags, vec!["vegan", "cruelty-free"]);
        assert_eq!(filter.sort_by, Some(SortKey::Newest));
    }

    #[test]
    fn test_deserialize_empty_object() {
        let filter: ProductFilter = serde_json::from_value(json!({})).unwrap();
        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn test_unknown_sort_falls_back_to_rating() {
        let filter: ProductFilter = serde_json::from_value(json!({"sortBy": "popular"})).unwrap();
        assert_eq!(filter.order_by(), OrderBy::desc(fields::RATING));
    }

    #[test]
    fn test_to_query() {
        let params = ProductFilter::new().category("Makeup").to_query().to_params();
        assert_eq!(params.conditions.len(), 1);
        assert_eq!(params.order_by, vec![OrderBy::desc(fields::RATING)]);
    }
}
