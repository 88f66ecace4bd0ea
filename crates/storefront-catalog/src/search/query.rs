//! Product query builder.

use crate::catalog::{Entity, Product};
use crate::schema::{self, product as fields};
use serde::{Deserialize, Serialize};
use std::fmt;
use storefront_gateway::{
    Condition, FetchParams, GroupCondition, Operator, OrderBy, PagingInfo, WhereGroup,
};

/// Fields a free-text search looks in.
pub const SEARCH_FIELDS: &[&str] = &[
    fields::NAME,
    fields::BRAND,
    fields::DESCRIPTION,
    fields::TAGS,
];

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Highest rated first.
    #[default]
    Rating,
    /// Most recently added first.
    Newest,
}

impl SortKey {
    /// Parse a `sortBy` parameter. Unknown values sort by rating.
    pub fn from_param(param: &str) -> Self {
        match param.trim() {
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            "newest" => SortKey::Newest,
            _ => SortKey::Rating,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::Newest => "newest",
        }
    }

    /// Gateway order directive.
    pub fn order_by(&self) -> OrderBy {
        match self {
            SortKey::PriceLow => OrderBy::asc(fields::PRICE),
            SortKey::PriceHigh => OrderBy::desc(fields::PRICE),
            SortKey::Rating => OrderBy::desc(fields::RATING),
            SortKey::Newest => OrderBy::desc(schema::ID),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Rating => "Highest Rated",
            SortKey::Newest => "Newest",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the OR group matching `query` in any searchable field.
///
/// The query is lower-cased; the gateway's `Contains` decides case handling.
pub fn text_search_group(query: &str) -> WhereGroup {
    let term = query.to_lowercase();
    WhereGroup::any(
        SEARCH_FIELDS
            .iter()
            .map(|field| {
                GroupCondition::new(*field, Operator::Contains, vec![term.clone().into()])
            })
            .collect(),
    )
}

/// A product fetch under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    conditions: Vec<Condition>,
    groups: Vec<WhereGroup>,
    order: OrderBy,
    limit: Option<u32>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductQuery {
    /// All products, highest rated first.
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
            groups: Vec::new(),
            order: SortKey::Rating.order_by(),
            limit: None,
        }
    }

    /// All products, alphabetical.
    pub fn by_name() -> Self {
        Self::new().with_order(OrderBy::asc(fields::NAME))
    }

    /// Add a condition. Conditions are ANDed.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add several conditions.
    pub fn with_conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    /// Match `query` in any searchable field.
    pub fn with_text(mut self, query: &str) -> Self {
        self.groups.push(text_search_group(query));
        self
    }

    /// Sort by a listing sort key.
    pub fn with_sort(self, sort: SortKey) -> Self {
        self.with_order(sort.order_by())
    }

    /// Sort by an explicit directive.
    pub fn with_order(mut self, order: OrderBy) -> Self {
        self.order = order;
        self
    }

    /// Return at most `limit` products from the start.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn order(&self) -> &OrderBy {
        &self.order
    }

    /// Build gateway fetch parameters naming every product field.
    pub fn to_params(&self) -> FetchParams {
        let mut params = FetchParams::new(Product::projection())
            .with_conditions(self.conditions.iter().cloned())
            .with_order(self.order.clone());
        for group in &self.groups {
            params = params.with_group(group.clone());
        }
        if let Some(limit) = self.limit {
            params = params.with_paging(PagingInfo::first(limit));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storefront_gateway::{Logic, SortType};

    #[test]
    fn test_sort_key_mapping() {
        let cases = [
            ("price-low", fields::PRICE, SortType::Asc),
            ("price-high", fields::PRICE, SortType::Desc),
            ("rating", fields::RATING, SortType::Desc),
            ("newest", schema::ID, SortType::Desc),
            ("", fields::RATING, SortType::Desc),
            ("bogus", fields::RATING, SortType::Desc),
        ];
        for (param, field, sort) in cases {
            let order = SortKey::from_param(param).order_by();
            assert_eq!(order.field_name, field, "{param}");
            assert_eq!(order.sorttype, sort, "{param}");
        }
    }

    #[test]
    fn test_sort_key_serde() {
        let key: SortKey = serde_json::from_value(json!("price-high")).unwrap();
        assert_eq!(key, SortKey::PriceHigh);
        assert_eq!(SortKey::Newest.to_string(), "newest");
    }

    #[test]
    fn test_text_search_group() {
        let group = text_search_group("Vitamin C");
        assert_eq!(group.operator, Logic::Or);
        assert_eq!(group.sub_groups.len(), 1);
        let sub = &group.sub_groups[0];
        assert_eq!(sub.operator, Logic::Or);
        let fields: Vec<&str> = sub.conditions.iter().map(|c| c.field_name.as_str()).collect();
        assert_eq!(fields, SEARCH_FIELDS);
        assert!(sub
            .conditions
            .iter()
            .all(|c| c.operator == Operator::Contains && c.values == vec![json!("vitamin c")]));
    }

    #[test]
    fn test_default_params() {
        let params = ProductQuery::new().to_params();
        assert_eq!(params.fields.len(), fields::FIELDS.len());
        assert!(params.conditions.is_empty());
        assert!(params.where_groups.is_empty());
        assert_eq!(params.order_by, vec![OrderBy::desc(fields::RATING)]);
        assert!(params.paging_info.is_none());
    }

    #[test]
    fn test_limited_params() {
        let params = ProductQuery::new()
            .with_condition(Condition::equal_to(fields::CATEGORY, "Skincare"))
            .with_limit(4)
            .to_params();
        assert_eq!(params.conditions.len(), 1);
        assert_eq!(params.paging_info, Some(PagingInfo { limit: 4, offset: 0 }));
    }

    #[test]
    fn test_by_name() {
        assert_eq!(ProductQuery::by_name().order(), &OrderBy::asc(fields::NAME));
    }
}
