//! Request parameters for the record gateway.
//!
//! The gateway's wire format mixes casing conventions: top-level `where`
//! conditions are PascalCase (`FieldName`, `Operator`, `Values`), while
//! conditions nested in `whereGroups` are camelCase. Both shapes are modelled
//! here so the serialized JSON matches what the gateway expects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Record;

/// A single projected field, serialized as `{"field": {"Name": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelector {
    pub field: FieldRef,
}

/// Field name wrapper used inside [`FieldSelector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    #[serde(rename = "Name")]
    pub name: String,
}

impl FieldSelector {
    /// Select a field by name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            field: FieldRef { name: name.into() },
        }
    }

    /// The selected field's name.
    pub fn name(&self) -> &str {
        &self.field.name
    }
}

/// Build a projection from a list of field names.
pub fn project(names: &[&str]) -> Vec<FieldSelector> {
    names.iter().map(|name| FieldSelector::new(*name)).collect()
}

/// Comparison operators understood by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    Contains,
    DoesNotContain,
    StartsWith,
}

/// A top-level `where` condition. All conditions in a request are ANDed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Condition {
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<Value>,
    /// When set with several values, the field may match any of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<bool>,
}

impl Condition {
    /// Create a condition.
    pub fn new(field: impl Into<String>, operator: Operator, values: Vec<Value>) -> Self {
        Self {
            field_name: field.into(),
            operator,
            values,
            include: None,
        }
    }

    /// `field == value`.
    pub fn equal_to(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::EqualTo, vec![value.into()])
    }

    /// `field != value`.
    pub fn not_equal_to(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::NotEqualTo, vec![value.into()])
    }

    /// `field >= value`.
    pub fn at_least(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::GreaterThanOrEqualTo, vec![value.into()])
    }

    /// `field <= value`.
    pub fn at_most(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::LessThanOrEqualTo, vec![value.into()])
    }

    /// `field` equals any of `values`.
    pub fn any_of<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        let mut condition = Self::new(
            field,
            Operator::EqualTo,
            values.into_iter().map(Into::into).collect(),
        );
        condition.include = Some(true);
        condition
    }

    /// `field` contains the given values.
    pub fn contains<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self::new(
            field,
            Operator::Contains,
            values.into_iter().map(Into::into).collect(),
        )
    }
}

/// Logical connective for where groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Logic {
    And,
    Or,
}

/// A condition inside a where group (camelCase on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCondition {
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<Value>,
}

impl GroupCondition {
    /// Create a group condition.
    pub fn new(field: impl Into<String>, operator: Operator, values: Vec<Value>) -> Self {
        Self {
            field_name: field.into(),
            operator,
            values,
        }
    }
}

/// Conditions joined by one connective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubGroup {
    pub conditions: Vec<GroupCondition>,
    pub operator: Logic,
}

/// A group of sub-groups joined by one connective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhereGroup {
    pub operator: Logic,
    pub sub_groups: Vec<SubGroup>,
}

impl WhereGroup {
    /// A single OR-group: any of `conditions` matches.
    pub fn any(conditions: Vec<GroupCondition>) -> Self {
        Self {
            operator: Logic::Or,
            sub_groups: vec![SubGroup {
                conditions,
                operator: Logic::Or,
            }],
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortType {
    Asc,
    Desc,
}

/// A sort directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    pub sorttype: SortType,
}

impl OrderBy {
    /// Ascending order on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field_name: field.into(),
            sorttype: SortType::Asc,
        }
    }

    /// Descending order on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field_name: field.into(),
            sorttype: SortType::Desc,
        }
    }
}

/// Page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    pub limit: u32,
    pub offset: u32,
}

impl PagingInfo {
    /// The first `limit` records.
    pub fn first(limit: u32) -> Self {
        Self { limit, offset: 0 }
    }
}

/// Parameters for a fetch-many request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchParams {
    pub fields: Vec<FieldSelector>,
    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub where_groups: Vec<WhereGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging_info: Option<PagingInfo>,
}

impl FetchParams {
    /// Create fetch parameters projecting `fields`.
    pub fn new(fields: Vec<FieldSelector>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Add a `where` condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add several `where` conditions.
    pub fn with_conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    /// Add a where group.
    pub fn with_group(mut self, group: WhereGroup) -> Self {
        self.where_groups.push(group);
        self
    }

    /// Add a sort directive.
    pub fn with_order(mut self, order: OrderBy) -> Self {
        self.order_by.push(order);
        self
    }

    /// Limit the result window.
    pub fn with_paging(mut self, paging: PagingInfo) -> Self {
        self.paging_info = Some(paging);
        self
    }
}

/// Parameters for a get-by-id request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordParams {
    pub fields: Vec<FieldSelector>,
}

impl RecordParams {
    /// Create get-by-id parameters projecting `fields`.
    pub fn new(fields: Vec<FieldSelector>) -> Self {
        Self { fields }
    }
}

/// A batch of records for create or update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationParams {
    pub records: Vec<Record>,
}

impl MutationParams {
    /// A batch holding one record.
    pub fn single(record: Record) -> Self {
        Self {
            records: vec![record],
        }
    }
}

/// A batch of record ids to delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteParams {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<i64>,
}

impl DeleteParams {
    /// A batch holding one id.
    pub fn single(id: i64) -> Self {
        Self {
            record_ids: vec![id],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_selector_wire_shape() {
        let value = serde_json::to_value(FieldSelector::new("name_c")).unwrap();
        assert_eq!(value, json!({"field": {"Name": "name_c"}}));
    }

    #[test]
    fn test_condition_is_pascal_case() {
        let value = serde_json::to_value(Condition::equal_to("category_c", "Skincare")).unwrap();
        assert_eq!(
            value,
            json!({"FieldName": "category_c", "Operator": "EqualTo", "Values": ["Skincare"]})
        );
    }

    #[test]
    fn test_any_of_sets_include() {
        let value = serde_json::to_value(Condition::any_of("brand_c", ["A", "B"])).unwrap();
        assert_eq!(value["Include"], json!(true));
        assert_eq!(value["Values"], json!(["A", "B"]));
    }

    #[test]
    fn test_where_group_is_camel_case() {
        let group = WhereGroup::any(vec![GroupCondition::new(
            "name_c",
            Operator::Contains,
            vec![json!("serum")],
        )]);
        let value = serde_json::to_value(group).unwrap();
        assert_eq!(value["operator"], json!("OR"));
        assert_eq!(value["subGroups"][0]["operator"], json!("OR"));
        assert_eq!(
            value["subGroups"][0]["conditions"][0],
            json!({"fieldName": "name_c", "operator": "Contains", "values": ["serum"]})
        );
    }

    #[test]
    fn test_fetch_params_omits_empty_sections() {
        let params = FetchParams::new(project(&["Id"])).with_order(OrderBy::desc("rating_c"));
        let value = serde_json::to_value(params).unwrap();
        assert!(value.get("where").is_none());
        assert!(value.get("whereGroups").is_none());
        assert!(value.get("pagingInfo").is_none());
        assert_eq!(value["orderBy"], json!([{"fieldName": "rating_c", "sorttype": "DESC"}]));
    }

    #[test]
    fn test_fetch_params_paging() {
        let params = FetchParams::new(vec![]).with_paging(PagingInfo::first(8));
        let value = serde_json::to_value(params).unwrap();
        assert_eq!(value["pagingInfo"], json!({"limit": 8, "offset": 0}));
    }

    #[test]
    fn test_delete_params_wire_shape() {
        let value = serde_json::to_value(DeleteParams::single(7)).unwrap();
        assert_eq!(value, json!({"RecordIds": [7]}));
    }
}
