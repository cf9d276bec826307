//! Data source attribute model for the provider specification
//!
//! Data source attributes never carry defaults; values flow from the API
//! into state, not the other way around.

use serde::{Deserialize, Serialize};

use super::schema::{
    Computability, ElementType, Int32Validator, Int64Validator, NumberValidator, StringValidator,
};

/// One data source entry in the specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub name: String,
    pub schema: Schema,
}

/// Schema of a data source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(flatten)]
    pub kind: AttributeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    String(StringAttribute),
    Bool(BoolAttribute),
    Int32(Int32Attribute),
    Int64(Int64Attribute),
    Number(NumberAttribute),
    List(ListAttribute),
    Set(SetAttribute),
    Map(MapAttribute),
    SingleNested(SingleNestedAttribute),
    ListNested(ListNestedAttribute),
    SetNested(SetNestedAttribute),
    MapNested(MapNestedAttribute),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringAttribute {
    pub computed_optional_required: Computability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<StringValidator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoolAttribute {
    pub computed_optional_required: Computability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Int32Attribute {
    pub computed_optional_required: Computability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Int32Validator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Int64Attribute {
    pub computed_optional_required: Computability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Int64Validator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberAttribute {
    pub computed_optional_required: Computability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<NumberValidator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListAttribute {
    pub computed_optional_required: Computability,
    pub element_type: ElementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetAttribute {
    pub computed_optional_required: Computability,
    pub element_type: ElementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapAttribute {
    pub computed_optional_required: Computability,
    pub element_type: ElementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleNestedAttribute {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    pub computed_optional_required: Computability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NestedAttributeObject {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListNestedAttribute {
    pub computed_optional_required: Computability,
    pub nested_object: NestedAttributeObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetNestedAttribute {
    pub computed_optional_required: Computability,
    pub nested_object: NestedAttributeObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapNestedAttribute {
    pub computed_optional_required: Computability,
    pub nested_object: NestedAttributeObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AttributeKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttributeKind::String(_) => "string",
            AttributeKind::Bool(_) => "bool",
            AttributeKind::Int32(_) => "int32",
            AttributeKind::Int64(_) => "int64",
            AttributeKind::Number(_) => "number",
            AttributeKind::List(_) => "list",
            AttributeKind::Set(_) => "set",
            AttributeKind::Map(_) => "map",
            AttributeKind::SingleNested(_) => "single_nested",
            AttributeKind::ListNested(_) => "list_nested",
            AttributeKind::SetNested(_) => "set_nested",
            AttributeKind::MapNested(_) => "map_nested",
        }
    }
}
