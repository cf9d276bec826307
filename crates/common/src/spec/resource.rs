//! Resource attribute model for the provider specification

use serde::{Deserialize, Serialize};

use super::schema::{
    BoolDefault, Computability, ElementType, Int32Default, Int32Validator, Int64Default,
    Int64Validator, NumberDefault, NumberValidator, StringDefault, StringValidator,
};

/// One managed resource entry in the specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub schema: Schema,
}

/// Schema of a managed resource.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

/// A normalized field description for generated resource code.
///
/// The kind tag is flattened next to the name, so an attribute serializes as
/// `{"name": "...", "string": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(flatten)]
    pub kind: AttributeKind,
}

/// Tagged attribute variants, one per primitive kind.
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
    pub default: Option<StringDefault>,
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
    pub default: Option<BoolDefault>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Int32Attribute {
    pub computed_optional_required: Computability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Int32Default>,
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
    pub default: Option<Int64Default>,
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
    pub default: Option<NumberDefault>,
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

/// Nested object shared by list/set/map nested attributes.
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
    /// Short tag used in diagnostics and merge-conflict reports.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_serializes_with_flattened_kind_tag() {
        let attr = Attribute {
            name: "tenant_id".to_string(),
            kind: AttributeKind::String(StringAttribute {
                computed_optional_required: Computability::Required,
                default: None,
                deprecation_message: None,
                description: Some("Tenant Id".to_string()),
                validators: vec![],
            }),
        };

        let json = serde_json::to_value(&attr).unwrap();
        assert_eq!(json["name"], "tenant_id");
        assert_eq!(json["string"]["computed_optional_required"], "required");
        assert_eq!(json["string"]["description"], "Tenant Id");
        assert!(json["string"].get("validators").is_none());
    }
}
