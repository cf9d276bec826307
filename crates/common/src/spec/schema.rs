//! Shared schema primitives for the provider specification
//!
//! Computability, element types, validators, and static defaults are common
//! to resource, data source, and provider attributes.

use serde::{Deserialize, Serialize};

/// Governs whether a Terraform user or the server supplies a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Computability {
    Required,
    Optional,
    Computed,
    ComputedOptional,
}

impl Computability {
    /// True for any value a practitioner may supply.
    pub fn is_user_suppliable(self) -> bool {
        self != Computability::Computed
    }
}

/// Provider-context attributes never carry computed semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalRequired {
    Required,
    Optional,
}

/// Element type for collection attributes.
///
/// Object element types carry their field list inline, so a fully resolved
/// tree serializes without references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    String,
    Bool,
    Int32,
    Int64,
    Number,
    List(Box<ElementType>),
    Set(Box<ElementType>),
    Map(Box<ElementType>),
    Object(Vec<ObjectField>),
}

/// One named field inside an object element type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: ElementType,
}

/// Constraint predicates for string attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StringValidator {
    OneOf { values: Vec<String> },
}

/// Constraint predicates for int32 attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Int32Validator {
    OneOf { values: Vec<i32> },
    Between { min: i32, max: i32 },
    AtLeast { min: i32 },
    AtMost { max: i32 },
}

/// Constraint predicates for int64 attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Int64Validator {
    OneOf { values: Vec<i64> },
    Between { min: i64, max: i64 },
    AtLeast { min: i64 },
    AtMost { max: i64 },
}

/// Constraint predicates for number attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NumberValidator {
    OneOf { values: Vec<f64> },
    Between { min: f64, max: f64 },
    AtLeast { min: f64 },
    AtMost { max: f64 },
}

/// Static server-side default for a string attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringDefault {
    #[serde(rename = "static")]
    pub static_: String,
}

/// Static server-side default for a bool attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoolDefault {
    #[serde(rename = "static")]
    pub static_: bool,
}

/// Static server-side default for an int32 attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Int32Default {
    #[serde(rename = "static")]
    pub static_: i32,
}

/// Static server-side default for an int64 attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Int64Default {
    #[serde(rename = "static")]
    pub static_: i64,
}

/// Static server-side default for a number attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberDefault {
    #[serde(rename = "static")]
    pub static_: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computability_serializes_snake_case() {
        let json = serde_json::to_string(&Computability::ComputedOptional).unwrap();
        assert_eq!(json, "\"computed_optional\"");
    }

    #[test]
    fn element_type_nesting_round_trips() {
        let elem = ElementType::List(Box::new(ElementType::Object(vec![ObjectField {
            name: "stage_id".to_string(),
            field_type: ElementType::String,
        }])));
        let json = serde_json::to_value(&elem).unwrap();
        let back: ElementType = serde_json::from_value(json).unwrap();
        assert_eq!(back, elem);
    }

    #[test]
    fn default_serializes_static_key() {
        let json = serde_json::to_value(Int64Default { static_: 42 }).unwrap();
        assert_eq!(json["static"], 42);
    }
}
