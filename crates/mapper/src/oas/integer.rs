//! Int32/Int64 attribute builders
//!
//! Integers dispatch on format: `int32` builds an Int32 attribute,
//! everything else defaults to Int64.

use tf_openapi_generator_common::spec::datasource;
use tf_openapi_generator_common::spec::provider;
use tf_openapi_generator_common::spec::resource;
use tf_openapi_generator_common::spec::schema::{
    Computability, Int32Default, Int32Validator, Int64Default, Int64Validator, OptionalRequired,
};

use super::{OasSchema, SchemaError};

impl<'d> OasSchema<'d> {
    pub fn build_int32_resource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<resource::Attribute, SchemaError> {
        let mut result = resource::Int32Attribute {
            computed_optional_required: computability,
            default: None,
            deprecation_message: self.get_deprecation_message(),
            description: self.get_description(),
            validators: Vec::new(),
        };

        if let Some(value) = self.static_default_i32() {
            // A server-side default means the field cannot be user-required.
            if computability == Computability::Required {
                result.computed_optional_required = Computability::ComputedOptional;
            }
            result.default = Some(Int32Default { static_: value });
        }

        if computability.is_user_suppliable() {
            result.validators = self.get_int32_validators();
        }

        Ok(resource::Attribute {
            name: name.to_string(),
            kind: resource::AttributeKind::Int32(result),
        })
    }

    pub fn build_int64_resource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<resource::Attribute, SchemaError> {
        let mut result = resource::Int64Attribute {
            computed_optional_required: computability,
            default: None,
            deprecation_message: self.get_deprecation_message(),
            description: self.get_description(),
            validators: Vec::new(),
        };

        if let Some(value) = self.schema.default.as_ref().and_then(|v| v.as_i64()) {
            if computability == Computability::Required {
                result.computed_optional_required = Computability::ComputedOptional;
            }
            result.default = Some(Int64Default { static_: value });
        }

        if computability.is_user_suppliable() {
            result.validators = self.get_int64_validators();
        }

        Ok(resource::Attribute {
            name: name.to_string(),
            kind: resource::AttributeKind::Int64(result),
        })
    }

    pub fn build_int32_datasource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<datasource::Attribute, SchemaError> {
        let mut result = datasource::Int32Attribute {
            computed_optional_required: computability,
            deprecation_message: self.get_deprecation_message(),
            description: self.get_description(),
            validators: Vec::new(),
        };

        if computability.is_user_suppliable() {
            result.validators = self.get_int32_validators();
        }

        Ok(datasource::Attribute {
            name: name.to_string(),
            kind: datasource::AttributeKind::Int32(result),
        })
    }

    pub fn build_int64_datasource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<datasource::Attribute, SchemaError> {
        let mut result = datasource::Int64Attribute {
            computed_optional_required: computability,
            deprecation_message: self.get_deprecation_message(),
            description: self.get_description(),
            validators: Vec::new(),
        };

        if computability.is_user_suppliable() {
            result.validators = self.get_int64_validators();
        }

        Ok(datasource::Attribute {
            name: name.to_string(),
            kind: datasource::AttributeKind::Int64(result),
        })
    }

    pub fn build_int32_provider(
        &self,
        name: &str,
        optional_required: OptionalRequired,
    ) -> Result<provider::Attribute, SchemaError> {
        Ok(provider::Attribute {
            name: name.to_string(),
            kind: provider::AttributeKind::Int32(provider::Int32Attribute {
                optional_required,
                deprecation_message: self.get_deprecation_message(),
                description: self.get_description(),
                validators: self.get_int32_validators(),
            }),
        })
    }

    pub fn build_int64_provider(
        &self,
        name: &str,
        optional_required: OptionalRequired,
    ) -> Result<provider::Attribute, SchemaError> {
        Ok(provider::Attribute {
            name: name.to_string(),
            kind: provider::AttributeKind::Int64(provider::Int64Attribute {
                optional_required,
                deprecation_message: self.get_deprecation_message(),
                description: self.get_description(),
                validators: self.get_int64_validators(),
            }),
        })
    }

    fn static_default_i32(&self) -> Option<i32> {
        self.schema
            .default
            .as_ref()
            .and_then(|v| v.as_i64())
            .and_then(|v| i32::try_from(v).ok())
    }

    pub fn get_int32_validators(&self) -> Vec<Int32Validator> {
        let mut result = Vec::new();

        if !self.schema.enum_values.is_empty() {
            let values: Vec<i32> = self
                .schema
                .enum_values
                .iter()
                .filter_map(|v| v.as_i64())
                .filter_map(|v| i32::try_from(v).ok())
                .collect();

            if !values.is_empty() {
                result.push(Int32Validator::OneOf { values });
            }
        }

        let minimum = self.schema.minimum.map(|m| m as i32);
        let maximum = self.schema.maximum.map(|m| m as i32);

        match (minimum, maximum) {
            (Some(min), Some(max)) => result.push(Int32Validator::Between { min, max }),
            (Some(min), None) => result.push(Int32Validator::AtLeast { min }),
            (None, Some(max)) => result.push(Int32Validator::AtMost { max }),
            (None, None) => {}
        }

        result
    }

    pub fn get_int64_validators(&self) -> Vec<Int64Validator> {
        let mut result = Vec::new();

        if !self.schema.enum_values.is_empty() {
            let values: Vec<i64> = self
                .schema
                .enum_values
                .iter()
                .filter_map(|v| v.as_i64())
                .collect();

            if !values.is_empty() {
                result.push(Int64Validator::OneOf { values });
            }
        }

        let minimum = self.schema.minimum.map(|m| m as i64);
        let maximum = self.schema.maximum.map(|m| m as i64);

        match (minimum, maximum) {
            (Some(min), Some(max)) => result.push(Int64Validator::Between { min, max }),
            (Some(min), None) => result.push(Int64Validator::AtLeast { min }),
            (None, Some(max)) => result.push(Int64Validator::AtMost { max }),
            (None, None) => {}
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::oas::{build_schema, GlobalSchemaOpts, SchemaOpts};
    use crate::openapi::{Document, SchemaOrRef};

    fn doc() -> Document {
        serde_json::from_value(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {}
        }))
        .unwrap()
    }

    fn build<'d>(document: &'d Document, node: &'d SchemaOrRef) -> crate::oas::OasSchema<'d> {
        build_schema(
            document,
            node,
            SchemaOpts::default(),
            GlobalSchemaOpts::default(),
        )
        .unwrap()
    }

    #[test]
    fn int64_static_default_demotes_required() {
        let document = doc();
        let node: SchemaOrRef = serde_json::from_value(json!({
            "type": "integer",
            "format": "int64",
            "default": 60
        }))
        .unwrap();

        let schema = build(&document, &node);
        let attr = schema
            .build_int64_resource("cache_ttl_sec", Computability::Required)
            .unwrap();

        let resource::AttributeKind::Int64(int64) = attr.kind else {
            panic!("expected int64 attribute");
        };
        assert_eq!(
            int64.computed_optional_required,
            Computability::ComputedOptional
        );
        assert_eq!(int64.default, Some(Int64Default { static_: 60 }));
    }

    #[test]
    fn int64_without_default_keeps_required() {
        let document = doc();
        let node: SchemaOrRef = serde_json::from_value(json!({
            "type": "integer",
            "format": "int64"
        }))
        .unwrap();

        let schema = build(&document, &node);
        let attr = schema
            .build_int64_resource("cache_ttl_sec", Computability::Required)
            .unwrap();

        let resource::AttributeKind::Int64(int64) = attr.kind else {
            panic!("expected int64 attribute");
        };
        assert_eq!(int64.computed_optional_required, Computability::Required);
        assert_eq!(int64.default, None);
    }

    #[test]
    fn bounds_translate_to_range_validators() {
        let document = doc();

        let both: SchemaOrRef = serde_json::from_value(json!({
            "type": "integer", "format": "int64", "minimum": 1, "maximum": 10
        }))
        .unwrap();
        assert_eq!(
            build(&document, &both).get_int64_validators(),
            vec![Int64Validator::Between { min: 1, max: 10 }]
        );

        let only_min: SchemaOrRef = serde_json::from_value(json!({
            "type": "integer", "format": "int64", "minimum": 1
        }))
        .unwrap();
        assert_eq!(
            build(&document, &only_min).get_int64_validators(),
            vec![Int64Validator::AtLeast { min: 1 }]
        );

        let only_max: SchemaOrRef = serde_json::from_value(json!({
            "type": "integer", "format": "int64", "maximum": 10
        }))
        .unwrap();
        assert_eq!(
            build(&document, &only_max).get_int64_validators(),
            vec![Int64Validator::AtMost { max: 10 }]
        );
    }

    #[test]
    fn enum_and_bounds_stack_in_order() {
        let document = doc();
        let node: SchemaOrRef = serde_json::from_value(json!({
            "type": "integer", "format": "int32",
            "enum": [1, 2, 3],
            "minimum": 1, "maximum": 3
        }))
        .unwrap();

        let schema = build(&document, &node);
        assert_eq!(
            schema.get_int32_validators(),
            vec![
                Int32Validator::OneOf {
                    values: vec![1, 2, 3]
                },
                Int32Validator::Between { min: 1, max: 3 },
            ]
        );
    }

    #[test]
    fn computed_integer_has_no_validators() {
        let document = doc();
        let node: SchemaOrRef = serde_json::from_value(json!({
            "type": "integer", "format": "int64", "enum": [1, 2]
        }))
        .unwrap();

        let schema = build(&document, &node);
        let attr = schema
            .build_int64_resource("offset", Computability::Computed)
            .unwrap();
        let resource::AttributeKind::Int64(int64) = attr.kind else {
            panic!("expected int64 attribute");
        };
        assert!(int64.validators.is_empty());
    }
}
