//! String attribute builders

use tf_openapi_generator_common::spec::datasource;
use tf_openapi_generator_common::spec::provider;
use tf_openapi_generator_common::spec::resource;
use tf_openapi_generator_common::spec::schema::{
    Computability, OptionalRequired, StringDefault, StringValidator,
};

use super::{OasSchema, SchemaError};

impl<'d> OasSchema<'d> {
    pub fn build_string_resource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<resource::Attribute, SchemaError> {
        let mut result = resource::StringAttribute {
            computed_optional_required: computability,
            default: None,
            deprecation_message: self.get_deprecation_message(),
            description: self.get_description(),
            validators: Vec::new(),
        };

        if let Some(value) = self.schema.default.as_ref().and_then(|v| v.as_str()) {
            // A server-side default means the field cannot be user-required.
            if computability == Computability::Required {
                result.computed_optional_required = Computability::ComputedOptional;
            }
            result.default = Some(StringDefault {
                static_: value.to_string(),
            });
        }

        if computability.is_user_suppliable() {
            result.validators = self.get_string_validators();
        }

        Ok(resource::Attribute {
            name: name.to_string(),
            kind: resource::AttributeKind::String(result),
        })
    }

    pub fn build_string_datasource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<datasource::Attribute, SchemaError> {
        let mut result = datasource::StringAttribute {
            computed_optional_required: computability,
            deprecation_message: self.get_deprecation_message(),
            description: self.get_description(),
            validators: Vec::new(),
        };

        if computability.is_user_suppliable() {
            result.validators = self.get_string_validators();
        }

        Ok(datasource::Attribute {
            name: name.to_string(),
            kind: datasource::AttributeKind::String(result),
        })
    }

    pub fn build_string_provider(
        &self,
        name: &str,
        optional_required: OptionalRequired,
    ) -> Result<provider::Attribute, SchemaError> {
        Ok(provider::Attribute {
            name: name.to_string(),
            kind: provider::AttributeKind::String(provider::StringAttribute {
                optional_required,
                deprecation_message: self.get_deprecation_message(),
                description: self.get_description(),
                validators: self.get_string_validators(),
            }),
        })
    }

    pub fn get_string_validators(&self) -> Vec<StringValidator> {
        let mut result = Vec::new();

        if !self.schema.enum_values.is_empty() {
            let values: Vec<String> = self
                .schema
                .enum_values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();

            if !values.is_empty() {
                result.push(StringValidator::OneOf { values });
            }
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

    fn node(value: serde_json::Value) -> SchemaOrRef {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn enum_builds_exactly_one_one_of_validator() {
        let document = doc();
        let node = node(json!({
            "type": "string",
            "enum": ["a", "b", "c"]
        }));
        let schema = build_schema(
            &document,
            &node,
            SchemaOpts::default(),
            GlobalSchemaOpts::default(),
        )
        .unwrap();

        let attr = schema
            .build_string_resource("permission", Computability::Required)
            .unwrap();
        let resource::AttributeKind::String(string) = attr.kind else {
            panic!("expected string attribute");
        };
        assert_eq!(
            string.validators,
            vec![StringValidator::OneOf {
                values: vec!["a".to_string(), "b".to_string(), "c".to_string()]
            }]
        );
    }

    #[test]
    fn computed_attributes_have_no_validators() {
        let document = doc();
        let node = node(json!({
            "type": "string",
            "enum": ["a", "b"]
        }));
        let schema = build_schema(
            &document,
            &node,
            SchemaOpts::default(),
            GlobalSchemaOpts::default(),
        )
        .unwrap();

        let attr = schema
            .build_string_resource("permission", Computability::Computed)
            .unwrap();
        let resource::AttributeKind::String(string) = attr.kind else {
            panic!("expected string attribute");
        };
        assert!(string.validators.is_empty());
    }

    #[test]
    fn static_default_demotes_required_to_computed_optional() {
        let document = doc();
        let node = node(json!({
            "type": "string",
            "default": "standard"
        }));
        let schema = build_schema(
            &document,
            &node,
            SchemaOpts::default(),
            GlobalSchemaOpts::default(),
        )
        .unwrap();

        let attr = schema
            .build_string_resource("tier", Computability::Required)
            .unwrap();
        let resource::AttributeKind::String(string) = attr.kind else {
            panic!("expected string attribute");
        };
        assert_eq!(
            string.computed_optional_required,
            Computability::ComputedOptional
        );
        assert_eq!(
            string.default,
            Some(StringDefault {
                static_: "standard".to_string()
            })
        );
    }
}
