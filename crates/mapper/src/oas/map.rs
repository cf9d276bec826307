//! Map attribute builders
//!
//! Objects using `additionalProperties` with no fixed property set map to
//! Map/MapNested attributes keyed by arbitrary strings.

use tf_openapi_generator_common::spec::datasource;
use tf_openapi_generator_common::spec::provider;
use tf_openapi_generator_common::spec::resource;
use tf_openapi_generator_common::spec::schema::{Computability, OptionalRequired};

use crate::util::OAS_TYPE_OBJECT;

use super::{OasSchema, SchemaError, SchemaPath};

impl<'d> OasSchema<'d> {
    fn additional_properties_child(&self) -> Result<OasSchema<'d>, SchemaError> {
        let value_schema = self.schema.additional_properties.as_ref().ok_or(
            SchemaError::MissingAdditionalProperties {
                path: SchemaPath::root(),
            },
        )?;
        self.build_child(value_schema)
    }

    pub fn build_map_resource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<resource::Attribute, SchemaError> {
        let child = self.additional_properties_child()?;

        let kind = if child.schema_type == OAS_TYPE_OBJECT && !child.is_map() {
            resource::AttributeKind::MapNested(resource::MapNestedAttribute {
                computed_optional_required: computability,
                nested_object: resource::NestedAttributeObject {
                    attributes: child.build_resource_attributes()?,
                },
                deprecation_message: self.get_deprecation_message(),
                description: self.get_description(),
            })
        } else {
            resource::AttributeKind::Map(resource::MapAttribute {
                computed_optional_required: computability,
                element_type: child.build_element_type()?,
                deprecation_message: self.get_deprecation_message(),
                description: self.get_description(),
            })
        };

        Ok(resource::Attribute {
            name: name.to_string(),
            kind,
        })
    }

    pub fn build_map_datasource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<datasource::Attribute, SchemaError> {
        let child = self.additional_properties_child()?;

        let kind = if child.schema_type == OAS_TYPE_OBJECT && !child.is_map() {
            datasource::AttributeKind::MapNested(datasource::MapNestedAttribute {
                computed_optional_required: computability,
                nested_object: datasource::NestedAttributeObject {
                    attributes: child.build_datasource_attributes()?,
                },
                deprecation_message: self.get_deprecation_message(),
                description: self.get_description(),
            })
        } else {
            datasource::AttributeKind::Map(datasource::MapAttribute {
                computed_optional_required: computability,
                element_type: child.build_element_type()?,
                deprecation_message: self.get_deprecation_message(),
                description: self.get_description(),
            })
        };

        Ok(datasource::Attribute {
            name: name.to_string(),
            kind,
        })
    }

    pub fn build_map_provider(
        &self,
        name: &str,
        optional_required: OptionalRequired,
    ) -> Result<provider::Attribute, SchemaError> {
        let child = self.additional_properties_child()?;

        let kind = if child.schema_type == OAS_TYPE_OBJECT && !child.is_map() {
            provider::AttributeKind::MapNested(provider::MapNestedAttribute {
                optional_required,
                nested_object: provider::NestedAttributeObject {
                    attributes: child.build_provider_attributes()?,
                },
                deprecation_message: self.get_deprecation_message(),
                description: self.get_description(),
            })
        } else {
            provider::AttributeKind::Map(provider::MapAttribute {
                optional_required,
                element_type: child.build_element_type()?,
                deprecation_message: self.get_deprecation_message(),
                description: self.get_description(),
            })
        };

        Ok(provider::Attribute {
            name: name.to_string(),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::oas::{build_schema, GlobalSchemaOpts, SchemaOpts};
    use crate::openapi::{Document, SchemaOrRef};
    use tf_openapi_generator_common::spec::schema::ElementType;

    fn doc() -> Document {
        serde_json::from_value(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {}
        }))
        .unwrap()
    }

    #[test]
    fn additional_properties_builds_map_attribute() {
        let document = doc();
        let node: SchemaOrRef = serde_json::from_value(json!({
            "type": "object",
            "additionalProperties": { "type": "string" }
        }))
        .unwrap();

        let schema = build_schema(
            &document,
            &node,
            SchemaOpts::default(),
            GlobalSchemaOpts::default(),
        )
        .unwrap();
        assert!(schema.is_map());

        let attr = schema
            .build_map_resource("labels", Computability::ComputedOptional)
            .unwrap();
        let resource::AttributeKind::Map(map) = attr.kind else {
            panic!("expected map attribute");
        };
        assert_eq!(map.element_type, ElementType::String);
    }

    #[test]
    fn object_valued_map_builds_map_nested() {
        let document = doc();
        let node: SchemaOrRef = serde_json::from_value(json!({
            "type": "object",
            "additionalProperties": {
                "type": "object",
                "properties": { "region": { "type": "string" } }
            }
        }))
        .unwrap();

        let schema = build_schema(
            &document,
            &node,
            SchemaOpts::default(),
            GlobalSchemaOpts::default(),
        )
        .unwrap();
        let attr = schema
            .build_map_datasource("endpoints", Computability::Computed)
            .unwrap();
        let datasource::AttributeKind::MapNested(map) = attr.kind else {
            panic!("expected map nested attribute");
        };
        assert_eq!(map.nested_object.attributes[0].name, "region");
    }
}
