//! List/Set attribute builders
//!
//! Arrays of objects nest (ListNested/SetNested); arrays of anything else
//! carry an element type. A `set` format, injected by the data source
//! mapper for top-level collection responses, routes to the set variants.

use tf_openapi_generator_common::spec::datasource;
use tf_openapi_generator_common::spec::provider;
use tf_openapi_generator_common::spec::resource;
use tf_openapi_generator_common::spec::schema::{Computability, OptionalRequired};

use crate::util::{OAS_TYPE_OBJECT, TF_FORMAT_SET};

use super::{OasSchema, SchemaError, SchemaPath};

impl<'d> OasSchema<'d> {
    fn items_child(&self) -> Result<OasSchema<'d>, SchemaError> {
        let items = self.schema.items.as_ref().ok_or(SchemaError::MissingItems {
            path: SchemaPath::root(),
        })?;
        self.build_child(items)
    }

    fn is_set(&self) -> bool {
        self.format.as_deref() == Some(TF_FORMAT_SET)
    }

    pub fn build_array_resource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<resource::Attribute, SchemaError> {
        let child = self.items_child()?;

        let kind = if child.schema_type == OAS_TYPE_OBJECT && !child.is_map() {
            let nested_object = resource::NestedAttributeObject {
                attributes: child.build_resource_attributes()?,
            };
            if self.is_set() {
                resource::AttributeKind::SetNested(resource::SetNestedAttribute {
                    computed_optional_required: computability,
                    nested_object,
                    deprecation_message: self.get_deprecation_message(),
                    description: self.get_description(),
                })
            } else {
                resource::AttributeKind::ListNested(resource::ListNestedAttribute {
                    computed_optional_required: computability,
                    nested_object,
                    deprecation_message: self.get_deprecation_message(),
                    description: self.get_description(),
                })
            }
        } else {
            let element_type = child.build_element_type()?;
            if self.is_set() {
                resource::AttributeKind::Set(resource::SetAttribute {
                    computed_optional_required: computability,
                    element_type,
                    deprecation_message: self.get_deprecation_message(),
                    description: self.get_description(),
                })
            } else {
                resource::AttributeKind::List(resource::ListAttribute {
                    computed_optional_required: computability,
                    element_type,
                    deprecation_message: self.get_deprecation_message(),
                    description: self.get_description(),
                })
            }
        };

        Ok(resource::Attribute {
            name: name.to_string(),
            kind,
        })
    }

    pub fn build_array_datasource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<datasource::Attribute, SchemaError> {
        let child = self.items_child()?;

        let kind = if child.schema_type == OAS_TYPE_OBJECT && !child.is_map() {
            let nested_object = datasource::NestedAttributeObject {
                attributes: child.build_datasource_attributes()?,
            };
            if self.is_set() {
                datasource::AttributeKind::SetNested(datasource::SetNestedAttribute {
                    computed_optional_required: computability,
                    nested_object,
                    deprecation_message: self.get_deprecation_message(),
                    description: self.get_description(),
                })
            } else {
                datasource::AttributeKind::ListNested(datasource::ListNestedAttribute {
                    computed_optional_required: computability,
                    nested_object,
                    deprecation_message: self.get_deprecation_message(),
                    description: self.get_description(),
                })
            }
        } else {
            let element_type = child.build_element_type()?;
            if self.is_set() {
                datasource::AttributeKind::Set(datasource::SetAttribute {
                    computed_optional_required: computability,
                    element_type,
                    deprecation_message: self.get_deprecation_message(),
                    description: self.get_description(),
                })
            } else {
                datasource::AttributeKind::List(datasource::ListAttribute {
                    computed_optional_required: computability,
                    element_type,
                    deprecation_message: self.get_deprecation_message(),
                    description: self.get_description(),
                })
            }
        };

        Ok(datasource::Attribute {
            name: name.to_string(),
            kind,
        })
    }

    pub fn build_array_provider(
        &self,
        name: &str,
        optional_required: OptionalRequired,
    ) -> Result<provider::Attribute, SchemaError> {
        let child = self.items_child()?;

        let kind = if child.schema_type == OAS_TYPE_OBJECT && !child.is_map() {
            let nested_object = provider::NestedAttributeObject {
                attributes: child.build_provider_attributes()?,
            };
            if self.is_set() {
                provider::AttributeKind::SetNested(provider::SetNestedAttribute {
                    optional_required,
                    nested_object,
                    deprecation_message: self.get_deprecation_message(),
                    description: self.get_description(),
                })
            } else {
                provider::AttributeKind::ListNested(provider::ListNestedAttribute {
                    optional_required,
                    nested_object,
                    deprecation_message: self.get_deprecation_message(),
                    description: self.get_description(),
                })
            }
        } else {
            let element_type = child.build_element_type()?;
            if self.is_set() {
                provider::AttributeKind::Set(provider::SetAttribute {
                    optional_required,
                    element_type,
                    deprecation_message: self.get_deprecation_message(),
                    description: self.get_description(),
                })
            } else {
                provider::AttributeKind::List(provider::ListAttribute {
                    optional_required,
                    element_type,
                    deprecation_message: self.get_deprecation_message(),
                    description: self.get_description(),
                })
            }
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
    fn array_of_strings_builds_list_with_element_type() {
        let document = doc();
        let node: SchemaOrRef = serde_json::from_value(json!({
            "type": "array",
            "items": { "type": "string" }
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
            .build_array_resource("tags", Computability::ComputedOptional)
            .unwrap();

        let resource::AttributeKind::List(list) = attr.kind else {
            panic!("expected list attribute");
        };
        assert_eq!(list.element_type, ElementType::String);
    }

    #[test]
    fn set_format_routes_to_set_nested() {
        let document = doc();
        let node: SchemaOrRef = serde_json::from_value(json!({
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "stageId": { "type": "string" }
                }
            }
        }))
        .unwrap();

        let mut schema = build_schema(
            &document,
            &node,
            SchemaOpts::default(),
            GlobalSchemaOpts::default(),
        )
        .unwrap();
        schema.format = Some(TF_FORMAT_SET.to_string());

        let attr = schema
            .build_array_datasource("stages", Computability::Computed)
            .unwrap();
        let datasource::AttributeKind::SetNested(set) = attr.kind else {
            panic!("expected set nested attribute");
        };
        assert_eq!(set.nested_object.attributes[0].name, "stage_id");
    }

    #[test]
    fn array_without_items_fails() {
        let document = doc();
        let node: SchemaOrRef = serde_json::from_value(json!({ "type": "array" })).unwrap();
        let schema = build_schema(
            &document,
            &node,
            SchemaOpts::default(),
            GlobalSchemaOpts::default(),
        )
        .unwrap();

        let err = schema
            .build_array_resource("tags", Computability::Required)
            .unwrap_err();
        assert!(matches!(err, SchemaError::MissingItems { .. }));
    }
}
