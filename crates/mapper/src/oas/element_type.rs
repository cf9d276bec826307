//! Element type construction for collection attributes
//!
//! Dispatches strictly on `(type, format)`. Integers require an explicit
//! int32/int64 format here: an element type has no room for a "some kind of
//! integer" placeholder, so a missing format is a build failure.

use tf_openapi_generator_common::spec::schema::{ElementType, ObjectField};

use crate::util::{
    to_snake_case, OAS_FORMAT_INT32, OAS_FORMAT_INT64, OAS_TYPE_ARRAY, OAS_TYPE_BOOLEAN,
    OAS_TYPE_INTEGER, OAS_TYPE_NUMBER, OAS_TYPE_OBJECT, OAS_TYPE_STRING, TF_FORMAT_SET,
};

use super::{OasSchema, SchemaError, SchemaPath};

impl<'d> OasSchema<'d> {
    pub fn build_element_type(&self) -> Result<ElementType, SchemaError> {
        match self.schema_type.as_str() {
            OAS_TYPE_STRING => Ok(ElementType::String),
            OAS_TYPE_BOOLEAN => Ok(ElementType::Bool),
            OAS_TYPE_NUMBER => Ok(ElementType::Number),
            OAS_TYPE_INTEGER => match self.format.as_deref() {
                Some(OAS_FORMAT_INT32) => Ok(ElementType::Int32),
                Some(OAS_FORMAT_INT64) => Ok(ElementType::Int64),
                other => Err(SchemaError::invalid_format(OAS_TYPE_INTEGER, other)),
            },
            OAS_TYPE_ARRAY => {
                let items = self.schema.items.as_ref().ok_or(SchemaError::MissingItems {
                    path: SchemaPath::root(),
                })?;
                let element = Box::new(self.build_child(items)?.build_element_type()?);
                if self.format.as_deref() == Some(TF_FORMAT_SET) {
                    Ok(ElementType::Set(element))
                } else {
                    Ok(ElementType::List(element))
                }
            }
            OAS_TYPE_OBJECT => {
                if self.is_map() {
                    let value_schema = self.schema.additional_properties.as_ref().ok_or(
                        SchemaError::MissingAdditionalProperties {
                            path: SchemaPath::root(),
                        },
                    )?;
                    let element = self.build_child(value_schema)?.build_element_type()?;
                    Ok(ElementType::Map(Box::new(element)))
                } else {
                    let mut fields = Vec::new();
                    for (prop_name, node) in &self.schema.properties {
                        let child = self.build_child(node).map_err(|e| e.nest(prop_name))?;
                        let field_type =
                            child.build_element_type().map_err(|e| e.nest(prop_name))?;
                        fields.push(ObjectField {
                            name: to_snake_case(prop_name),
                            field_type,
                        });
                    }
                    Ok(ElementType::Object(fields))
                }
            }
            other => Err(SchemaError::invalid_type(other)),
        }
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

    fn element_of(value: serde_json::Value) -> Result<ElementType, SchemaError> {
        let document = doc();
        let node: SchemaOrRef = serde_json::from_value(value).unwrap();
        build_schema(
            &document,
            &node,
            SchemaOpts::default(),
            GlobalSchemaOpts::default(),
        )?
        .build_element_type()
    }

    #[test]
    fn integer_element_requires_explicit_format() {
        let err = element_of(json!({ "type": "integer" })).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidFormat { .. }));

        assert_eq!(
            element_of(json!({ "type": "integer", "format": "int32" })).unwrap(),
            ElementType::Int32
        );
        assert_eq!(
            element_of(json!({ "type": "integer", "format": "int64" })).unwrap(),
            ElementType::Int64
        );
    }

    #[test]
    fn unknown_type_fails_with_path() {
        let err = element_of(json!({
            "type": "object",
            "properties": {
                "weird": { "type": "custom" }
            }
        }))
        .unwrap_err();

        assert_eq!(err.to_string(), "invalid schema type 'custom' at 'weird'");
    }

    #[test]
    fn object_element_snake_cases_field_names() {
        let element = element_of(json!({
            "type": "object",
            "properties": {
                "stageId": { "type": "string" },
                "isPublished": { "type": "boolean" }
            }
        }))
        .unwrap();

        let ElementType::Object(fields) = element else {
            panic!("expected object element type");
        };
        assert_eq!(fields[0].name, "stage_id");
        assert_eq!(fields[1].name, "is_published");
    }
}
