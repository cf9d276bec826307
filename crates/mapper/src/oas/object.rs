//! Nested object attribute builders

use tf_openapi_generator_common::spec::datasource;
use tf_openapi_generator_common::spec::provider;
use tf_openapi_generator_common::spec::resource;
use tf_openapi_generator_common::spec::schema::{Computability, OptionalRequired};

use super::{OasSchema, SchemaError};

impl<'d> OasSchema<'d> {
    pub fn build_object_resource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<resource::Attribute, SchemaError> {
        Ok(resource::Attribute {
            name: name.to_string(),
            kind: resource::AttributeKind::SingleNested(resource::SingleNestedAttribute {
                attributes: self.build_resource_attributes()?,
                computed_optional_required: computability,
                deprecation_message: self.get_deprecation_message(),
                description: self.get_description(),
            }),
        })
    }

    pub fn build_object_datasource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<datasource::Attribute, SchemaError> {
        Ok(datasource::Attribute {
            name: name.to_string(),
            kind: datasource::AttributeKind::SingleNested(datasource::SingleNestedAttribute {
                attributes: self.build_datasource_attributes()?,
                computed_optional_required: computability,
                deprecation_message: self.get_deprecation_message(),
                description: self.get_description(),
            }),
        })
    }

    pub fn build_object_provider(
        &self,
        name: &str,
        optional_required: OptionalRequired,
    ) -> Result<provider::Attribute, SchemaError> {
        Ok(provider::Attribute {
            name: name.to_string(),
            kind: provider::AttributeKind::SingleNested(provider::SingleNestedAttribute {
                attributes: self.build_provider_attributes()?,
                optional_required,
                deprecation_message: self.get_deprecation_message(),
                description: self.get_description(),
            }),
        })
    }
}
