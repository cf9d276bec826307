//! Bool attribute builders

use tf_openapi_generator_common::spec::datasource;
use tf_openapi_generator_common::spec::provider;
use tf_openapi_generator_common::spec::resource;
use tf_openapi_generator_common::spec::schema::{BoolDefault, Computability, OptionalRequired};

use super::{OasSchema, SchemaError};

impl<'d> OasSchema<'d> {
    pub fn build_bool_resource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<resource::Attribute, SchemaError> {
        let mut result = resource::BoolAttribute {
            computed_optional_required: computability,
            default: None,
            deprecation_message: self.get_deprecation_message(),
            description: self.get_description(),
        };

        if let Some(value) = self.schema.default.as_ref().and_then(|v| v.as_bool()) {
            if computability == Computability::Required {
                result.computed_optional_required = Computability::ComputedOptional;
            }
            result.default = Some(BoolDefault { static_: value });
        }

        Ok(resource::Attribute {
            name: name.to_string(),
            kind: resource::AttributeKind::Bool(result),
        })
    }

    pub fn build_bool_datasource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<datasource::Attribute, SchemaError> {
        Ok(datasource::Attribute {
            name: name.to_string(),
            kind: datasource::AttributeKind::Bool(datasource::BoolAttribute {
                computed_optional_required: computability,
                deprecation_message: self.get_deprecation_message(),
                description: self.get_description(),
            }),
        })
    }

    pub fn build_bool_provider(
        &self,
        name: &str,
        optional_required: OptionalRequired,
    ) -> Result<provider::Attribute, SchemaError> {
        Ok(provider::Attribute {
            name: name.to_string(),
            kind: provider::AttributeKind::Bool(provider::BoolAttribute {
                optional_required,
                deprecation_message: self.get_deprecation_message(),
                description: self.get_description(),
            }),
        })
    }
}
