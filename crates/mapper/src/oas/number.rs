//! Number attribute builders

use tf_openapi_generator_common::spec::datasource;
use tf_openapi_generator_common::spec::provider;
use tf_openapi_generator_common::spec::resource;
use tf_openapi_generator_common::spec::schema::{
    Computability, NumberDefault, NumberValidator, OptionalRequired,
};

use super::{OasSchema, SchemaError};

impl<'d> OasSchema<'d> {
    pub fn build_number_resource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<resource::Attribute, SchemaError> {
        let mut result = resource::NumberAttribute {
            computed_optional_required: computability,
            default: None,
            deprecation_message: self.get_deprecation_message(),
            description: self.get_description(),
            validators: Vec::new(),
        };

        if let Some(value) = self.schema.default.as_ref().and_then(|v| v.as_f64()) {
            // A server-side default means the field cannot be user-required.
            if computability == Computability::Required {
                result.computed_optional_required = Computability::ComputedOptional;
            }
            result.default = Some(NumberDefault { static_: value });
        }

        if computability.is_user_suppliable() {
            result.validators = self.get_number_validators();
        }

        Ok(resource::Attribute {
            name: name.to_string(),
            kind: resource::AttributeKind::Number(result),
        })
    }

    pub fn build_number_datasource(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<datasource::Attribute, SchemaError> {
        let mut result = datasource::NumberAttribute {
            computed_optional_required: computability,
            deprecation_message: self.get_deprecation_message(),
            description: self.get_description(),
            validators: Vec::new(),
        };

        if computability.is_user_suppliable() {
            result.validators = self.get_number_validators();
        }

        Ok(datasource::Attribute {
            name: name.to_string(),
            kind: datasource::AttributeKind::Number(result),
        })
    }

    pub fn build_number_provider(
        &self,
        name: &str,
        optional_required: OptionalRequired,
    ) -> Result<provider::Attribute, SchemaError> {
        Ok(provider::Attribute {
            name: name.to_string(),
            kind: provider::AttributeKind::Number(provider::NumberAttribute {
                optional_required,
                deprecation_message: self.get_deprecation_message(),
                description: self.get_description(),
                validators: self.get_number_validators(),
            }),
        })
    }

    pub fn get_number_validators(&self) -> Vec<NumberValidator> {
        let mut result = Vec::new();

        if !self.schema.enum_values.is_empty() {
            let values: Vec<f64> = self
                .schema
                .enum_values
                .iter()
                .filter_map(|v| v.as_f64())
                .collect();

            if !values.is_empty() {
                result.push(NumberValidator::OneOf { values });
            }
        }

        match (self.schema.minimum, self.schema.maximum) {
            (Some(min), Some(max)) => result.push(NumberValidator::Between { min, max }),
            (Some(min), None) => result.push(NumberValidator::AtLeast { min }),
            (None, Some(max)) => result.push(NumberValidator::AtMost { max }),
            (None, None) => {}
        }

        result
    }
}
