//! Schema model: classification of OpenAPI schema nodes and attribute
//! construction
//!
//! [`OasSchema`] wraps one resolved schema node plus its resolution options
//! and exposes type predicates and per-kind attribute/element-type builders.
//! References are resolved eagerly; no lazy reference objects flow into the
//! attribute model. Builders never log and never swallow: every failure is
//! returned as a [`SchemaError`] for the mapper layer to handle.

mod array;
mod boolean;
mod element_type;
pub mod error;
mod integer;
mod map;
mod number;
mod object;
mod string;

pub use error::{SchemaError, SchemaPath};

use tf_openapi_generator_common::spec::datasource;
use tf_openapi_generator_common::spec::provider;
use tf_openapi_generator_common::spec::resource;
use tf_openapi_generator_common::spec::schema::{Computability, OptionalRequired};

use crate::openapi::{Document, Operation, Schema, SchemaOrRef};
use crate::util::{
    is_json_media_type, to_snake_case, OAS_FORMAT_INT32, OAS_RESPONSE_CODE_CREATED,
    OAS_RESPONSE_CODE_OK, OAS_TYPE_ARRAY, OAS_TYPE_BOOLEAN, OAS_TYPE_INTEGER, OAS_TYPE_NUMBER,
    OAS_TYPE_OBJECT, OAS_TYPE_STRING,
};

/// Per-call schema build options.
#[derive(Debug, Clone, Default)]
pub struct SchemaOpts {
    /// Attribute names dropped during property walks.
    pub ignores: Vec<String>,
    /// Replaces the node's own description (used for parameters, whose
    /// description lives on the parameter rather than its schema).
    pub override_description: Option<String>,
}

/// Options applied to a node and every node built beneath it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalSchemaOpts {
    /// Forces the computability of every built attribute, e.g. `Computed`
    /// for response-derived attributes.
    pub override_computability: Option<Computability>,
}

/// One OpenAPI schema node, resolved and classified.
#[derive(Debug, Clone)]
pub struct OasSchema<'d> {
    doc: &'d Document,
    pub schema: &'d Schema,
    /// The node's single primitive type.
    pub schema_type: String,
    /// Format, when declared. The data source mapper overwrites this with
    /// `set` to route a collection response to a set attribute.
    pub format: Option<String>,
    pub opts: SchemaOpts,
    pub global_opts: GlobalSchemaOpts,
}

fn resolve<'d>(doc: &'d Document, node: &'d SchemaOrRef) -> Result<&'d Schema, SchemaError> {
    match node {
        SchemaOrRef::Schema(schema) => Ok(schema),
        SchemaOrRef::Reference { ref_path } => {
            doc.resolve_schema_ref(ref_path)
                .ok_or_else(|| SchemaError::UnresolvableRef {
                    reference: ref_path.clone(),
                    path: SchemaPath::root(),
                })
        }
    }
}

/// Build a schema model from a schema node, resolving references first.
pub fn build_schema<'d>(
    doc: &'d Document,
    node: &'d SchemaOrRef,
    opts: SchemaOpts,
    global_opts: GlobalSchemaOpts,
) -> Result<OasSchema<'d>, SchemaError> {
    let schema = resolve(doc, node)?;
    from_schema(doc, schema, opts, global_opts)
}

fn from_schema<'d>(
    doc: &'d Document,
    schema: &'d Schema,
    opts: SchemaOpts,
    global_opts: GlobalSchemaOpts,
) -> Result<OasSchema<'d>, SchemaError> {
    let schema_type = schema
        .schema_type
        .clone()
        .ok_or(SchemaError::MissingType {
            path: SchemaPath::root(),
        })?;

    Ok(OasSchema {
        doc,
        schema,
        schema_type,
        format: schema.format.clone(),
        opts,
        global_opts,
    })
}

/// Build a schema model from an operation's JSON request body.
///
/// Absence of the operation, body, JSON media type, or schema is the
/// [`SchemaError::NotFound`] sentinel.
pub fn build_schema_from_request<'d>(
    doc: &'d Document,
    op: Option<&'d Operation>,
    opts: SchemaOpts,
    global_opts: GlobalSchemaOpts,
) -> Result<OasSchema<'d>, SchemaError> {
    let op = op.ok_or(SchemaError::NotFound)?;
    let body = op.request_body.as_ref().ok_or(SchemaError::NotFound)?;

    let media = body
        .content
        .iter()
        .find(|(content_type, _)| is_json_media_type(content_type))
        .map(|(_, media)| media)
        .ok_or(SchemaError::NotFound)?;

    let node = media.schema.as_ref().ok_or(SchemaError::NotFound)?;
    build_schema(doc, node, opts, global_opts)
}

/// Build a schema model from an operation's 200/201 JSON response body.
pub fn build_schema_from_response<'d>(
    doc: &'d Document,
    op: Option<&'d Operation>,
    opts: SchemaOpts,
    global_opts: GlobalSchemaOpts,
) -> Result<OasSchema<'d>, SchemaError> {
    let op = op.ok_or(SchemaError::NotFound)?;

    for code in [OAS_RESPONSE_CODE_OK, OAS_RESPONSE_CODE_CREATED] {
        let Some(response) = op.responses.get(code) else {
            continue;
        };
        let Some(media) = response
            .content
            .iter()
            .find(|(content_type, _)| is_json_media_type(content_type))
            .map(|(_, media)| media)
        else {
            continue;
        };
        if let Some(node) = media.schema.as_ref() {
            return build_schema(doc, node, opts, global_opts);
        }
    }

    Err(SchemaError::NotFound)
}

impl<'d> OasSchema<'d> {
    /// Build a child node under the same resolution options. Parameter
    /// description overrides do not propagate downward.
    pub(crate) fn build_child(&self, node: &'d SchemaOrRef) -> Result<OasSchema<'d>, SchemaError> {
        build_schema(
            self.doc,
            node,
            SchemaOpts {
                ignores: self.opts.ignores.clone(),
                override_description: None,
            },
            self.global_opts,
        )
    }

    pub fn get_description(&self) -> Option<String> {
        self.opts
            .override_description
            .clone()
            .or_else(|| self.schema.description.clone())
    }

    pub fn get_deprecation_message(&self) -> Option<String> {
        if self.schema.deprecated {
            Some("Deprecated".to_string())
        } else {
            None
        }
    }

    /// Map-shaped object: `additionalProperties` with no fixed property set.
    pub fn is_map(&self) -> bool {
        self.schema_type == OAS_TYPE_OBJECT
            && self.schema.additional_properties.is_some()
            && self.schema.properties.is_empty()
    }

    pub fn is_property_ignored(&self, name: &str) -> bool {
        self.opts.ignores.iter().any(|ignored| ignored == name)
    }

    fn is_required(&self, prop_name: &str) -> bool {
        self.schema.required.iter().any(|r| r == prop_name)
    }

    fn property_computability(&self, prop_name: &str) -> Computability {
        if let Some(computability) = self.global_opts.override_computability {
            return computability;
        }
        if self.is_required(prop_name) {
            Computability::Required
        } else {
            Computability::ComputedOptional
        }
    }

    fn property_optional_required(&self, prop_name: &str) -> OptionalRequired {
        if self.is_required(prop_name) {
            OptionalRequired::Required
        } else {
            OptionalRequired::Optional
        }
    }

    /// Walk an object node's properties into resource attributes.
    ///
    /// Property names are snake_cased; ignored names are skipped. Insertion
    /// order of the document is preserved.
    pub fn build_resource_attributes(&self) -> Result<Vec<resource::Attribute>, SchemaError> {
        if self.schema_type != OAS_TYPE_OBJECT {
            return Err(SchemaError::invalid_type(&self.schema_type));
        }

        let mut attributes = Vec::new();
        for (prop_name, node) in &self.schema.properties {
            let attr_name = to_snake_case(prop_name);
            if self.is_property_ignored(&attr_name) {
                continue;
            }

            let child = self.build_child(node).map_err(|e| e.nest(prop_name))?;
            let attribute = child
                .build_resource_attribute(&attr_name, self.property_computability(prop_name))
                .map_err(|e| e.nest(prop_name))?;
            attributes.push(attribute);
        }

        Ok(attributes)
    }

    pub fn build_datasource_attributes(&self) -> Result<Vec<datasource::Attribute>, SchemaError> {
        if self.schema_type != OAS_TYPE_OBJECT {
            return Err(SchemaError::invalid_type(&self.schema_type));
        }

        let mut attributes = Vec::new();
        for (prop_name, node) in &self.schema.properties {
            let attr_name = to_snake_case(prop_name);
            if self.is_property_ignored(&attr_name) {
                continue;
            }

            let child = self.build_child(node).map_err(|e| e.nest(prop_name))?;
            let attribute = child
                .build_datasource_attribute(&attr_name, self.property_computability(prop_name))
                .map_err(|e| e.nest(prop_name))?;
            attributes.push(attribute);
        }

        Ok(attributes)
    }

    pub fn build_provider_attributes(&self) -> Result<Vec<provider::Attribute>, SchemaError> {
        if self.schema_type != OAS_TYPE_OBJECT {
            return Err(SchemaError::invalid_type(&self.schema_type));
        }

        let mut attributes = Vec::new();
        for (prop_name, node) in &self.schema.properties {
            let attr_name = to_snake_case(prop_name);
            if self.is_property_ignored(&attr_name) {
                continue;
            }

            let child = self.build_child(node).map_err(|e| e.nest(prop_name))?;
            let attribute = child
                .build_provider_attribute(&attr_name, self.property_optional_required(prop_name))
                .map_err(|e| e.nest(prop_name))?;
            attributes.push(attribute);
        }

        Ok(attributes)
    }

    /// Build one resource attribute from this node, dispatching on
    /// `(type, format)`.
    pub fn build_resource_attribute(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<resource::Attribute, SchemaError> {
        match self.schema_type.as_str() {
            OAS_TYPE_STRING => self.build_string_resource(name, computability),
            OAS_TYPE_INTEGER => {
                if self.format.as_deref() == Some(OAS_FORMAT_INT32) {
                    self.build_int32_resource(name, computability)
                } else {
                    self.build_int64_resource(name, computability)
                }
            }
            OAS_TYPE_NUMBER => self.build_number_resource(name, computability),
            OAS_TYPE_BOOLEAN => self.build_bool_resource(name, computability),
            OAS_TYPE_ARRAY => self.build_array_resource(name, computability),
            OAS_TYPE_OBJECT => {
                if self.is_map() {
                    self.build_map_resource(name, computability)
                } else {
                    self.build_object_resource(name, computability)
                }
            }
            other => Err(SchemaError::invalid_type(other)),
        }
    }

    pub fn build_datasource_attribute(
        &self,
        name: &str,
        computability: Computability,
    ) -> Result<datasource::Attribute, SchemaError> {
        match self.schema_type.as_str() {
            OAS_TYPE_STRING => self.build_string_datasource(name, computability),
            OAS_TYPE_INTEGER => {
                if self.format.as_deref() == Some(OAS_FORMAT_INT32) {
                    self.build_int32_datasource(name, computability)
                } else {
                    self.build_int64_datasource(name, computability)
                }
            }
            OAS_TYPE_NUMBER => self.build_number_datasource(name, computability),
            OAS_TYPE_BOOLEAN => self.build_bool_datasource(name, computability),
            OAS_TYPE_ARRAY => self.build_array_datasource(name, computability),
            OAS_TYPE_OBJECT => {
                if self.is_map() {
                    self.build_map_datasource(name, computability)
                } else {
                    self.build_object_datasource(name, computability)
                }
            }
            other => Err(SchemaError::invalid_type(other)),
        }
    }

    pub fn build_provider_attribute(
        &self,
        name: &str,
        optional_required: OptionalRequired,
    ) -> Result<provider::Attribute, SchemaError> {
        match self.schema_type.as_str() {
            OAS_TYPE_STRING => self.build_string_provider(name, optional_required),
            OAS_TYPE_INTEGER => {
                if self.format.as_deref() == Some(OAS_FORMAT_INT32) {
                    self.build_int32_provider(name, optional_required)
                } else {
                    self.build_int64_provider(name, optional_required)
                }
            }
            OAS_TYPE_NUMBER => self.build_number_provider(name, optional_required),
            OAS_TYPE_BOOLEAN => self.build_bool_provider(name, optional_required),
            OAS_TYPE_ARRAY => self.build_array_provider(name, optional_required),
            OAS_TYPE_OBJECT => {
                if self.is_map() {
                    self.build_map_provider(name, optional_required)
                } else {
                    self.build_object_provider(name, optional_required)
                }
            }
            other => Err(SchemaError::invalid_type(other)),
        }
    }
}
