//! Resource mapping: per-resource attribute tree assembly
//!
//! Stage sequence per resource: create request body (required), create
//! response (best-effort, Computed), read response (best-effort, Computed),
//! read path/query parameters (best-effort, ComputedOptional), update
//! request bodies (required when configured), merge, overrides. A required
//! stage failure skips that resource with a warning; the batch never
//! aborts.

use std::collections::BTreeMap;

use tracing::{debug, info_span, warn};

use tf_openapi_generator_common::config::Config;
use tf_openapi_generator_common::spec::resource as resource_spec;
use tf_openapi_generator_common::spec::schema::Computability;
use tf_openapi_generator_common::spec::ResourceWithRefreshObjectName;

use crate::attrmapper::{MergeConflict, ResourceAttributes};
use crate::explorer;
use crate::oas::{
    build_schema, build_schema_from_request, build_schema_from_response, GlobalSchemaOpts,
    SchemaError, SchemaOpts,
};
use crate::openapi::{Document, Operation};
use crate::util::{is_json_media_type, to_snake_case, OAS_PARAM_PATH, OAS_PARAM_QUERY, OAS_RESPONSE_CODE_OK};

pub struct ResourceMapper<'a> {
    doc: &'a Document,
    resources: &'a BTreeMap<String, explorer::Resource>,
    config: &'a Config,
}

impl<'a> ResourceMapper<'a> {
    pub fn new(
        doc: &'a Document,
        resources: &'a BTreeMap<String, explorer::Resource>,
        config: &'a Config,
    ) -> Self {
        ResourceMapper {
            doc,
            resources,
            config,
        }
    }

    /// Map every configured resource to an IR record, in name order.
    /// Failures are logged and skipped; this never returns fewer than the
    /// successfully mapped entries.
    pub fn map_to_ir(&self) -> Vec<ResourceWithRefreshObjectName> {
        let mut resource_schemas = Vec::new();

        for (name, explorer_resource) in self.resources {
            let span = info_span!("resource_mapping", resource = %name);
            let _enter = span.enter();

            let resource_config = self.config.resources.get(name).cloned().unwrap_or_default();

            let refresh_object_name = if !resource_config.refresh_object_name.is_empty() {
                resource_config.refresh_object_name.clone()
            } else {
                infer_refresh_object_name(explorer_resource.read_op.as_ref()).unwrap_or_else(|| {
                    warn!("couldn't find a 200 JSON response reference for the refresh object name");
                    String::new()
                })
            };

            let (schema, conflicts) = match generate_resource_schema(self.doc, explorer_resource) {
                Ok(result) => result,
                Err(err) => {
                    warn!(error = %err, "skipping resource schema mapping");
                    continue;
                }
            };

            for conflict in conflicts {
                warn!(conflict = %conflict, "attribute kind conflict across operations");
            }

            resource_schemas.push(ResourceWithRefreshObjectName {
                resource: resource_spec::Resource {
                    name: name.clone(),
                    schema,
                },
                refresh_object_name,
                import_state_override: resource_config.import_state_override.clone(),
                id: resource_config.id.clone(),
            });
        }

        resource_schemas
    }
}

/// Last path segment of the read operation's 200-response JSON schema
/// reference.
pub(crate) fn infer_refresh_object_name(read_op: Option<&Operation>) -> Option<String> {
    let op = read_op?;
    let response = op.responses.get(OAS_RESPONSE_CODE_OK)?;
    let media = response
        .content
        .iter()
        .find(|(content_type, _)| is_json_media_type(content_type))
        .map(|(_, media)| media)?;
    media.schema.as_ref()?.ref_name().map(str::to_string)
}

fn generate_resource_schema(
    doc: &Document,
    explorer_resource: &explorer::Resource,
) -> Result<(resource_spec::Schema, Vec<MergeConflict>), SchemaError> {
    let schema_opts = || SchemaOpts {
        ignores: explorer_resource.schema_options.ignores.clone(),
        override_description: None,
    };

    // Create request body (required)
    debug!("searching for create operation request body");
    let create_request_schema = build_schema_from_request(
        doc,
        explorer_resource.create_op.as_ref(),
        schema_opts(),
        GlobalSchemaOpts::default(),
    )?;
    let create_request_attributes =
        ResourceAttributes::new(create_request_schema.build_resource_attributes()?);

    // Create response body (optional)
    debug!("searching for create operation response body");
    let computed = GlobalSchemaOpts {
        override_computability: Some(Computability::Computed),
    };
    let create_response_attributes = build_response_attributes(
        doc,
        explorer_resource.create_op.as_ref(),
        schema_opts(),
        computed,
        "create",
    );

    // Read response body (optional)
    debug!("searching for read operation response body");
    let read_response_attributes = build_response_attributes(
        doc,
        explorer_resource.read_op.as_ref(),
        schema_opts(),
        computed,
        "read",
    );

    // Read parameters (optional)
    let mut read_parameter_attributes = Vec::new();
    for param in explorer_resource.read_op_parameters() {
        if param.location != OAS_PARAM_PATH && param.location != OAS_PARAM_QUERY {
            continue;
        }

        let Some(schema_node) = &param.schema else {
            warn!(param = %param.name, "read operation parameter carries no schema");
            continue;
        };

        let opts = SchemaOpts {
            ignores: explorer_resource.schema_options.ignores.clone(),
            override_description: param.description.clone(),
        };
        let global_opts = GlobalSchemaOpts {
            override_computability: Some(Computability::ComputedOptional),
        };

        let schema = match build_schema(doc, schema_node, opts, global_opts) {
            Ok(schema) => schema,
            Err(err) => {
                warn!(param = %param.name, error = %err, "skipping mapping of read operation parameter");
                continue;
            }
        };

        // Route the parameter under its configured alias, if any.
        let param_name = explorer_resource
            .schema_options
            .attributes
            .aliases
            .get(&param.name)
            .cloned()
            .unwrap_or_else(|| param.name.clone());
        let attr_name = to_snake_case(&param_name);

        if schema.is_property_ignored(&attr_name) {
            continue;
        }

        match schema.build_resource_attribute(&attr_name, Computability::ComputedOptional) {
            Ok(attribute) => read_parameter_attributes.push(attribute),
            Err(err) => {
                warn!(param = %param.name, error = %err, "skipping mapping of read operation parameter");
            }
        }
    }

    // Update request bodies (required when configured)
    debug!("searching for update operation request bodies");
    let mut update_attribute_sets = Vec::new();
    for update_op in explorer_resource.update_ops.iter().flatten() {
        let update_request_schema = build_schema_from_request(
            doc,
            Some(update_op),
            schema_opts(),
            GlobalSchemaOpts::default(),
        )?;
        update_attribute_sets
            .push(ResourceAttributes::new(update_request_schema.build_resource_attributes()?));
    }

    let mut sources = vec![
        create_response_attributes,
        read_response_attributes,
        ResourceAttributes::new(read_parameter_attributes),
    ];
    sources.extend(update_attribute_sets);

    let (merged, conflicts) = create_request_attributes.merge(sources);
    let attributes = merged.apply_overrides(&explorer_resource.schema_options.attributes.overrides);

    Ok((
        resource_spec::Schema {
            attributes: attributes.to_spec(),
        },
        conflicts,
    ))
}

fn build_response_attributes(
    doc: &Document,
    op: Option<&Operation>,
    opts: SchemaOpts,
    global_opts: GlobalSchemaOpts,
    phase: &str,
) -> ResourceAttributes {
    match build_schema_from_response(doc, op, opts, global_opts) {
        Ok(schema) => match schema.build_resource_attributes() {
            Ok(attributes) => ResourceAttributes::new(attributes),
            Err(err) => {
                warn!(phase, error = %err, "skipping mapping of operation response body");
                ResourceAttributes::default()
            }
        },
        Err(err) if err.is_not_found() => {
            debug!(phase, "no response body schema found");
            ResourceAttributes::default()
        }
        Err(err) => {
            warn!(phase, error = %err, "skipping mapping of operation response body");
            ResourceAttributes::default()
        }
    }
}
