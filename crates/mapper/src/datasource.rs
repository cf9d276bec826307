//! Data source mapping
//!
//! The read response is the required stage here. A top-level array response
//! maps to a single set attribute named after the data source: REST
//! collection endpoints don't guarantee response ordering, and
//! round-tripping an ordered list through state would produce spurious
//! diffs.

use std::collections::BTreeMap;

use tracing::{debug, info_span, warn};

use tf_openapi_generator_common::config::Config;
use tf_openapi_generator_common::spec::datasource as datasource_spec;
use tf_openapi_generator_common::spec::schema::Computability;
use tf_openapi_generator_common::spec::DetailDataSourceInfo;

use crate::attrmapper::{DataSourceAttributes, MergeConflict};
use crate::explorer;
use crate::oas::{
    build_schema, build_schema_from_response, GlobalSchemaOpts, SchemaError, SchemaOpts,
};
use crate::openapi::Document;
use crate::request::DataSourceRequestMapper;
use crate::resource::infer_refresh_object_name;
use crate::util::{
    to_snake_case, OAS_PARAM_PATH, OAS_PARAM_QUERY, OAS_TYPE_ARRAY, TF_FORMAT_SET,
};

pub struct DataSourceMapper<'a> {
    doc: &'a Document,
    data_sources: &'a BTreeMap<String, explorer::DataSource>,
    config: &'a Config,
}

impl<'a> DataSourceMapper<'a> {
    pub fn new(
        doc: &'a Document,
        data_sources: &'a BTreeMap<String, explorer::DataSource>,
        config: &'a Config,
    ) -> Self {
        DataSourceMapper {
            doc,
            data_sources,
            config,
        }
    }

    /// Map every configured data source to an IR record, in name order.
    pub fn map_to_ir(&self) -> Vec<DetailDataSourceInfo> {
        let mut data_source_schemas = Vec::new();

        for (name, explorer_data_source) in self.data_sources {
            let span = info_span!("data_source_mapping", data_source = %name);
            let _enter = span.enter();

            let data_source_config = self
                .config
                .data_sources
                .get(name)
                .cloned()
                .unwrap_or_default();

            let request_mapper =
                DataSourceRequestMapper::new(self.doc, explorer_data_source, &data_source_config);
            let crud_parameters = request_mapper.map_to_ir();

            let refresh_object_name = if !data_source_config.refresh_object_name.is_empty() {
                data_source_config.refresh_object_name.clone()
            } else {
                infer_refresh_object_name(explorer_data_source.read_op.as_ref()).unwrap_or_else(
                    || {
                        warn!("couldn't find a 200 JSON response reference for the refresh object name");
                        String::new()
                    },
                )
            };

            let (schema, conflicts) =
                match generate_datasource_schema(self.doc, name, explorer_data_source) {
                    Ok(result) => result,
                    Err(err) => {
                        warn!(error = %err, "skipping data source schema mapping");
                        continue;
                    }
                };

            for conflict in conflicts {
                warn!(conflict = %conflict, "attribute kind conflict across operations");
            }

            data_source_schemas.push(DetailDataSourceInfo {
                data_source: datasource_spec::DataSource {
                    name: name.clone(),
                    schema,
                },
                crud_parameters,
                refresh_object_name,
                import_state_override: data_source_config.import_state_override.clone(),
                id: data_source_config.id.clone(),
            });
        }

        data_source_schemas
    }
}

fn generate_datasource_schema(
    doc: &Document,
    name: &str,
    explorer_data_source: &explorer::DataSource,
) -> Result<(datasource_spec::Schema, Vec<MergeConflict>), SchemaError> {
    // Read response body (required)
    debug!("searching for read operation response body");
    let mut read_response_schema = build_schema_from_response(
        doc,
        explorer_data_source.read_op.as_ref(),
        SchemaOpts {
            ignores: explorer_data_source.schema_options.ignores.clone(),
            override_description: None,
        },
        GlobalSchemaOpts {
            override_computability: Some(Computability::Computed),
        },
    )?;

    let read_response_attributes = if read_response_schema.schema_type == OAS_TYPE_ARRAY {
        debug!("response body is an array, building '{name}' set attribute");

        // Collection responses carry no ordering guarantee; map to a set.
        read_response_schema.format = Some(TF_FORMAT_SET.to_string());
        let collection_attribute =
            read_response_schema.build_datasource_attribute(name, Computability::Computed)?;
        DataSourceAttributes::new(vec![collection_attribute])
    } else {
        DataSourceAttributes::new(read_response_schema.build_datasource_attributes()?)
    };

    // Read parameters (optional)
    let mut read_parameter_attributes = Vec::new();
    for param in explorer_data_source.read_op_parameters() {
        if param.location != OAS_PARAM_PATH && param.location != OAS_PARAM_QUERY {
            continue;
        }

        let Some(schema_node) = &param.schema else {
            warn!(param = %param.name, "read operation parameter carries no schema");
            continue;
        };

        let opts = SchemaOpts {
            ignores: explorer_data_source.schema_options.ignores.clone(),
            override_description: param.description.clone(),
        };

        let schema = match build_schema(doc, schema_node, opts, GlobalSchemaOpts::default()) {
            Ok(schema) => schema,
            Err(err) => {
                warn!(param = %param.name, error = %err, "skipping mapping of read operation parameter");
                continue;
            }
        };

        // A parameter is only plain Required when the operation says so.
        let computability = if param.required {
            Computability::Required
        } else {
            Computability::ComputedOptional
        };

        let param_name = explorer_data_source
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

        match schema.build_datasource_attribute(&attr_name, computability) {
            Ok(attribute) => read_parameter_attributes.push(attribute),
            Err(err) => {
                warn!(param = %param.name, error = %err, "skipping mapping of read operation parameter");
            }
        }
    }

    // Parameters first: they establish the authoritative shape.
    let (merged, conflicts) =
        DataSourceAttributes::new(read_parameter_attributes).merge(vec![read_response_attributes]);
    let attributes =
        merged.apply_overrides(&explorer_data_source.schema_options.attributes.overrides);

    Ok((
        datasource_spec::Schema {
            attributes: attributes.to_spec(),
        },
        conflicts,
    ))
}
