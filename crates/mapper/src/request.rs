//! Request shape mapping
//!
//! Extracts the raw HTTP shape of each configured operation: parameter
//! summaries split by requiredness, a request-body summary with the schema
//! reference name, and the response type reference name. Extraction
//! failures log and leave the facet empty; request mapping never fails a
//! whole resource.

use std::collections::BTreeMap;

use tracing::{debug, info_span, warn};

use tf_openapi_generator_common::config::{
    Config, DataSourceConfig, OperationConfig, ResourceConfig,
};
use tf_openapi_generator_common::spec::request::{
    CommonRequestType, CrudParameters, Request, RequestBody, RequestParameterAttribute,
    RequestParameters,
};

use crate::explorer;
use crate::oas::{build_schema_from_request, build_schema_from_response, GlobalSchemaOpts, SchemaError, SchemaOpts};
use crate::openapi::{Document, Operation};
use crate::util::is_json_media_type;

pub struct ResourceRequestMapper<'a> {
    doc: &'a Document,
    resource: &'a explorer::Resource,
    config: &'a ResourceConfig,
}

impl<'a> ResourceRequestMapper<'a> {
    pub fn new(
        doc: &'a Document,
        resource: &'a explorer::Resource,
        config: &'a ResourceConfig,
    ) -> Self {
        ResourceRequestMapper {
            doc,
            resource,
            config,
        }
    }

    pub fn map_to_ir(&self) -> CrudParameters {
        debug!("searching for create operation parameters and request body");
        let create = common_request_type(
            self.doc,
            self.resource.create_op.as_ref(),
            Some(&self.config.create),
            &self.resource.schema_options.ignores,
        );

        debug!("searching for read operation parameters and request body");
        let read = common_request_type(
            self.doc,
            self.resource.read_op.as_ref(),
            Some(&self.config.read),
            &self.resource.schema_options.ignores,
        );

        debug!("searching for update operation parameters and request bodies");
        let update = self
            .resource
            .update_ops
            .iter()
            .zip(self.config.update.iter())
            .filter_map(|(op, op_config)| {
                op.as_ref().map(|op| {
                    common_request_type(
                        self.doc,
                        Some(op),
                        Some(op_config),
                        &self.resource.schema_options.ignores,
                    )
                })
            })
            .collect();

        debug!("searching for delete operation parameters and request body");
        let delete = self.config.delete.as_ref().map(|op_config| {
            common_request_type(
                self.doc,
                self.resource.delete_op.as_ref(),
                Some(op_config),
                &self.resource.schema_options.ignores,
            )
        });

        CrudParameters {
            create: Some(create),
            read: Some(read),
            update,
            delete,
        }
    }
}

pub struct DataSourceRequestMapper<'a> {
    doc: &'a Document,
    data_source: &'a explorer::DataSource,
    config: &'a DataSourceConfig,
}

impl<'a> DataSourceRequestMapper<'a> {
    pub fn new(
        doc: &'a Document,
        data_source: &'a explorer::DataSource,
        config: &'a DataSourceConfig,
    ) -> Self {
        DataSourceRequestMapper {
            doc,
            data_source,
            config,
        }
    }

    pub fn map_to_ir(&self) -> CrudParameters {
        debug!("searching for read operation parameters and request body");
        let read = common_request_type(
            self.doc,
            self.data_source.read_op.as_ref(),
            Some(&self.config.read),
            &self.data_source.schema_options.ignores,
        );

        CrudParameters {
            read: Some(read),
            ..CrudParameters::default()
        }
    }
}

/// Builds the `requests` entries of the top-level specification for every
/// configured resource and data source.
pub struct RequestMapper<'a> {
    doc: &'a Document,
    resources: &'a BTreeMap<String, explorer::Resource>,
    data_sources: &'a BTreeMap<String, explorer::DataSource>,
    config: &'a Config,
}

impl<'a> RequestMapper<'a> {
    pub fn new(
        doc: &'a Document,
        resources: &'a BTreeMap<String, explorer::Resource>,
        data_sources: &'a BTreeMap<String, explorer::DataSource>,
        config: &'a Config,
    ) -> Self {
        RequestMapper {
            doc,
            resources,
            data_sources,
            config,
        }
    }

    pub fn map_to_ir(&self) -> Vec<Request> {
        let mut requests = Vec::new();

        for (name, resource) in self.resources {
            let span = info_span!("request_mapping", request = %name);
            let _enter = span.enter();

            let Some(resource_config) = self.config.resources.get(name) else {
                continue;
            };
            let mapper = ResourceRequestMapper::new(self.doc, resource, resource_config);
            requests.push(Request {
                operations: mapper.map_to_ir(),
                name: name.clone(),
            });
        }

        for (name, data_source) in self.data_sources {
            let span = info_span!("request_mapping", request = %name);
            let _enter = span.enter();

            let Some(data_source_config) = self.config.data_sources.get(name) else {
                continue;
            };
            let mapper = DataSourceRequestMapper::new(self.doc, data_source, data_source_config);
            requests.push(Request {
                operations: mapper.map_to_ir(),
                name: name.clone(),
            });
        }

        requests
    }
}

fn common_request_type(
    doc: &Document,
    op: Option<&Operation>,
    op_config: Option<&OperationConfig>,
    ignores: &[String],
) -> CommonRequestType {
    let schema_opts = SchemaOpts {
        ignores: ignores.to_vec(),
        override_description: None,
    };

    let request_body = match extract_request_body(doc, op, schema_opts.clone()) {
        Ok(body) => body,
        Err(err) => {
            warn!(error = %err, "skipping mapping of operation request body");
            None
        }
    };

    let response = match extract_response(doc, op, schema_opts) {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "skipping mapping of operation response");
            String::new()
        }
    };

    CommonRequestType {
        response,
        parameters: extract_parameters_info(doc, op),
        request_body,
        method: op_config.map(|c| c.method.clone()).unwrap_or_default(),
        path: op_config.map(|c| c.path.clone()).unwrap_or_default(),
    }
}

fn extract_parameters_info(doc: &Document, op: Option<&Operation>) -> Option<RequestParameters> {
    let op = op?;
    if op.parameters.is_empty() {
        return None;
    }

    let mut required = Vec::new();
    let mut optional = Vec::new();

    for param in &op.parameters {
        let (param_type, format) = param
            .schema
            .as_ref()
            .and_then(|node| match node {
                crate::openapi::SchemaOrRef::Schema(schema) => {
                    Some((schema.schema_type.clone(), schema.format.clone()))
                }
                crate::openapi::SchemaOrRef::Reference { ref_path } => doc
                    .resolve_schema_ref(ref_path)
                    .map(|schema| (schema.schema_type.clone(), schema.format.clone())),
            })
            .unwrap_or((None, None));

        let attribute = RequestParameterAttribute {
            name: param.name.clone(),
            param_type: param_type.unwrap_or_default(),
            format,
        };

        if param.required {
            required.push(attribute);
        } else {
            optional.push(attribute);
        }
    }

    Some(RequestParameters { required, optional })
}

fn extract_request_body(
    doc: &Document,
    op: Option<&Operation>,
    schema_opts: SchemaOpts,
) -> Result<Option<RequestBody>, SchemaError> {
    let request_schema =
        match build_schema_from_request(doc, op, schema_opts, GlobalSchemaOpts::default()) {
            Ok(schema) => schema,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err),
        };

    // Schema reference name of the JSON request body, when present.
    let name = op
        .and_then(|o| o.request_body.as_ref())
        .and_then(|body| {
            body.content
                .iter()
                .find(|(content_type, _)| is_json_media_type(content_type))
                .and_then(|(_, media)| media.schema.as_ref())
        })
        .and_then(|node| node.ref_name())
        .unwrap_or_default()
        .to_string();

    let mut required = Vec::new();
    let mut optional = Vec::new();

    // Body property summaries keep the wire-level property names.
    for (prop_name, node) in &request_schema.schema.properties {
        let (param_type, format) = match request_schema.build_child(node) {
            Ok(child) => (child.schema_type.clone(), child.format.clone()),
            Err(_) => (String::new(), None),
        };

        let attribute = RequestParameterAttribute {
            name: prop_name.clone(),
            param_type,
            format,
        };

        if request_schema.schema.required.iter().any(|r| r == prop_name) {
            required.push(attribute);
        } else {
            optional.push(attribute);
        }
    }

    Ok(Some(RequestBody {
        name,
        required,
        optional,
    }))
}

fn extract_response(
    doc: &Document,
    op: Option<&Operation>,
    schema_opts: SchemaOpts,
) -> Result<String, SchemaError> {
    match build_schema_from_response(doc, op, schema_opts, GlobalSchemaOpts::default()) {
        Ok(_) => {}
        Err(err) if err.is_not_found() => return Ok(String::new()),
        Err(err) => return Err(err),
    }

    // A successful build implies the operation exists.
    let Some(op) = op else {
        return Ok(String::new());
    };

    let mut codes: Vec<&String> = op.responses.keys().collect();
    codes.sort();

    for code in codes {
        let response = &op.responses[code];
        if let Some((_, media)) = response
            .content
            .iter()
            .find(|(content_type, _)| is_json_media_type(content_type))
        {
            if let Some(name) = media.schema.as_ref().and_then(|node| node.ref_name()) {
                return Ok(name.to_string());
            }
        }
    }

    Ok(String::new())
}
