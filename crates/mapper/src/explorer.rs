//! Operation lookup: resolves configured CRUD bindings against the document
//!
//! Each resource/data source names its operations by method + path in the
//! generator config. The explorer finds those operations in the document
//! and hands owned copies to the mappers. A binding that doesn't resolve
//! logs a warning and stays `None`; the mappers decide whether that is
//! fatal for the unit.

use std::collections::BTreeMap;

use tracing::warn;

use tf_openapi_generator_common::config::{Config, OperationConfig, SchemaOptions};

use crate::openapi::{Document, Operation, Parameter};

/// One resource's resolved operations plus its schema options.
#[derive(Debug, Clone, Default)]
pub struct Resource {
    pub create_op: Option<Operation>,
    pub read_op: Option<Operation>,
    /// One entry per configured update operation; `None` when the binding
    /// did not resolve.
    pub update_ops: Vec<Option<Operation>>,
    pub delete_op: Option<Operation>,
    pub schema_options: SchemaOptions,
}

impl Resource {
    pub fn read_op_parameters(&self) -> &[Parameter] {
        self.read_op
            .as_ref()
            .map(|op| op.parameters.as_slice())
            .unwrap_or(&[])
    }
}

/// One data source's resolved read operation plus its schema options.
#[derive(Debug, Clone, Default)]
pub struct DataSource {
    pub read_op: Option<Operation>,
    pub schema_options: SchemaOptions,
}

impl DataSource {
    pub fn read_op_parameters(&self) -> &[Parameter] {
        self.read_op
            .as_ref()
            .map(|op| op.parameters.as_slice())
            .unwrap_or(&[])
    }
}

/// Resolve every configured resource and data source against the document.
pub fn explore(
    doc: &Document,
    config: &Config,
) -> (BTreeMap<String, Resource>, BTreeMap<String, DataSource>) {
    let mut resources = BTreeMap::new();
    for (name, resource_config) in &config.resources {
        let resource = Resource {
            create_op: find_operation(doc, name, &resource_config.create),
            read_op: find_operation(doc, name, &resource_config.read),
            update_ops: resource_config
                .update
                .iter()
                .map(|op_config| find_operation(doc, name, op_config))
                .collect(),
            delete_op: resource_config
                .delete
                .as_ref()
                .and_then(|op_config| find_operation(doc, name, op_config)),
            schema_options: resource_config.schema.clone(),
        };
        resources.insert(name.clone(), resource);
    }

    let mut data_sources = BTreeMap::new();
    for (name, data_source_config) in &config.data_sources {
        let data_source = DataSource {
            read_op: find_operation(doc, name, &data_source_config.read),
            schema_options: data_source_config.schema.clone(),
        };
        data_sources.insert(name.clone(), data_source);
    }

    (resources, data_sources)
}

fn find_operation(doc: &Document, name: &str, op_config: &OperationConfig) -> Option<Operation> {
    let Some(path_item) = doc.paths.get(&op_config.path) else {
        warn!(
            name,
            path = %op_config.path,
            "configured path not found in document"
        );
        return None;
    };

    match path_item.operation(&op_config.method) {
        Some(op) => Some(op.clone()),
        None => {
            warn!(
                name,
                method = %op_config.method,
                path = %op_config.path,
                "configured operation not found on path"
            );
            None
        }
    }
}
