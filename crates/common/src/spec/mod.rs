//! Provider specification (IR) data model
//!
//! The serializable hand-off artifact produced by the mapping stage and
//! consumed by downstream Terraform-provider code generation. Field
//! presence follows an omit-empty contract: empty collections and strings
//! are left out of the JSON.

pub mod datasource;
pub mod provider;
pub mod request;
pub mod resource;
pub mod schema;

use serde::{Deserialize, Serialize};

/// Provider Code Specification JSON schema version emitted by this tool.
pub const VERSION: &str = "0.1";

/// A resource entry plus its state-refresh metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceWithRefreshObjectName {
    #[serde(flatten)]
    pub resource: resource::Resource,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub refresh_object_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub import_state_override: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
}

/// A data source entry plus its request and state-refresh metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailDataSourceInfo {
    #[serde(flatten)]
    pub data_source: datasource::DataSource,
    pub crud_parameters: request::CrudParameters,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub refresh_object_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub import_state_override: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
}

/// Top-level specification: the data sources, provider, resources, and
/// request shapes for a generated Terraform provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Specification {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub datasources: Vec<DetailDataSourceInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<provider::Provider>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceWithRefreshObjectName>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requests: Vec<request::Request>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_specification_serializes_to_empty_object() {
        let spec = Specification::default();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
