//! Generator configuration loading from YAML files
//!
//! The config maps resource and data source names to their CRUD operations
//! (method + path) and carries per-name schema options: ignored properties,
//! attribute aliases, and attribute overrides. Name maps are `BTreeMap`s so
//! every mapping run processes entries in the same lexicographic order.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::spec::schema::Computability;
use crate::{GeneratorError, Result};

/// Root generator configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Provider block: name and optional schema reference.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Managed resources keyed by generated resource name.
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceConfig>,
    /// Data sources keyed by generated data source name.
    #[serde(default)]
    pub data_sources: BTreeMap<String, DataSourceConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub name: String,
}

/// CRUD operation bindings and hints for one resource.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ResourceConfig {
    pub create: OperationConfig,
    pub read: OperationConfig,
    #[serde(default)]
    pub update: Vec<OperationConfig>,
    #[serde(default)]
    pub delete: Option<OperationConfig>,
    /// Attribute used as the resource id.
    #[serde(default)]
    pub id: String,
    /// Schema name used to refresh state from a read response. Inferred
    /// from the read operation's 200 response when unset.
    #[serde(default)]
    pub refresh_object_name: String,
    #[serde(default)]
    pub import_state_override: String,
    #[serde(default)]
    pub schema: SchemaOptions,
}

/// Read operation binding and hints for one data source.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DataSourceConfig {
    pub read: OperationConfig,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub refresh_object_name: String,
    #[serde(default)]
    pub import_state_override: String,
    #[serde(default)]
    pub schema: SchemaOptions,
}

/// One HTTP operation: method plus path template.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OperationConfig {
    pub method: String,
    pub path: String,
}

/// Per-name schema build options.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SchemaOptions {
    /// Attribute names dropped from the generated schema.
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub attributes: AttributeOptions,
}

impl SchemaOptions {
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignores.iter().any(|n| n == name)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AttributeOptions {
    /// Parameter name -> attribute name the parameter is routed under.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Attribute name -> override patch.
    #[serde(default)]
    pub overrides: BTreeMap<String, AttributeOverride>,
}

/// Hand-authored patch applied to a mapped attribute. Unmatched overrides
/// are a no-op; the config may reference attributes the upstream API no
/// longer exposes.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AttributeOverride {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub computed_optional_required: Option<Computability>,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            GeneratorError::Config(format!("Failed to parse config YAML from {:?}: {}", path, e))
        })
    }
}
