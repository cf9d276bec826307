//! OpenAPI 3.0 document model
//!
//! Simplified serde representation of the pieces the mapper consumes.
//! Property maps are `IndexMap`s: the document's insertion order flows all
//! the way through to generated output, which must be byte-identical across
//! runs on the same input.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// OpenAPI document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// OpenAPI version (e.g., "3.0.0")
    pub openapi: String,

    /// API metadata
    pub info: Info,

    /// API paths (endpoints)
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    /// Reusable components
    #[serde(default)]
    pub components: Option<Components>,
}

/// API information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Operations available on one path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<Operation>,
    #[serde(default)]
    pub post: Option<Operation>,
    #[serde(default)]
    pub put: Option<Operation>,
    #[serde(default)]
    pub patch: Option<Operation>,
    #[serde(default)]
    pub delete: Option<Operation>,

    /// Parameters shared by every operation on this path
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl PathItem {
    /// Look up an operation by HTTP method name (case-insensitive).
    pub fn operation(&self, method: &str) -> Option<&Operation> {
        match method.to_ascii_uppercase().as_str() {
            "GET" => self.get.as_ref(),
            "POST" => self.post.as_ref(),
            "PUT" => self.put.as_ref(),
            "PATCH" => self.patch.as_ref(),
            "DELETE" => self.delete.as_ref(),
            _ => None,
        }
    }
}

/// HTTP operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(rename = "requestBody", default)]
    pub request_body: Option<RequestBody>,

    /// Responses keyed by status code
    #[serde(default)]
    pub responses: IndexMap<String, Response>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Parameter definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    /// Location: query, header, path, cookie
    #[serde(rename = "in")]
    pub location: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub schema: Option<SchemaOrRef>,
}

/// Request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub description: Option<String>,

    pub content: IndexMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

/// Response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Media type entry under a content map
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<SchemaOrRef>,
}

/// Schema or reference
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    /// Reference to a component schema
    Reference {
        #[serde(rename = "$ref")]
        ref_path: String,
    },

    /// Inline schema
    Schema(Box<Schema>),
}

impl SchemaOrRef {
    /// The `$ref` path, if this node is a reference.
    pub fn ref_path(&self) -> Option<&str> {
        match self {
            SchemaOrRef::Reference { ref_path } => Some(ref_path),
            SchemaOrRef::Schema(_) => None,
        }
    }

    /// Last segment of the `$ref` path; the schema's component name.
    pub fn ref_name(&self) -> Option<&str> {
        self.ref_path().and_then(|p| p.rsplit('/').next())
    }
}

/// Schema definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Type: string, number, integer, boolean, array, object
    #[serde(rename = "type", default)]
    pub schema_type: Option<String>,

    /// Format (e.g., int32, int64, double, date-time)
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Properties for object types; insertion order is preserved
    #[serde(default)]
    pub properties: IndexMap<String, SchemaOrRef>,

    /// Names of required properties
    #[serde(default)]
    pub required: Vec<String>,

    /// Items schema for array types
    #[serde(default)]
    pub items: Option<Box<SchemaOrRef>>,

    /// Value schema for map-shaped objects
    #[serde(rename = "additionalProperties", default)]
    pub additional_properties: Option<Box<SchemaOrRef>>,

    #[serde(rename = "enum", default)]
    pub enum_values: Vec<serde_json::Value>,

    #[serde(default)]
    pub minimum: Option<f64>,

    #[serde(default)]
    pub maximum: Option<f64>,

    #[serde(default)]
    pub default: Option<serde_json::Value>,

    #[serde(default)]
    pub deprecated: bool,
}

/// Reusable components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
}

impl Document {
    /// Get a schema by reference path, e.g. `#/components/schemas/Api`.
    pub fn resolve_schema_ref(&self, ref_path: &str) -> Option<&Schema> {
        let schema_name = ref_path.strip_prefix("#/components/schemas/")?;
        self.components
            .as_ref()
            .and_then(|c| c.schemas.get(schema_name))
    }
}
