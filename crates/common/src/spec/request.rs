//! CRUD request metadata carried alongside the attribute schemas
//!
//! These records describe the raw HTTP shape of each configured operation:
//! method, path template, parameter summaries, request body summary, and the
//! response type reference name. They are consumed by the SDK synthesis
//! layer and by downstream provider code generation.

use serde::{Deserialize, Serialize};

/// Name/type/format summary of one parameter or body property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestParameterAttribute {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub param_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Operation parameters split by requiredness.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestParameters {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<RequestParameterAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<RequestParameterAttribute>,
}

/// Request body summary: schema reference name plus property split.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<RequestParameterAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<RequestParameterAttribute>,
}

/// One operation's request shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommonRequestType {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<RequestParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub method: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

/// Per-resource grouping of CRUD request shapes.
///
/// Update is a sequence: a resource may expose several partial-update
/// endpoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrudParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<CommonRequestType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<CommonRequestType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub update: Vec<CommonRequestType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<CommonRequestType>,
}

/// Named request entry in the top-level specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(flatten)]
    pub operations: CrudParameters,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}
