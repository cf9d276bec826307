//! OAS constants and small shared helpers
//!
//! Reference links:
//!   - [JSON Schema - types]
//!   - [OAS - format]
//!
//! [JSON Schema - types]: https://json-schema.org/draft/2020-12/json-schema-core.html#name-instance-data-model
//! [OAS - format]: https://spec.openapis.org/oas/latest.html#data-types

pub const OAS_TYPE_STRING: &str = "string";
pub const OAS_TYPE_INTEGER: &str = "integer";
pub const OAS_TYPE_NUMBER: &str = "number";
pub const OAS_TYPE_BOOLEAN: &str = "boolean";
pub const OAS_TYPE_ARRAY: &str = "array";
pub const OAS_TYPE_OBJECT: &str = "object";

pub const OAS_FORMAT_INT32: &str = "int32";
pub const OAS_FORMAT_INT64: &str = "int64";
pub const OAS_FORMAT_DOUBLE: &str = "double";
pub const OAS_FORMAT_FLOAT: &str = "float";

pub const OAS_PARAM_PATH: &str = "path";
pub const OAS_PARAM_QUERY: &str = "query";

/// Custom format routing arrays to set attributes
pub const TF_FORMAT_SET: &str = "set";

pub const OAS_MEDIATYPE_JSON: &str = "application/json";

pub const OAS_RESPONSE_CODE_OK: &str = "200";
pub const OAS_RESPONSE_CODE_CREATED: &str = "201";

/// True for `application/json` with or without media-type parameters such as
/// `;charset=UTF-8`.
pub fn is_json_media_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|base| base.trim().eq_ignore_ascii_case(OAS_MEDIATYPE_JSON))
        .unwrap_or(false)
}

/// Convert PascalCase or camelCase to snake_case.
///
/// Acronym-aware: `HTTPServer` becomes `http_server`. Hyphens and spaces
/// collapse into underscores.
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let should_add_underscore = i > 0
                && (chars[i - 1].is_lowercase()
                    || chars[i - 1].is_ascii_digit()
                    || (i + 1 < chars.len() && chars[i + 1].is_lowercase()));

            if should_add_underscore && !result.ends_with('_') {
                result.push('_');
            }
            result.push(ch.to_ascii_lowercase());
        } else if ch == '-' || ch == ' ' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
        } else {
            result.push(ch);
        }
    }

    while result.contains("__") {
        result = result.replace("__", "_");
    }

    result.trim_matches('_').to_string()
}
