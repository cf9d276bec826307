//! SDK file assembly: one generated file per (method, path) pair
//!
//! Drives the synthesis pipeline across every operation the config names,
//! deduplicating shared operations, and returns file contents keyed by
//! deterministic names. Writing to disk is the caller's job.

use std::collections::BTreeMap;

use tf_openapi_generator_common::config::Config;
use tf_openapi_generator_mapper::oas::{build_schema_from_response, GlobalSchemaOpts, SchemaOpts};
use tf_openapi_generator_mapper::openapi::{Document, Operation};
use tf_openapi_generator_mapper::util::to_snake_case;

use crate::convert::synthesize_refresh;
use crate::naming::method_name_from_path;
use crate::template::Template;
use crate::{SynthError, SynthWarning, UnsupportedShapePolicy};

/// One generated source file, named and filled, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub file_name: String,
    pub contents: String,
}

/// Deterministic file name for an operation:
/// `GET /products/{product-id}/apis` -> `get_products_product_id_apis.rs`.
pub fn operation_file_name(method: &str, path: &str) -> String {
    let sanitized = path.replace(['{', '}'], "");
    let segments: Vec<String> = sanitized
        .split('/')
        .filter(|s| !s.is_empty())
        .map(to_snake_case)
        .collect();
    format!("{}_{}.rs", method.to_lowercase(), segments.join("_"))
}

/// Synthesize the file for one operation: request struct, call method, and
/// (when the operation has a decodable JSON response) the refresh model.
pub fn generate_operation(
    doc: &Document,
    op: &Operation,
    method: &str,
    path: &str,
    policy: UnsupportedShapePolicy,
) -> Result<(GeneratedFile, Vec<SynthWarning>), SynthError> {
    let mut warnings = Vec::new();

    let refresh = match build_schema_from_response(
        doc,
        Some(op),
        SchemaOpts::default(),
        GlobalSchemaOpts::default(),
    ) {
        Ok(response_schema) => {
            let model_name = format!("{}Response", method_name_from_path(method, path));
            match synthesize_refresh(doc, response_schema.schema, &model_name, policy) {
                Ok(details) => {
                    warnings.extend(details.warnings.iter().cloned());
                    Some(details)
                }
                Err(SynthError::UnsupportedShape { path, detail })
                    if policy == UnsupportedShapePolicy::Warn =>
                {
                    warnings.push(SynthWarning { path, detail });
                    None
                }
                Err(err) => return Err(err),
            }
        }
        Err(err) if err.is_not_found() => None,
        Err(err) => match policy {
            UnsupportedShapePolicy::Fail => return Err(err.into()),
            UnsupportedShapePolicy::Warn => {
                warnings.push(SynthWarning {
                    path: format!("{} {}", method, path),
                    detail: format!("response schema not decodable: {}", err),
                });
                None
            }
        },
    };

    let template = Template::new(doc, op, method, path, refresh);

    let mut contents = template.render_method()?;
    let refresh_text = template.render_refresh()?;
    if !refresh_text.is_empty() {
        contents.push('\n');
        contents.push_str(&refresh_text);
    }

    Ok((
        GeneratedFile {
            file_name: operation_file_name(method, path),
            contents,
        },
        warnings,
    ))
}

/// Generate the whole SDK for a config: the shared client, a module index,
/// and one file per distinct configured operation, in deterministic order.
pub fn generate_sdk(
    doc: &Document,
    config: &Config,
    policy: UnsupportedShapePolicy,
) -> Result<(Vec<GeneratedFile>, Vec<SynthWarning>), SynthError> {
    let mut operations: Vec<(String, String)> = Vec::new();

    for resource_config in config.resources.values() {
        operations.push((
            resource_config.create.method.clone(),
            resource_config.create.path.clone(),
        ));
        operations.push((
            resource_config.read.method.clone(),
            resource_config.read.path.clone(),
        ));
        for update in &resource_config.update {
            operations.push((update.method.clone(), update.path.clone()));
        }
        if let Some(delete) = &resource_config.delete {
            operations.push((delete.method.clone(), delete.path.clone()));
        }
    }
    for data_source_config in config.data_sources.values() {
        operations.push((
            data_source_config.read.method.clone(),
            data_source_config.read.path.clone(),
        ));
    }

    let mut files: BTreeMap<String, GeneratedFile> = BTreeMap::new();
    let mut warnings = Vec::new();

    for (method, path) in operations {
        let file_name = operation_file_name(&method, &path);
        if files.contains_key(&file_name) {
            continue;
        }

        let Some(op) = doc.paths.get(&path).and_then(|item| item.operation(&method)) else {
            warnings.push(SynthWarning {
                path: format!("{} {}", method, path),
                detail: "configured operation not found in document".to_string(),
            });
            continue;
        };

        let (file, op_warnings) = generate_operation(doc, op, &method, &path, policy)?;
        warnings.extend(op_warnings);
        files.insert(file_name, file);
    }

    let mut output = Vec::with_capacity(files.len() + 2);

    output.push(GeneratedFile {
        file_name: "client.rs".to_string(),
        contents: Template::render_client()?,
    });

    let mut module_index = String::from("// Generated by tf-openapi-generator. DO NOT EDIT.\n\npub mod client;\n");
    for file_name in files.keys() {
        let stem = file_name.trim_end_matches(".rs");
        module_index.push_str(&format!("pub mod {};\n", stem));
    }
    output.push(GeneratedFile {
        file_name: "mod.rs".to_string(),
        contents: module_index,
    });

    output.extend(files.into_values());

    Ok((output, warnings))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn operation_file_names_are_deterministic() {
        assert_eq!(
            operation_file_name("GET", "/products/{product-id}/apis"),
            "get_products_product_id_apis.rs"
        );
        assert_eq!(operation_file_name("POST", "/api-keys"), "post_api_keys.rs");
    }

    #[test]
    fn generate_sdk_emits_client_index_and_operation_files() {
        let doc: Document = serde_json::from_value(json!({
            "openapi": "3.0.0",
            "info": { "title": "apigw", "version": "1" },
            "paths": {
                "/apis": {
                    "post": {
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "required": ["apiName"],
                                        "properties": {
                                            "apiName": { "type": "string" }
                                        }
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "created",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "apiId": { "type": "string" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/apis/{api-id}": {
                    "get": {
                        "responses": {
                            "200": {
                                "description": "ok",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "apiId": { "type": "string" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }))
        .unwrap();

        let config: Config = serde_json::from_value(json!({
            "resources": {
                "api": {
                    "create": { "method": "POST", "path": "/apis" },
                    "read": { "method": "GET", "path": "/apis/{api-id}" }
                }
            }
        }))
        .unwrap();

        let (files, warnings) =
            generate_sdk(&doc, &config, UnsupportedShapePolicy::Warn).unwrap();
        assert!(warnings.is_empty());

        let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "client.rs",
                "mod.rs",
                "get_apis_api_id.rs",
                "post_apis.rs",
            ]
        );

        let index = &files[1].contents;
        assert!(index.contains("pub mod client;"));
        assert!(index.contains("pub mod get_apis_api_id;"));
        assert!(index.contains("pub mod post_apis;"));

        let post = files.iter().find(|f| f.file_name == "post_apis.rs").unwrap();
        assert!(post.contents.contains("pub struct PostApisRequest {"));
        assert!(post.contents.contains("pub struct PostApisResponse {"));
        assert!(post.contents.contains("pub fn from_response"));
    }

    #[test]
    fn missing_operation_becomes_warning_not_error() {
        let doc: Document = serde_json::from_value(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {}
        }))
        .unwrap();
        let config: Config = serde_json::from_value(json!({
            "data_sources": {
                "ghost": { "read": { "method": "GET", "path": "/ghost" } }
            }
        }))
        .unwrap();

        let (files, warnings) =
            generate_sdk(&doc, &config, UnsupportedShapePolicy::Warn).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].detail.contains("not found"));
    }
}
