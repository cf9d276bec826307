//! Integration tests for data source mapping

use serde_json::json;

use tf_openapi_generator_common::config::Config;
use tf_openapi_generator_common::spec::datasource::AttributeKind;
use tf_openapi_generator_common::spec::schema::{Computability, ElementType};
use tf_openapi_generator_common::spec::DetailDataSourceInfo;
use tf_openapi_generator_mapper::explorer;
use tf_openapi_generator_mapper::DataSourceMapper;

fn map(doc: serde_json::Value, config: serde_json::Value) -> Vec<DetailDataSourceInfo> {
    let doc: tf_openapi_generator_mapper::openapi::Document = serde_json::from_value(doc).unwrap();
    let config: Config = serde_json::from_value(config).unwrap();
    let (_, data_sources) = explorer::explore(&doc, &config);
    DataSourceMapper::new(&doc, &data_sources, &config).map_to_ir()
}

#[test]
fn top_level_array_response_maps_to_set_nested_attribute() {
    let doc = json!({
        "openapi": "3.0.0",
        "info": { "title": "apigw", "version": "1" },
        "paths": {
            "/products": {
                "get": {
                    "responses": {
                        "200": {
                            "description": "ok",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": {
                                            "type": "object",
                                            "properties": {
                                                "productId": { "type": "string" },
                                                "disabled": { "type": "boolean" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    });

    let config = json!({
        "data_sources": {
            "products": {
                "read": { "method": "GET", "path": "/products" }
            }
        }
    });

    let mapped = map(doc, config);
    assert_eq!(mapped.len(), 1);

    let attrs = &mapped[0].data_source.schema.attributes;
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs[0].name, "products");

    // Collection responses are unordered: a set, never a list.
    let AttributeKind::SetNested(set) = &attrs[0].kind else {
        panic!("expected set nested attribute, got {:?}", attrs[0].kind);
    };
    assert_eq!(set.computed_optional_required, Computability::Computed);
    assert_eq!(set.nested_object.attributes[0].name, "product_id");
}

#[test]
fn top_level_scalar_array_response_maps_to_set_attribute() {
    let doc = json!({
        "openapi": "3.0.0",
        "info": { "title": "t", "version": "1" },
        "paths": {
            "/regions": {
                "get": {
                    "responses": {
                        "200": {
                            "description": "ok",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "type": "string" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    });

    let config = json!({
        "data_sources": {
            "regions": { "read": { "method": "GET", "path": "/regions" } }
        }
    });

    let mapped = map(doc, config);
    let attrs = &mapped[0].data_source.schema.attributes;
    let AttributeKind::Set(set) = &attrs[0].kind else {
        panic!("expected set attribute, got {:?}", attrs[0].kind);
    };
    assert_eq!(set.element_type, ElementType::String);
}

#[test]
fn read_parameters_keep_operation_requiredness() {
    let doc = json!({
        "openapi": "3.0.0",
        "info": { "title": "apigw", "version": "1" },
        "paths": {
            "/products/{product-id}/apis": {
                "get": {
                    "parameters": [
                        {
                            "name": "product-id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" }
                        },
                        {
                            "name": "apiName",
                            "in": "query",
                            "schema": { "type": "string" }
                        },
                        {
                            "name": "limit",
                            "in": "query",
                            "schema": { "type": "integer", "format": "int64" }
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "ok",
                            "content": {
                                "application/json;charset=UTF-8": {
                                    "schema": { "$ref": "#/components/schemas/ApiPage" }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "ApiPage": {
                    "type": "object",
                    "properties": {
                        "total": { "type": "integer", "format": "int64" },
                        "apiName": { "type": "string" }
                    }
                }
            }
        }
    });

    let config = json!({
        "data_sources": {
            "apis": {
                "read": { "method": "GET", "path": "/products/{product-id}/apis" },
                "id": "api_id"
            }
        }
    });

    let mapped = map(doc, config);
    assert_eq!(mapped.len(), 1);
    let info = &mapped[0];
    assert_eq!(info.refresh_object_name, "ApiPage");
    assert_eq!(info.id, "api_id");

    let names: Vec<&str> = info
        .data_source
        .schema
        .attributes
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    // Parameters first, then response attributes; api_name deduplicates.
    assert_eq!(names, vec!["product_id", "api_name", "limit", "total"]);

    let attrs = &info.data_source.schema.attributes;
    let AttributeKind::String(product_id) = &attrs[0].kind else {
        panic!("expected string");
    };
    assert_eq!(product_id.computed_optional_required, Computability::Required);

    let AttributeKind::String(api_name) = &attrs[1].kind else {
        panic!("expected string");
    };
    assert_eq!(
        api_name.computed_optional_required,
        Computability::ComputedOptional
    );

    // The response's ApiPage schema contributed the computed total.
    let AttributeKind::Int64(total) = &attrs[3].kind else {
        panic!("expected int64");
    };
    assert_eq!(total.computed_optional_required, Computability::Computed);

    // Request metadata mirrors the configured operation.
    let read = info.crud_parameters.read.as_ref().unwrap();
    assert_eq!(read.method, "GET");
    assert_eq!(read.path, "/products/{product-id}/apis");
    assert_eq!(read.response, "ApiPage");
    let params = read.parameters.as_ref().unwrap();
    assert_eq!(params.required.len(), 1);
    assert_eq!(params.required[0].name, "product-id");
    assert_eq!(params.optional.len(), 2);
    assert_eq!(params.optional[1].format.as_deref(), Some("int64"));
}

#[test]
fn missing_read_response_skips_data_source() {
    let doc = json!({
        "openapi": "3.0.0",
        "info": { "title": "t", "version": "1" },
        "paths": {
            "/broken": { "get": { "responses": {} } }
        }
    });
    let config = json!({
        "data_sources": {
            "broken": { "read": { "method": "GET", "path": "/broken" } },
        }
    });

    assert!(map(doc, config).is_empty());
}
