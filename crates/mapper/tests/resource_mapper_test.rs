//! Integration tests for resource mapping

use serde_json::json;

use tf_openapi_generator_common::config::Config;
use tf_openapi_generator_common::spec::resource::AttributeKind;
use tf_openapi_generator_common::spec::schema::Computability;
use tf_openapi_generator_mapper::explorer;
use tf_openapi_generator_mapper::ResourceMapper;

fn map(doc: serde_json::Value, config: serde_json::Value) -> Vec<tf_openapi_generator_common::spec::ResourceWithRefreshObjectName> {
    let doc: tf_openapi_generator_mapper::openapi::Document = serde_json::from_value(doc).unwrap();
    let config: Config = serde_json::from_value(config).unwrap();
    let (resources, _) = explorer::explore(&doc, &config);
    ResourceMapper::new(&doc, &resources, &config).map_to_ir()
}

#[test]
fn create_body_maps_to_required_and_computed_optional_attributes() {
    let doc = json!({
        "openapi": "3.0.0",
        "info": { "title": "apigw", "version": "1" },
        "paths": {
            "/tenants": {
                "post": {
                    "requestBody": {
                        "content": {
                            "application/json;charset=UTF-8": {
                                "schema": {
                                    "type": "object",
                                    "required": ["tenantId"],
                                    "properties": {
                                        "tenantId": { "type": "string" },
                                        "enabled": { "type": "boolean" }
                                    }
                                }
                            }
                        }
                    },
                    "responses": {}
                }
            },
            "/tenants/{tenant-id}": {
                "get": {
                    "responses": {
                        "200": {
                            "description": "ok",
                            "content": {
                                "application/json;charset=UTF-8": {
                                    "schema": { "$ref": "#/components/schemas/Tenant" }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Tenant": {
                    "type": "object",
                    "properties": {
                        "tenantId": { "type": "string" },
                        "enabled": { "type": "boolean" }
                    }
                }
            }
        }
    });

    let config = json!({
        "resources": {
            "tenant": {
                "create": { "method": "POST", "path": "/tenants" },
                "read": { "method": "GET", "path": "/tenants/{tenant-id}" }
            }
        }
    });

    let resources = map(doc, config);
    assert_eq!(resources.len(), 1);

    let tenant = &resources[0];
    assert_eq!(tenant.resource.name, "tenant");
    assert_eq!(tenant.refresh_object_name, "Tenant");

    let attrs = &tenant.resource.schema.attributes;
    assert_eq!(attrs.len(), 2);

    assert_eq!(attrs[0].name, "tenant_id");
    let AttributeKind::String(tenant_id) = &attrs[0].kind else {
        panic!("expected string attribute, got {:?}", attrs[0].kind);
    };
    assert_eq!(tenant_id.computed_optional_required, Computability::Required);

    assert_eq!(attrs[1].name, "enabled");
    let AttributeKind::Bool(enabled) = &attrs[1].kind else {
        panic!("expected bool attribute, got {:?}", attrs[1].kind);
    };
    assert_eq!(
        enabled.computed_optional_required,
        Computability::ComputedOptional
    );
}

#[test]
fn malformed_resource_is_skipped_not_fatal() {
    let good_body = json!({
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": { "name": { "type": "string" } }
                }
            }
        }
    });
    let bad_body = json!({
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": { "name": { "type": "mystery" } }
                }
            }
        }
    });

    let mut paths = serde_json::Map::new();
    for (i, body) in [
        &good_body, &good_body, &bad_body, &good_body, &good_body,
    ]
    .iter()
    .enumerate()
    {
        paths.insert(
            format!("/r{i}"),
            json!({ "post": { "requestBody": body, "responses": {} } }),
        );
        paths.insert(
            format!("/r{i}/{{id}}"),
            json!({ "get": { "responses": {} } }),
        );
    }

    let doc = json!({
        "openapi": "3.0.0",
        "info": { "title": "t", "version": "1" },
        "paths": paths
    });

    let mut resources_config = serde_json::Map::new();
    for i in 0..5 {
        resources_config.insert(
            format!("res{i}"),
            json!({
                "create": { "method": "POST", "path": format!("/r{i}") },
                "read": { "method": "GET", "path": format!("/r{i}/{{id}}") }
            }),
        );
    }
    let config = json!({ "resources": resources_config });

    let mapped = map(doc, config);
    // res2 carries an unmappable create body; the other four survive.
    assert_eq!(mapped.len(), 4);
    let names: Vec<&str> = mapped.iter().map(|r| r.resource.name.as_str()).collect();
    assert_eq!(names, vec!["res0", "res1", "res3", "res4"]);
}

#[test]
fn response_parameters_and_update_merge_into_one_schema() {
    let doc = json!({
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
                                        "apiName": { "type": "string", "description": "Api Name" }
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
                                            "apiName": { "type": "string" },
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
                    "parameters": [
                        {
                            "name": "api-id",
                            "in": "path",
                            "required": true,
                            "description": "Api Id",
                            "schema": { "type": "string" }
                        },
                        {
                            "name": "X-Trace",
                            "in": "header",
                            "schema": { "type": "string" }
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "ok",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Api" }
                                }
                            }
                        }
                    }
                },
                "patch": {
                    "requestBody": {
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "apiDescription": { "type": "string" }
                                    }
                                }
                            }
                        }
                    },
                    "responses": {}
                }
            }
        },
        "components": {
            "schemas": {
                "Api": {
                    "type": "object",
                    "properties": {
                        "apiName": { "type": "string" },
                        "domainCode": { "type": "string" }
                    }
                }
            }
        }
    });

    let config = json!({
        "resources": {
            "api": {
                "create": { "method": "POST", "path": "/apis" },
                "read": { "method": "GET", "path": "/apis/{api-id}" },
                "update": [
                    { "method": "PATCH", "path": "/apis/{api-id}" }
                ],
                "schema": {
                    "attributes": {
                        "aliases": { "api-id": "id" },
                        "overrides": {
                            "domain_code": { "description": "patched description" }
                        }
                    }
                }
            }
        }
    });

    let mapped = map(doc, config);
    assert_eq!(mapped.len(), 1);
    let api = &mapped[0];
    assert_eq!(api.refresh_object_name, "Api");

    let names: Vec<&str> = api
        .resource
        .schema
        .attributes
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    // create body first, then response/parameter/update contributions in
    // first-seen order; the header parameter never maps; api-id routes
    // under its alias.
    assert_eq!(
        names,
        vec!["api_name", "api_id", "domain_code", "id", "api_description"]
    );

    let attrs = &api.resource.schema.attributes;

    // api_name: Required from the create body, relaxed by the Computed
    // response sighting.
    let AttributeKind::String(api_name) = &attrs[0].kind else {
        panic!("expected string");
    };
    assert_eq!(
        api_name.computed_optional_required,
        Computability::ComputedOptional
    );
    assert_eq!(api_name.description.as_deref(), Some("Api Name"));

    // api_id arrived from the create response only.
    let AttributeKind::String(api_id) = &attrs[1].kind else {
        panic!("expected string");
    };
    assert_eq!(api_id.computed_optional_required, Computability::Computed);

    // domain_code picked up the override.
    let AttributeKind::String(domain_code) = &attrs[2].kind else {
        panic!("expected string");
    };
    assert_eq!(
        domain_code.description.as_deref(),
        Some("patched description")
    );

    // The aliased path parameter is ComputedOptional.
    let AttributeKind::String(id) = &attrs[3].kind else {
        panic!("expected string");
    };
    assert_eq!(id.computed_optional_required, Computability::ComputedOptional);
    assert_eq!(id.description.as_deref(), Some("Api Id"));
}

#[test]
fn missing_create_body_skips_resource() {
    let doc = json!({
        "openapi": "3.0.0",
        "info": { "title": "t", "version": "1" },
        "paths": {
            "/things": { "post": { "responses": {} } },
            "/things/{id}": { "get": { "responses": {} } }
        }
    });
    let config = json!({
        "resources": {
            "thing": {
                "create": { "method": "POST", "path": "/things" },
                "read": { "method": "GET", "path": "/things/{id}" }
            }
        }
    });

    assert!(map(doc, config).is_empty());
}

#[test]
fn ir_record_serializes_with_flattened_resource_and_omitted_empties() {
    let doc = json!({
        "openapi": "3.0.0",
        "info": { "title": "t", "version": "1" },
        "paths": {
            "/things": {
                "post": {
                    "requestBody": {
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "required": ["name"],
                                    "properties": { "name": { "type": "string" } }
                                }
                            }
                        }
                    },
                    "responses": {}
                }
            },
            "/things/{id}": { "get": { "responses": {} } }
        }
    });
    let config = json!({
        "resources": {
            "thing": {
                "create": { "method": "POST", "path": "/things" },
                "read": { "method": "GET", "path": "/things/{id}" },
                "id": "name"
            }
        }
    });

    let mapped = map(doc, config);
    let value = serde_json::to_value(&mapped[0]).unwrap();

    // Name and schema flatten to the top level next to the hints.
    assert_eq!(value["name"], "thing");
    assert_eq!(value["id"], "name");
    assert_eq!(
        value["schema"]["attributes"][0],
        json!({
            "name": "name",
            "string": { "computed_optional_required": "required" }
        })
    );
    // Empty hints are omitted entirely.
    assert!(value.get("refresh_object_name").is_none());
    assert!(value.get("import_state_override").is_none());
}
