//! Schema walk producing the refresh-decoding AST
//!
//! Recursive descent over a response schema, depth-first: nested object and
//! array-of-object shapes re-enter the walk and accumulate auxiliary
//! models. Shapes the engine cannot express are governed by
//! [`UnsupportedShapePolicy`]; nothing is dropped without either an error
//! or a recorded warning.

use tf_openapi_generator_mapper::openapi::{Document, Schema, SchemaOrRef};
use tf_openapi_generator_mapper::util::{
    to_snake_case, OAS_FORMAT_INT32, OAS_TYPE_ARRAY, OAS_TYPE_BOOLEAN, OAS_TYPE_INTEGER,
    OAS_TYPE_NUMBER, OAS_TYPE_OBJECT, OAS_TYPE_STRING,
};

use crate::ast::{ConvertStmt, FieldDef, ModelDef, NullFallback, ScalarKind};
use crate::naming::to_pascal_case;
use crate::{SynthError, SynthWarning, UnsupportedShapePolicy};

/// Schema cycles are assumed absent from sane documents; this guard turns a
/// pathological one into a typed error instead of unbounded recursion.
const MAX_DEPTH: usize = 32;

/// Everything the refresh template needs for one operation.
#[derive(Debug, Clone, Default)]
pub struct RefreshDetails {
    /// The top-level response model.
    pub model: ModelDef,
    /// Auxiliary models for nested object shapes, in discovery order.
    pub nested_models: Vec<ModelDef>,
    /// Shapes skipped under the `Warn` policy.
    pub warnings: Vec<SynthWarning>,
}

/// Walk a response schema into refresh-decoding details.
///
/// Accepts an object schema, or an array-of-objects schema (collection
/// endpoints); anything else is an unsupported shape.
pub fn synthesize_refresh(
    doc: &Document,
    schema: &Schema,
    model_name: &str,
    policy: UnsupportedShapePolicy,
) -> Result<RefreshDetails, SynthError> {
    let mut nested_models = Vec::new();
    let mut warnings = Vec::new();

    let object_schema = match schema.schema_type.as_deref() {
        Some(OAS_TYPE_OBJECT) => schema,
        Some(OAS_TYPE_ARRAY) => match schema.items.as_deref().and_then(|n| resolve(doc, n)) {
            Some(items) if items.schema_type.as_deref() == Some(OAS_TYPE_OBJECT) => items,
            _ => {
                return Err(SynthError::UnsupportedShape {
                    path: model_name.to_string(),
                    detail: "top-level array response without object items".to_string(),
                })
            }
        },
        other => {
            return Err(SynthError::UnsupportedShape {
                path: model_name.to_string(),
                detail: format!("response schema type {:?} is not decodable", other),
            })
        }
    };

    let model = walk_object(
        doc,
        object_schema,
        model_name,
        model_name,
        0,
        policy,
        &mut nested_models,
        &mut warnings,
    )?;

    Ok(RefreshDetails {
        model,
        nested_models,
        warnings,
    })
}

fn resolve<'d>(doc: &'d Document, node: &'d SchemaOrRef) -> Option<&'d Schema> {
    match node {
        SchemaOrRef::Schema(schema) => Some(schema),
        SchemaOrRef::Reference { ref_path } => doc.resolve_schema_ref(ref_path),
    }
}

#[allow(clippy::too_many_arguments)]
fn walk_object(
    doc: &Document,
    schema: &Schema,
    struct_name: &str,
    path: &str,
    depth: usize,
    policy: UnsupportedShapePolicy,
    nested_models: &mut Vec<ModelDef>,
    warnings: &mut Vec<SynthWarning>,
) -> Result<ModelDef, SynthError> {
    if depth > MAX_DEPTH {
        return Err(SynthError::DepthExceeded {
            path: path.to_string(),
        });
    }

    let mut model = ModelDef {
        name: struct_name.to_string(),
        ..ModelDef::default()
    };

    for (prop_name, node) in &schema.properties {
        let field = to_snake_case(prop_name);
        let key = field.clone();
        let prop_path = format!("{path}.{field}");

        let Some(prop_schema) = resolve(doc, node) else {
            skip(
                policy,
                warnings,
                &prop_path,
                "unresolvable schema reference",
            )?;
            continue;
        };

        match prop_schema.schema_type.as_deref() {
            Some(OAS_TYPE_STRING) => {
                push_scalar(&mut model, field, key, ScalarKind::String);
            }
            Some(OAS_TYPE_BOOLEAN) => {
                push_scalar(&mut model, field, key, ScalarKind::Bool);
            }
            Some(OAS_TYPE_INTEGER) => {
                let kind = if prop_schema.format.as_deref() == Some(OAS_FORMAT_INT32) {
                    ScalarKind::Int32
                } else {
                    ScalarKind::Int64
                };
                push_scalar(&mut model, field, key, kind);
            }
            Some(OAS_TYPE_NUMBER) => {
                push_scalar(&mut model, field, key, ScalarKind::Number);
            }
            Some(OAS_TYPE_ARRAY) => {
                let Some(items) = prop_schema.items.as_deref().and_then(|n| resolve(doc, n))
                else {
                    skip(policy, warnings, &prop_path, "array without items schema")?;
                    continue;
                };

                match items.schema_type.as_deref() {
                    Some(OAS_TYPE_OBJECT) => {
                        let elem_struct = format!("{struct_name}{}", to_pascal_case(&field));
                        let nested = walk_object(
                            doc,
                            items,
                            &elem_struct,
                            &prop_path,
                            depth + 1,
                            policy,
                            nested_models,
                            warnings,
                        )?;
                        nested_models.push(nested);

                        model.fields.push(FieldDef {
                            ident: field.clone(),
                            rust_type: format!("Vec<{elem_struct}>"),
                        });
                        model.statements.push(ConvertStmt::NestedList {
                            field: field.clone(),
                            key: key.clone(),
                            elem_struct,
                        });
                        model.null_fallbacks.push(NullFallback::Absent {
                            field: field.clone(),
                            key: key.clone(),
                        });
                        model
                            .empty_array_fallbacks
                            .push(NullFallback::EmptyArray { field, key });
                    }
                    Some(OAS_TYPE_STRING) => push_scalar_list(&mut model, field, key, ScalarKind::String),
                    Some(OAS_TYPE_BOOLEAN) => push_scalar_list(&mut model, field, key, ScalarKind::Bool),
                    Some(OAS_TYPE_INTEGER) => {
                        let kind = if items.format.as_deref() == Some(OAS_FORMAT_INT32) {
                            ScalarKind::Int32
                        } else {
                            ScalarKind::Int64
                        };
                        push_scalar_list(&mut model, field, key, kind);
                    }
                    Some(OAS_TYPE_NUMBER) => push_scalar_list(&mut model, field, key, ScalarKind::Number),
                    other => {
                        skip(
                            policy,
                            warnings,
                            &prop_path,
                            &format!("array items of type {:?} are not decodable", other),
                        )?;
                    }
                }
            }
            Some(OAS_TYPE_OBJECT) => {
                if prop_schema.properties.is_empty() {
                    skip(
                        policy,
                        warnings,
                        &prop_path,
                        "object without declared properties",
                    )?;
                    continue;
                }

                let nested_name = format!("{struct_name}{}", to_pascal_case(&field));
                let nested = walk_object(
                    doc,
                    prop_schema,
                    &nested_name,
                    &prop_path,
                    depth + 1,
                    policy,
                    nested_models,
                    warnings,
                )?;
                nested_models.push(nested);

                model.fields.push(FieldDef {
                    ident: field.clone(),
                    rust_type: nested_name.clone(),
                });
                model.statements.push(ConvertStmt::NestedObject {
                    field: field.clone(),
                    key: key.clone(),
                    struct_name: nested_name,
                });
                model.null_fallbacks.push(NullFallback::Absent { field, key });
            }
            other => {
                skip(
                    policy,
                    warnings,
                    &prop_path,
                    &format!("schema type {:?} is not decodable", other),
                )?;
            }
        }
    }

    Ok(model)
}

fn push_scalar(model: &mut ModelDef, field: String, key: String, kind: ScalarKind) {
    model.fields.push(FieldDef {
        ident: field.clone(),
        rust_type: kind.rust_type().to_string(),
    });
    model.statements.push(ConvertStmt::Scalar { field, key, kind });
}

fn push_scalar_list(model: &mut ModelDef, field: String, key: String, kind: ScalarKind) {
    model.fields.push(FieldDef {
        ident: field.clone(),
        rust_type: format!("Vec<{}>", kind.rust_type()),
    });
    model.statements.push(ConvertStmt::ScalarList {
        field: field.clone(),
        key: key.clone(),
        kind,
    });
    model.null_fallbacks.push(NullFallback::Absent {
        field: field.clone(),
        key: key.clone(),
    });
    model
        .empty_array_fallbacks
        .push(NullFallback::EmptyArray { field, key });
}

fn skip(
    policy: UnsupportedShapePolicy,
    warnings: &mut Vec<SynthWarning>,
    path: &str,
    detail: &str,
) -> Result<(), SynthError> {
    match policy {
        UnsupportedShapePolicy::Fail => Err(SynthError::UnsupportedShape {
            path: path.to_string(),
            detail: detail.to_string(),
        }),
        UnsupportedShapePolicy::Warn => {
            warnings.push(SynthWarning {
                path: path.to_string(),
                detail: detail.to_string(),
            });
            Ok(())
        }
    }
}
