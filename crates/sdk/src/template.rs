//! Template assembly and rendering
//!
//! One [`Template`] per (method, path) pair carries the string fragments
//! the fixed tera templates consume: request struct fields, query/body
//! statements, the rebuilt path expression, and the refresh AST. Rendering
//! returns strings; nothing here touches the filesystem.

use tera::Tera;

use tf_openapi_generator_mapper::openapi::{Document, Operation, Parameter, RequestBody, Schema, SchemaOrRef};
use tf_openapi_generator_mapper::util::{
    is_json_media_type, to_snake_case, OAS_FORMAT_INT32, OAS_PARAM_QUERY, OAS_TYPE_ARRAY,
    OAS_TYPE_BOOLEAN, OAS_TYPE_INTEGER, OAS_TYPE_NUMBER, OAS_TYPE_OBJECT, OAS_TYPE_STRING,
};

use crate::convert::RefreshDetails;
use crate::naming::{method_name_from_path, pascal_to_snake_case};
use crate::SynthError;

const METHOD_TEMPLATE: &str = include_str!("../templates/method.rs.tera");
const REFRESH_TEMPLATE: &str = include_str!("../templates/refresh.rs.tera");
const CLIENT_TEMPLATE: &str = include_str!("../templates/client.rs.tera");

fn load_templates() -> Result<Tera, SynthError> {
    let mut tera = Tera::default();

    tera.add_raw_template("method.rs", METHOD_TEMPLATE)
        .map_err(|e| SynthError::Template(format!("failed to load method template: {}", e)))?;
    tera.add_raw_template("refresh.rs", REFRESH_TEMPLATE)
        .map_err(|e| SynthError::Template(format!("failed to load refresh template: {}", e)))?;
    tera.add_raw_template("client.rs", CLIENT_TEMPLATE)
        .map_err(|e| SynthError::Template(format!("failed to load client template: {}", e)))?;

    Ok(tera)
}

/// Fragments for one operation, ready for substitution.
pub struct Template {
    method_name: String,
    fn_name: String,
    method: String,
    path: String,
    path_expr: String,
    primitive_request: String,
    stringified_request: String,
    query: String,
    body: String,
    refresh: Option<RefreshDetails>,
}

impl Template {
    pub fn new(
        doc: &Document,
        op: &Operation,
        method: &str,
        path: &str,
        refresh: Option<RefreshDetails>,
    ) -> Self {
        let method_name = method_name_from_path(method, path);
        let fn_name = pascal_to_snake_case(&method_name);

        let mut fragments = RequestFragments::default();
        collect_parameter_fragments(doc, &op.parameters, &mut fragments);
        collect_body_fragments(doc, op.request_body.as_ref(), &mut fragments);

        Template {
            method_name,
            fn_name,
            method: method.to_uppercase(),
            path: path.to_string(),
            path_expr: path_expr(path),
            primitive_request: fragments.primitive,
            stringified_request: fragments.stringified,
            query: fragments.query,
            body: fragments.body,
            refresh,
        }
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Render the request struct + call method fragment.
    pub fn render_method(&self) -> Result<String, SynthError> {
        let tera = load_templates()?;

        let mut context = tera::Context::new();
        context.insert("method_name", &self.method_name);
        context.insert("fn_name", &self.fn_name);
        context.insert("method", &self.method);
        context.insert("path", &self.path);
        context.insert("path_expr", &self.path_expr);
        context.insert("primitive_request", &self.primitive_request);
        context.insert("stringified_request", &self.stringified_request);
        context.insert("query", &self.query);
        context.insert("body", &self.body);

        tera.render("method.rs", &context)
            .map_err(|e| SynthError::Template(format!("method template: {}", e)))
    }

    /// Render the response model + refresh function fragment. Operations
    /// without a decodable response render to an empty string.
    pub fn render_refresh(&self) -> Result<String, SynthError> {
        let Some(refresh) = &self.refresh else {
            return Ok(String::new());
        };

        let tera = load_templates()?;

        let possible_types: String = refresh
            .nested_models
            .iter()
            .map(|model| model.render())
            .collect();

        let mut context = tera::Context::new();
        context.insert("method_name", &self.method_name);
        context.insert("model", &refresh.model.name);
        context.insert("model_fields", &refresh.model.render_fields());
        context.insert("possible_types", &possible_types);
        context.insert("refresh_logic", &refresh.model.render_statements());
        context.insert("null_fallbacks", &refresh.model.render_null_fallbacks("self"));
        context.insert(
            "empty_array_fallbacks",
            &refresh.model.render_empty_array_fallbacks("self"),
        );

        tera.render("refresh.rs", &context)
            .map_err(|e| SynthError::Template(format!("refresh template: {}", e)))
    }

    /// Render the shared client fragment.
    pub fn render_client() -> Result<String, SynthError> {
        let tera = load_templates()?;
        tera.render("client.rs", &tera::Context::new())
            .map_err(|e| SynthError::Template(format!("client template: {}", e)))
    }
}

#[derive(Default)]
struct RequestFragments {
    primitive: String,
    stringified: String,
    query: String,
    body: String,
}

fn resolve<'d>(doc: &'d Document, node: &'d SchemaOrRef) -> Option<&'d Schema> {
    match node {
        SchemaOrRef::Schema(schema) => Some(schema),
        SchemaOrRef::Reference { ref_path } => doc.resolve_schema_ref(ref_path),
    }
}

fn primitive_field_line(ident: &str, schema: Option<&Schema>) -> Option<String> {
    let schema = schema?;
    let rust_type = match schema.schema_type.as_deref() {
        Some(OAS_TYPE_STRING) => "String",
        Some(OAS_TYPE_BOOLEAN) => "bool",
        Some(OAS_TYPE_INTEGER) => {
            if schema.format.as_deref() == Some(OAS_FORMAT_INT32) {
                "i32"
            } else {
                "i64"
            }
        }
        Some(OAS_TYPE_NUMBER) => "f64",
        Some(OAS_TYPE_ARRAY) => "Vec<serde_json::Value>",
        Some(OAS_TYPE_OBJECT) => "serde_json::Value",
        _ => return None,
    };
    Some(format!("    pub {}: {},\n", ident, rust_type))
}

fn collect_parameter_fragments(
    doc: &Document,
    parameters: &[Parameter],
    fragments: &mut RequestFragments,
) {
    for param in parameters {
        let ident = to_snake_case(&param.name);

        // Every parameter lands in the stringified request struct.
        fragments
            .stringified
            .push_str(&format!("    pub {}: String,\n", ident));

        let schema = param.schema.as_ref().and_then(|node| resolve(doc, node));
        if let Some(line) = primitive_field_line(&ident, schema) {
            fragments.primitive.push_str(&line);
        }

        if param.location == OAS_PARAM_QUERY {
            if param.required {
                fragments.query.push_str(&format!(
                    "        query.insert(\"{}\".to_string(), r.{}.clone());\n",
                    param.name, ident
                ));
            } else {
                fragments.query.push_str(&format!(
                    "        if !r.{ident}.is_empty() {{\n            query.insert(\"{}\".to_string(), r.{ident}.clone());\n        }}\n",
                    param.name
                ));
            }
        }
    }
}

fn collect_body_fragments(
    doc: &Document,
    body: Option<&RequestBody>,
    fragments: &mut RequestFragments,
) {
    let Some(body) = body else {
        return;
    };

    let Some(schema) = body
        .content
        .iter()
        .find(|(content_type, _)| is_json_media_type(content_type))
        .and_then(|(_, media)| media.schema.as_ref())
        .and_then(|node| resolve(doc, node))
    else {
        return;
    };

    for (prop_name, node) in &schema.properties {
        let ident = to_snake_case(prop_name);
        let required = schema.required.iter().any(|r| r == prop_name);

        if required {
            fragments.body.push_str(&format!(
                "        init_body.insert(\"{}\".to_string(), r.{}.clone());\n",
                prop_name, ident
            ));
        } else {
            fragments.body.push_str(&format!(
                "        if !r.{ident}.is_empty() {{\n            init_body.insert(\"{}\".to_string(), r.{ident}.clone());\n        }}\n",
                prop_name
            ));
        }

        if let Some(line) = primitive_field_line(&ident, resolve(doc, node)) {
            fragments.primitive.push_str(&line);
        }
        fragments
            .stringified
            .push_str(&format!("    pub {}: String,\n", ident));
    }
}

/// Rebuild the path template as a Rust expression, substituting `{param}`
/// segments with cleaned request fields.
fn path_expr(path: &str) -> String {
    let mut format_string = String::new();
    let mut args: Vec<String> = Vec::new();

    for segment in path.split('/') {
        if segment.is_empty() {
            continue;
        }

        format_string.push('/');
        if segment.starts_with('{') {
            let param = segment.trim_start_matches('{').trim_end_matches('}');
            format_string.push_str("{}");
            args.push(format!("clear_double_quote(&r.{})", to_snake_case(param)));
        } else {
            format_string.push_str(segment);
        }
    }

    if args.is_empty() {
        format!("\"{}\".to_string()", format_string)
    } else {
        format!("format!(\"{}\", {})", format_string, args.join(", "))
    }
}
