//! Codegen AST for the synthesis engine
//!
//! The schema walk produces these nodes; rendering them to Rust source is a
//! separate concern. Keeping the two apart makes the schema-driven logic
//! testable without string comparisons against whole files.

/// Scalar kinds the refresh decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Bool,
    Int32,
    Int64,
    Number,
}

impl ScalarKind {
    pub fn rust_type(self) -> &'static str {
        match self {
            ScalarKind::String => "String",
            ScalarKind::Bool => "bool",
            ScalarKind::Int32 => "i32",
            ScalarKind::Int64 => "i64",
            ScalarKind::Number => "f64",
        }
    }

    /// Element extraction expression used inside `filter_map` over a JSON
    /// array.
    fn element_expr(self) -> &'static str {
        match self {
            ScalarKind::String => "v.as_str().map(str::to_string)",
            ScalarKind::Bool => "v.as_bool()",
            ScalarKind::Int32 => "v.as_i64().map(|v| v as i32)",
            ScalarKind::Int64 => "v.as_i64()",
            ScalarKind::Number => "v.as_f64()",
        }
    }
}

/// One field of a generated model struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Rust field identifier (snake_case).
    pub ident: String,
    /// Inner Rust type; every model field is wrapped in `Option`.
    pub rust_type: String,
}

impl FieldDef {
    pub fn render(&self) -> String {
        format!("    pub {}: Option<{}>,\n", self.ident, self.rust_type)
    }
}

/// One conversion statement reading a key out of an untyped JSON map into a
/// typed model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertStmt {
    Scalar {
        field: String,
        key: String,
        kind: ScalarKind,
    },
    /// Array of scalars. Only the non-empty case converts here; the empty
    /// case belongs to the empty-array fallback path.
    ScalarList {
        field: String,
        key: String,
        kind: ScalarKind,
    },
    /// Array of nested objects decoded by the named model's `from_value`.
    NestedList {
        field: String,
        key: String,
        elem_struct: String,
    },
    /// Nested object decoded by the named model's `from_value`.
    NestedObject {
        field: String,
        key: String,
        struct_name: String,
    },
}

impl ConvertStmt {
    pub fn render(&self) -> String {
        match self {
            ConvertStmt::Scalar { field, key, kind } => {
                let (accessor, value_expr) = match kind {
                    ScalarKind::String => ("v.as_str()", "value.to_string()"),
                    ScalarKind::Bool => ("v.as_bool()", "value"),
                    ScalarKind::Int32 => ("v.as_i64()", "value as i32"),
                    ScalarKind::Int64 => ("v.as_i64()", "value"),
                    ScalarKind::Number => ("v.as_f64()", "value"),
                };
                format!(
                    "        if let Some(value) = data.get(\"{key}\").and_then(|v| {accessor}) {{\n            dto.{field} = Some({value_expr});\n        }}\n"
                )
            }
            ConvertStmt::ScalarList { field, key, kind } => format!(
                "        if let Some(items) = data.get(\"{key}\").and_then(|v| v.as_array()) {{\n            if !items.is_empty() {{\n                dto.{field} = Some(items.iter().filter_map(|v| {}).collect());\n            }}\n        }}\n",
                kind.element_expr()
            ),
            ConvertStmt::NestedList {
                field,
                key,
                elem_struct,
            } => format!(
                "        if let Some(items) = data.get(\"{key}\").and_then(|v| v.as_array()) {{\n            if !items.is_empty() {{\n                dto.{field} = Some(items.iter().map({elem_struct}::from_value).collect());\n            }}\n        }}\n"
            ),
            ConvertStmt::NestedObject {
                field,
                key,
                struct_name,
            } => format!(
                "        if let Some(value) = data.get(\"{key}\") {{\n            if value.is_object() {{\n                dto.{field} = Some({struct_name}::from_value(value));\n            }}\n        }}\n"
            ),
        }
    }
}

/// Null-safe fallback statements, generated as code paths separate from the
/// main conversion: the map-read site cannot distinguish "key absent" from
/// "key present but empty array" without them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NullFallback {
    /// Key absent from the payload: the field is explicitly null.
    Absent { field: String, key: String },
    /// Key present with an empty array: an empty collection, not null.
    EmptyArray { field: String, key: String },
}

impl NullFallback {
    /// Render with the given receiver (`self` in fallback methods, `dto`
    /// inline in nested `from_value` bodies).
    pub fn render(&self, receiver: &str) -> String {
        match self {
            NullFallback::Absent { field, key } => format!(
                "        if data.get(\"{key}\").is_none() {{\n            {receiver}.{field} = None;\n        }}\n"
            ),
            NullFallback::EmptyArray { field, key } => format!(
                "        if let Some(items) = data.get(\"{key}\").and_then(|v| v.as_array()) {{\n            if items.is_empty() {{\n                {receiver}.{field} = Some(Vec::new());\n            }}\n        }}\n"
            ),
        }
    }
}

/// A generated model: struct declaration plus its decoding logic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
    pub statements: Vec<ConvertStmt>,
    pub null_fallbacks: Vec<NullFallback>,
    pub empty_array_fallbacks: Vec<NullFallback>,
}

impl ModelDef {
    pub fn render_fields(&self) -> String {
        self.fields.iter().map(FieldDef::render).collect()
    }

    pub fn render_statements(&self) -> String {
        self.statements.iter().map(ConvertStmt::render).collect()
    }

    pub fn render_null_fallbacks(&self, receiver: &str) -> String {
        self.null_fallbacks
            .iter()
            .map(|f| f.render(receiver))
            .collect()
    }

    pub fn render_empty_array_fallbacks(&self, receiver: &str) -> String {
        self.empty_array_fallbacks
            .iter()
            .map(|f| f.render(receiver))
            .collect()
    }

    /// Full rendering used for nested models: struct plus a `from_value`
    /// that inlines both fallback paths.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("#[derive(Debug, Clone, Default)]\npub struct {} {{\n", self.name));
        out.push_str(&self.render_fields());
        out.push_str("}\n\n");

        out.push_str(&format!("impl {} {{\n", self.name));
        out.push_str(&format!(
            "    pub fn from_value(data: &serde_json::Value) -> {} {{\n",
            self.name
        ));
        out.push_str(&format!("        let mut dto = {}::default();\n", self.name));
        out.push_str(&self.render_statements());
        out.push_str(&self.render_null_fallbacks("dto"));
        out.push_str(&self.render_empty_array_fallbacks("dto"));
        out.push_str("        dto\n    }\n}\n\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_statement_guards_absence() {
        let stmt = ConvertStmt::Scalar {
            field: "tenant_id".to_string(),
            key: "tenant_id".to_string(),
            kind: ScalarKind::String,
        };
        let rendered = stmt.render();
        assert!(rendered.contains("data.get(\"tenant_id\")"));
        assert!(rendered.contains("dto.tenant_id = Some(value.to_string());"));
    }

    #[test]
    fn empty_array_fallback_is_distinct_from_absent() {
        let absent = NullFallback::Absent {
            field: "stages".to_string(),
            key: "stages".to_string(),
        }
        .render("self");
        let empty = NullFallback::EmptyArray {
            field: "stages".to_string(),
            key: "stages".to_string(),
        }
        .render("self");

        assert!(absent.contains("is_none()"));
        assert!(absent.contains("self.stages = None;"));
        assert!(empty.contains("items.is_empty()"));
        assert!(empty.contains("self.stages = Some(Vec::new());"));
    }

    #[test]
    fn nested_model_renders_struct_and_decoder() {
        let model = ModelDef {
            name: "ApiStages".to_string(),
            fields: vec![FieldDef {
                ident: "stage_id".to_string(),
                rust_type: "String".to_string(),
            }],
            statements: vec![ConvertStmt::Scalar {
                field: "stage_id".to_string(),
                key: "stage_id".to_string(),
                kind: ScalarKind::String,
            }],
            null_fallbacks: vec![],
            empty_array_fallbacks: vec![],
        };

        let rendered = model.render();
        assert!(rendered.contains("pub struct ApiStages {"));
        assert!(rendered.contains("pub stage_id: Option<String>,"));
        assert!(rendered.contains("pub fn from_value(data: &serde_json::Value) -> ApiStages {"));
    }
}
