//! Merge and override operations over resource attribute sets

use std::collections::BTreeMap;

use tf_openapi_generator_common::config::AttributeOverride;
use tf_openapi_generator_common::spec::resource::{Attribute, AttributeKind};
use tf_openapi_generator_common::spec::schema::Computability;

use super::{fill_description, relax_computability, MergeConflict};

/// Ordered collection of resource attributes. Order is first-seen wins
/// across merge sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceAttributes(Vec<Attribute>);

impl ResourceAttributes {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        ResourceAttributes(attributes)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Hand off the final attribute list for the IR.
    pub fn to_spec(self) -> Vec<Attribute> {
        self.0
    }

    /// Fold additional attribute sets into this one, in order.
    pub fn merge(
        mut self,
        sources: impl IntoIterator<Item = ResourceAttributes>,
    ) -> (Self, Vec<MergeConflict>) {
        let mut conflicts = Vec::new();
        for source in sources {
            merge_into(&mut self.0, source.0, "", &mut conflicts);
        }
        (self, conflicts)
    }

    /// Patch attributes by name. Unmatched override keys are a no-op.
    pub fn apply_overrides(mut self, overrides: &BTreeMap<String, AttributeOverride>) -> Self {
        for attribute in &mut self.0 {
            if let Some(patch) = overrides.get(&attribute.name) {
                let (computability, description) = parts_mut(&mut attribute.kind);
                if let Some(text) = &patch.description {
                    *description = Some(text.clone());
                }
                if let Some(value) = patch.computed_optional_required {
                    *computability = value;
                }
            }
        }
        self
    }
}

fn merge_into(
    target: &mut Vec<Attribute>,
    source: Vec<Attribute>,
    prefix: &str,
    conflicts: &mut Vec<MergeConflict>,
) {
    for attribute in source {
        match target.iter_mut().find(|a| a.name == attribute.name) {
            None => target.push(attribute),
            Some(existing) => merge_attribute(existing, attribute, prefix, conflicts),
        }
    }
}

fn merge_attribute(
    existing: &mut Attribute,
    other: Attribute,
    prefix: &str,
    conflicts: &mut Vec<MergeConflict>,
) {
    let path = if prefix.is_empty() {
        existing.name.clone()
    } else {
        format!("{}.{}", prefix, existing.name)
    };

    if existing.kind.kind_name() != other.kind.kind_name() {
        conflicts.push(MergeConflict {
            attribute: path,
            kept: existing.kind.kind_name(),
            other: other.kind.kind_name(),
        });
        return;
    }

    match (&mut existing.kind, other.kind) {
        (AttributeKind::SingleNested(a), AttributeKind::SingleNested(b)) => {
            fill_description(&mut a.description, b.description);
            relax_computability(&mut a.computed_optional_required, b.computed_optional_required);
            merge_into(&mut a.attributes, b.attributes, &path, conflicts);
        }
        (AttributeKind::ListNested(a), AttributeKind::ListNested(b)) => {
            fill_description(&mut a.description, b.description);
            relax_computability(&mut a.computed_optional_required, b.computed_optional_required);
            merge_into(
                &mut a.nested_object.attributes,
                b.nested_object.attributes,
                &path,
                conflicts,
            );
        }
        (AttributeKind::SetNested(a), AttributeKind::SetNested(b)) => {
            fill_description(&mut a.description, b.description);
            relax_computability(&mut a.computed_optional_required, b.computed_optional_required);
            merge_into(
                &mut a.nested_object.attributes,
                b.nested_object.attributes,
                &path,
                conflicts,
            );
        }
        (AttributeKind::MapNested(a), AttributeKind::MapNested(b)) => {
            fill_description(&mut a.description, b.description);
            relax_computability(&mut a.computed_optional_required, b.computed_optional_required);
            merge_into(
                &mut a.nested_object.attributes,
                b.nested_object.attributes,
                &path,
                conflicts,
            );
        }
        (kind, other_kind) => {
            let (other_computability, other_description) = parts(&other_kind);
            let (computability, description) = parts_mut(kind);
            fill_description(description, other_description);
            relax_computability(computability, other_computability);
        }
    }
}

fn parts(kind: &AttributeKind) -> (Computability, Option<String>) {
    match kind {
        AttributeKind::String(a) => (a.computed_optional_required, a.description.clone()),
        AttributeKind::Bool(a) => (a.computed_optional_required, a.description.clone()),
        AttributeKind::Int32(a) => (a.computed_optional_required, a.description.clone()),
        AttributeKind::Int64(a) => (a.computed_optional_required, a.description.clone()),
        AttributeKind::Number(a) => (a.computed_optional_required, a.description.clone()),
        AttributeKind::List(a) => (a.computed_optional_required, a.description.clone()),
        AttributeKind::Set(a) => (a.computed_optional_required, a.description.clone()),
        AttributeKind::Map(a) => (a.computed_optional_required, a.description.clone()),
        AttributeKind::SingleNested(a) => (a.computed_optional_required, a.description.clone()),
        AttributeKind::ListNested(a) => (a.computed_optional_required, a.description.clone()),
        AttributeKind::SetNested(a) => (a.computed_optional_required, a.description.clone()),
        AttributeKind::MapNested(a) => (a.computed_optional_required, a.description.clone()),
    }
}

fn parts_mut(kind: &mut AttributeKind) -> (&mut Computability, &mut Option<String>) {
    match kind {
        AttributeKind::String(a) => (&mut a.computed_optional_required, &mut a.description),
        AttributeKind::Bool(a) => (&mut a.computed_optional_required, &mut a.description),
        AttributeKind::Int32(a) => (&mut a.computed_optional_required, &mut a.description),
        AttributeKind::Int64(a) => (&mut a.computed_optional_required, &mut a.description),
        AttributeKind::Number(a) => (&mut a.computed_optional_required, &mut a.description),
        AttributeKind::List(a) => (&mut a.computed_optional_required, &mut a.description),
        AttributeKind::Set(a) => (&mut a.computed_optional_required, &mut a.description),
        AttributeKind::Map(a) => (&mut a.computed_optional_required, &mut a.description),
        AttributeKind::SingleNested(a) => (&mut a.computed_optional_required, &mut a.description),
        AttributeKind::ListNested(a) => (&mut a.computed_optional_required, &mut a.description),
        AttributeKind::SetNested(a) => (&mut a.computed_optional_required, &mut a.description),
        AttributeKind::MapNested(a) => (&mut a.computed_optional_required, &mut a.description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_openapi_generator_common::spec::resource::StringAttribute;

    fn string_attr(name: &str, computability: Computability, description: Option<&str>) -> Attribute {
        Attribute {
            name: name.to_string(),
            kind: AttributeKind::String(StringAttribute {
                computed_optional_required: computability,
                default: None,
                deprecation_message: None,
                description: description.map(str::to_string),
                validators: vec![],
            }),
        }
    }

    fn bool_attr(name: &str, computability: Computability) -> Attribute {
        Attribute {
            name: name.to_string(),
            kind: AttributeKind::Bool(tf_openapi_generator_common::spec::resource::BoolAttribute {
                computed_optional_required: computability,
                default: None,
                deprecation_message: None,
                description: None,
            }),
        }
    }

    fn names(attrs: &ResourceAttributes) -> Vec<String> {
        attrs.0.iter().map(|a| a.name.clone()).collect()
    }

    #[test]
    fn merge_keeps_first_seen_and_adds_new_names() {
        let main = ResourceAttributes::new(vec![
            string_attr("api_name", Computability::Required, Some("from create")),
            bool_attr("disabled", Computability::ComputedOptional),
        ]);
        let response = ResourceAttributes::new(vec![
            string_attr("api_name", Computability::Computed, Some("from response")),
            string_attr("api_id", Computability::Computed, None),
        ]);

        let (merged, conflicts) = main.merge(vec![response]);
        assert!(conflicts.is_empty());
        assert_eq!(names(&merged), vec!["api_name", "disabled", "api_id"]);

        let AttributeKind::String(api_name) = &merged.0[0].kind else {
            panic!("expected string");
        };
        // First-seen description wins; Required relaxes against Computed.
        assert_eq!(api_name.description.as_deref(), Some("from create"));
        assert_eq!(
            api_name.computed_optional_required,
            Computability::ComputedOptional
        );
    }

    #[test]
    fn merge_is_associative_in_covered_names() {
        let a = || ResourceAttributes::new(vec![string_attr("a", Computability::Required, None)]);
        let b = || ResourceAttributes::new(vec![string_attr("b", Computability::Computed, None)]);
        let c = || {
            ResourceAttributes::new(vec![
                string_attr("a", Computability::Computed, None),
                string_attr("c", Computability::Computed, None),
            ])
        };

        let (all_at_once, _) = a().merge(vec![b(), c()]);
        let (pairwise, _) = a().merge(vec![b()]);
        let (pairwise, _) = pairwise.merge(vec![c()]);

        assert_eq!(names(&all_at_once), names(&pairwise));
        assert_eq!(names(&all_at_once), vec!["a", "b", "c"]);
    }

    #[test]
    fn kind_conflicts_are_reported_not_merged() {
        let main = ResourceAttributes::new(vec![string_attr("count", Computability::Required, None)]);
        let other = ResourceAttributes::new(vec![bool_attr("count", Computability::Computed)]);

        let (merged, conflicts) = main.merge(vec![other]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].attribute, "count");
        assert_eq!(conflicts[0].kept, "string");
        assert_eq!(conflicts[0].other, "bool");
        // First-seen kind survives.
        assert!(matches!(merged.0[0].kind, AttributeKind::String(_)));
    }

    #[test]
    fn merge_fills_missing_description() {
        let main = ResourceAttributes::new(vec![string_attr("api_id", Computability::Required, None)]);
        let other = ResourceAttributes::new(vec![string_attr(
            "api_id",
            Computability::Required,
            Some("Api Id"),
        )]);

        let (merged, _) = main.merge(vec![other]);
        let AttributeKind::String(api_id) = &merged.0[0].kind else {
            panic!("expected string");
        };
        assert_eq!(api_id.description.as_deref(), Some("Api Id"));
        // Required + Required stays Required.
        assert_eq!(api_id.computed_optional_required, Computability::Required);
    }

    #[test]
    fn apply_overrides_is_idempotent_and_permissive() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "api_name".to_string(),
            AttributeOverride {
                description: Some("patched".to_string()),
                computed_optional_required: Some(Computability::Optional),
            },
        );
        overrides.insert(
            "no_such_attribute".to_string(),
            AttributeOverride {
                description: Some("ignored".to_string()),
                computed_optional_required: None,
            },
        );

        let attrs = ResourceAttributes::new(vec![string_attr(
            "api_name",
            Computability::Required,
            Some("original"),
        )]);

        let once = attrs.apply_overrides(&overrides);
        let twice = once.clone().apply_overrides(&overrides);
        assert_eq!(once, twice);

        let AttributeKind::String(api_name) = &once.0[0].kind else {
            panic!("expected string");
        };
        assert_eq!(api_name.description.as_deref(), Some("patched"));
        assert_eq!(api_name.computed_optional_required, Computability::Optional);
    }

    #[test]
    fn nested_attributes_merge_recursively() {
        use tf_openapi_generator_common::spec::resource::SingleNestedAttribute;

        let nested = |children: Vec<Attribute>, computability| Attribute {
            name: "config".to_string(),
            kind: AttributeKind::SingleNested(SingleNestedAttribute {
                attributes: children,
                computed_optional_required: computability,
                deprecation_message: None,
                description: None,
            }),
        };

        let main = ResourceAttributes::new(vec![nested(
            vec![string_attr("region", Computability::Required, None)],
            Computability::Required,
        )]);
        let other = ResourceAttributes::new(vec![nested(
            vec![
                string_attr("region", Computability::Computed, None),
                string_attr("function_id", Computability::Computed, None),
            ],
            Computability::Computed,
        )]);

        let (merged, conflicts) = main.merge(vec![other]);
        assert!(conflicts.is_empty());

        let AttributeKind::SingleNested(config) = &merged.0[0].kind else {
            panic!("expected single nested");
        };
        assert_eq!(
            config.computed_optional_required,
            Computability::ComputedOptional
        );
        let child_names: Vec<&str> = config.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(child_names, vec!["region", "function_id"]);
    }
}
