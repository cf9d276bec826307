//! Merge and override operations over data source attribute sets

use std::collections::BTreeMap;

use tf_openapi_generator_common::config::AttributeOverride;
use tf_openapi_generator_common::spec::datasource::{Attribute, AttributeKind};
use tf_openapi_generator_common::spec::schema::Computability;

use super::{fill_description, relax_computability, MergeConflict};

/// Ordered collection of data source attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSourceAttributes(Vec<Attribute>);

impl DataSourceAttributes {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        DataSourceAttributes(attributes)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn to_spec(self) -> Vec<Attribute> {
        self.0
    }

    pub fn merge(
        mut self,
        sources: impl IntoIterator<Item = DataSourceAttributes>,
    ) -> (Self, Vec<MergeConflict>) {
        let mut conflicts = Vec::new();
        for source in sources {
            merge_into(&mut self.0, source.0, "", &mut conflicts);
        }
        (self, conflicts)
    }

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
    use tf_openapi_generator_common::spec::datasource::StringAttribute;

    fn string_attr(name: &str, computability: Computability) -> Attribute {
        Attribute {
            name: name.to_string(),
            kind: AttributeKind::String(StringAttribute {
                computed_optional_required: computability,
                deprecation_message: None,
                description: None,
                validators: vec![],
            }),
        }
    }

    #[test]
    fn parameters_take_precedence_over_response_attributes() {
        // The data source mapper merges parameters first, so a parameter's
        // Required marking survives a Computed response sighting only as
        // ComputedOptional relaxation when the response also carries it.
        let params = DataSourceAttributes::new(vec![string_attr("api_id", Computability::Required)]);
        let response = DataSourceAttributes::new(vec![
            string_attr("api_id", Computability::Computed),
            string_attr("api_name", Computability::Computed),
        ]);

        let (merged, conflicts) = params.merge(vec![response]);
        assert!(conflicts.is_empty());

        let attrs = merged.to_spec();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].name, "api_id");
        let AttributeKind::String(api_id) = &attrs[0].kind else {
            panic!("expected string");
        };
        assert_eq!(
            api_id.computed_optional_required,
            Computability::ComputedOptional
        );
    }
}
