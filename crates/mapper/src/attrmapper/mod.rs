//! Attribute merge and override engine
//!
//! Attribute sets sourced from different operation phases (create body,
//! create/read responses, read parameters, update bodies) are combined into
//! one non-duplicated list, then patched by hand-authored overrides.
//!
//! Merge rules: the first-seen attribute is authoritative for its kind and
//! position; later sources fill an empty description and relax a `Required`
//! marking toward `ComputedOptional` when any source reports the attribute
//! as computed. Kind disagreements between sources are never silently
//! merged; each one is reported as a [`MergeConflict`] for the mapper layer
//! to log.

mod datasource;
mod resource;

pub use datasource::DataSourceAttributes;
pub use resource::ResourceAttributes;

use std::fmt;

use tf_openapi_generator_common::spec::schema::Computability;

/// Two operation sources disagree on an attribute's kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflict {
    /// Dotted attribute path, e.g. `authorizer_config.payload`.
    pub attribute: String,
    /// Kind kept (from the first-seen source).
    pub kept: &'static str,
    /// Kind reported by the later source.
    pub other: &'static str,
}

impl fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attribute '{}' mapped as {} but a later source reports {}",
            self.attribute, self.kept, self.other
        )
    }
}

pub(crate) fn fill_description(target: &mut Option<String>, from: Option<String>) {
    let empty = target.as_deref().map_or(true, str::is_empty);
    if empty {
        if let Some(description) = from {
            if !description.is_empty() {
                *target = Some(description);
            }
        }
    }
}

pub(crate) fn relax_computability(target: &mut Computability, other: Computability) {
    if *target == Computability::Required
        && matches!(
            other,
            Computability::Computed | Computability::ComputedOptional
        )
    {
        *target = Computability::ComputedOptional;
    }
}
