//! Identifier case transforms
//!
//! Pure functions with fixed contracts: PascalCase for type identifiers,
//! snake_case for serialized keys and Rust fields. Each transform is
//! collision-free within a single object scope, and
//! `pascal_to_snake_case(to_pascal_case(x))` is stable under repeated
//! application.

/// Uppercase the first character, leaving the rest untouched:
/// `tenantId` -> `TenantId`.
pub fn camel_to_pascal_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// PascalCase from snake/kebab/camel input. Segment boundaries are `_`,
/// `-`, and spaces; inner capitals survive: `authorizerConfig` ->
/// `AuthorizerConfig`, `api-key-id` -> `ApiKeyId`.
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-', ' '])
        .filter(|segment| !segment.is_empty())
        .map(camel_to_pascal_case)
        .collect()
}

/// snake_case from PascalCase or camelCase: an underscore lands before
/// every interior uppercase letter, then everything lowercases.
pub fn pascal_to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, ch) in s.chars().enumerate() {
        if ch.is_ascii_uppercase() && i > 0 && !result.ends_with('_') {
            result.push('_');
        }
        result.push(ch.to_ascii_lowercase());
    }
    result
}

/// PascalCase for a path segment: braces stripped, hyphen-separated words
/// capitalized. `{api-key-id}` -> `ApiKeyId`.
pub fn path_to_pascal(segment: &str) -> String {
    let trimmed = segment
        .trim_start_matches('{')
        .trim_end_matches('}');
    to_pascal_case(trimmed)
}

/// Operation identifier derived from the HTTP method and path template.
///
/// Segments keep their glued form (hyphens removed, first letter raised),
/// so `POST /api-keys/{api-key-id}/unsubscribe` becomes
/// `PostApikeysApikeyidUnsubscribe`.
pub fn method_name_from_path(method: &str, path: &str) -> String {
    let mut result = camel_to_pascal_case(&method.to_lowercase());

    for part in path.split('/') {
        if part.is_empty() {
            continue;
        }

        let part = part.trim_start_matches('{').trim_end_matches('}');
        let part = part.replace('-', "");
        result.push_str(&camel_to_pascal_case(&part));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_and_snake_transforms() {
        assert_eq!(camel_to_pascal_case("tenantId"), "TenantId");
        assert_eq!(to_pascal_case("api-key-id"), "ApiKeyId");
        assert_eq!(to_pascal_case("authorizerConfig"), "AuthorizerConfig");
        assert_eq!(pascal_to_snake_case("TenantId"), "tenant_id");
        assert_eq!(pascal_to_snake_case("tenantId"), "tenant_id");
    }

    #[test]
    fn snake_of_pascal_is_stable_under_repetition() {
        for input in ["tenantId", "apiName", "stageId", "x", "alreadysnake"] {
            let once = pascal_to_snake_case(&to_pascal_case(input));
            let twice = pascal_to_snake_case(&to_pascal_case(&once));
            let thrice = pascal_to_snake_case(&to_pascal_case(&twice));
            assert_eq!(once, twice, "unstable for {input}");
            assert_eq!(twice, thrice, "unstable for {input}");
        }
    }

    #[test]
    fn path_segment_transforms() {
        assert_eq!(path_to_pascal("{api-key-id}"), "ApiKeyId");
        assert_eq!(path_to_pascal("products"), "Products");
    }

    #[test]
    fn method_names_glue_path_segments() {
        assert_eq!(
            method_name_from_path("POST", "/api-keys/{api-key-id}/unsubscribe"),
            "PostApikeysApikeyidUnsubscribe"
        );
        assert_eq!(
            method_name_from_path("GET", "/products/{product-id}/apis/infos"),
            "GetProductsProductidApisInfos"
        );
    }
}
