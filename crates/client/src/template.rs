//! `{name}` placeholder substitution in URL templates.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::request::Params;

#[allow(clippy::unwrap_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap());

/// Outcome of substituting a parameter mapping into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    /// Template with every matched placeholder replaced.
    pub value: String,
    /// Parameter names consumed by at least one placeholder, first-seen order.
    pub replaced_keys: Vec<String>,
    /// Placeholder names with no matching parameter, left verbatim.
    pub unreplaced_keys: Vec<String>,
}

/// Replace `{name}` placeholders with the stringified parameter of the same
/// name.
///
/// Missing parameters are not an error: their placeholder stays in the output
/// and the name is reported in `unreplaced_keys`. Values are inserted as-is,
/// without escaping.
pub fn resolve_template(template: &str, params: &Params) -> ResolvedTemplate {
    let mut replaced_keys: Vec<String> = Vec::new();
    let mut unreplaced_keys: Vec<String> = Vec::new();

    let value = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        let key = &caps[1];
        if let Some(replacement) = params.get(key) {
            if !replaced_keys.iter().any(|k| k == key) {
                replaced_keys.push(key.to_string());
            }
            replacement.to_string()
        } else {
            if !unreplaced_keys.iter().any(|k| k == key) {
                unreplaced_keys.push(key.to_string());
            }
            caps[0].to_string()
        }
    });

    ResolvedTemplate {
        value: value.into_owned(),
        replaced_keys,
        unreplaced_keys,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn test_replaces_matching_placeholders() {
        let resolved = resolve_template("/users/{id}/posts/{postId}", &params! {
            "id" => 7,
            "postId" => "abc",
        });
        assert_eq!(resolved.value, "/users/7/posts/abc");
        assert_eq!(resolved.replaced_keys, ["id", "postId"]);
        assert!(resolved.unreplaced_keys.is_empty());
    }

    #[test]
    fn test_missing_params_stay_verbatim() {
        let resolved = resolve_template("/a/{x}/b/{y}", &params! { "x" => 1 });
        assert_eq!(resolved.value, "/a/1/b/{y}");
        assert_eq!(resolved.replaced_keys, ["x"]);
        assert_eq!(resolved.unreplaced_keys, ["y"]);
    }

    #[test]
    fn test_repeated_placeholder_uses_one_lookup() {
        let resolved = resolve_template("/{id}/{id}", &params! { "id" => "q" });
        assert_eq!(resolved.value, "/q/q");
        assert_eq!(resolved.replaced_keys, ["id"]);
    }

    #[test]
    fn test_values_are_not_escaped() {
        let resolved = resolve_template("/{a}", &params! { "a" => "{b}" });
        assert_eq!(resolved.value, "/{b}");
    }

    #[test]
    fn test_unused_params_are_not_reported() {
        let input = params! { "id" => 1, "extra" => "x" };
        let resolved = resolve_template("/items/{id}", &input);
        assert_eq!(resolved.replaced_keys, ["id"]);
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn test_template_without_placeholders() {
        let resolved = resolve_template("/plain/path", &Params::new());
        assert_eq!(resolved.value, "/plain/path");
        assert!(resolved.replaced_keys.is_empty());
        assert!(resolved.unreplaced_keys.is_empty());
    }
}
