//! Request target construction from base address, path template and params.

use crate::request::Params;
use crate::template::resolve_template;

/// Strip a single trailing `/` from a configured base address.
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.strip_suffix('/').unwrap_or(base_url).to_string()
}

/// Build the final request target.
///
/// Templates starting with `http` are absolute and ignore `base_url`.
/// Templates starting with `/` are appended to `base_url`; anything else is
/// joined with a `/`. When params are given, placeholders are substituted and
/// the leftover keys become the query string in iteration order. No
/// percent-encoding is applied.
pub fn build_request_url(base_url: &str, template: &str, params: Option<&Params>) -> String {
    let url_template = if template.starts_with("http") {
        template.to_string()
    } else if template.starts_with('/') {
        format!("{base_url}{template}")
    } else {
        format!("{base_url}/{template}")
    };

    let Some(params) = params else {
        return url_template;
    };

    let resolved = resolve_template(&url_template, params);
    let leftover: Vec<String> = params
        .iter()
        .filter(|(key, _)| !resolved.replaced_keys.contains(*key))
        .map(|(key, value)| format!("{key}={value}"))
        .collect();

    if leftover.is_empty() {
        resolved.value
    } else {
        format!("{}?{}", resolved.value, leftover.join("&"))
    }
}
