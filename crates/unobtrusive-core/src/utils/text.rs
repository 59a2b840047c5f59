//! String utility functions.
//!
//! Message templates use `{{ name }}` placeholders (inner whitespace is
//! optional). [`interpolate`] fills them in, [`escape_html`] makes values safe
//! to place inside a double-quoted HTML attribute.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Placeholder values keyed by bare placeholder name (`field_name`, `limit`, ...).
pub type Parameters = BTreeMap<String, String>;

fn placeholder_re() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder regex is valid")
    })
}

/// Builds a [`Parameters`] map from `(name, value)` pairs.
///
/// # Examples
///
/// ```
/// use unobtrusive_core::utils::text::params;
///
/// let p = params([("field_name", "Age"), ("limit", "18")]);
/// assert_eq!(p.get("limit").map(String::as_str), Some("18"));
/// ```
pub fn params<I, K, V>(pairs: I) -> Parameters
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Replaces every known `{{ name }}` placeholder with its value.
///
/// Placeholders without a value are left untouched.
///
/// # Examples
///
/// ```
/// use unobtrusive_core::utils::text::{interpolate, params};
///
/// let p = params([("field_name", "Age")]);
/// assert_eq!(
///     interpolate("The '{{ field_name }}' field is required.", &p),
///     "The 'Age' field is required."
/// );
/// assert_eq!(interpolate("{{field_name}} / {{ other }}", &p), "Age / {{ other }}");
/// ```
pub fn interpolate(template: &str, params: &Parameters) -> String {
    if params.is_empty() || !template.contains("{{") {
        return template.to_string();
    }
    placeholder_re()
        .replace_all(template, |caps: &Captures<'_>| {
            params
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Returns `true` if the string still contains a `{{ name }}` placeholder.
pub fn has_placeholders(s: &str) -> bool {
    placeholder_re().is_match(s)
}

/// Escapes HTML special characters in a string.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their HTML entity equivalents.
///
/// # Examples
///
/// ```
/// use unobtrusive_core::utils::text::escape_html;
///
/// assert_eq!(escape_html(r#"The 'a' <b>"#), "The &#x27;a&#x27; &lt;b&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
