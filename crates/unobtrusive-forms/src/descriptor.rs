//! Rule descriptors: the client-side validation metadata of one field.
//!
//! A [`RuleDescriptorMap`] is an ordered map from unprefixed rule keys
//! (`"required"`, `"range-min"`, ...) to [`RuleValue`]s. Hosts usually render
//! it as `data-val-*` attributes, see [`RuleDescriptorMap::to_attrs`].

use std::collections::HashMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use unobtrusive_core::utils::text::escape_html;

use crate::constraints::Limit;

/// Rule keys emitted by the builder.
pub mod keys {
    /// Marker present on every field with at least one constraint.
    pub const VAL: &str = "val";
    /// Required message.
    pub const REQUIRED: &str = "required";
    /// Regex message.
    pub const REGEX: &str = "regex";
    /// Regex pattern.
    pub const REGEX_PATTERN: &str = "regex-pattern";
    /// Range message.
    pub const RANGE: &str = "range";
    /// Range lower bound.
    pub const RANGE_MIN: &str = "range-min";
    /// Range upper bound.
    pub const RANGE_MAX: &str = "range-max";
    /// Length message.
    pub const LENGTH: &str = "length";
    /// Length lower bound.
    pub const LENGTH_MIN: &str = "length-min";
    /// Length upper bound.
    pub const LENGTH_MAX: &str = "length-max";
    /// Integer message.
    pub const DIGITS: &str = "digits";
    /// Number message.
    pub const NUMBER: &str = "number";
    /// Date message.
    pub const DATE: &str = "date";
    /// Email message.
    pub const EMAIL: &str = "email";
    /// Credit card message.
    pub const CREDIT_CARD: &str = "creditcard";
    /// URL message.
    pub const URL: &str = "url";
}

/// Default attribute prefix used by hosts rendering descriptors as markup.
pub const DEFAULT_PREFIX: &str = "data-val";

/// The value of a single rule descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleValue {
    /// A boolean marker (only `val` uses this).
    Flag(bool),
    /// A numeric rule parameter.
    Number(Limit),
    /// A message or a textual parameter such as a pattern.
    Text(String),
}

impl RuleValue {
    /// Returns the text, if this is a [`RuleValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag(_) | Self::Number(_) => None,
        }
    }

    /// Returns the number, if this is a [`RuleValue::Number`].
    pub const fn as_number(&self) -> Option<Limit> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Flag(_) | Self::Text(_) => None,
        }
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for RuleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flag(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<bool> for RuleValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Limit> for RuleValue {
    fn from(value: Limit) -> Self {
        Self::Number(value)
    }
}

impl From<String> for RuleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// An ordered map of rule key to [`RuleValue`].
///
/// Keys keep the position of their first insertion; inserting an existing
/// key replaces its value (last write wins).
///
/// # Examples
///
/// ```
/// use unobtrusive_forms::descriptor::{RuleDescriptorMap, RuleValue};
///
/// let mut rules = RuleDescriptorMap::new();
/// rules.insert("val", true);
/// rules.insert("range", "first");
/// rules.insert("range-min", unobtrusive_forms::Limit::Int(5));
/// rules.insert("range", "second");
///
/// let keys: Vec<&str> = rules.keys().collect();
/// assert_eq!(keys, vec!["val", "range", "range-min"]);
/// assert_eq!(rules.get("range"), Some(&RuleValue::Text("second".into())));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleDescriptorMap {
    entries: Vec<(String, RuleValue)>,
}

impl RuleDescriptorMap {
    /// Creates an empty map.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a value, replacing (in place) and returning any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RuleValue>) -> Option<RuleValue> {
        let key = key.into();
        let value = value.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(existing, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&RuleValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns the text value for `key`, if it is a message or pattern.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(RuleValue::as_text)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns `(attribute, value)` pairs with `prefix` applied.
    ///
    /// The `val` marker becomes the bare prefix; every other key `k` becomes
    /// `prefix-k`. An empty prefix leaves keys unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use unobtrusive_forms::descriptor::RuleDescriptorMap;
    ///
    /// let mut rules = RuleDescriptorMap::new();
    /// rules.insert("val", true);
    /// rules.insert("required", "Required!");
    /// assert_eq!(
    ///     rules.to_attrs("data-val"),
    ///     vec![
    ///         ("data-val".to_string(), "true".to_string()),
    ///         ("data-val-required".to_string(), "Required!".to_string()),
    ///     ]
    /// );
    /// ```
    pub fn to_attrs(&self, prefix: &str) -> Vec<(String, String)> {
        self.iter()
            .map(|(key, value)| (attribute_name(prefix, key), value.to_string()))
            .collect()
    }

    /// Renders the descriptors as ` name="value"` HTML attribute pairs, in
    /// map order, with values HTML-escaped.
    pub fn render_attrs(&self, prefix: &str) -> String {
        self.to_attrs(prefix)
            .into_iter()
            .map(|(name, value)| format!(r#" {name}="{}""#, escape_html(&value)))
            .collect()
    }

    /// Merges the prefixed descriptors into a host-owned attribute bag,
    /// overwriting attributes with the same name.
    pub fn merge_into(&self, attrs: &mut HashMap<String, String>, prefix: &str) {
        attrs.extend(self.to_attrs(prefix));
    }
}

/// Maps a rule key to its attribute name under `prefix`.
pub fn attribute_name(prefix: &str, key: &str) -> String {
    match (prefix.is_empty(), key == keys::VAL) {
        (true, _) => key.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}-{key}"),
    }
}

impl Serialize for RuleDescriptorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a RuleDescriptorMap {
    type Item = &'a (String, RuleValue);
    type IntoIter = std::slice::Iter<'a, (String, RuleValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for RuleDescriptorMap {
    type Item = (String, RuleValue);
    type IntoIter = std::vec::IntoIter<(String, RuleValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
