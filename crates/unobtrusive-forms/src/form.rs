//! Field descriptors and form-level aggregation.
//!
//! A [`FieldDescriptor`] bundles what the builder needs for one field: its
//! name, label, translation domain and ordered constraints. [`FormRules`]
//! builds the descriptors of every field of a form, in field order, and
//! serializes them as one JSON object keyed by field name.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use unobtrusive_core::{TranslationDomain, UnobtrusiveResult};

use crate::builder::RuleDescriptorBuilder;
use crate::constraints::Constraint;
use crate::descriptor::RuleDescriptorMap;

/// One form field as seen by the rule descriptor builder.
///
/// When deserialized without a `label`, the label is derived from the name
/// (`first_name` becomes `first name`), as with [`FieldDescriptor::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawField")]
pub struct FieldDescriptor {
    /// The field name, used as the key in [`FormRules`].
    pub name: String,
    /// The human-readable label interpolated into messages.
    pub label: String,
    /// The translation domain for this field's messages.
    #[serde(default)]
    pub translation_domain: TranslationDomain,
    /// The field's constraints, in declaration order.
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

#[derive(Deserialize)]
struct RawField {
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    translation_domain: TranslationDomain,
    #[serde(default)]
    constraints: Vec<Constraint>,
}

impl From<RawField> for FieldDescriptor {
    fn from(raw: RawField) -> Self {
        let mut field = Self::new(raw.name);
        if let Some(label) = raw.label {
            field.label = label;
        }
        field.translation_domain = raw.translation_domain;
        field.constraints = raw.constraints;
        field
    }
}

impl FieldDescriptor {
    /// Creates a field with no constraints and a label derived from `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let label = name.replace('_', " ");
        Self {
            name,
            label,
            translation_domain: TranslationDomain::Default,
            constraints: Vec::new(),
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the translation domain.
    #[must_use]
    pub fn translation_domain(mut self, domain: impl Into<TranslationDomain>) -> Self {
        self.translation_domain = domain.into();
        self
    }

    /// Appends a constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Appends several constraints, keeping their order.
    #[must_use]
    pub fn constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }
}

/// The rule descriptors of every field of a form, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormRules {
    fields: Vec<(String, RuleDescriptorMap)>,
}

impl FormRules {
    /// Builds the descriptors for `fields`.
    ///
    /// Fields without constraints are kept with an empty map so hosts can
    /// still look them up. A repeated field name replaces the earlier entry.
    pub fn build(builder: &RuleDescriptorBuilder, fields: &[FieldDescriptor]) -> Self {
        let mut rules = Self::default();
        for field in fields {
            rules.insert(field.name.clone(), builder.build_field(field));
        }
        tracing::debug!(fields = rules.len(), "built form rules");
        rules
    }

    /// Parses a JSON array of fields and builds their descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`UnobtrusiveError::SerializationError`] if `json` is not a
    /// valid field list.
    ///
    /// [`UnobtrusiveError::SerializationError`]: unobtrusive_core::UnobtrusiveError::SerializationError
    pub fn from_json(builder: &RuleDescriptorBuilder, json: &str) -> UnobtrusiveResult<Self> {
        let fields = parse_fields(json)?;
        Ok(Self::build(builder, &fields))
    }

    fn insert(&mut self, name: String, map: RuleDescriptorMap) {
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = map;
        } else {
            self.fields.push((name, map));
        }
    }

    /// Returns the descriptors of the named field.
    pub fn get(&self, name: &str) -> Option<&RuleDescriptorMap> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(field name, descriptors)` in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleDescriptorMap)> {
        self.fields.iter().map(|(n, m)| (n.as_str(), m))
    }

    /// Serializes the rules as a JSON object keyed by field name.
    ///
    /// # Errors
    ///
    /// Returns [`UnobtrusiveError::SerializationError`] if serialization
    /// fails.
    ///
    /// [`UnobtrusiveError::SerializationError`]: unobtrusive_core::UnobtrusiveError::SerializationError
    pub fn to_json(&self) -> UnobtrusiveResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for FormRules {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, rules) in &self.fields {
            map.serialize_entry(name, rules)?;
        }
        map.end()
    }
}

/// Parses a JSON array of [`FieldDescriptor`]s.
///
/// # Errors
///
/// Returns [`UnobtrusiveError::SerializationError`] on malformed input.
///
/// [`UnobtrusiveError::SerializationError`]: unobtrusive_core::UnobtrusiveError::SerializationError
pub fn parse_fields(json: &str) -> UnobtrusiveResult<Vec<FieldDescriptor>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::Limit;
    use crate::descriptor::{keys, RuleValue};

    #[test]
    fn test_field_label_from_name() {
        let field = FieldDescriptor::new("first_name");
        assert_eq!(field.label, "first name");
        assert_eq!(field.translation_domain, TranslationDomain::Default);
        assert!(field.constraints.is_empty());
    }

    #[test]
    fn test_field_builder_methods() {
        let field = FieldDescriptor::new("age")
            .label("Age")
            .translation_domain("validators")
            .constraint(Constraint::Required)
            .constraints([Constraint::range(Some(Limit::Int(18)), None), Constraint::Email]);
        assert_eq!(field.label, "Age");
        assert_eq!(field.translation_domain, TranslationDomain::named("validators"));
        assert_eq!(field.constraints.len(), 3);
        assert_eq!(field.constraints[0], Constraint::Required);
    }

    #[test]
    fn test_parse_fields_defaults_and_domains() {
        let fields = parse_fields(
            r#"[
                {"name": "user_name", "constraints": [{"kind": "required"}]},
                {"name": "age", "label": "Age", "translation_domain": "forms",
                 "constraints": [{"kind": "range", "min": 18}]},
                {"name": "bio", "translation_domain": false,
                 "constraints": [{"kind": "length", "max": 500}, {"kind": "not_null"}]}
            ]"#,
        )
        .unwrap();

        assert_eq!(fields[0].label, "user name");
        assert_eq!(fields[0].translation_domain, TranslationDomain::Default);
        assert_eq!(fields[1].translation_domain, TranslationDomain::named("forms"));
        assert_eq!(
            fields[1].constraints[0],
            Constraint::range(Some(Limit::Int(18)), None)
        );
        assert_eq!(fields[2].translation_domain, TranslationDomain::Disabled);
        assert_eq!(fields[2].constraints[1], Constraint::Unrecognized);
    }

    #[test]
    fn test_parse_fields_malformed() {
        assert!(parse_fields("{not json").is_err());
        assert!(parse_fields(r#"[{"label": "no name"}]"#).is_err());
    }

    #[test]
    fn test_form_rules_preserve_field_order() {
        let fields = vec![
            FieldDescriptor::new("zeta").constraint(Constraint::Required),
            FieldDescriptor::new("alpha").constraint(Constraint::Email),
            FieldDescriptor::new("notes"),
        ];
        let rules = FormRules::build(&RuleDescriptorBuilder::new(), &fields);

        let names: Vec<_> = rules.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["zeta", "alpha", "notes"]);
        assert!(rules.get("notes").unwrap().is_empty());
        assert_eq!(
            rules.get("zeta").unwrap().text(keys::REQUIRED),
            Some("The 'zeta' field is required.")
        );
        assert!(rules.get("missing").is_none());
    }

    #[test]
    fn test_form_rules_repeated_name_replaces() {
        let fields = vec![
            FieldDescriptor::new("a").constraint(Constraint::Required),
            FieldDescriptor::new("b").constraint(Constraint::Url),
            FieldDescriptor::new("a").constraint(Constraint::Email),
        ];
        let rules = FormRules::build(&RuleDescriptorBuilder::new(), &fields);
        assert_eq!(rules.len(), 2);
        let a = rules.get("a").unwrap();
        assert!(a.contains_key(keys::EMAIL));
        assert!(!a.contains_key(keys::REQUIRED));
    }

    #[test]
    fn test_form_rules_to_json() {
        let fields = vec![FieldDescriptor::new("age")
            .label("Age")
            .constraint(Constraint::range(Some(Limit::Int(18)), None))];
        let json = FormRules::build(&RuleDescriptorBuilder::new(), &fields)
            .to_json()
            .unwrap();
        assert_eq!(
            json,
            r#"{"age":{"val":true,"range-min":18,"range":"The field 'Age' value should be 18 or more."}}"#
        );
    }

    #[test]
    fn test_form_rules_from_json() {
        let rules = FormRules::from_json(
            &RuleDescriptorBuilder::new(),
            r#"[{"name": "email", "constraints": [{"kind": "email"}]}]"#,
        )
        .unwrap();
        assert_eq!(
            rules.get("email").unwrap().get(keys::VAL),
            Some(&RuleValue::Flag(true))
        );
    }
}
