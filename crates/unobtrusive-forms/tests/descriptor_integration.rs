//! Integration tests for the constraint -> rule descriptor pipeline.
//!
//! These tests drive the public API end to end:
//! 1. Building descriptors without a translator
//! 2. Localizing through a `CatalogTranslator` with domain overrides
//! 3. Wiring a builder from TOML settings
//! 4. Loading fields from JSON and rendering `data-val-*` attributes

use std::collections::HashMap;
use std::sync::Arc;

use unobtrusive_core::settings_loader;
use unobtrusive_core::{
    CatalogTranslator, EmptyBoundPolicy, RangeMessageMode, TranslationDomain, Translator,
    UnobtrusiveError,
};
use unobtrusive_forms::descriptor::keys;
use unobtrusive_forms::{
    Constraint, FieldDescriptor, FormRules, Limit, RuleDescriptorBuilder, RuleValue,
    DEFAULT_PREFIX,
};

// ============================================================================
// Shared helpers
// ============================================================================

fn age_constraints() -> Vec<Constraint> {
    vec![
        Constraint::Required,
        Constraint::range(Some(Limit::Int(18)), Some(Limit::Int(65))),
    ]
}

/// A French catalog with the label and the messages the age field needs.
fn french_translator() -> Arc<CatalogTranslator> {
    let translator = CatalogTranslator::new("fr");
    translator.register_translations(
        "fr",
        "validators",
        vec![
            ("Age", "Âge"),
            ("The '{{ field_name }}' field is required.", "Le champ '{{ field_name }}' est obligatoire."),
            (
                "The field '{{ field_name }}' value should be in range {{ min }} to {{ max }}.",
                "La valeur de '{{ field_name }}' doit être comprise entre {{ min }} et {{ max }}.",
            ),
        ],
    );
    translator.register_translations(
        "fr",
        "admin",
        vec![("The '{{ field_name }}' field is required.", "'{{ field_name }}' manquant.")],
    );
    Arc::new(translator)
}

// ============================================================================
// 1. Untranslated builds
// ============================================================================

#[test]
fn test_age_field_without_translator() {
    let rules = RuleDescriptorBuilder::new().build(
        &age_constraints(),
        "Age",
        &TranslationDomain::Default,
    );

    assert_eq!(
        rules.keys().collect::<Vec<_>>(),
        vec!["val", "required", "range-min", "range", "range-max"]
    );
    assert_eq!(rules.get("val"), Some(&RuleValue::Flag(true)));
    assert_eq!(rules.text("required"), Some("The 'Age' field is required."));
    assert_eq!(rules.get("range-min"), Some(&RuleValue::Number(Limit::Int(18))));
    assert_eq!(rules.get("range-max"), Some(&RuleValue::Number(Limit::Int(65))));
    assert_eq!(
        rules.text("range"),
        Some("The field 'Age' value should be in range 18 to 65.")
    );
}

#[test]
fn test_every_kind_in_one_field() {
    let constraints = vec![
        Constraint::Required,
        Constraint::regex("^[0-9]+$"),
        Constraint::length(Some(Limit::Int(4)), Some(Limit::Int(16))),
        Constraint::type_check("integer"),
        Constraint::Date,
        Constraint::Email,
        Constraint::credit_card(),
        Constraint::Url,
        Constraint::Unrecognized,
    ];
    let rules = RuleDescriptorBuilder::new().build(&constraints, "Code", &TranslationDomain::Default);

    for key in [
        keys::VAL,
        keys::REQUIRED,
        keys::REGEX,
        keys::REGEX_PATTERN,
        keys::LENGTH_MIN,
        keys::LENGTH_MAX,
        keys::LENGTH,
        keys::DIGITS,
        keys::DATE,
        keys::EMAIL,
        keys::CREDIT_CARD,
        keys::URL,
    ] {
        assert!(rules.contains_key(key), "missing {key}");
    }
    assert_eq!(rules.len(), 12);
}

// ============================================================================
// 2. Catalog translation
// ============================================================================

#[test]
fn test_catalog_translates_label_and_messages() {
    let builder = RuleDescriptorBuilder::with_translator(
        french_translator(),
        TranslationDomain::named("validators"),
    );
    let rules = builder.build(&age_constraints(), "Age", &TranslationDomain::Default);

    assert_eq!(rules.text("required"), Some("Le champ 'Âge' est obligatoire."));
    assert_eq!(
        rules.text("range"),
        Some("La valeur de 'Âge' doit être comprise entre 18 et 65.")
    );
}

#[test]
fn test_field_domain_overrides_builder_domain() {
    let builder = RuleDescriptorBuilder::with_translator(
        french_translator(),
        TranslationDomain::named("validators"),
    );
    let rules = builder.build(&[Constraint::Required], "Age", &TranslationDomain::named("admin"));

    // The "admin" domain has no label entry, so the label stays as given.
    assert_eq!(rules.text("required"), Some("'Age' manquant."));
}

#[test]
fn test_disabled_field_domain_bypasses_catalog() {
    let builder = RuleDescriptorBuilder::with_translator(
        french_translator(),
        TranslationDomain::named("validators"),
    );
    let rules = builder.build(&[Constraint::Required], "Age", &TranslationDomain::Disabled);
    assert_eq!(rules.text("required"), Some("The 'Age' field is required."));
}

#[test]
fn test_catalog_loaded_from_json() -> anyhow::Result<()> {
    let translator = CatalogTranslator::new("de");
    translator.load_from_json(
        "de",
        r#"{"domains": {"validators": {"messages": {
            "The '{{ field_name }}' field value is not a valid url.":
                "Das Feld '{{ field_name }}' enthält keine gültige URL."
        }}}}"#,
    )?;
    let builder = RuleDescriptorBuilder::with_translator(
        Arc::new(translator),
        TranslationDomain::named("validators"),
    );
    let rules = builder.build(&[Constraint::Url], "Homepage", &TranslationDomain::Default);
    assert_eq!(
        rules.text("url"),
        Some("Das Feld 'Homepage' enthält keine gültige URL.")
    );
    Ok(())
}

#[test]
fn test_plural_choice_through_catalog() {
    let translator = CatalogTranslator::new("en");
    translator.register_plural_translations(
        "en",
        "validators",
        vec![("item", "{{ count }} item", "{{ count }} items")],
    );
    let params = unobtrusive_core::utils::text::params([("count", "3")]);
    assert_eq!(
        translator.trans_choice("item", 3, &params, Some("validators")),
        "3 items"
    );
}

// ============================================================================
// 3. Settings
// ============================================================================

#[test]
fn test_builder_from_toml_settings() -> anyhow::Result<()> {
    let settings = settings_loader::from_toml_str(
        r#"
        language_code = "fr"
        translation_domain = "validators"
        range_messages = "combined_only"
        empty_bounds = "strict"
        "#,
    )?;
    assert_eq!(settings.range_messages, RangeMessageMode::CombinedOnly);
    assert_eq!(settings.empty_bounds, EmptyBoundPolicy::Strict);

    let translator: Arc<dyn Translator> = french_translator();
    let builder = RuleDescriptorBuilder::from_settings(&settings, Some(translator));

    let one_sided = builder.build(
        &[Constraint::range(Some(Limit::Int(18)), None)],
        "Age",
        &TranslationDomain::Default,
    );
    assert_eq!(one_sided.keys().collect::<Vec<_>>(), vec!["val"]);

    let both = builder.build(&age_constraints(), "Age", &TranslationDomain::Default);
    assert_eq!(
        both.text("range"),
        Some("La valeur de 'Âge' doit être comprise entre 18 et 65.")
    );
    Ok(())
}

#[test]
fn test_settings_disable_translation() -> anyhow::Result<()> {
    let settings = settings_loader::from_toml_str(
        r#"
        translation_domain = false
        attribute_prefix = "data-rule"
        "#,
    )?;
    assert_eq!(settings.translation_domain, TranslationDomain::Disabled);

    let translator: Arc<dyn Translator> = french_translator();
    let builder = RuleDescriptorBuilder::from_settings(&settings, Some(translator));
    let rules = builder.build(&[Constraint::Required], "Age", &TranslationDomain::Default);
    assert_eq!(rules.text("required"), Some("The 'Age' field is required."));
    assert_eq!(
        rules.render_attrs(&settings.attribute_prefix),
        r#" data-rule="true" data-rule-required="The &#x27;Age&#x27; field is required.""#
    );
    Ok(())
}

#[test]
fn test_builders_from_different_settings_are_independent() -> anyhow::Result<()> {
    let combined = RuleDescriptorBuilder::from_settings(
        &settings_loader::from_toml_str("range_messages = \"combined_only\"")?,
        None,
    );
    let one_sided = RuleDescriptorBuilder::from_settings(
        &settings_loader::from_toml_str("range_messages = \"one_sided\"")?,
        None,
    );
    let constraints = [Constraint::range(Some(Limit::Int(18)), None)];

    let a = combined.build(&constraints, "Age", &TranslationDomain::Default);
    let b = one_sided.build(&constraints, "Age", &TranslationDomain::Default);
    assert_eq!(a.keys().collect::<Vec<_>>(), vec!["val"]);
    assert_eq!(b.keys().collect::<Vec<_>>(), vec!["val", "range-min", "range"]);
    Ok(())
}

#[test]
fn test_invalid_settings_are_configuration_errors() {
    let err = settings_loader::from_toml_str("range_messages = \"sometimes\"").unwrap_err();
    assert!(err.is_configuration());
}

// ============================================================================
// 4. JSON fields and attribute rendering
// ============================================================================

#[test]
fn test_form_rules_from_json_fields() -> anyhow::Result<()> {
    let rules = FormRules::from_json(
        &RuleDescriptorBuilder::new(),
        r#"[
            {"name": "age", "label": "Age", "constraints": [
                {"kind": "required"},
                {"kind": "range", "min": 18, "max": 65}
            ]},
            {"name": "nickname", "constraints": [
                {"kind": "length_range", "max": 12},
                {"kind": "not_blank"}
            ]}
        ]"#,
    )?;

    let json: serde_json::Value = serde_json::from_str(&rules.to_json()?)?;
    assert_eq!(json["age"]["range-min"], 18);
    assert_eq!(json["age"]["val"], true);
    assert_eq!(
        json["nickname"]["length"],
        "The field 'nickname' should have 12 or less."
    );
    Ok(())
}

#[test]
fn test_render_attrs_for_input_tag() {
    let rules = RuleDescriptorBuilder::new().build(
        &[Constraint::Required, Constraint::regex("^<a&b>$")],
        "Tag",
        &TranslationDomain::Default,
    );
    let attrs = rules.render_attrs(DEFAULT_PREFIX);

    assert!(attrs.starts_with(r#" data-val="true" data-val-required="#));
    assert!(attrs.contains(r#"data-val-regex-pattern="^&lt;a&amp;b&gt;$""#));
    assert!(attrs.contains("The &#x27;Tag&#x27; field is required."));
}

#[test]
fn test_merge_into_host_attributes() {
    let rules = RuleDescriptorBuilder::new().build(
        &[Constraint::LessThanOrEqual { value: Limit::Int(10) }],
        "Qty",
        &TranslationDomain::Default,
    );
    let mut attrs = HashMap::from([("class".to_string(), "form-control".to_string())]);
    rules.merge_into(&mut attrs, "data-rule");

    assert_eq!(attrs["class"], "form-control");
    assert_eq!(attrs["data-rule"], "true");
    assert_eq!(attrs["data-rule-length-max"], "10");
    assert_eq!(
        attrs["data-rule-length"],
        "The field 'Qty' value should be less than 10."
    );
}

#[test]
fn test_field_descriptor_strict_build() {
    let field = FieldDescriptor::new("zip").constraint(Constraint::regex("([0-9"));
    let builder = RuleDescriptorBuilder::new();

    let err = builder
        .build_strict(&field.constraints, &field.label, &field.translation_domain)
        .unwrap_err();
    assert!(matches!(err, UnobtrusiveError::InvalidConstraint { .. }));

    // The permissive build passes the pattern through untouched.
    let rules = builder.build_field(&field);
    assert_eq!(rules.text("regex-pattern"), Some("([0-9"));
}
