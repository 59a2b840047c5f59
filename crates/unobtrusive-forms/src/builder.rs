//! The rule descriptor builder.
//!
//! [`RuleDescriptorBuilder`] turns one field's ordered constraints into a
//! [`RuleDescriptorMap`]. Constraints are processed in order; every rule
//! writes its keys with last-write-wins semantics, so a later constraint
//! targeting the same key replaces the earlier value.
//!
//! Messages are localized through a [`Localizer`]. Without a translator (or
//! with translation disabled) the message id comes back verbatim and the
//! builder fills in its placeholders itself, unless
//! [`BuilderOptions::interpolate_fallback`] is off.

use std::sync::Arc;

use unobtrusive_core::logging::field_span;
use unobtrusive_core::utils::text::{interpolate, Parameters};
use unobtrusive_core::{
    EmptyBoundPolicy, Localizer, RangeMessageMode, Settings, TranslationDomain, Translator,
    UnobtrusiveResult,
};

use crate::constraints::{effective_bound, Constraint, Limit, TypeRule};
use crate::descriptor::{keys, RuleDescriptorMap, RuleValue};
use crate::form::FieldDescriptor;
use crate::messages::{self, placeholders};

/// Behavioural switches of the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Which `Range` messages are produced.
    pub range_messages: RangeMessageMode,
    /// Whether a zero bound counts as absent.
    pub empty_bounds: EmptyBoundPolicy,
    /// Whether placeholders left in a localized message are filled in.
    pub interpolate_fallback: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            range_messages: RangeMessageMode::OneSided,
            empty_bounds: EmptyBoundPolicy::Loose,
            interpolate_fallback: true,
        }
    }
}

impl From<&Settings> for BuilderOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            range_messages: settings.range_messages,
            empty_bounds: settings.empty_bounds,
            interpolate_fallback: settings.interpolate_fallback,
        }
    }
}

/// Builds client-side rule descriptors from field constraints.
///
/// The builder holds no mutable state, so one instance can serve many
/// fields concurrently.
///
/// # Examples
///
/// ```
/// use unobtrusive_core::TranslationDomain;
/// use unobtrusive_forms::{Constraint, Limit, RuleDescriptorBuilder, RuleValue};
///
/// let builder = RuleDescriptorBuilder::new();
/// let rules = builder.build(
///     &[Constraint::Required, Constraint::range(Some(Limit::Int(18)), Some(Limit::Int(65)))],
///     "Age",
///     &TranslationDomain::Default,
/// );
///
/// assert_eq!(rules.get("val"), Some(&RuleValue::Flag(true)));
/// assert_eq!(rules.text("required"), Some("The 'Age' field is required."));
/// assert_eq!(
///     rules.text("range"),
///     Some("The field 'Age' value should be in range 18 to 65.")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleDescriptorBuilder {
    localizer: Localizer,
    options: BuilderOptions,
}

impl RuleDescriptorBuilder {
    /// Creates a builder without a translator and with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder that localizes messages with `translator`, using
    /// `domain` unless a call names its own.
    pub fn with_translator(translator: Arc<dyn Translator>, domain: TranslationDomain) -> Self {
        Self::with_localizer(Localizer::new(Some(translator), domain))
    }

    /// Creates a builder from an existing localizer.
    pub fn with_localizer(localizer: Localizer) -> Self {
        Self {
            localizer,
            options: BuilderOptions::default(),
        }
    }

    /// Creates a builder configured from settings.
    pub fn from_settings(settings: &Settings, translator: Option<Arc<dyn Translator>>) -> Self {
        Self {
            localizer: Localizer::new(translator, settings.translation_domain.clone()),
            options: BuilderOptions::from(settings),
        }
    }

    /// Replaces the builder options.
    #[must_use]
    pub fn options(mut self, options: BuilderOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the `Range` message mode.
    #[must_use]
    pub fn range_messages(mut self, mode: RangeMessageMode) -> Self {
        self.options.range_messages = mode;
        self
    }

    /// Sets the bound emptiness policy.
    #[must_use]
    pub fn empty_bounds(mut self, policy: EmptyBoundPolicy) -> Self {
        self.options.empty_bounds = policy;
        self
    }

    /// Enables or disables interpolation of untranslated messages.
    #[must_use]
    pub fn interpolate_fallback(mut self, enabled: bool) -> Self {
        self.options.interpolate_fallback = enabled;
        self
    }

    /// Returns the current options.
    pub const fn current_options(&self) -> BuilderOptions {
        self.options
    }

    /// Returns the localizer.
    pub const fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    /// Builds the rule descriptors for one field.
    ///
    /// An empty constraint list yields an empty map; otherwise the map starts
    /// with the `val` marker. Constraint parameters are not validated.
    pub fn build(
        &self,
        constraints: &[Constraint],
        label: &str,
        domain: &TranslationDomain,
    ) -> RuleDescriptorMap {
        let mut rules = RuleDescriptorMap::new();
        if constraints.is_empty() {
            return rules;
        }

        let span = field_span(label);
        let _guard = span.enter();

        rules.insert(keys::VAL, true);

        let label = self.localizer.trans(label, &Parameters::new(), domain);
        let ctx = MessageContext {
            builder: self,
            label: &label,
            domain,
        };

        for constraint in constraints {
            self.apply(&mut rules, constraint, &ctx);
        }

        tracing::debug!(
            constraints = constraints.len(),
            rules = rules.len(),
            "built rule descriptors"
        );
        rules
    }

    /// Like [`build`](Self::build), but rejects constraints whose parameters
    /// cannot describe a valid rule (see [`Constraint::check`]).
    ///
    /// # Errors
    ///
    /// Returns the first [`UnobtrusiveError::InvalidConstraint`] found.
    ///
    /// [`UnobtrusiveError::InvalidConstraint`]: unobtrusive_core::UnobtrusiveError::InvalidConstraint
    pub fn build_strict(
        &self,
        constraints: &[Constraint],
        label: &str,
        domain: &TranslationDomain,
    ) -> UnobtrusiveResult<RuleDescriptorMap> {
        for constraint in constraints {
            constraint.check()?;
        }
        Ok(self.build(constraints, label, domain))
    }

    /// Builds the rule descriptors for a [`FieldDescriptor`].
    pub fn build_field(&self, field: &FieldDescriptor) -> RuleDescriptorMap {
        self.build(&field.constraints, &field.label, &field.translation_domain)
    }

    fn bound(&self, bound: Option<Limit>) -> Option<Limit> {
        effective_bound(bound, self.options.empty_bounds)
    }

    fn apply(&self, rules: &mut RuleDescriptorMap, constraint: &Constraint, ctx: &MessageContext<'_>) {
        match constraint {
            Constraint::Required => {
                rules.insert(keys::REQUIRED, ctx.message(messages::REQUIRED, &[]));
            }
            Constraint::Regex {
                pattern,
                html_pattern,
            } => {
                rules.insert(keys::REGEX, ctx.message(messages::REGEX, &[]));
                let client_pattern = html_pattern.as_ref().unwrap_or(pattern);
                rules.insert(keys::REGEX_PATTERN, client_pattern.clone());
            }
            Constraint::Range { min, max } => {
                self.apply_range(rules, self.bound(*min), self.bound(*max), ctx);
            }
            Constraint::Length { min, max } => {
                self.apply_length(rules, self.bound(*min), self.bound(*max), ctx);
            }
            Constraint::LessThanOrEqual { value } => {
                rules.insert(keys::LENGTH_MAX, *value);
                rules.insert(keys::LENGTH, ctx.limit_message(messages::LESS_THAN, *value));
            }
            Constraint::GreaterThanOrEqual { value } => {
                rules.insert(keys::LENGTH_MIN, *value);
                rules.insert(keys::LENGTH, ctx.limit_message(messages::GREATER_THAN, *value));
            }
            Constraint::Type { type_name } => match TypeRule::for_type_name(type_name) {
                Some(TypeRule::Digits) => {
                    rules.insert(keys::DIGITS, ctx.message(messages::DIGITS, &[]));
                }
                Some(TypeRule::Number) => {
                    rules.insert(keys::NUMBER, ctx.message(messages::NUMBER, &[]));
                }
                None => {
                    tracing::debug!(type_name = %type_name, "no client-side rule for type");
                }
            },
            Constraint::Date => {
                rules.insert(keys::DATE, ctx.message(messages::DATE, &[]));
            }
            Constraint::Email => {
                rules.insert(keys::EMAIL, ctx.message(messages::EMAIL, &[]));
            }
            Constraint::CreditCard { .. } => {
                rules.insert(keys::CREDIT_CARD, ctx.message(messages::CREDIT_CARD, &[]));
            }
            Constraint::Url => {
                rules.insert(keys::URL, ctx.message(messages::URL, &[]));
            }
            Constraint::Unrecognized => {
                tracing::debug!("skipping unrecognized constraint");
            }
        }
    }

    fn apply_range(
        &self,
        rules: &mut RuleDescriptorMap,
        min: Option<Limit>,
        max: Option<Limit>,
        ctx: &MessageContext<'_>,
    ) {
        if self.options.range_messages == RangeMessageMode::CombinedOnly
            && (min.is_none() || max.is_none())
        {
            tracing::debug!("skipping one-sided range in combined-only mode");
            return;
        }

        if let Some(min) = min {
            rules.insert(keys::RANGE_MIN, min);
            rules.insert(keys::RANGE, ctx.limit_message(messages::RANGE_MIN, min));
        }
        if let Some(max) = max {
            rules.insert(keys::RANGE_MAX, max);
            rules.insert(keys::RANGE, ctx.limit_message(messages::RANGE_MAX, max));
        }
        if let (Some(min), Some(max)) = (min, max) {
            rules.insert(keys::RANGE, ctx.between_message(messages::RANGE_BETWEEN, min, max));
        }
    }

    fn apply_length(
        &self,
        rules: &mut RuleDescriptorMap,
        min: Option<Limit>,
        max: Option<Limit>,
        ctx: &MessageContext<'_>,
    ) {
        if let Some(min) = min {
            rules.insert(keys::LENGTH_MIN, min);
            rules.insert(keys::LENGTH, ctx.limit_message(messages::LENGTH_MIN, min));
        }
        if let Some(max) = max {
            rules.insert(keys::LENGTH_MAX, max);
            rules.insert(keys::LENGTH, ctx.limit_message(messages::LENGTH_MAX, max));
        }
        if let (Some(min), Some(max)) = (min, max) {
            rules.insert(keys::LENGTH, ctx.between_message(messages::LENGTH_BETWEEN, min, max));
        }
    }
}

/// Per-build message state: the translated label and the call domain.
struct MessageContext<'a> {
    builder: &'a RuleDescriptorBuilder,
    label: &'a str,
    domain: &'a TranslationDomain,
}

impl MessageContext<'_> {
    fn message(&self, id: &str, extra: &[(&str, Limit)]) -> RuleValue {
        let mut params = Parameters::new();
        params.insert(placeholders::FIELD_NAME.to_string(), self.label.to_string());
        for (name, value) in extra {
            params.insert((*name).to_string(), value.to_string());
        }

        let localized = self.builder.localizer.trans(id, &params, self.domain);
        if self.builder.options.interpolate_fallback {
            RuleValue::Text(interpolate(&localized, &params))
        } else {
            RuleValue::Text(localized)
        }
    }

    fn limit_message(&self, id: &str, limit: Limit) -> RuleValue {
        self.message(id, &[(placeholders::LIMIT, limit)])
    }

    fn between_message(&self, id: &str, min: Limit, max: Limit) -> RuleValue {
        self.message(id, &[(placeholders::MIN, min), (placeholders::MAX, max)])
    }
}
