//! Translation of validation messages.
//!
//! This module provides:
//!
//! - [`TranslationDomain`]: the tri-state domain selector (`Default`,
//!   `Named`, `Disabled`).
//! - [`Translator`]: the capability a host plugs in to localize messages.
//! - [`Localizer`]: an optional translator plus a configured default domain,
//!   which resolves domains and falls back to the raw message id.
//! - [`catalog`]: an in-memory, JSON-loadable [`Translator`] implementation.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use unobtrusive_core::i18n::{catalog::CatalogTranslator, Localizer, TranslationDomain};
//! use unobtrusive_core::utils::text::params;
//!
//! let translator = CatalogTranslator::new("uk");
//! translator.register_translations("uk", "validators", vec![
//!     ("The '{{ field_name }}' field is required.", "Поле '{{ field_name }}' обов'язкове."),
//! ]);
//!
//! let localizer = Localizer::new(
//!     Some(Arc::new(translator)),
//!     TranslationDomain::Named("validators".to_string()),
//! );
//! let msg = localizer.trans(
//!     "The '{{ field_name }}' field is required.",
//!     &params([("field_name", "Вік")]),
//!     &TranslationDomain::Default,
//! );
//! assert_eq!(msg, "Поле 'Вік' обов'язкове.");
//! ```

pub mod catalog;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::text::Parameters;

// ── Domain selector ──────────────────────────────────────────────────────

/// Which translation domain (message bundle) to use.
///
/// In configuration files `null`/absent means [`Default`](Self::Default), a
/// string names a domain, and `false` means [`Disabled`](Self::Disabled).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TranslationDomain {
    /// No explicit domain: defer to the next level (builder default, then
    /// the translator's own default).
    #[default]
    Default,
    /// An explicit domain name.
    Named(String),
    /// Translation is suppressed; message ids are returned verbatim.
    Disabled,
}

impl TranslationDomain {
    /// Creates a named domain.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Parses a domain from a raw configuration string.
    ///
    /// `false` (in any case) disables translation and an empty string selects
    /// the default domain. Anything else, including `default`, names a
    /// domain.
    ///
    /// # Examples
    ///
    /// ```
    /// use unobtrusive_core::i18n::TranslationDomain;
    ///
    /// assert_eq!(TranslationDomain::parse("false"), TranslationDomain::Disabled);
    /// assert_eq!(TranslationDomain::parse(""), TranslationDomain::Default);
    /// assert_eq!(TranslationDomain::parse("forms"), TranslationDomain::named("forms"));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Default
        } else if trimmed.eq_ignore_ascii_case("false") {
            Self::Disabled
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    /// Returns the domain name, if this is a named domain.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Default | Self::Disabled => None,
        }
    }

    /// Returns `true` if translation is disabled.
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Resolves a call-site domain against a fallback: the call-site domain
    /// wins unless it is [`Default`](Self::Default).
    pub const fn or<'a>(&'a self, fallback: &'a Self) -> &'a Self {
        match self {
            Self::Default => fallback,
            Self::Named(_) | Self::Disabled => self,
        }
    }
}

impl fmt::Display for TranslationDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "<default>"),
            Self::Named(name) => write!(f, "{name}"),
            Self::Disabled => write!(f, "<disabled>"),
        }
    }
}

impl From<&str> for TranslationDomain {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<Option<String>> for TranslationDomain {
    fn from(name: Option<String>) -> Self {
        name.map_or(Self::Default, Self::Named)
    }
}

impl Serialize for TranslationDomain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Default => serializer.serialize_none(),
            Self::Named(name) => serializer.serialize_str(name),
            Self::Disabled => serializer.serialize_bool(false),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DomainRepr {
    Flag(bool),
    Name(String),
}

impl<'de> Deserialize<'de> for TranslationDomain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<DomainRepr>::deserialize(deserializer)? {
            None | Some(DomainRepr::Flag(true)) => Self::Default,
            Some(DomainRepr::Flag(false)) => Self::Disabled,
            Some(DomainRepr::Name(name)) => Self::Named(name),
        })
    }
}

// ── Translator capability ────────────────────────────────────────────────

/// A message translator.
///
/// Implementations must be safe for concurrent reads: one translator is
/// shared by every field build.
pub trait Translator: Send + Sync {
    /// Translates `id` in `domain` (`None` = the translator's default
    /// domain) and substitutes `params`.
    fn trans(&self, id: &str, params: &Parameters, domain: Option<&str>) -> String;

    /// Translates a message whose form depends on `number`.
    ///
    /// The default implementation picks the `singular|plural` segment of
    /// `id` and translates it like [`trans`](Self::trans).
    fn trans_choice(
        &self,
        id: &str,
        number: i64,
        params: &Parameters,
        domain: Option<&str>,
    ) -> String {
        self.trans(catalog::choose_plural_form(id, number), params, domain)
    }
}

// ── Localizer ────────────────────────────────────────────────────────────

/// An optional [`Translator`] paired with a default [`TranslationDomain`].
///
/// Without a translator, or when the resolved domain is
/// [`TranslationDomain::Disabled`], messages pass through untouched: the raw
/// id is returned and no placeholder is substituted.
#[derive(Clone, Default)]
pub struct Localizer {
    translator: Option<Arc<dyn Translator>>,
    domain: TranslationDomain,
}

impl fmt::Debug for Localizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Localizer")
            .field("translator", &self.translator.as_ref().map(|_| "dyn Translator"))
            .field("domain", &self.domain)
            .finish()
    }
}

impl Localizer {
    /// Creates a localizer from an optional translator and a default domain.
    pub fn new(translator: Option<Arc<dyn Translator>>, domain: TranslationDomain) -> Self {
        Self { translator, domain }
    }

    /// Creates a localizer without a translator: every message passes through.
    pub fn passthrough() -> Self {
        Self::default()
    }

    /// Returns the configured default domain.
    pub const fn domain(&self) -> &TranslationDomain {
        &self.domain
    }

    /// Returns `true` if a translator is configured.
    pub const fn has_translator(&self) -> bool {
        self.translator.is_some()
    }

    /// Resolves the domain used for a call: the call-site domain wins unless
    /// it is [`TranslationDomain::Default`].
    pub const fn resolve_domain<'a>(&'a self, call_domain: &'a TranslationDomain) -> &'a TranslationDomain {
        call_domain.or(&self.domain)
    }

    /// Returns the translator to use for `call_domain`, or `None` when the
    /// message should pass through.
    fn active_translator(&self, call_domain: &TranslationDomain) -> Option<&Arc<dyn Translator>> {
        if self.resolve_domain(call_domain).is_disabled() {
            return None;
        }
        self.translator.as_ref()
    }

    /// Translates a message, or returns `id` verbatim when translation is
    /// unavailable or disabled.
    pub fn trans(&self, id: &str, params: &Parameters, call_domain: &TranslationDomain) -> String {
        match self.active_translator(call_domain) {
            Some(translator) => {
                translator.trans(id, params, self.resolve_domain(call_domain).name())
            }
            None => id.to_string(),
        }
    }

    /// Translates a pluralized message, or returns `id` verbatim when
    /// translation is unavailable or disabled.
    pub fn trans_choice(
        &self,
        id: &str,
        number: i64,
        params: &Parameters,
        call_domain: &TranslationDomain,
    ) -> String {
        match self.active_translator(call_domain) {
            Some(translator) => translator.trans_choice(
                id,
                number,
                params,
                self.resolve_domain(call_domain).name(),
            ),
            None => id.to_string(),
        }
    }
}
