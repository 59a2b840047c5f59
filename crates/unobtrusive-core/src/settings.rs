//! Settings for unobtrusive-rs.
//!
//! This module provides the [`Settings`] struct, which holds all configuration
//! consumed by the rule descriptor builder and its collaborators. Settings
//! are passed explicitly; there is no global instance.

use serde::{Deserialize, Serialize};

use crate::i18n::TranslationDomain;

/// Controls which messages a `Range` constraint produces.
///
/// Two historical behaviours exist: one that describes one-sided ranges
/// ("5 or more", "10 or less") as well as two-sided ones, and one that only
/// describes ranges with both bounds present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeMessageMode {
    /// One-sided and two-sided range descriptors are emitted.
    #[default]
    OneSided,
    /// Range descriptors are emitted only when both bounds are present.
    CombinedOnly,
}

/// Decides whether a numeric bound of zero counts as present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyBoundPolicy {
    /// A zero bound is treated like a missing one.
    #[default]
    Loose,
    /// Only a missing bound is empty; zero is a real bound.
    Strict,
}

/// The complete set of settings.
///
/// Every field has a default, so partial configuration files are fine.
///
/// # Examples
///
/// ```
/// use unobtrusive_core::settings::Settings;
/// use unobtrusive_core::i18n::TranslationDomain;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.language_code, "en");
/// assert_eq!(settings.translation_domain, TranslationDomain::Default);
/// assert_eq!(settings.attribute_prefix, "data-val");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level or `EnvFilter` directive (e.g. "info", "debug").
    pub log_level: String,

    // ── Internationalization ─────────────────────────────────────────

    /// The language used for catalog lookups (e.g. "en", "uk").
    pub language_code: String,
    /// The default translation domain for all validation messages.
    ///
    /// `false` in a config file disables translation entirely.
    pub translation_domain: TranslationDomain,

    // ── Rule descriptors ─────────────────────────────────────────────

    /// Which `Range` messages are produced.
    pub range_messages: RangeMessageMode,
    /// How numeric bounds of zero are treated.
    pub empty_bounds: EmptyBoundPolicy,
    /// Whether placeholders left in an untranslated message are filled in.
    pub interpolate_fallback: bool,
    /// Prefix used when rendering descriptors as HTML attributes.
    pub attribute_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Core
            debug: true,

            // Logging
            log_level: "info".to_string(),

            // Internationalization
            language_code: "en".to_string(),
            translation_domain: TranslationDomain::Default,

            // Rule descriptors
            range_messages: RangeMessageMode::OneSided,
            empty_bounds: EmptyBoundPolicy::Loose,
            interpolate_fallback: true,
            attribute_prefix: "data-val".to_string(),
        }
    }
}
