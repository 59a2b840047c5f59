//! Translation catalogs and the catalog-backed [`Translator`].
//!
//! A [`CatalogTranslator`] stores one [`TranslationCatalog`] per language.
//! Each catalog is organized by domain, so the same message id can be
//! translated differently in, say, `validators` and `forms`. Translations
//! can be loaded from JSON or registered programmatically.
//!
//! ## JSON Format
//!
//! ```json
//! {
//!   "domains": {
//!     "validators": {
//!       "messages": {
//!         "The '{{ field_name }}' field is required.": "Поле '{{ field_name }}' обов'язкове."
//!       },
//!       "plurals": {
//!         "{{ count }} character": { "singular": "{{ count }} символ", "plural": "{{ count }} символів" }
//!       }
//!     }
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use super::Translator;
use crate::error::UnobtrusiveError;
use crate::utils::text::{interpolate, Parameters};

/// Domain used when a lookup does not name one.
pub const DEFAULT_DOMAIN: &str = "messages";

/// Translations of a single domain.
#[derive(Debug, Clone, Default)]
struct DomainCatalog {
    /// Simple message translations: msgid -> translated string.
    messages: HashMap<String, String>,
    /// Plural translations: msgid -> (translated singular, translated plural).
    plurals: HashMap<String, (String, String)>,
}

/// A translation catalog for a single language.
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    domains: HashMap<String, DomainCatalog>,
}

impl TranslationCatalog {
    fn domain_mut(&mut self, domain: &str) -> &mut DomainCatalog {
        self.domains.entry(domain.to_string()).or_default()
    }

    /// Looks up a simple translation.
    pub fn message(&self, domain: &str, msgid: &str) -> Option<&str> {
        self.domains
            .get(domain)
            .and_then(|d| d.messages.get(msgid))
            .map(String::as_str)
    }

    /// Looks up a plural translation, picking the singular form when
    /// `number == 1` and the plural form otherwise.
    pub fn plural(&self, domain: &str, msgid: &str, number: i64) -> Option<&str> {
        self.domains
            .get(domain)
            .and_then(|d| d.plurals.get(msgid))
            .map(|(s, p)| if number == 1 { s.as_str() } else { p.as_str() })
    }

    /// Returns the names of the domains present in this catalog.
    pub fn domains(&self) -> Vec<&str> {
        self.domains.keys().map(String::as_str).collect()
    }
}

/// Picks the singular (`number == 1`) or plural segment of a
/// `"singular|plural"` message id. Ids without `|` are returned unchanged.
///
/// # Examples
///
/// ```
/// use unobtrusive_core::i18n::catalog::choose_plural_form;
///
/// assert_eq!(choose_plural_form("one|many", 1), "one");
/// assert_eq!(choose_plural_form("one|many", 0), "many");
/// assert_eq!(choose_plural_form("only", 7), "only");
/// ```
pub fn choose_plural_form(id: &str, number: i64) -> &str {
    match id.split_once('|') {
        Some((singular, _)) if number == 1 => singular,
        Some((_, plural)) => plural,
        None => id,
    }
}

/// A [`Translator`] backed by in-memory catalogs, one per language.
///
/// Lookups use the translator's active language. Missing translations fall
/// back to the message id; parameters are substituted either way.
///
/// # Examples
///
/// ```
/// use unobtrusive_core::i18n::catalog::CatalogTranslator;
/// use unobtrusive_core::i18n::Translator;
/// use unobtrusive_core::utils::text::params;
///
/// let translator = CatalogTranslator::new("fr");
/// translator.register_translations("fr", "validators", vec![
///     ("The '{{ field_name }}' value is not valid", "La valeur '{{ field_name }}' n'est pas valide"),
/// ]);
///
/// let p = params([("field_name", "Code")]);
/// assert_eq!(
///     translator.trans("The '{{ field_name }}' value is not valid", &p, Some("validators")),
///     "La valeur 'Code' n'est pas valide"
/// );
/// // Unknown ids still get their placeholders filled.
/// assert_eq!(translator.trans("{{ field_name }}!", &p, None), "Code!");
/// ```
#[derive(Debug, Default)]
pub struct CatalogTranslator {
    language: String,
    catalogs: RwLock<HashMap<String, TranslationCatalog>>,
}

impl CatalogTranslator {
    /// Creates an empty translator whose active language is `language`.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            catalogs: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the active language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Runs `f` against the catalog of the active language, if one exists.
    fn with_catalog<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&TranslationCatalog) -> Option<R>,
    {
        let catalogs = self.catalogs.read().unwrap_or_else(PoisonError::into_inner);
        catalogs.get(&self.language).and_then(f)
    }

    /// Ensures a catalog entry exists for the given language and mutates it.
    #[allow(clippy::significant_drop_tightening)]
    fn with_catalog_mut<F>(&self, language: &str, f: F)
    where
        F: FnOnce(&mut TranslationCatalog),
    {
        let mut catalogs = self.catalogs.write().unwrap_or_else(PoisonError::into_inner);
        let catalog = catalogs.entry(language.to_string()).or_default();
        f(catalog);
    }

    // ── Registration API ─────────────────────────────────────────────────

    /// Registers simple message translations for a language and domain.
    ///
    /// Existing entries with the same id are overwritten.
    pub fn register_translations(&self, language: &str, domain: &str, entries: Vec<(&str, &str)>) {
        self.with_catalog_mut(language, |catalog| {
            let domain = catalog.domain_mut(domain);
            for (msgid, translated) in entries {
                domain
                    .messages
                    .insert(msgid.to_string(), translated.to_string());
            }
        });
    }

    /// Registers plural translations for a language and domain.
    ///
    /// Each entry is `(msgid, translated_singular, translated_plural)`.
    pub fn register_plural_translations(
        &self,
        language: &str,
        domain: &str,
        entries: Vec<(&str, &str, &str)>,
    ) {
        self.with_catalog_mut(language, |catalog| {
            let domain = catalog.domain_mut(domain);
            for (msgid, singular, plural) in entries {
                domain
                    .plurals
                    .insert(msgid.to_string(), (singular.to_string(), plural.to_string()));
            }
        });
    }

    /// Loads translations for `language` from a JSON string.
    ///
    /// All top-level and per-domain keys are optional.
    ///
    /// # Errors
    ///
    /// Returns [`UnobtrusiveError::SerializationError`] if the JSON is invalid.
    pub fn load_from_json(&self, language: &str, json_str: &str) -> Result<(), UnobtrusiveError> {
        let value: serde_json::Value = serde_json::from_str(json_str).map_err(|e| {
            UnobtrusiveError::SerializationError(format!("Invalid translation catalog: {e}"))
        })?;

        let Some(domains) = value.get("domains").and_then(|v| v.as_object()) else {
            tracing::debug!(language, "translation catalog has no domains");
            return Ok(());
        };

        self.with_catalog_mut(language, |catalog| {
            for (domain_name, domain_value) in domains {
                let domain = catalog.domain_mut(domain_name);

                if let Some(messages) = domain_value.get("messages").and_then(|v| v.as_object()) {
                    for (msgid, translated) in messages {
                        if let Some(t) = translated.as_str() {
                            domain.messages.insert(msgid.clone(), t.to_string());
                        }
                    }
                }

                if let Some(plurals) = domain_value.get("plurals").and_then(|v| v.as_object()) {
                    for (msgid, forms) in plurals {
                        if let (Some(singular), Some(plural)) = (
                            forms.get("singular").and_then(|v| v.as_str()),
                            forms.get("plural").and_then(|v| v.as_str()),
                        ) {
                            domain
                                .plurals
                                .insert(msgid.clone(), (singular.to_string(), plural.to_string()));
                        }
                    }
                }
            }
        });

        Ok(())
    }

    /// Loads translations for `language` from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the JSON is invalid.
    pub fn load_from_json_file(
        &self,
        language: &str,
        path: impl AsRef<Path>,
    ) -> Result<(), UnobtrusiveError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        self.load_from_json(language, &content)
    }

    // ── Introspection ────────────────────────────────────────────────────

    /// Returns `true` if translations are registered for the given language.
    pub fn has_language(&self, language: &str) -> bool {
        let catalogs = self.catalogs.read().unwrap_or_else(PoisonError::into_inner);
        catalogs.contains_key(language)
    }

    /// Returns a list of all languages that have translations registered.
    pub fn available_languages(&self) -> Vec<String> {
        let catalogs = self.catalogs.read().unwrap_or_else(PoisonError::into_inner);
        catalogs.keys().cloned().collect()
    }

    /// Clears all translations for a given language.
    pub fn clear_language(&self, language: &str) {
        let mut catalogs = self.catalogs.write().unwrap_or_else(PoisonError::into_inner);
        catalogs.remove(language);
    }
}

impl Translator for CatalogTranslator {
    fn trans(&self, id: &str, params: &Parameters, domain: Option<&str>) -> String {
        let domain = domain.unwrap_or(DEFAULT_DOMAIN);
        let template = self
            .with_catalog(|catalog| catalog.message(domain, id).map(str::to_string))
            .unwrap_or_else(|| {
                tracing::trace!(language = %self.language, domain, id, "no translation found");
                id.to_string()
            });
        interpolate(&template, params)
    }

    fn trans_choice(
        &self,
        id: &str,
        number: i64,
        params: &Parameters,
        domain: Option<&str>,
    ) -> String {
        let domain = domain.unwrap_or(DEFAULT_DOMAIN);
        let template = self
            .with_catalog(|catalog| catalog.plural(domain, id, number).map(str::to_string))
            .unwrap_or_else(|| choose_plural_form(id, number).to_string());
        interpolate(&template, params)
    }
}
