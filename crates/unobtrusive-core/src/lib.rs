//! # unobtrusive-core
//!
//! Core types for unobtrusive-rs: the error type, settings and their loader,
//! tracing setup, and the translation layer used to localize validation
//! messages. This crate knows nothing about constraints; see
//! `unobtrusive-forms` for the rule descriptor builder.
//!
//! ## Modules
//!
//! - [`error`] - Error type and result alias
//! - [`settings`] - Configuration passed to the builder
//! - [`settings_loader`] - Loading settings from TOML, JSON and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`i18n`] - Translation domains, the `Translator` capability, catalogs
//! - [`utils`] - Placeholder interpolation and HTML escaping

pub mod error;
pub mod i18n;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{UnobtrusiveError, UnobtrusiveResult};
pub use i18n::catalog::CatalogTranslator;
pub use i18n::{Localizer, TranslationDomain, Translator};
pub use settings::{EmptyBoundPolicy, RangeMessageMode, Settings};
pub use utils::text::Parameters;
