//! # unobtrusive-rs
//!
//! Client-side validation metadata derived from declarative field constraints.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient access.
//! You can depend on `unobtrusive-rs` to get everything, or depend on the
//! individual crates for finer-grained control.
//!
//! ```
//! use unobtrusive_rs::forms::{Constraint, Limit, RuleDescriptorBuilder, RuleValue};
//!
//! let builder = RuleDescriptorBuilder::new();
//! let rules = builder.build(
//!     &[Constraint::Required, Constraint::range(Some(Limit::Int(18)), Some(Limit::Int(65)))],
//!     "Age",
//!     &unobtrusive_rs::core::TranslationDomain::Default,
//! );
//! assert_eq!(rules.get("val"), Some(&RuleValue::Flag(true)));
//!
//! let json = unobtrusive_rs::serde_json::to_value(&rules).unwrap();
//! assert_eq!(json["range-max"], 65);
//! ```

/// Errors, settings, logging, and the i18n layer.
pub use unobtrusive_core as core;

/// Constraints, the rule descriptor builder, and attribute rendering.
#[cfg(feature = "forms")]
pub use unobtrusive_forms as forms;

// Re-exported so hosts serialize rules and emit events with matching versions.
pub use serde;
pub use serde_json;
pub use tracing;

/// Commonly used types, importable with `use unobtrusive_rs::prelude::*`.
pub mod prelude {
    pub use unobtrusive_core::{
        Localizer, Settings, TranslationDomain, Translator, UnobtrusiveError, UnobtrusiveResult,
    };

    #[cfg(feature = "forms")]
    pub use unobtrusive_forms::{
        Constraint, FieldDescriptor, FormRules, Limit, RuleDescriptorBuilder, RuleDescriptorMap,
        RuleValue,
    };
}
