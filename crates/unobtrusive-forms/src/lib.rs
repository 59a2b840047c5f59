//! # unobtrusive-forms
//!
//! Rule descriptor builder for unobtrusive-rs. Turns a field's declarative
//! constraints into the key/value metadata a client-side validation library
//! reads from `data-val-*` attributes.
//!
//! ## Modules
//!
//! - [`constraints`] - The `Constraint` enum and numeric `Limit`s
//! - [`builder`] - `RuleDescriptorBuilder`, the constraint-to-rule dispatch
//! - [`descriptor`] - The ordered `RuleDescriptorMap` and attribute rendering
//! - [`form`] - Field descriptors and form-level aggregation
//! - [`messages`] - Message ids and their placeholders

pub mod builder;
pub mod constraints;
pub mod descriptor;
pub mod form;
pub mod messages;

pub use builder::{BuilderOptions, RuleDescriptorBuilder};
pub use constraints::{Constraint, Limit};
pub use descriptor::{RuleDescriptorMap, RuleValue, DEFAULT_PREFIX};
pub use form::{parse_fields, FieldDescriptor, FormRules};
