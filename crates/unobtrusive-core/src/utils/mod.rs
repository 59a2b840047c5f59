//! Utility functions shared across unobtrusive-rs.
//!
//! - [`text`]: placeholder interpolation and HTML escaping.

pub mod text;
