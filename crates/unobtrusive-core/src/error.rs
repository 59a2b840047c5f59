//! Core error types for unobtrusive-rs.
//!
//! Building rule descriptors never fails in the permissive default mode, so
//! [`UnobtrusiveError`] is only produced by configuration loading, catalog
//! loading, and the opt-in strict constraint checks.

use thiserror::Error;

/// The primary error type for unobtrusive-rs.
///
/// # Examples
///
/// ```
/// use unobtrusive_core::error::UnobtrusiveError;
///
/// let err = UnobtrusiveError::InvalidConstraint {
///     kind: "length".to_string(),
///     reason: "min (5) is greater than max (2)".to_string(),
/// };
/// assert_eq!(
///     err.to_string(),
///     "Invalid length constraint: min (5) is greater than max (2)"
/// );
/// ```
#[derive(Error, Debug)]
pub enum UnobtrusiveError {
    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization
    /// (settings files, translation catalogs, constraint lists).
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── Constraints ──────────────────────────────────────────────────

    /// A constraint carries parameters that cannot describe a valid rule.
    ///
    /// Only raised by strict builds; the default build passes parameters
    /// through verbatim.
    #[error("Invalid {kind} constraint: {reason}")]
    InvalidConstraint {
        /// The constraint kind (e.g. `"range"`, `"regex"`).
        kind: String,
        /// Human-readable description of the problem.
        reason: String,
    },

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl UnobtrusiveError {
    /// Creates an [`UnobtrusiveError::InvalidConstraint`].
    pub fn invalid_constraint(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error was caused by configuration.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigurationError(_))
    }
}

impl From<serde_json::Error> for UnobtrusiveError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience result type for unobtrusive-rs operations.
pub type UnobtrusiveResult<T> = Result<T, UnobtrusiveError>;
