//! Declarative field constraints.
//!
//! A [`Constraint`] is an already-resolved validation rule attached to a
//! field. The set of kinds is closed; anything a host does not know how to
//! describe for the client deserializes to [`Constraint::Unrecognized`] and
//! is skipped by the builder.
//!
//! Constraints deserialize from JSON or TOML using an internally tagged
//! `kind` field:
//!
//! ```
//! use unobtrusive_forms::constraints::{Constraint, Limit};
//!
//! let constraints: Vec<Constraint> = serde_json::from_str(r#"[
//!     {"kind": "required"},
//!     {"kind": "range", "min": 18, "max": 65},
//!     {"kind": "type", "type": "integer"},
//!     {"kind": "ip_address"}
//! ]"#).unwrap();
//!
//! assert_eq!(constraints[1], Constraint::range(Some(Limit::Int(18)), Some(Limit::Int(65))));
//! assert_eq!(constraints[3], Constraint::Unrecognized);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use unobtrusive_core::{EmptyBoundPolicy, UnobtrusiveError, UnobtrusiveResult};

/// A numeric constraint parameter (a bound or a limit).
///
/// Integers display without a fractional part, so `Limit::Int(18)` renders
/// as `18` in messages and attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Limit {
    /// An integer limit.
    Int(i64),
    /// A floating-point limit.
    Float(f64),
}

impl Limit {
    /// Returns `true` if the limit equals zero.
    #[allow(clippy::float_cmp)]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(i) => i == 0,
            Self::Float(f) => f == 0.0,
        }
    }

    /// Returns `true` if the limit is below zero.
    pub fn is_negative(self) -> bool {
        match self {
            Self::Int(i) => i < 0,
            Self::Float(f) => f < 0.0,
        }
    }

    /// Returns the limit as a float, for comparisons.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Limit {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Limit {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Limit {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Limit {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Returns the bound if it counts as present under `policy`.
///
/// With [`EmptyBoundPolicy::Loose`] a zero bound is treated as absent.
///
/// # Examples
///
/// ```
/// use unobtrusive_core::EmptyBoundPolicy;
/// use unobtrusive_forms::constraints::{effective_bound, Limit};
///
/// assert_eq!(effective_bound(Some(Limit::Int(0)), EmptyBoundPolicy::Loose), None);
/// assert_eq!(
///     effective_bound(Some(Limit::Int(0)), EmptyBoundPolicy::Strict),
///     Some(Limit::Int(0))
/// );
/// ```
pub fn effective_bound(bound: Option<Limit>, policy: EmptyBoundPolicy) -> Option<Limit> {
    match policy {
        EmptyBoundPolicy::Loose => bound.filter(|b| !b.is_zero()),
        EmptyBoundPolicy::Strict => bound,
    }
}

/// The client-side rule a type-check constraint maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRule {
    /// Whole numbers (`integer`, `int`, `long`).
    Digits,
    /// Any number (`float`, `numeric`, `real`).
    Number,
}

impl TypeRule {
    /// Classifies a type name. Names without a client-side rule return `None`.
    pub fn for_type_name(type_name: &str) -> Option<Self> {
        match type_name {
            "integer" | "int" | "long" => Some(Self::Digits),
            "float" | "numeric" | "real" => Some(Self::Number),
            _ => None,
        }
    }
}

/// A declarative validation constraint on a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// The field must have a value.
    Required,
    /// The value must match a regular expression.
    Regex {
        /// The pattern, passed to the client verbatim unless `html_pattern`
        /// is set.
        pattern: String,
        /// A client-side variant of the pattern (e.g. without delimiters).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        html_pattern: Option<String>,
    },
    /// The numeric value must lie within the given bounds.
    Range {
        /// Lower bound.
        #[serde(default)]
        min: Option<Limit>,
        /// Upper bound.
        #[serde(default)]
        max: Option<Limit>,
    },
    /// The value's length must lie within the given bounds.
    #[serde(alias = "length_range")]
    Length {
        /// Minimum length.
        #[serde(default)]
        min: Option<Limit>,
        /// Maximum length.
        #[serde(default)]
        max: Option<Limit>,
    },
    /// The value must not exceed `value`.
    LessThanOrEqual {
        /// The upper limit.
        value: Limit,
    },
    /// The value must be at least `value`.
    GreaterThanOrEqual {
        /// The lower limit.
        value: Limit,
    },
    /// The value must be of the named type.
    #[serde(alias = "type_check")]
    Type {
        /// The type name (`integer`, `float`, ...).
        #[serde(rename = "type")]
        type_name: String,
    },
    /// The value must be a date.
    Date,
    /// The value must be an email address.
    Email,
    /// The value must be a credit card number.
    #[serde(alias = "card_scheme")]
    CreditCard {
        /// Accepted card schemes (informational; not sent to the client).
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        schemes: Vec<String>,
    },
    /// The value must be a URL.
    Url,
    /// A constraint kind with no client-side counterpart.
    #[serde(other)]
    Unrecognized,
}

impl Constraint {
    /// Creates a [`Constraint::Regex`] without an HTML pattern override.
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::Regex {
            pattern: pattern.into(),
            html_pattern: None,
        }
    }

    /// Creates a [`Constraint::Range`].
    pub const fn range(min: Option<Limit>, max: Option<Limit>) -> Self {
        Self::Range { min, max }
    }

    /// Creates a [`Constraint::Length`].
    pub const fn length(min: Option<Limit>, max: Option<Limit>) -> Self {
        Self::Length { min, max }
    }

    /// Creates a [`Constraint::Type`].
    pub fn type_check(type_name: impl Into<String>) -> Self {
        Self::Type {
            type_name: type_name.into(),
        }
    }

    /// Creates a [`Constraint::CreditCard`] accepting any scheme.
    pub const fn credit_card() -> Self {
        Self::CreditCard {
            schemes: Vec::new(),
        }
    }

    /// Returns the snake_case kind name, as used in the `kind` tag.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Regex { .. } => "regex",
            Self::Range { .. } => "range",
            Self::Length { .. } => "length",
            Self::LessThanOrEqual { .. } => "less_than_or_equal",
            Self::GreaterThanOrEqual { .. } => "greater_than_or_equal",
            Self::Type { .. } => "type",
            Self::Date => "date",
            Self::Email => "email",
            Self::CreditCard { .. } => "credit_card",
            Self::Url => "url",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Checks that the constraint's parameters describe a satisfiable rule.
    ///
    /// Used by strict builds only. Rejects `min > max` bounds, negative
    /// length bounds, and regex patterns that are malformed in every
    /// dialect (see [`check_pattern`]). Dialect features such as lookaround
    /// and backreferences are accepted, since the pattern runs in the
    /// browser.
    ///
    /// # Errors
    ///
    /// Returns [`UnobtrusiveError::InvalidConstraint`] describing the problem.
    pub fn check(&self) -> UnobtrusiveResult<()> {
        match self {
            Self::Regex {
                pattern,
                html_pattern,
            } => {
                let client_pattern = html_pattern.as_deref().unwrap_or(pattern);
                check_pattern(client_pattern)
                    .map_err(|reason| UnobtrusiveError::invalid_constraint(self.kind(), reason))
            }
            Self::Range { min, max } => check_order(self.kind(), *min, *max),
            Self::Length { min, max } => {
                for (name, bound) in [("min", min), ("max", max)] {
                    if let Some(bound) = bound.filter(|b| b.is_negative()) {
                        return Err(UnobtrusiveError::invalid_constraint(
                            self.kind(),
                            format!("{name} ({bound}) must not be negative"),
                        ));
                    }
                }
                check_order(self.kind(), *min, *max)
            }
            _ => Ok(()),
        }
    }
}

/// Checks a client-side regex for structural errors.
///
/// Only unbalanced groups, unterminated character classes, a trailing
/// backslash and a leading `*`/`+` quantifier are reported. The syntax
/// inside groups and classes is not interpreted.
///
/// # Errors
///
/// Returns a description of the first error found.
///
/// # Examples
///
/// ```
/// use unobtrusive_forms::constraints::check_pattern;
///
/// assert!(check_pattern(r"^(?=.*\d)(\w)\1.{8,}$").is_ok());
/// assert!(check_pattern("([0-9]").is_err());
/// ```
pub fn check_pattern(pattern: &str) -> Result<(), String> {
    let mut open_groups = Vec::new();
    // Whether the next token may carry a quantifier.
    let mut has_atom = false;
    let mut chars = pattern.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '\\' => {
                if chars.next().is_none() {
                    return Err("trailing backslash".to_string());
                }
                has_atom = true;
            }
            '[' => {
                chars.next_if(|&(_, c)| c == '^');
                // A leading `]` is a literal member of the class.
                chars.next_if(|&(_, c)| c == ']');
                loop {
                    match chars.next() {
                        None => {
                            return Err(format!("unterminated character class at offset {pos}"));
                        }
                        Some((_, '\\')) => {
                            if chars.next().is_none() {
                                return Err("trailing backslash".to_string());
                            }
                        }
                        Some((_, ']')) => break,
                        Some(_) => {}
                    }
                }
                has_atom = true;
            }
            '(' => {
                open_groups.push(pos);
                has_atom = false;
            }
            ')' => {
                if open_groups.pop().is_none() {
                    return Err(format!("unmatched ')' at offset {pos}"));
                }
                has_atom = true;
            }
            '|' => has_atom = false,
            '*' | '+' if !has_atom => {
                return Err(format!("nothing to repeat at offset {pos}"));
            }
            // `?` right after `(` starts a group modifier such as `(?=`.
            '*' | '+' | '?' => {}
            _ => has_atom = true,
        }
    }

    match open_groups.last() {
        Some(pos) => Err(format!("unclosed group at offset {pos}")),
        None => Ok(()),
    }
}

fn check_order(kind: &str, min: Option<Limit>, max: Option<Limit>) -> UnobtrusiveResult<()> {
    match (min, max) {
        (Some(min), Some(max)) if min.as_f64() > max.as_f64() => Err(
            UnobtrusiveError::invalid_constraint(kind, format!("min ({min}) is greater than max ({max})")),
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Limit ────────────────────────────────────────────────────────

    #[test]
    fn test_limit_display() {
        assert_eq!(Limit::Int(18).to_string(), "18");
        assert_eq!(Limit::Float(2.5).to_string(), "2.5");
        assert_eq!(Limit::Float(10.0).to_string(), "10");
    }

    #[test]
    fn test_limit_deserialize_untagged() {
        let l: Limit = serde_json::from_str("5").unwrap();
        assert_eq!(l, Limit::Int(5));
        let l: Limit = serde_json::from_str("0.5").unwrap();
        assert_eq!(l, Limit::Float(0.5));
    }

    #[test]
    fn test_limit_zero_and_negative() {
        assert!(Limit::Int(0).is_zero());
        assert!(Limit::Float(0.0).is_zero());
        assert!(!Limit::Int(1).is_zero());
        assert!(Limit::Int(-1).is_negative());
        assert!(!Limit::Float(0.0).is_negative());
    }

    #[test]
    fn test_effective_bound_none_stays_none() {
        assert_eq!(effective_bound(None, EmptyBoundPolicy::Strict), None);
        assert_eq!(
            effective_bound(Some(Limit::Int(3)), EmptyBoundPolicy::Loose),
            Some(Limit::Int(3))
        );
    }

    // ── TypeRule ─────────────────────────────────────────────────────

    #[test]
    fn test_type_rule_classification() {
        for name in ["integer", "int", "long"] {
            assert_eq!(TypeRule::for_type_name(name), Some(TypeRule::Digits));
        }
        for name in ["float", "numeric", "real"] {
            assert_eq!(TypeRule::for_type_name(name), Some(TypeRule::Number));
        }
        assert_eq!(TypeRule::for_type_name("string"), None);
        assert_eq!(TypeRule::for_type_name("Integer"), None);
    }

    // ── Serde ────────────────────────────────────────────────────────

    #[test]
    fn test_deserialize_all_kinds() {
        let json = r#"[
            {"kind": "required"},
            {"kind": "regex", "pattern": "^[a-z]+$"},
            {"kind": "range", "min": 1},
            {"kind": "length", "min": 2, "max": 20},
            {"kind": "less_than_or_equal", "value": 10},
            {"kind": "greater_than_or_equal", "value": 1.5},
            {"kind": "type", "type": "float"},
            {"kind": "date"},
            {"kind": "email"},
            {"kind": "credit_card", "schemes": ["VISA"]},
            {"kind": "url"}
        ]"#;
        let constraints: Vec<Constraint> = serde_json::from_str(json).unwrap();
        let kinds: Vec<&str> = constraints.iter().map(Constraint::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "required",
                "regex",
                "range",
                "length",
                "less_than_or_equal",
                "greater_than_or_equal",
                "type",
                "date",
                "email",
                "credit_card",
                "url"
            ]
        );
        assert_eq!(constraints[2], Constraint::range(Some(Limit::Int(1)), None));
        assert_eq!(
            constraints[5],
            Constraint::GreaterThanOrEqual {
                value: Limit::Float(1.5)
            }
        );
    }

    #[test]
    fn test_deserialize_aliases() {
        let c: Constraint = serde_json::from_str(r#"{"kind": "card_scheme"}"#).unwrap();
        assert_eq!(c, Constraint::credit_card());
        let c: Constraint =
            serde_json::from_str(r#"{"kind": "length_range", "max": 8}"#).unwrap();
        assert_eq!(c, Constraint::length(None, Some(Limit::Int(8))));
    }

    #[test]
    fn test_deserialize_unknown_kind() {
        let c: Constraint = serde_json::from_str(r#"{"kind": "isbn"}"#).unwrap();
        assert_eq!(c, Constraint::Unrecognized);
    }

    #[test]
    fn test_serialize_type_uses_type_key() {
        let json = serde_json::to_value(Constraint::type_check("integer")).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "type", "type": "integer"}));
    }

    // ── check ────────────────────────────────────────────────────────

    #[test]
    fn test_check_accepts_valid() {
        assert!(Constraint::Required.check().is_ok());
        assert!(Constraint::regex(r"^\d{4}$").check().is_ok());
        assert!(Constraint::range(Some(Limit::Int(1)), Some(Limit::Int(1))).check().is_ok());
        assert!(Constraint::length(Some(Limit::Int(0)), None).check().is_ok());
        assert!(Constraint::Unrecognized.check().is_ok());
    }

    #[test]
    fn test_check_rejects_inverted_range() {
        let err = Constraint::range(Some(Limit::Int(10)), Some(Limit::Float(2.5)))
            .check()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid range constraint: min (10) is greater than max (2.5)"
        );
    }

    #[test]
    fn test_check_rejects_negative_length() {
        let err = Constraint::length(Some(Limit::Int(-1)), None)
            .check()
            .unwrap_err();
        assert!(err.to_string().contains("must not be negative"));
    }

    #[test]
    fn test_check_rejects_bad_regex() {
        assert!(Constraint::regex("(unclosed").check().is_err());
    }

    #[test]
    fn test_check_accepts_browser_only_syntax() {
        for pattern in [
            r"^(?=.*\d).{8,}$",
            r"^(\w)\1$",
            r"(?<!foo)bar",
            r"^(?<year>\d{4})-\k<year>$",
            r"^[]a]+$",
            r"^[^\]]*$",
            r"a|b*|(c)?",
        ] {
            assert!(Constraint::regex(pattern).check().is_ok(), "{pattern}");
        }
    }

    #[test]
    fn test_check_pattern_errors() {
        assert_eq!(check_pattern("(a"), Err("unclosed group at offset 0".to_string()));
        assert_eq!(check_pattern("a)"), Err("unmatched ')' at offset 1".to_string()));
        assert_eq!(
            check_pattern("x[a-z"),
            Err("unterminated character class at offset 1".to_string())
        );
        assert_eq!(check_pattern(r"abc\"), Err("trailing backslash".to_string()));
        assert_eq!(check_pattern("*a"), Err("nothing to repeat at offset 0".to_string()));
        assert_eq!(check_pattern("a|+b"), Err("nothing to repeat at offset 2".to_string()));
        assert_eq!(check_pattern(""), Ok(()));
    }

    #[test]
    fn test_check_uses_html_pattern() {
        let c = Constraint::Regex {
            pattern: "/^a+$/i".to_string(),
            html_pattern: Some("(".to_string()),
        };
        assert!(c.check().is_err());
    }
}
