//! Message ids for rule descriptors.
//!
//! Each id doubles as the untranslated English template. Translation
//! catalogs are keyed by these exact strings, so changing one breaks
//! existing translations.

/// `Required`.
pub const REQUIRED: &str = "The '{{ field_name }}' field is required.";

/// `Regex`.
pub const REGEX: &str = "The '{{ field_name }}' value is not valid";

/// `Range` with only a lower bound.
pub const RANGE_MIN: &str = "The field '{{ field_name }}' value should be {{ limit }} or more.";
/// `Range` with only an upper bound.
pub const RANGE_MAX: &str = "The field '{{ field_name }}' value should be {{ limit }} or less.";
/// `Range` with both bounds.
pub const RANGE_BETWEEN: &str =
    "The field '{{ field_name }}' value should be in range {{ min }} to {{ max }}.";

/// `LessThanOrEqual`.
pub const LESS_THAN: &str = "The field '{{ field_name }}' value should be less than {{ limit }}.";
/// `GreaterThanOrEqual`.
pub const GREATER_THAN: &str =
    "The field '{{ field_name }}' value should be greater than {{ limit }}.";

/// `Length` with only a lower bound.
pub const LENGTH_MIN: &str = "The field '{{ field_name }}' should have {{ limit }} or more.";
/// `Length` with only an upper bound.
pub const LENGTH_MAX: &str = "The field '{{ field_name }}' should have {{ limit }} or less.";
/// `Length` with both bounds.
pub const LENGTH_BETWEEN: &str =
    "The field '{{ field_name }}' should have from {{ min }} to {{ max }} characters.";

/// `Type` mapped to whole numbers.
pub const DIGITS: &str = "The '{{ field_name }}' field value is not a valid integer.";
/// `Type` mapped to numbers.
pub const NUMBER: &str = "The '{{ field_name }}' field value is not a valid number.";

/// `Date`.
pub const DATE: &str = "The '{{ field_name }}' field value is not a valid date.";
/// `Email`.
pub const EMAIL: &str = "The '{{ field_name }}' field value is not a valid email address.";
/// `CreditCard`.
pub const CREDIT_CARD: &str = "The '{{ field_name }}' field value is not a valid credit card number.";
/// `Url`.
pub const URL: &str = "The '{{ field_name }}' field value is not a valid url.";

/// Placeholder names used by the templates above.
pub mod placeholders {
    /// The (translated) field label.
    pub const FIELD_NAME: &str = "field_name";
    /// A single bound.
    pub const LIMIT: &str = "limit";
    /// The lower bound of a two-sided rule.
    pub const MIN: &str = "min";
    /// The upper bound of a two-sided rule.
    pub const MAX: &str = "max";
}

/// Every message id, for catalog tooling and completeness checks.
pub const ALL: &[&str] = &[
    REQUIRED,
    REGEX,
    RANGE_MIN,
    RANGE_MAX,
    RANGE_BETWEEN,
    LESS_THAN,
    GREATER_THAN,
    LENGTH_MIN,
    LENGTH_MAX,
    LENGTH_BETWEEN,
    DIGITS,
    NUMBER,
    DATE,
    EMAIL,
    CREDIT_CARD,
    URL,
];
