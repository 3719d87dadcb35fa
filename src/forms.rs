//! Declarative field descriptions shared by entity-specific forms.
//!
//! A form is an ordered list of [`FieldDescriptor`]s. Each descriptor knows
//! its key, its label, the kind of data it holds, and whether it must be
//! filled in. Value stores stay plain strings until the host commits them.

use std::fmt;

use chrono::NaiveDate;

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Supported data kinds for form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    MultilineText,
    Decimal,
    Date,
}

/// Built-in validation helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    None,
    /// Rejects the empty string only. Whitespace counts as a value.
    Present(String),
    Decimal,
    Date,
}

impl Validator {
    pub fn validate(&self, input: &str) -> Result<(), ValidationError> {
        match self {
            Validator::None => Ok(()),
            Validator::Present(message) => {
                if input.is_empty() {
                    Err(ValidationError::new(message.clone()))
                } else {
                    Ok(())
                }
            }
            Validator::Decimal => input
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(|_| ())
                .ok_or_else(|| ValidationError::new("Enter a numeric amount")),
            Validator::Date => NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| ValidationError::new("Use YYYY-MM-DD format")),
        }
    }

    /// Format check implied by a field kind.
    pub fn for_kind(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Decimal => Validator::Decimal,
            FieldKind::Date => Validator::Date,
            FieldKind::Text | FieldKind::MultilineText => Validator::None,
        }
    }
}

/// Declarative description of a single form field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<&'static str>,
}

impl FieldDescriptor {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: true,
            placeholder: None,
        }
    }

    pub fn with_optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn required_message(&self) -> String {
        format!("{} is required", self.label)
    }

    /// Checks a raw value against this descriptor.
    ///
    /// Presence is always enforced for required fields. Format checks for
    /// the field kind run only when `strict_formats` is set and the value is
    /// non-empty.
    pub fn check(&self, raw: &str, strict_formats: bool) -> Result<(), ValidationError> {
        if self.required {
            Validator::Present(self.required_message()).validate(raw)?;
        }
        if strict_formats && !raw.is_empty() {
            Validator::for_kind(self.kind).validate(raw)?;
        }
        Ok(())
    }
}

/// Metadata describing a full form, including field order.
#[derive(Debug, Clone)]
pub struct FormDescriptor {
    pub name: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self { name, fields }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.key)
    }
}

/// Display form used by listings: whole numbers without decimals, everything
/// else rounded to two.
pub fn format_amount(value: f64) -> String {
    if (value.fract()).abs() < f64::EPSILON {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_rejects_only_the_empty_string() {
        let validator = Validator::Present("Name is required".into());
        assert_eq!(
            validator.validate("").unwrap_err().message,
            "Name is required"
        );
        assert!(validator.validate(" ").is_ok());
        assert!(validator.validate("x").is_ok());
    }

    #[test]
    fn decimal_and_date_formats() {
        assert!(Validator::Decimal.validate("12.50").is_ok());
        assert!(Validator::Decimal.validate("twelve").is_err());
        assert!(Validator::Decimal.validate("NaN").is_err());
        assert!(Validator::Date.validate("2024-02-29").is_ok());
        assert!(Validator::Date.validate("2023-02-29").is_err());
        assert!(Validator::Date.validate("01/02/2024").is_err());
    }

    #[test]
    fn descriptor_skips_format_checks_unless_strict() {
        let amount = FieldDescriptor::new("amount", "Amount", FieldKind::Decimal);
        assert!(amount.check("abc", false).is_ok());
        assert_eq!(
            amount.check("abc", true).unwrap_err().message,
            "Enter a numeric amount"
        );
        assert_eq!(
            amount.check("", true).unwrap_err().message,
            "Amount is required"
        );
    }

    #[test]
    fn optional_descriptor_accepts_empty() {
        let notes =
            FieldDescriptor::new("notes", "Notes", FieldKind::MultilineText).with_optional();
        assert!(notes.check("", true).is_ok());
    }

    #[test]
    fn format_amount_drops_trailing_zeroes_for_whole_numbers() {
        assert_eq!(format_amount(500.0), "500");
        assert_eq!(format_amount(12.5), "12.50");
        assert_eq!(format_amount(0.0), "0");
    }
}
