//! Shared validation for budget-like entries
//!
//! Annual budgets, month budgets, expenses and incomes all carry a
//! description and an amount owned by one user. The rules for those shared
//! fields live here and are applied to each concrete entity through the
//! [`BudgetEntry`] trait.

use thiserror::Error;

use super::identity::Owned;
use super::money::Money;

/// Maximum length for descriptions and names
pub const MAX_TEXT_LEN: usize = 255;

/// Field-level validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: {value} not valid, it must be greater than 0")]
    NonPositiveAmount { field: &'static str, value: Money },

    #[error("{field}: this field may not be blank")]
    EmptyField { field: &'static str },

    #[error("{field}: ensure this field has no more than {max} characters (it has {len})")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },

    #[error("email: enter a valid email address")]
    InvalidEmail,

    #[error("password: ensure this field has at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("periodicity: '{0}' is not a valid choice (monthly, annual, none)")]
    InvalidPeriodicity(String),

    #[error("date: '{0}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("amount: {0}")]
    InvalidAmount(String),
}

impl ValidationError {
    /// The field the failure refers to
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::NonPositiveAmount { field, .. }
            | Self::EmptyField { field }
            | Self::FieldTooLong { field, .. } => Some(field),
            Self::InvalidEmail => Some("email"),
            Self::PasswordTooShort { .. } => Some("password"),
            Self::InvalidPeriodicity(_) => Some("periodicity"),
            Self::InvalidDate(_) => Some("date"),
            Self::InvalidAmount(_) => Some("amount"),
        }
    }
}

/// Reject any amount that is zero or negative
pub fn validate_positive_amount(field: &'static str, value: Money) -> Result<(), ValidationError> {
    if !value.is_positive() {
        return Err(ValidationError::NonPositiveAmount { field, value });
    }
    Ok(())
}

/// Enforce the column width on free text
pub fn validate_text_len(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(ValidationError::FieldTooLong {
            field,
            max: MAX_TEXT_LEN,
            len,
        });
    }
    Ok(())
}

/// Require non-blank text that fits the column
pub fn validate_required_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    validate_text_len(field, value)
}

/// Fields shared by every budget-like entity
pub trait BudgetEntry: Owned {
    fn description(&self) -> &str;
    fn amount(&self) -> Money;

    /// Validate the shared description and amount fields
    fn validate_entry(&self) -> Result<(), ValidationError> {
        validate_text_len("description", self.description())?;
        validate_positive_amount("amount", self.amount())
    }
}
