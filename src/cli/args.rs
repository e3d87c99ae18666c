//! Argument parsing shared by the command handlers

use std::str::FromStr;

use chrono::NaiveDate;

use crate::crypto::SecureString;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Periodicity, ValidationError};

/// Parse a user-entered amount ("10", "10.50", "$10.50")
pub fn parse_money(input: &str) -> LedgerResult<Money> {
    Money::parse(input).map_err(|e| ValidationError::InvalidAmount(e.to_string()).into())
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(input.to_string()).into())
}

/// Date argument that defaults to today
pub fn parse_date_or_today(input: Option<&str>) -> LedgerResult<NaiveDate> {
    match input {
        Some(input) => parse_date(input),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn parse_periodicity(input: &str) -> LedgerResult<Periodicity> {
    Ok(input.parse::<Periodicity>()?)
}

/// Parse a record id; anything unparseable cannot name a record, so it is
/// reported the same way as a missing one
pub fn parse_id<T: FromStr>(
    input: &str,
    not_found: impl FnOnce(&str) -> LedgerError,
) -> LedgerResult<T> {
    input.trim().parse::<T>().map_err(|_| not_found(input))
}

/// Use the password given on the command line, or prompt for it
pub fn password_or_prompt(given: Option<String>, prompt: &str) -> LedgerResult<SecureString> {
    match given {
        Some(password) => Ok(SecureString::new(password)),
        None => rpassword::prompt_password(prompt)
            .map(SecureString::new)
            .map_err(|e| LedgerError::Io(format!("Failed to read password: {}", e))),
    }
}
