// src/shared/validation.rs

//! Coercion of raw, user-entered text into typed values.
//!
//! Forms arrive as strings straight from the presentation layer. Everything
//! here runs before storage is touched, and every failure is a
//! `EngineError::Validation`.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use super::errors::{EngineError, EngineResult};

/// Date format accepted for acquisition dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the trimmed value when it holds any non-whitespace text.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Normalises an optional text field: blank input becomes `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    present(&value).map(str::to_string)
}

/// Fails with a single error listing every required field left blank.
pub fn require_fields(fields: &[(&str, &Option<String>)]) -> EngineResult<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::validation(format!(
            "missing required field(s): {}",
            missing.join(", ")
        )))
    }
}

/// Most integer digits a stored amount can have (`NUMERIC(12, 2)`).
pub const MONEY_INTEGER_DIGITS: usize = 10;

/// Most fractional digits a stored amount can have.
pub const MONEY_FRACTION_DIGITS: usize = 2;

/// Parses a non-negative monetary amount written as a plain decimal.
///
/// Only `digits[.digits]` is accepted, within the range and precision the
/// `NUMERIC(12, 2)` columns can hold exactly. Exponent notation is refused
/// before it reaches `BigDecimal`.
pub fn parse_money(field: &str, raw: &str) -> EngineResult<BigDecimal> {
    let text = raw.trim();
    let unsigned = match text.strip_prefix('-') {
        Some(rest) => {
            if is_plain_decimal(rest) {
                return Err(EngineError::validation(format!("{} must not be negative", field)));
            }
            rest
        }
        None => text,
    };

    if !is_plain_decimal(unsigned) {
        return Err(EngineError::validation(format!(
            "{} must be a plain decimal number, got '{}'",
            field, raw
        )));
    }

    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if integer.trim_start_matches('0').len() > MONEY_INTEGER_DIGITS {
        return Err(EngineError::validation(format!(
            "{} must be less than 10^{}",
            field, MONEY_INTEGER_DIGITS
        )));
    }
    if fraction.len() > MONEY_FRACTION_DIGITS {
        return Err(EngineError::validation(format!(
            "{} allows at most {} decimal places, got '{}'",
            field, MONEY_FRACTION_DIGITS, raw
        )));
    }

    BigDecimal::from_str(unsigned)
        .map_err(|_| EngineError::validation(format!("{} must be a number, got '{}'", field, raw)))
}

/// `digits` or `digits.digits`, nothing else.
fn is_plain_decimal(text: &str) -> bool {
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    match text.split_once('.') {
        Some((integer, fraction)) => digits(integer) && digits(fraction),
        None => digits(text),
    }
}

/// Parses a non-negative whole stock quantity.
pub fn parse_quantity(field: &str, raw: &str) -> EngineResult<i32> {
    let value: i32 = raw.trim().parse().map_err(|_| {
        EngineError::validation(format!("{} must be a whole number, got '{}'", field, raw))
    })?;

    if value < 0 {
        return Err(EngineError::validation(format!("{} must not be negative", field)));
    }
    Ok(value)
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(field: &str, raw: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        EngineError::validation(format!("{} must be a date in YYYY-MM-DD format, got '{}'", field, raw))
    })
}

/// Parses a storage identifier.
///
/// Any integer is accepted; whether it names an existing record is decided
/// by the lookup, not here.
pub fn parse_id(field: &str, raw: &str) -> EngineResult<i32> {
    raw.trim().parse::<i32>().map_err(|_| {
        EngineError::validation(format!("{} must be an integer, got '{}'", field, raw))
    })
}
