//! Parsing and validation of user-entered amounts.

use crate::domain::Decimal;
use thiserror::Error;

/// Optional inclusive limits for [`validate_amount`], set from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmountBounds {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("{field} is required")]
    Empty { field: String },
    #[error("{field} must be a plain decimal number")]
    Malformed { field: String },
    #[error("{field} must be greater than 0")]
    NotPositive { field: String },
    #[error("{field} must be at least {min}")]
    BelowMin { field: String, min: Decimal },
    #[error("{field} must be at most {max}")]
    AboveMax { field: String, max: Decimal },
}

/// Accepts `-?digits(.digits)?` only: no exponent, no sign `+`, no bare `.5`.
fn is_plain_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.map_or(true, all_digits)
}

/// Parse a trimmed plain decimal string. Returns `None` for anything else.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if !is_plain_decimal(trimmed) {
        return None;
    }
    Decimal::from_str_canonical(trimmed).ok()
}

/// Parse `input` and require it to be positive and within `bounds`.
pub fn validate_amount(
    input: &str,
    field: &str,
    bounds: AmountBounds,
) -> Result<Decimal, AmountError> {
    let field = field.to_string();
    if input.trim().is_empty() {
        return Err(AmountError::Empty { field });
    }
    let value = match parse_amount(input) {
        Some(v) => v,
        None => return Err(AmountError::Malformed { field }),
    };
    if !value.is_positive() {
        return Err(AmountError::NotPositive { field });
    }
    if let Some(min) = bounds.min {
        if value < min {
            return Err(AmountError::BelowMin { field, min });
        }
    }
    if let Some(max) = bounds.max {
        if value > max {
            return Err(AmountError::AboveMax { field, max });
        }
    }
    Ok(value)
}
