use std::time::Duration;

use super::types::PositiveUsize;
use crate::error::ValidationError;

pub(super) fn parse_positive_usize(s: &str) -> Result<PositiveUsize, ValidationError> {
    s.parse::<PositiveUsize>()
}

pub(crate) fn parse_bool_env(s: &str) -> Result<bool, ValidationError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        }),
    }
}

/// Parses an invocation param in `name:value` form.
///
/// Only the first `:` separates name from value, so values may contain colons.
pub(crate) fn parse_param(s: &str) -> Result<(String, String), ValidationError> {
    let Some((name, value)) = s.split_once(':') else {
        return Err(ValidationError::InvalidParamFormat {
            value: s.to_owned(),
        });
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::ParamNameEmpty {
            value: s.to_owned(),
        });
    }
    Ok((name.to_owned(), value.trim().to_owned()))
}

pub(crate) fn parse_function_name(s: &str) -> Result<String, ValidationError> {
    let name = s.trim();
    if name.is_empty() {
        return Err(ValidationError::FunctionNameEmpty);
    }
    if name.contains('/') {
        return Err(ValidationError::FunctionNameHasSlash {
            value: name.to_owned(),
        });
    }
    Ok(name.to_owned())
}

/// Parses a duration with an optional `ms`/`s`/`m`/`h` suffix (bare numbers are seconds).
pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, ValidationError> {
    let duration = parse_duration_units(s)?;
    if duration.is_zero() {
        return Err(ValidationError::DurationZero);
    }
    Ok(duration)
}

/// Same as [`parse_duration_arg`] but accepts zero, for wait bounds.
pub(crate) fn parse_wait_arg(s: &str) -> Result<Duration, ValidationError> {
    parse_duration_units(s)
}

fn parse_duration_units(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let digits_len = value.chars().take_while(char::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 =
        num_part
            .parse()
            .map_err(|err| ValidationError::InvalidDurationNumber {
                value: value.to_owned(),
                source: err,
            })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    match unit {
        "ms" => Ok(Duration::from_millis(number)),
        "s" => Ok(Duration::from_secs(number)),
        "m" => number
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or(ValidationError::DurationOverflow),
        "h" => number
            .checked_mul(60)
            .and_then(|minutes| minutes.checked_mul(60))
            .map(Duration::from_secs)
            .ok_or(ValidationError::DurationOverflow),
        _ => Err(ValidationError::InvalidDurationUnit {
            unit: unit.to_owned(),
        }),
    }
}
