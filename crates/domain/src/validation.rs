// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure validation rules for submitted field sets.
//!
//! Every rule either returns the normalized value or a `DomainError`.
//! None of these functions touch stored data.

use crate::error::DomainError;
use crate::types::{AirplaneKey, PersonRole, TaxId, is_boeing_type};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;
use time::Time;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// ASCII digits only; `\d` would also accept other Unicode digits.
static TAX_ID_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}-[0-9]{2}-[0-9]{4}$"));

const TIME_OF_DAY: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Normalizes an optional submitted value.
///
/// Absent, empty and whitespace-only values all become `None`.
#[must_use]
pub fn optional(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

/// Validates that a required field is present.
///
/// # Arguments
///
/// * `field` - The submitted field name, used in the diagnostic
/// * `raw` - The raw submitted value
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the value is empty or whitespace-only.
pub fn required(field: &'static str, raw: &str) -> Result<String, DomainError> {
    optional(Some(raw)).ok_or(DomainError::MissingField { field })
}

/// Validates an airport identifier.
///
/// # Errors
///
/// Returns an error if the identifier is missing or not exactly 3 characters.
pub fn validate_airport_id(raw: &str) -> Result<String, DomainError> {
    let airport_id: String = required("airport_id", raw)?;
    if airport_id.chars().count() != 3 {
        return Err(DomainError::InvalidAirportId(airport_id));
    }
    Ok(airport_id)
}

/// Parses a non-negative whole number such as experience, miles or progress.
///
/// # Errors
///
/// Returns an error if the value is missing, not a whole number, negative,
/// or too large.
pub fn parse_non_negative(field: &'static str, raw: &str) -> Result<u32, DomainError> {
    let value: String = required(field, raw)?;
    let parsed: i64 = value
        .parse::<i64>()
        .map_err(|_| DomainError::InvalidNumber {
            field,
            value: value.clone(),
        })?;

    if parsed < 0 {
        return Err(DomainError::NegativeValue { field });
    }

    u32::try_from(parsed).map_err(|_| DomainError::InvalidNumber { field, value })
}

/// Parses a strictly positive whole number such as seat capacity or speed.
///
/// # Errors
///
/// Returns an error if the value is not a whole number or is not greater than 0.
pub fn parse_positive(field: &'static str, raw: &str) -> Result<u32, DomainError> {
    let parsed: u32 = parse_non_negative(field, raw).map_err(|err| match err {
        DomainError::NegativeValue { field } => DomainError::NonPositiveValue { field },
        other => other,
    })?;

    if parsed == 0 {
        return Err(DomainError::NonPositiveValue { field });
    }
    Ok(parsed)
}

/// Parses passenger funds as a non-negative decimal amount.
///
/// # Errors
///
/// Returns an error if the value is not a decimal number or is negative.
pub fn parse_funds(raw: &str) -> Result<Decimal, DomainError> {
    let field: &'static str = "funds";
    let value: String = required(field, raw)?;
    let funds: Decimal = Decimal::from_str(&value).map_err(|_| DomainError::InvalidNumber {
        field,
        value: value.clone(),
    })?;

    if funds < Decimal::ZERO {
        return Err(DomainError::NegativeValue { field });
    }
    Ok(funds)
}

/// Validates a pilot tax identifier against `###-##-####`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTaxId` if the value does not match exactly.
pub fn parse_tax_id(raw: &str) -> Result<TaxId, DomainError> {
    let value: String = required("tax_id", raw)?;
    let matches: bool = TAX_ID_PATTERN
        .as_ref()
        .is_ok_and(|pattern| pattern.is_match(&value));

    if !matches {
        return Err(DomainError::InvalidTaxId(value));
    }
    Ok(TaxId::new_unchecked(value))
}

/// Parses an optional boolean flag such as `maintained`.
///
/// Absent values stay `None` so callers can tell "not supplied" from `false`.
///
/// # Errors
///
/// Returns `DomainError::InvalidFlag` for anything other than the accepted
/// spellings of true and false.
pub fn parse_flag(field: &'static str, raw: Option<&str>) -> Result<Option<bool>, DomainError> {
    let Some(value) = optional(raw) else {
        return Ok(None);
    };

    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(Some(true)),
        "false" | "no" | "off" | "0" => Ok(Some(false)),
        _ => Err(DomainError::InvalidFlag { field, value }),
    }
}

/// Parses a time of day formatted `HH:MM:SS`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeOfDay` if the value does not parse.
pub fn parse_time_of_day(field: &'static str, raw: &str) -> Result<Time, DomainError> {
    let value: String = required(field, raw)?;
    Time::parse(&value, TIME_OF_DAY).map_err(|_| DomainError::InvalidTimeOfDay { field, value })
}

/// Formats a time of day the way it was accepted.
#[must_use]
pub fn format_time_of_day(time: Time) -> String {
    time.format(TIME_OF_DAY)
        .unwrap_or_else(|_| format!("{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second()))
}

/// Determines a person's role from which role fields were submitted.
///
/// A person with a tax id or experience is a pilot; a person with miles or
/// funds is a passenger. Presence is decided before any value is parsed, so
/// conflicting or partial role data is reported even if a value is also
/// malformed.
///
/// # Arguments
///
/// * `tax_id` - Raw tax id, if submitted
/// * `experience` - Raw experience, if submitted
/// * `miles` - Raw miles, if submitted
/// * `funds` - Raw funds, if submitted
///
/// # Errors
///
/// Returns an error if:
/// - Both pilot and passenger fields are present
/// - Neither role has any field present
/// - A role's fields are only partially present
/// - A present value is malformed
pub fn determine_role(
    tax_id: Option<&str>,
    experience: Option<&str>,
    miles: Option<&str>,
    funds: Option<&str>,
) -> Result<PersonRole, DomainError> {
    let tax_id: Option<String> = optional(tax_id);
    let experience: Option<String> = optional(experience);
    let miles: Option<String> = optional(miles);
    let funds: Option<String> = optional(funds);

    let pilot_fields: bool = tax_id.is_some() || experience.is_some();
    let passenger_fields: bool = miles.is_some() || funds.is_some();

    match (pilot_fields, passenger_fields) {
        (true, true) => Err(DomainError::ConflictingRoles),
        (false, false) => Err(DomainError::MissingRole),
        (true, false) => {
            let (Some(tax_id), Some(experience)) = (tax_id, experience) else {
                return Err(DomainError::IncompletePilot);
            };
            Ok(PersonRole::new_pilot(
                parse_tax_id(&tax_id)?,
                parse_non_negative("experience", &experience)?,
            ))
        }
        (false, true) => {
            let (Some(miles), Some(funds)) = (miles, funds) else {
                return Err(DomainError::IncompletePassenger);
            };
            Ok(PersonRole::Passenger {
                miles: parse_non_negative("miles", &miles)?,
                funds: parse_funds(&funds)?,
            })
        }
    }
}

/// Applies the airplane category rule.
///
/// Boeing airplanes must name a model and must state explicitly whether they
/// are maintained.
///
/// # Errors
///
/// Returns an error if a Boeing airplane lacks a model or a maintained flag.
pub fn validate_airplane_category(
    plane_type: Option<&str>,
    model: Option<&str>,
    maintained: Option<bool>,
) -> Result<(), DomainError> {
    if !plane_type.is_some_and(is_boeing_type) {
        return Ok(());
    }
    if optional(model).is_none() {
        return Err(DomainError::BoeingModelRequired);
    }
    if maintained.is_none() {
        return Err(DomainError::BoeingMaintainedRequired);
    }
    Ok(())
}

/// Pairs the optional support airline and tail into an airplane key.
///
/// # Errors
///
/// Returns `DomainError::IncompleteSupportAirplane` if exactly one is given.
pub fn pair_support_airplane(
    support_airline: Option<&str>,
    support_tail: Option<&str>,
) -> Result<Option<AirplaneKey>, DomainError> {
    match (optional(support_airline), optional(support_tail)) {
        (Some(airline_id), Some(tail_num)) => Ok(Some(AirplaneKey {
            airline_id,
            tail_num,
        })),
        (None, None) => Ok(None),
        _ => Err(DomainError::IncompleteSupportAirplane),
    }
}
