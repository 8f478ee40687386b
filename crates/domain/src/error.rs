// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
///
/// Field-level variants describe a single submitted value that is malformed.
/// Cross-field variants describe a business rule spanning several values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is empty or whitespace-only.
    MissingField {
        /// The submitted field name.
        field: &'static str,
    },
    /// Airport identifiers must be exactly three characters.
    InvalidAirportId(String),
    /// A numeric field could not be parsed.
    InvalidNumber {
        /// The submitted field name.
        field: &'static str,
        /// The raw submitted value.
        value: String,
    },
    /// A numeric field is negative.
    NegativeValue {
        /// The submitted field name.
        field: &'static str,
    },
    /// A numeric field must be strictly positive.
    NonPositiveValue {
        /// The submitted field name.
        field: &'static str,
    },
    /// Tax identifiers must look like `###-##-####`.
    InvalidTaxId(String),
    /// A boolean flag has an unrecognised value.
    InvalidFlag {
        /// The submitted field name.
        field: &'static str,
        /// The raw submitted value.
        value: String,
    },
    /// Times of day must be `HH:MM:SS`.
    InvalidTimeOfDay {
        /// The submitted field name.
        field: &'static str,
        /// The raw submitted value.
        value: String,
    },
    /// Airplane status is neither `on_ground` nor `in_flight`.
    InvalidAirplaneStatus(String),
    /// Both pilot and passenger fields were supplied.
    ConflictingRoles,
    /// Neither pilot nor passenger fields were supplied.
    MissingRole,
    /// Only one of tax id / experience was supplied.
    IncompletePilot,
    /// Only one of miles / funds was supplied.
    IncompletePassenger,
    /// Boeing airplanes must name their model.
    BoeingModelRequired,
    /// Boeing airplanes must state whether they are maintained.
    BoeingMaintainedRequired,
    /// Only one of support airline / support tail was supplied.
    IncompleteSupportAirplane,
}

impl DomainError {
    /// Returns the submitted field a field-level error refers to.
    ///
    /// Cross-field rule violations return `None`.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field }
            | Self::InvalidNumber { field, .. }
            | Self::NegativeValue { field }
            | Self::NonPositiveValue { field }
            | Self::InvalidFlag { field, .. }
            | Self::InvalidTimeOfDay { field, .. } => Some(field),
            Self::InvalidAirportId(_) => Some("airport_id"),
            Self::InvalidTaxId(_) => Some("tax_id"),
            Self::InvalidAirplaneStatus(_) => Some("airplane_status"),
            Self::ConflictingRoles
            | Self::MissingRole
            | Self::IncompletePilot
            | Self::IncompletePassenger
            | Self::BoeingModelRequired
            | Self::BoeingMaintainedRequired
            | Self::IncompleteSupportAirplane => None,
        }
    }

    /// Returns whether this error concerns a single malformed field.
    #[must_use]
    pub const fn is_field_error(&self) -> bool {
        self.field().is_some()
    }

    /// Short machine-readable name of the violated business rule.
    #[must_use]
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::ConflictingRoles | Self::MissingRole => "role_exclusivity",
            Self::IncompletePilot | Self::IncompletePassenger => "role_completeness",
            Self::BoeingModelRequired | Self::BoeingMaintainedRequired => "boeing_category",
            Self::IncompleteSupportAirplane => "support_airplane_pair",
            _ => "field_format",
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "{field} is required"),
            Self::InvalidAirportId(value) => write!(
                f,
                "airport id must be exactly 3 characters, got '{value}'"
            ),
            Self::InvalidNumber { field, value } => {
                write!(f, "{field} must be a whole number, got '{value}'")
            }
            Self::NegativeValue { field } => write!(f, "{field} must not be negative"),
            Self::NonPositiveValue { field } => write!(f, "{field} must be greater than 0"),
            Self::InvalidTaxId(value) => {
                write!(f, "tax id must match ###-##-####, got '{value}'")
            }
            Self::InvalidFlag { field, value } => {
                write!(f, "{field} must be true or false, got '{value}'")
            }
            Self::InvalidTimeOfDay { field, value } => {
                write!(f, "{field} must be a time formatted HH:MM:SS, got '{value}'")
            }
            Self::InvalidAirplaneStatus(value) => {
                write!(f, "unknown airplane status '{value}'")
            }
            Self::ConflictingRoles => write!(f, "cannot be both pilot and passenger"),
            Self::MissingRole => write!(f, "must be either a pilot or a passenger"),
            Self::IncompletePilot => write!(f, "pilot requires both tax id and experience"),
            Self::IncompletePassenger => write!(f, "passenger requires both miles and funds"),
            Self::BoeingModelRequired => write!(f, "boeing airplanes require a model"),
            Self::BoeingMaintainedRequired => {
                write!(f, "boeing airplanes require an explicit maintained flag")
            }
            Self::IncompleteSupportAirplane => write!(
                f,
                "support airline and support tail must be provided together"
            ),
        }
    }
}

impl std::error::Error for DomainError {}
