// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry the raw submitted strings. Absent and empty fields are
//! equivalent; normalization happens in the handlers.

use airsim::Outcome;
use serde::{Deserialize, Serialize};

/// API request to add an airport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddAirportRequest {
    /// Three-character airport code.
    pub airport_id: String,
    pub name: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    /// The location the airport claims.
    pub location_id: String,
}

/// API request to add a person.
///
/// Submitting `tax_id` and `experience` makes a pilot; `miles` and `funds`
/// make a passenger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddPersonRequest {
    pub person_id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub tax_id: Option<String>,
    pub experience: Option<String>,
    pub miles: Option<String>,
    pub funds: Option<String>,
    pub location_id: String,
}

/// API request to add an airplane.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddAirplaneRequest {
    pub airline_id: String,
    pub tail_num: String,
    pub model: Option<String>,
    /// Seat capacity.
    pub seat_cap: String,
    pub plane_type: Option<String>,
    pub speed: String,
    /// Maintenance flag; required for Boeing airplanes.
    pub maintained: Option<String>,
    /// Checkbox semantics: `on` when ticked, absent otherwise.
    pub is_neo: Option<String>,
    pub location_id: String,
}

/// API request to grant or revoke a pilot license.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotLicenseRequest {
    pub person_id: String,
    pub license_type: String,
}

/// API request to offer a flight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferFlightRequest {
    pub flight_id: String,
    pub route_id: String,
    /// Index of the next unflown leg.
    pub progress: String,
    pub cost: String,
    /// Time of day as `HH:MM:SS`.
    pub next_time: String,
    pub support_airline: Option<String>,
    pub support_tail: Option<String>,
}

/// API request to assign a pilot to a flight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignPilotRequest {
    pub flight_id: String,
    pub person_id: String,
}

/// API request for operations that only name a flight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightRequest {
    pub flight_id: String,
}

/// API response describing the outcome of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeResponse {
    /// One of `success`, `success_degraded`, `denied`, `engine_failure`,
    /// `malformed_input`.
    pub outcome: String,
    /// User-facing message.
    pub message: String,
    /// The offending field, for malformed input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// The violated rule, for denials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    /// Pilots required, for degraded takeoffs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<u32>,
    /// Pilots assigned, for degraded takeoffs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<u32>,
}

impl OutcomeResponse {
    /// Describes `outcome` as the result of `operation`.
    #[must_use]
    pub fn new(operation: &str, outcome: &Outcome) -> Self {
        let mut response: Self = Self {
            outcome: outcome.kind().to_string(),
            message: outcome.message(operation),
            field: None,
            rule: None,
            required: None,
            actual: None,
        };
        match outcome {
            Outcome::SuccessDegraded(shortfall) => {
                response.required = Some(shortfall.required);
                response.actual = Some(shortfall.actual);
            }
            Outcome::Denied(denial) => response.rule = Some(denial.rule.to_string()),
            Outcome::MalformedInput { field, .. } => response.field = Some((*field).to_string()),
            Outcome::Success | Outcome::EngineFailure(_) => {}
        }
        response
    }
}
