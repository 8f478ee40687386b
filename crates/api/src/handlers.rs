// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One handler per simulation operation.
//!
//! Each handler normalizes the raw request into a `Command`, then runs it
//! through the persistence layer, which guards it and invokes the engine in
//! one transaction. Validation failures are reported without touching the
//! store.

use airsim::{Command, Outcome, Procedure};
use airsim_domain::{
    AirplaneKey, DomainError, PersonRole, determine_role, optional, pair_support_airplane,
    parse_flag, parse_non_negative, parse_positive, parse_time_of_day, required,
    validate_airplane_category, validate_airport_id,
};
use airsim_persistence::Persistence;
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::request_response::{
    AddAirplaneRequest, AddAirportRequest, AddPersonRequest, AssignPilotRequest, FlightRequest,
    OfferFlightRequest, PilotLicenseRequest,
};

/// Validates a submission, then runs it.
fn submit<F>(persistence: &Persistence, procedure: Procedure, normalize: F) -> Outcome
where
    F: FnOnce() -> Result<Command, DomainError>,
{
    let command: Command = match normalize() {
        Ok(command) => command,
        Err(err) => {
            let outcome: Outcome = Outcome::from(err);
            info!(
                operation = %procedure,
                outcome = outcome.kind(),
                "Submission rejected before store access"
            );
            return outcome;
        }
    };

    match persistence.run_command(&command) {
        Ok(outcome) => outcome,
        Err(err) => {
            let err: ApiError = ApiError::from(err);
            error!(operation = %procedure, error = %err, "Command could not be run");
            err.into_outcome()
        }
    }
}

/// Normalizes an `add_airport` submission.
///
/// # Errors
///
/// Returns an error if a required field is missing or the airport code is
/// not three characters.
pub fn normalize_add_airport(request: &AddAirportRequest) -> Result<Command, DomainError> {
    Ok(Command::AddAirport {
        airport_id: validate_airport_id(&request.airport_id)?,
        name: required("name", &request.name)?,
        city: required("city", &request.city)?,
        state: optional(request.state.as_deref()),
        country: required("country", &request.country)?,
        location_id: required("location_id", &request.location_id)?,
    })
}

/// Normalizes an `add_person` submission.
///
/// # Errors
///
/// Returns an error if a required field is missing or the role fields do not
/// describe exactly one complete role.
pub fn normalize_add_person(request: &AddPersonRequest) -> Result<Command, DomainError> {
    let person_id: String = required("person_id", &request.person_id)?;
    let first_name: String = required("first_name", &request.first_name)?;
    let location_id: String = required("location_id", &request.location_id)?;
    let role: PersonRole = determine_role(
        request.tax_id.as_deref(),
        request.experience.as_deref(),
        request.miles.as_deref(),
        request.funds.as_deref(),
    )?;
    debug!(person_id = %person_id, role = role.kind(), "Person role determined");

    Ok(Command::AddPerson {
        person_id,
        first_name,
        last_name: optional(request.last_name.as_deref()),
        location_id,
        role,
    })
}

/// Normalizes an `add_airplane` submission.
///
/// # Errors
///
/// Returns an error if a field is missing or malformed, or a Boeing airplane
/// lacks a model or an explicit maintained flag.
pub fn normalize_add_airplane(request: &AddAirplaneRequest) -> Result<Command, DomainError> {
    let airline_id: String = required("airline_id", &request.airline_id)?;
    let tail_num: String = required("tail_num", &request.tail_num)?;
    let seat_capacity: u32 = parse_positive("seat_cap", &request.seat_cap)?;
    let speed: u32 = parse_positive("speed", &request.speed)?;
    let location_id: String = required("location_id", &request.location_id)?;
    let maintained: Option<bool> = parse_flag("maintained", request.maintained.as_deref())?;
    let neo: bool = parse_flag("is_neo", request.is_neo.as_deref())?.unwrap_or(false);
    let model: Option<String> = optional(request.model.as_deref());
    let plane_type: Option<String> = optional(request.plane_type.as_deref());

    validate_airplane_category(plane_type.as_deref(), model.as_deref(), maintained)?;

    Ok(Command::AddAirplane {
        key: AirplaneKey {
            airline_id,
            tail_num,
        },
        model,
        seat_capacity,
        plane_type,
        speed,
        maintained,
        neo,
        location_id,
    })
}

/// Normalizes a `grant_or_revoke_pilot_license` submission.
///
/// # Errors
///
/// Returns an error if either field is missing.
pub fn normalize_pilot_license(request: &PilotLicenseRequest) -> Result<Command, DomainError> {
    Ok(Command::GrantOrRevokePilotLicense {
        person_id: required("person_id", &request.person_id)?,
        license_type: required("license_type", &request.license_type)?,
    })
}

/// Normalizes an `offer_flight` submission.
///
/// # Errors
///
/// Returns an error if a field is missing or malformed, or only one half of
/// the support airplane was given.
pub fn normalize_offer_flight(request: &OfferFlightRequest) -> Result<Command, DomainError> {
    Ok(Command::OfferFlight {
        flight_id: required("flight_id", &request.flight_id)?,
        route_id: required("route_id", &request.route_id)?,
        progress: parse_non_negative("progress", &request.progress)?,
        cost: parse_non_negative("cost", &request.cost)?,
        next_time: parse_time_of_day("next_time", &request.next_time)?,
        support: pair_support_airplane(
            request.support_airline.as_deref(),
            request.support_tail.as_deref(),
        )?,
    })
}

/// Normalizes an `assign_pilot` submission.
///
/// # Errors
///
/// Returns an error if either field is missing.
pub fn normalize_assign_pilot(request: &AssignPilotRequest) -> Result<Command, DomainError> {
    Ok(Command::AssignPilot {
        flight_id: required("flight_id", &request.flight_id)?,
        person_id: required("person_id", &request.person_id)?,
    })
}

/// Operations that only name a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlightOperation {
    Takeoff,
    Landing,
    Board,
    Disembark,
    RecycleCrew,
    Retire,
}

impl FlightOperation {
    pub const ALL: [Self; 6] = [
        Self::Takeoff,
        Self::Landing,
        Self::Board,
        Self::Disembark,
        Self::RecycleCrew,
        Self::Retire,
    ];

    /// The stored procedure this operation runs.
    #[must_use]
    pub const fn procedure(self) -> Procedure {
        match self {
            Self::Takeoff => Procedure::FlightTakeoff,
            Self::Landing => Procedure::FlightLanding,
            Self::Board => Procedure::PassengersBoard,
            Self::Disembark => Procedure::PassengersDisembark,
            Self::RecycleCrew => Procedure::RecycleCrew,
            Self::Retire => Procedure::RetireFlight,
        }
    }

    const fn command(self, flight_id: String) -> Command {
        match self {
            Self::Takeoff => Command::FlightTakeoff { flight_id },
            Self::Landing => Command::FlightLanding { flight_id },
            Self::Board => Command::PassengersBoard { flight_id },
            Self::Disembark => Command::PassengersDisembark { flight_id },
            Self::RecycleCrew => Command::RecycleCrew { flight_id },
            Self::Retire => Command::RetireFlight { flight_id },
        }
    }
}

/// Normalizes a submission for an operation that only names a flight.
///
/// # Errors
///
/// Returns an error if the flight id is missing.
pub fn normalize_flight_operation(
    operation: FlightOperation,
    request: &FlightRequest,
) -> Result<Command, DomainError> {
    Ok(operation.command(required("flight_id", &request.flight_id)?))
}

/// Handles `add_airport`.
#[must_use]
pub fn add_airport(persistence: &Persistence, request: &AddAirportRequest) -> Outcome {
    submit(persistence, Procedure::AddAirport, || {
        normalize_add_airport(request)
    })
}

/// Handles `add_person`.
#[must_use]
pub fn add_person(persistence: &Persistence, request: &AddPersonRequest) -> Outcome {
    submit(persistence, Procedure::AddPerson, || normalize_add_person(request))
}

/// Handles `add_airplane`.
#[must_use]
pub fn add_airplane(persistence: &Persistence, request: &AddAirplaneRequest) -> Outcome {
    submit(persistence, Procedure::AddAirplane, || {
        normalize_add_airplane(request)
    })
}

/// Handles `grant_or_revoke_pilot_license`.
#[must_use]
pub fn grant_or_revoke_pilot_license(
    persistence: &Persistence,
    request: &PilotLicenseRequest,
) -> Outcome {
    submit(persistence, Procedure::GrantOrRevokePilotLicense, || {
        normalize_pilot_license(request)
    })
}

/// Handles `offer_flight`.
#[must_use]
pub fn offer_flight(persistence: &Persistence, request: &OfferFlightRequest) -> Outcome {
    submit(persistence, Procedure::OfferFlight, || {
        normalize_offer_flight(request)
    })
}

/// Handles `assign_pilot`.
#[must_use]
pub fn assign_pilot(persistence: &Persistence, request: &AssignPilotRequest) -> Outcome {
    submit(persistence, Procedure::AssignPilot, || {
        normalize_assign_pilot(request)
    })
}

/// Handles `flight_takeoff`, `flight_landing`, `passengers_board`,
/// `passengers_disembark`, `recycle_crew` and `retire_flight`.
#[must_use]
pub fn flight_operation(
    persistence: &Persistence,
    operation: FlightOperation,
    request: &FlightRequest,
) -> Outcome {
    submit(persistence, operation.procedure(), || {
        normalize_flight_operation(operation, request)
    })
}

/// Handles `simulation_cycle`.
#[must_use]
pub fn simulation_cycle(persistence: &Persistence) -> Outcome {
    submit(persistence, Procedure::SimulationCycle, || {
        Ok(Command::SimulationCycle)
    })
}
