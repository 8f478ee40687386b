// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pre-condition checks gating each state-changing operation.
//!
//! A guard reads the repository and returns `Verdict::Allow` or
//! `Verdict::Deny`. The first failing check wins. Missing data needed to
//! decide is a denial, never an allow.

use crate::command::Command;
use crate::error::StoreError;
use crate::outcome::{Denial, StaffingShortfall};
use crate::repository::EntityRepository;
use airsim_domain::{Airplane, AirplaneKey, Flight};

/// The decision of a guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<T = ()> {
    /// The operation may proceed.
    Allow(T),
    /// The operation must not reach the engine.
    Deny(Denial),
}

impl<T> Verdict<T> {
    /// Returns whether the verdict allows the operation.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    /// Returns the denial, if any.
    #[must_use]
    pub const fn denial(&self) -> Option<&Denial> {
        match self {
            Self::Allow(_) => None,
            Self::Deny(denial) => Some(denial),
        }
    }
}

/// Where the crew of a completed flight goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewRelocation {
    pub flight_id: String,
    /// Location of the route's final arrival airport.
    pub arrival_location_id: String,
}

/// What an allowed command needs after the engine has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clearance {
    /// Nothing beyond the engine call.
    Proceed,
    /// Takeoff with fewer pilots than the airplane needs.
    Understaffed(StaffingShortfall),
    /// Release and relocate the crew.
    RecycleCrew(CrewRelocation),
}

enum Rejection {
    Denied(Denial),
    Store(StoreError),
}

impl From<StoreError> for Rejection {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

type Check<T = ()> = Result<T, Rejection>;

fn deny<T>(rule: &'static str, reason: impl Into<String>) -> Check<T> {
    Err(Rejection::Denied(Denial::new(rule, reason)))
}

fn settle<T>(check: Check<T>) -> Result<Verdict<T>, StoreError> {
    match check {
        Ok(value) => Ok(Verdict::Allow(value)),
        Err(Rejection::Denied(denial)) => Ok(Verdict::Deny(denial)),
        Err(Rejection::Store(err)) => Err(err),
    }
}

// Shared checks

fn location_available<R: EntityRepository>(repo: &mut R, location_id: &str) -> Check {
    if repo.location_in_use(location_id)? {
        return deny(
            "location_available",
            format!("location {location_id} is already in use"),
        );
    }
    Ok(())
}

fn existing_flight<R: EntityRepository>(repo: &mut R, flight_id: &str) -> Check<Flight> {
    match repo.flight_by_id(flight_id)? {
        Some(flight) => Ok(flight),
        None => deny("flight_exists", format!("flight {flight_id} does not exist")),
    }
}

fn on_ground(flight: &Flight) -> Check {
    if !flight.is_on_ground() {
        return deny(
            "flight_on_ground",
            format!("flight {} is not on the ground", flight.flight_id),
        );
    }
    Ok(())
}

/// Leg count of the flight's route. A route without legs cannot be reasoned about.
fn route_legs<R: EntityRepository>(repo: &mut R, route_id: &str) -> Check<u32> {
    let legs: u32 = repo.route_leg_count(route_id)?;
    if legs == 0 {
        return deny("route_has_legs", format!("route {route_id} has no legs"));
    }
    Ok(legs)
}

fn legs_remaining<R: EntityRepository>(repo: &mut R, flight: &Flight) -> Check<u32> {
    let legs: u32 = route_legs(repo, &flight.route_id)?;
    if flight.progress >= legs {
        return deny(
            "progress_in_range",
            format!(
                "flight {} has already completed its route ({} of {legs} legs)",
                flight.flight_id, flight.progress
            ),
        );
    }
    Ok(legs)
}

fn assigned_airplane<R: EntityRepository>(repo: &mut R, flight: &Flight) -> Check<Airplane> {
    let Some(key) = flight.support.as_ref() else {
        return deny(
            "airplane_assigned",
            format!("flight {} has no airplane assigned", flight.flight_id),
        );
    };
    match repo.airplane_by_key(key)? {
        Some(airplane) => Ok(airplane),
        None => deny("airplane_exists", format!("airplane {key} does not exist")),
    }
}

fn airplane_location(airplane: &Airplane) -> Check<String> {
    match airplane.location_id.as_deref() {
        Some(location_id) => Ok(location_id.to_string()),
        None => deny(
            "airplane_located",
            format!("airplane {} has no location", airplane.key),
        ),
    }
}

fn no_passengers_at<R: EntityRepository>(repo: &mut R, location_id: &str) -> Check {
    let passengers: u32 = repo.passengers_at_location(location_id)?;
    if passengers > 0 {
        return deny(
            "passengers_remaining",
            format!("{passengers} passenger(s) remain at location {location_id}"),
        );
    }
    Ok(())
}

// Per-operation guards

fn add_airport<R: EntityRepository>(repo: &mut R, airport_id: &str, location_id: &str) -> Check {
    if repo.airport_exists(airport_id)? {
        return deny(
            "airport_unique",
            format!("airport {airport_id} already exists"),
        );
    }
    location_available(repo, location_id)
}

/// Guards `add_airport`: the airport id and the location must both be new.
///
/// # Errors
///
/// Returns an error if the repository cannot be queried.
pub fn check_add_airport<R: EntityRepository>(
    repo: &mut R,
    airport_id: &str,
    location_id: &str,
) -> Result<Verdict, StoreError> {
    settle(add_airport(repo, airport_id, location_id))
}

fn add_person<R: EntityRepository>(repo: &mut R, person_id: &str, location_id: &str) -> Check {
    if repo.person_exists(person_id)? {
        return deny("person_unique", format!("person {person_id} already exists"));
    }
    if !repo.location_exists(location_id)? {
        return deny(
            "location_exists",
            format!("location {location_id} does not exist"),
        );
    }
    Ok(())
}

/// Guards `add_person`.
///
/// # Errors
///
/// Returns an error if the repository cannot be queried.
pub fn check_add_person<R: EntityRepository>(
    repo: &mut R,
    person_id: &str,
    location_id: &str,
) -> Result<Verdict, StoreError> {
    settle(add_person(repo, person_id, location_id))
}

fn add_airplane<R: EntityRepository>(repo: &mut R, key: &AirplaneKey, location_id: &str) -> Check {
    if !repo.airline_exists(&key.airline_id)? {
        return deny(
            "airline_exists",
            format!("airline {} does not exist", key.airline_id),
        );
    }
    if repo.airplane_by_key(key)?.is_some() {
        return deny("airplane_unique", format!("airplane {key} already exists"));
    }
    location_available(repo, location_id)
}

/// Guards `add_airplane`.
///
/// # Errors
///
/// Returns an error if the repository cannot be queried.
pub fn check_add_airplane<R: EntityRepository>(
    repo: &mut R,
    key: &AirplaneKey,
    location_id: &str,
) -> Result<Verdict, StoreError> {
    settle(add_airplane(repo, key, location_id))
}

fn pilot_license<R: EntityRepository>(repo: &mut R, person_id: &str) -> Check {
    if !repo.person_exists(person_id)? {
        return deny("person_exists", format!("person {person_id} does not exist"));
    }
    if !repo.pilot_exists(person_id)? {
        return deny("pilot_exists", format!("person {person_id} is not a pilot"));
    }
    Ok(())
}

/// Guards `grant_or_revoke_pilot_license`.
///
/// # Errors
///
/// Returns an error if the repository cannot be queried.
pub fn check_pilot_license<R: EntityRepository>(
    repo: &mut R,
    person_id: &str,
) -> Result<Verdict, StoreError> {
    settle(pilot_license(repo, person_id))
}

fn offer_flight<R: EntityRepository>(
    repo: &mut R,
    flight_id: &str,
    route_id: &str,
    progress: u32,
    support: Option<&AirplaneKey>,
) -> Check {
    if repo.flight_exists(flight_id)? {
        return deny("flight_unique", format!("flight {flight_id} already exists"));
    }
    if !repo.route_exists(route_id)? {
        return deny("route_exists", format!("route {route_id} does not exist"));
    }
    let legs: u32 = route_legs(repo, route_id)?;
    if progress >= legs {
        return deny(
            "progress_in_range",
            format!("progress {progress} must be less than the route's {legs} legs"),
        );
    }

    if let Some(key) = support {
        if repo.airplane_by_key(key)?.is_none() {
            return deny(
                "support_airplane_exists",
                format!("airplane {key} does not exist"),
            );
        }
        if let Some(other) = repo.flight_supported_by(key)? {
            return deny(
                "support_airplane_available",
                format!("airplane {key} is already assigned to flight {other}"),
            );
        }
    }
    Ok(())
}

/// Guards `offer_flight`.
///
/// # Errors
///
/// Returns an error if the repository cannot be queried.
pub fn check_offer_flight<R: EntityRepository>(
    repo: &mut R,
    flight_id: &str,
    route_id: &str,
    progress: u32,
    support: Option<&AirplaneKey>,
) -> Result<Verdict, StoreError> {
    settle(offer_flight(repo, flight_id, route_id, progress, support))
}

fn assign_pilot<R: EntityRepository>(repo: &mut R, flight_id: &str, person_id: &str) -> Check {
    let flight: Flight = existing_flight(repo, flight_id)?;
    on_ground(&flight)?;
    legs_remaining(repo, &flight)?;

    let Some(pilot) = repo.pilot_by_id(person_id)? else {
        return deny("pilot_exists", format!("pilot {person_id} does not exist"));
    };
    if let Some(commanding) = pilot.commanding_flight.as_deref() {
        return deny(
            "pilot_uncommanding",
            format!("pilot {person_id} is already commanding flight {commanding}"),
        );
    }

    let airplane: Airplane = assigned_airplane(repo, &flight)?;
    let license_type: &str = airplane.license_type();
    if !repo.pilot_license(person_id, license_type)? {
        return deny(
            "pilot_licensed",
            format!("pilot {person_id} does not hold a {license_type} license"),
        );
    }

    let airplane_location: String = airplane_location(&airplane)?;
    if pilot.location_id.as_deref() != Some(airplane_location.as_str()) {
        return deny(
            "pilot_colocated",
            format!("pilot {person_id} is not at the airplane's location {airplane_location}"),
        );
    }
    Ok(())
}

/// Guards `assign_pilot`.
///
/// The pilot must be free, licensed for the flight's airplane and standing
/// where the airplane is.
///
/// # Errors
///
/// Returns an error if the repository cannot be queried.
pub fn check_assign_pilot<R: EntityRepository>(
    repo: &mut R,
    flight_id: &str,
    person_id: &str,
) -> Result<Verdict, StoreError> {
    settle(assign_pilot(repo, flight_id, person_id))
}

fn takeoff<R: EntityRepository>(repo: &mut R, flight_id: &str) -> Check<Option<StaffingShortfall>> {
    let flight: Flight = existing_flight(repo, flight_id)?;
    on_ground(&flight)?;
    legs_remaining(repo, &flight)?;
    let airplane: Airplane = assigned_airplane(repo, &flight)?;

    let required: u32 = airplane.required_pilots();
    let actual: u32 = repo.pilots_commanding(flight_id)?;
    Ok((actual < required).then_some(StaffingShortfall { required, actual }))
}

/// Guards `flight_takeoff`.
///
/// Understaffing does not deny; it is reported through `StaffingShortfall`.
///
/// # Errors
///
/// Returns an error if the repository cannot be queried.
pub fn check_takeoff<R: EntityRepository>(
    repo: &mut R,
    flight_id: &str,
) -> Result<Verdict<Option<StaffingShortfall>>, StoreError> {
    settle(takeoff(repo, flight_id))
}

fn landing<R: EntityRepository>(repo: &mut R, flight_id: &str) -> Check {
    let flight: Flight = existing_flight(repo, flight_id)?;
    if flight.is_on_ground() {
        return deny(
            "flight_in_flight",
            format!("flight {flight_id} is not in flight"),
        );
    }
    Ok(())
}

/// Guards `flight_landing`.
///
/// # Errors
///
/// Returns an error if the repository cannot be queried.
pub fn check_landing<R: EntityRepository>(
    repo: &mut R,
    flight_id: &str,
) -> Result<Verdict, StoreError> {
    settle(landing(repo, flight_id))
}

fn board<R: EntityRepository>(repo: &mut R, flight_id: &str) -> Check {
    let flight: Flight = existing_flight(repo, flight_id)?;
    on_ground(&flight)?;
    legs_remaining(repo, &flight)?;
    Ok(())
}

/// Guards `passengers_board`.
///
/// # Errors
///
/// Returns an error if the repository cannot be queried.
pub fn check_board<R: EntityRepository>(
    repo: &mut R,
    flight_id: &str,
) -> Result<Verdict, StoreError> {
    settle(board(repo, flight_id))
}

fn disembark<R: EntityRepository>(repo: &mut R, flight_id: &str) -> Check {
    let flight: Flight = existing_flight(repo, flight_id)?;
    on_ground(&flight)
}

/// Guards `passengers_disembark`.
///
/// # Errors
///
/// Returns an error if the repository cannot be queried.
pub fn check_disembark<R: EntityRepository>(
    repo: &mut R,
    flight_id: &str,
) -> Result<Verdict, StoreError> {
    settle(disembark(repo, flight_id))
}

fn recycle_crew<R: EntityRepository>(repo: &mut R, flight_id: &str) -> Check<CrewRelocation> {
    let flight: Flight = existing_flight(repo, flight_id)?;
    on_ground(&flight)?;
    let legs: u32 = route_legs(repo, &flight.route_id)?;
    if flight.progress != legs {
        return deny(
            "route_complete",
            format!(
                "flight {flight_id} has not completed its route ({} of {legs} legs)",
                flight.progress
            ),
        );
    }

    let Some(arrival_location_id) = repo.route_arrival_location(&flight.route_id)? else {
        return deny(
            "arrival_resolvable",
            format!(
                "arrival location of route {} cannot be determined",
                flight.route_id
            ),
        );
    };
    no_passengers_at(repo, &arrival_location_id)?;

    // Nobody may be left aboard either.
    let airplane: Airplane = assigned_airplane(repo, &flight)?;
    let airplane_location: String = airplane_location(&airplane)?;
    no_passengers_at(repo, &airplane_location)?;

    Ok(CrewRelocation {
        flight_id: flight.flight_id,
        arrival_location_id,
    })
}

/// Guards `recycle_crew`.
///
/// On success returns where the crew should be moved.
///
/// # Errors
///
/// Returns an error if the repository cannot be queried.
pub fn check_recycle_crew<R: EntityRepository>(
    repo: &mut R,
    flight_id: &str,
) -> Result<Verdict<CrewRelocation>, StoreError> {
    settle(recycle_crew(repo, flight_id))
}

fn retire_flight<R: EntityRepository>(repo: &mut R, flight_id: &str) -> Check {
    let flight: Flight = existing_flight(repo, flight_id)?;
    on_ground(&flight)?;
    let legs: u32 = route_legs(repo, &flight.route_id)?;
    if flight.progress != 0 && flight.progress != legs {
        return deny(
            "progress_at_endpoint",
            format!(
                "flight {flight_id} is mid-route ({} of {legs} legs)",
                flight.progress
            ),
        );
    }

    let airplane: Airplane = assigned_airplane(repo, &flight)?;
    let airplane_location: String = airplane_location(&airplane)?;
    no_passengers_at(repo, &airplane_location)?;

    let pilots: u32 = repo.pilots_commanding(flight_id)?;
    if pilots > 0 {
        return deny(
            "pilots_remaining",
            format!("{pilots} pilot(s) are still commanding flight {flight_id}"),
        );
    }
    Ok(())
}

/// Guards `retire_flight`.
///
/// # Errors
///
/// Returns an error if the repository cannot be queried.
pub fn check_retire_flight<R: EntityRepository>(
    repo: &mut R,
    flight_id: &str,
) -> Result<Verdict, StoreError> {
    settle(retire_flight(repo, flight_id))
}

/// Runs the guard for any command.
///
/// # Errors
///
/// Returns an error if the repository cannot be queried.
pub fn check<R: EntityRepository>(
    repo: &mut R,
    command: &Command,
) -> Result<Verdict<Clearance>, StoreError> {
    let proceed = |verdict: Verdict| match verdict {
        Verdict::Allow(()) => Verdict::Allow(Clearance::Proceed),
        Verdict::Deny(denial) => Verdict::Deny(denial),
    };

    match command {
        Command::AddAirport {
            airport_id,
            location_id,
            ..
        } => check_add_airport(repo, airport_id, location_id).map(proceed),
        Command::AddPerson {
            person_id,
            location_id,
            ..
        } => check_add_person(repo, person_id, location_id).map(proceed),
        Command::AddAirplane {
            key, location_id, ..
        } => check_add_airplane(repo, key, location_id).map(proceed),
        Command::GrantOrRevokePilotLicense { person_id, .. } => {
            check_pilot_license(repo, person_id).map(proceed)
        }
        Command::OfferFlight {
            flight_id,
            route_id,
            progress,
            support,
            ..
        } => check_offer_flight(repo, flight_id, route_id, *progress, support.as_ref())
            .map(proceed),
        Command::AssignPilot {
            flight_id,
            person_id,
        } => check_assign_pilot(repo, flight_id, person_id).map(proceed),
        Command::FlightTakeoff { flight_id } => {
            check_takeoff(repo, flight_id).map(|verdict| match verdict {
                Verdict::Allow(Some(shortfall)) => {
                    Verdict::Allow(Clearance::Understaffed(shortfall))
                }
                Verdict::Allow(None) => Verdict::Allow(Clearance::Proceed),
                Verdict::Deny(denial) => Verdict::Deny(denial),
            })
        }
        Command::FlightLanding { flight_id } => check_landing(repo, flight_id).map(proceed),
        Command::PassengersBoard { flight_id } => check_board(repo, flight_id).map(proceed),
        Command::PassengersDisembark { flight_id } => {
            check_disembark(repo, flight_id).map(proceed)
        }
        Command::RecycleCrew { flight_id } => {
            check_recycle_crew(repo, flight_id).map(|verdict| match verdict {
                Verdict::Allow(relocation) => Verdict::Allow(Clearance::RecycleCrew(relocation)),
                Verdict::Deny(denial) => Verdict::Deny(denial),
            })
        }
        Command::RetireFlight { flight_id } => check_retire_flight(repo, flight_id).map(proceed),
        Command::SimulationCycle => Ok(Verdict::Allow(Clearance::Proceed)),
    }
}
