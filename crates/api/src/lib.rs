// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request handling for the flight simulation front-end.
//!
//! Maps one submission to: validate, guard, invoke the engine, report the
//! outcome. Handlers are synchronous; callers on an async runtime should run
//! them on a blocking thread.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::ApiError;
pub use handlers::{
    FlightOperation, add_airplane, add_airport, add_person, assign_pilot, flight_operation,
    grant_or_revoke_pilot_license, normalize_add_airplane, normalize_add_airport,
    normalize_add_person, normalize_assign_pilot, normalize_flight_operation,
    normalize_offer_flight, normalize_pilot_license, offer_flight, simulation_cycle,
};
pub use request_response::{
    AddAirplaneRequest, AddAirportRequest, AddPersonRequest, AssignPilotRequest, FlightRequest,
    OfferFlightRequest, OutcomeResponse, PilotLicenseRequest,
};
