// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Route, flight and airplane lookups.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use airsim_domain::{Airplane, AirplaneKey, Flight};

use crate::data_models::{AirplaneRow, FlightRow, count_to_u32};
use crate::diesel_schema::{airplane, airport, flight, leg, pilot, route, route_path};
use crate::error::PersistenceError;

backend_fn! {
/// Returns whether a route with this identifier exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn route_exists(conn: &mut _, route_id: &str) -> Result<bool, PersistenceError> {
    let found: bool = diesel::select(exists(route::table.filter(route::route_id.eq(route_id))))
        .get_result(conn)?;
    Ok(found)
}
}

backend_fn! {
/// Counts the legs on a route.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn route_leg_count(conn: &mut _, route_id: &str) -> Result<u32, PersistenceError> {
    let count: i64 = route_path::table
        .filter(route_path::route_id.eq(route_id))
        .count()
        .get_result(conn)?;
    Ok(count_to_u32(count))
}
}

backend_fn! {
/// Resolves the location of the arrival airport of a route's last leg.
///
/// # Errors
///
/// Returns an error if a database query fails.
/// Returns `Ok(None)` if the route has no legs or the airport has no location.
pub fn route_arrival_location(
    conn: &mut _,
    route_id: &str,
) -> Result<Option<String>, PersistenceError> {
    let arrival: Option<String> = route_path::table
        .inner_join(leg::table.on(leg::leg_id.eq(route_path::leg_id)))
        .filter(route_path::route_id.eq(route_id))
        .order(route_path::sequence.desc())
        .select(leg::arrival)
        .first(conn)
        .optional()?;

    let Some(airport_id) = arrival else {
        debug!(route_id, "Route has no final leg");
        return Ok(None);
    };

    let location_id: Option<Option<String>> = airport::table
        .filter(airport::airport_id.eq(&airport_id))
        .select(airport::location_id)
        .first(conn)
        .optional()?;

    Ok(location_id.flatten())
}
}

backend_fn! {
/// Retrieves a flight by identifier.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn flight_by_id(conn: &mut _, flight_id: &str) -> Result<Option<Flight>, PersistenceError> {
    let row: Option<FlightRow> = flight::table
        .filter(flight::flight_id.eq(flight_id))
        .select(FlightRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Flight::try_from).transpose()
}
}

backend_fn! {
/// Retrieves an airplane by its airline and tail number.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn airplane_by_key(
    conn: &mut _,
    key: &AirplaneKey,
) -> Result<Option<Airplane>, PersistenceError> {
    let row: Option<AirplaneRow> = airplane::table
        .filter(airplane::airline_id.eq(&key.airline_id))
        .filter(airplane::tail_num.eq(&key.tail_num))
        .select(AirplaneRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Airplane::try_from).transpose()
}
}

backend_fn! {
/// Returns the flight an airplane currently supports, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn flight_supported_by(
    conn: &mut _,
    key: &AirplaneKey,
) -> Result<Option<String>, PersistenceError> {
    let flight_id: Option<String> = flight::table
        .filter(flight::support_airline.eq(&key.airline_id))
        .filter(flight::support_tail.eq(&key.tail_num))
        .select(flight::flight_id)
        .first(conn)
        .optional()?;
    Ok(flight_id)
}
}

backend_fn! {
/// Counts the pilots commanding a flight.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn pilots_commanding(conn: &mut _, flight_id: &str) -> Result<u32, PersistenceError> {
    let count: i64 = pilot::table
        .filter(pilot::commanding_flight.eq(flight_id))
        .count()
        .get_result(conn)?;
    Ok(count_to_u32(count))
}
}
