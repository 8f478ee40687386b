// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Airport, location, person, pilot and airline lookups.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use airsim_domain::Pilot;

use crate::data_models::{PilotRow, count_to_u32};
use crate::diesel_schema::{
    airline, airplane, airport, location, passenger, person, pilot, pilot_licenses,
};
use crate::error::PersistenceError;

backend_fn! {
/// Returns whether an airport with this identifier exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn airport_exists(conn: &mut _, airport_id: &str) -> Result<bool, PersistenceError> {
    let found: bool = diesel::select(exists(
        airport::table.filter(airport::airport_id.eq(airport_id)),
    ))
    .get_result(conn)?;
    Ok(found)
}
}

backend_fn! {
/// Returns whether a location row exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn location_exists(conn: &mut _, location_id: &str) -> Result<bool, PersistenceError> {
    let found: bool = diesel::select(exists(
        location::table.filter(location::location_id.eq(location_id)),
    ))
    .get_result(conn)?;
    Ok(found)
}
}

backend_fn! {
/// Returns whether a location is claimed by a location row, an airport,
/// an airplane or a person.
///
/// # Errors
///
/// Returns an error if any of the database queries fail.
pub fn location_in_use(conn: &mut _, location_id: &str) -> Result<bool, PersistenceError> {
    let has_row: bool = diesel::select(exists(
        location::table.filter(location::location_id.eq(location_id)),
    ))
    .get_result(conn)?;
    if has_row {
        return Ok(true);
    }

    let claimed_by_airport: bool = diesel::select(exists(
        airport::table.filter(airport::location_id.eq(location_id)),
    ))
    .get_result(conn)?;
    let claimed_by_airplane: bool = diesel::select(exists(
        airplane::table.filter(airplane::location_id.eq(location_id)),
    ))
    .get_result(conn)?;
    let occupied: bool = diesel::select(exists(
        person::table.filter(person::location_id.eq(location_id)),
    ))
    .get_result(conn)?;

    debug!(
        location_id,
        claimed_by_airport, claimed_by_airplane, occupied, "Checked location claims"
    );
    Ok(claimed_by_airport || claimed_by_airplane || occupied)
}
}

backend_fn! {
/// Returns whether a person with this identifier exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn person_exists(conn: &mut _, person_id: &str) -> Result<bool, PersistenceError> {
    let found: bool = diesel::select(exists(
        person::table.filter(person::person_id.eq(person_id)),
    ))
    .get_result(conn)?;
    Ok(found)
}
}

backend_fn! {
/// Retrieves a pilot joined with their person row.
///
/// # Errors
///
/// Returns an error if the database query fails or the row holds a
/// negative experience.
/// Returns `Ok(None)` if the person is not a pilot.
pub fn pilot_by_id(conn: &mut _, person_id: &str) -> Result<Option<Pilot>, PersistenceError> {
    let row: Option<PilotRow> = pilot::table
        .inner_join(person::table.on(person::person_id.eq(pilot::person_id)))
        .filter(pilot::person_id.eq(person_id))
        .select((
            pilot::person_id,
            person::location_id,
            pilot::tax_id,
            pilot::experience,
            pilot::commanding_flight,
        ))
        .first(conn)
        .optional()?;

    row.map(Pilot::try_from).transpose()
}
}

backend_fn! {
/// Returns whether an airline with this identifier exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn airline_exists(conn: &mut _, airline_id: &str) -> Result<bool, PersistenceError> {
    let found: bool = diesel::select(exists(
        airline::table.filter(airline::airline_id.eq(airline_id)),
    ))
    .get_result(conn)?;
    Ok(found)
}
}

backend_fn! {
/// Returns whether a pilot holds a license of the given type.
///
/// License names compare case-insensitively. The comparison happens after
/// loading because the two backends disagree on default collation.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn pilot_license(
    conn: &mut _,
    person_id: &str,
    license_type: &str,
) -> Result<bool, PersistenceError> {
    let held: Vec<String> = pilot_licenses::table
        .filter(pilot_licenses::person_id.eq(person_id))
        .select(pilot_licenses::license)
        .load(conn)?;

    let wanted: String = license_type.trim().to_lowercase();
    Ok(held.iter().any(|license| license.trim().to_lowercase() == wanted))
}
}

backend_fn! {
/// Counts the passengers whose person row sits at a location.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn passengers_at_location(conn: &mut _, location_id: &str) -> Result<u32, PersistenceError> {
    let count: i64 = passenger::table
        .inner_join(person::table.on(person::person_id.eq(passenger::person_id)))
        .filter(person::location_id.eq(location_id))
        .count()
        .get_result(conn)?;
    Ok(count_to_u32(count))
}
}
