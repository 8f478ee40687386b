// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::diesel_schema::{person, pilot};
use crate::error::PersistenceError;

backend_fn! {
/// Moves the pilots commanding a flight to a location and clears their command.
///
/// Runs inside the caller's transaction. The person update and the pilot
/// update are applied to the same set of pilots, loaded first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `flight_id` - The flight whose crew is released
/// * `location_id` - Where the crew is moved to
///
/// # Errors
///
/// Returns an error if any statement fails.
pub fn relocate_and_release_crew(
    conn: &mut _,
    flight_id: &str,
    location_id: &str,
) -> Result<usize, PersistenceError> {
    let crew: Vec<String> = pilot::table
        .filter(pilot::commanding_flight.eq(flight_id))
        .select(pilot::person_id)
        .load(conn)?;

    if crew.is_empty() {
        return Ok(0);
    }

    diesel::update(person::table.filter(person::person_id.eq_any(&crew)))
        .set(person::location_id.eq(location_id))
        .execute(conn)?;

    let released: usize = diesel::update(pilot::table.filter(pilot::person_id.eq_any(&crew)))
        .set(pilot::commanding_flight.eq(None::<String>))
        .execute(conn)?;

    info!(flight_id, location_id, released, "Released flight crew");
    Ok(released)
}
}
