// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod concurrency_tests;

use std::sync::{Arc, Mutex};

use airsim::{EngineArg, EngineCall, Procedure};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::diesel_schema::{flight, pilot};
use crate::{Persistence, PersistenceError, ProcedureDriver, StoredProcedures};

/// Two airports, three airplanes, three routes and two flights.
///
/// `dl_10` flies the one-leg `atl_jfk` route on an Airbus; `un_38` flies the
/// three-leg `tour` route on a Boeing. Pilots `p1`..`p3` wait at their
/// airplanes; `p4` holds no license.
pub const SEED_SQL: &str = "
INSERT INTO location (location_id) VALUES
    ('port_1'), ('port_2'), ('plane_1'), ('plane_2'), ('plane_3');
INSERT INTO airline (airline_id, revenue) VALUES ('Delta', 0), ('United', 0);
INSERT INTO airport (airport_id, airport_name, city, state, country, location_id) VALUES
    ('ATL', 'Atlanta Hartsfield-Jackson International', 'Atlanta', 'Georgia', 'USA', 'port_1'),
    ('JFK', 'John F Kennedy International', 'New York', 'New York', 'USA', 'port_2');
INSERT INTO airplane (airline_id, tail_num, seat_capacity, speed, location_id, plane_type, maintained, model, neo) VALUES
    ('Delta', 'n106js', 4, 800, 'plane_1', 'Airbus', NULL, NULL, 0),
    ('United', 'n330ss', 4, 800, 'plane_2', 'Boeing', 1, '737', 0),
    ('Delta', 'n110jn', 5, 700, 'plane_3', NULL, NULL, NULL, 0);
INSERT INTO leg (leg_id, distance, departure, arrival) VALUES
    ('leg_1', 760, 'ATL', 'JFK'),
    ('leg_2', 760, 'JFK', 'ATL');
INSERT INTO route (route_id) VALUES ('atl_jfk'), ('tour'), ('empty');
INSERT INTO route_path (route_id, leg_id, sequence) VALUES
    ('atl_jfk', 'leg_1', 1),
    ('tour', 'leg_1', 1),
    ('tour', 'leg_2', 2),
    ('tour', 'leg_1', 3);
INSERT INTO flight (flight_id, route_id, support_airline, support_tail, progress, airplane_status, next_time, cost) VALUES
    ('dl_10', 'atl_jfk', 'Delta', 'n106js', 0, 'on_ground', '08:00:00', 200),
    ('un_38', 'tour', 'United', 'n330ss', 0, 'on_ground', '09:30:00', 150);
INSERT INTO person (person_id, first_name, last_name, location_id) VALUES
    ('p1', 'Jeanne', 'Nelson', 'plane_1'),
    ('p2', 'Roxanne', 'Byrd', 'plane_2'),
    ('p3', 'Tammy', 'Johnson', 'plane_2'),
    ('p4', 'Ann', 'Lee', 'port_1'),
    ('p20', 'Sam', 'Wise', 'port_1');
INSERT INTO pilot (person_id, tax_id, experience, commanding_flight) VALUES
    ('p1', '330-12-6907', 31, NULL),
    ('p2', '842-88-1257', 9, NULL),
    ('p3', '750-24-7616', 11, NULL),
    ('p4', '776-21-8098', 2, NULL);
INSERT INTO pilot_licenses (person_id, license) VALUES
    ('p1', 'Airbus'),
    ('p2', 'boeing'),
    ('p3', 'Boeing'),
    ('p3', 'general');
INSERT INTO passenger (person_id, miles, funds) VALUES ('p20', 100, 50.00);
";

/// Stands in for the stored procedures on `SQLite`.
///
/// Records every call and applies the few effects the tests observe:
/// `offer_flight` inserts the flight with its support airplane,
/// `assign_pilot` sets the pilot's command, `flight_takeoff` and
/// `flight_landing` move the flight between states. A configured failure
/// fires after the effect so rollback can be observed.
#[derive(Default)]
pub struct RecordingDriver {
    calls: Mutex<Vec<String>>,
    failure: Option<(Procedure, String)>,
}

impl RecordingDriver {
    pub fn failing(procedure: Procedure, message: &str) -> Self {
        Self {
            calls: Mutex::default(),
            failure: Some((procedure, message.to_string())),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn text_argument(call: &EngineCall, index: usize) -> String {
    match &call.arguments()[index] {
        EngineArg::Text(Some(value)) => value.clone(),
        other => panic!("argument {index} of {call} is not text: {other:?}"),
    }
}

fn optional_text_argument(call: &EngineCall, index: usize) -> Option<String> {
    match &call.arguments()[index] {
        EngineArg::Text(value) => value.clone(),
        other => panic!("argument {index} of {call} is not text: {other:?}"),
    }
}

fn int_argument(call: &EngineCall, index: usize) -> i32 {
    match &call.arguments()[index] {
        EngineArg::Int(Some(value)) => i32::try_from(*value).unwrap(),
        other => panic!("argument {index} of {call} is not an integer: {other:?}"),
    }
}

fn apply_effect(conn: &mut SqliteConnection, call: &EngineCall) -> QueryResult<()> {
    match call.procedure() {
        Procedure::OfferFlight => {
            diesel::insert_into(flight::table)
                .values((
                    flight::flight_id.eq(text_argument(call, 0)),
                    flight::route_id.eq(text_argument(call, 1)),
                    flight::progress.eq(int_argument(call, 2)),
                    flight::cost.eq(Some(int_argument(call, 3))),
                    flight::support_airline.eq(optional_text_argument(call, 5)),
                    flight::support_tail.eq(optional_text_argument(call, 6)),
                ))
                .execute(conn)?;
        }
        Procedure::AssignPilot => {
            let flight_id: String = text_argument(call, 0);
            let person_id: String = text_argument(call, 1);
            diesel::update(pilot::table.filter(pilot::person_id.eq(person_id)))
                .set(pilot::commanding_flight.eq(Some(flight_id)))
                .execute(conn)?;
        }
        Procedure::FlightTakeoff => {
            let flight_id: String = text_argument(call, 0);
            diesel::update(flight::table.filter(flight::flight_id.eq(flight_id)))
                .set(flight::airplane_status.eq("in_flight"))
                .execute(conn)?;
        }
        Procedure::FlightLanding => {
            let flight_id: String = text_argument(call, 0);
            diesel::update(flight::table.filter(flight::flight_id.eq(flight_id)))
                .set((
                    flight::airplane_status.eq("on_ground"),
                    flight::progress.eq(flight::progress + 1),
                ))
                .execute(conn)?;
        }
        _ => {}
    }
    Ok(())
}

impl ProcedureDriver for RecordingDriver {
    fn call_sqlite(
        &self,
        conn: &mut SqliteConnection,
        call: &EngineCall,
    ) -> Result<(), PersistenceError> {
        self.calls.lock().unwrap().push(call.to_string());
        apply_effect(conn, call)?;
        match &self.failure {
            Some((procedure, message)) if *procedure == call.procedure() => {
                Err(PersistenceError::DatabaseError(message.clone()))
            }
            _ => Ok(()),
        }
    }

    fn call_mysql(
        &self,
        conn: &mut MysqlConnection,
        call: &EngineCall,
    ) -> Result<(), PersistenceError> {
        StoredProcedures.call_mysql(conn, call)
    }
}

/// Creates a seeded in-memory database driven by `driver`.
pub fn create_seeded_persistence(driver: Arc<RecordingDriver>) -> Persistence {
    let persistence: Persistence = Persistence::new_in_memory()
        .expect("Failed to create in-memory database")
        .with_driver(driver);
    persistence
        .execute_sql_script(SEED_SQL)
        .expect("Failed to seed database");
    persistence
}
