// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::{Arc, Mutex};

use airsim::EngineCall;
use airsim_persistence::{Persistence, PersistenceError, ProcedureDriver, StoredProcedures};
use diesel::{MysqlConnection, SqliteConnection};

/// One airport, one airline, one airplane, one route and one flight.
pub const SEED_SQL: &str = "
INSERT INTO location (location_id) VALUES ('port_1'), ('port_2'), ('plane_1');
INSERT INTO airline (airline_id, revenue) VALUES ('Delta', 0);
INSERT INTO airport (airport_id, airport_name, city, state, country, location_id) VALUES
    ('ATL', 'Atlanta Hartsfield-Jackson International', 'Atlanta', 'Georgia', 'USA', 'port_1'),
    ('JFK', 'John F Kennedy International', 'New York', 'New York', 'USA', 'port_2');
INSERT INTO airplane (airline_id, tail_num, seat_capacity, speed, location_id, plane_type, maintained, model, neo) VALUES
    ('Delta', 'n106js', 4, 800, 'plane_1', 'Airbus', NULL, NULL, 0);
INSERT INTO leg (leg_id, distance, departure, arrival) VALUES ('leg_1', 760, 'ATL', 'JFK');
INSERT INTO route (route_id) VALUES ('atl_jfk');
INSERT INTO route_path (route_id, leg_id, sequence) VALUES ('atl_jfk', 'leg_1', 1);
INSERT INTO flight (flight_id, route_id, support_airline, support_tail, progress, airplane_status, next_time, cost) VALUES
    ('dl_10', 'atl_jfk', 'Delta', 'n106js', 0, 'on_ground', '08:00:00', 200);
INSERT INTO person (person_id, first_name, last_name, location_id) VALUES
    ('p1', 'Jeanne', 'Nelson', 'plane_1');
INSERT INTO pilot (person_id, tax_id, experience, commanding_flight) VALUES
    ('p1', '330-12-6907', 31, 'dl_10');
INSERT INTO pilot_licenses (person_id, license) VALUES ('p1', 'Airbus');
";

/// Accepts every call without touching the database.
#[derive(Default)]
pub struct AcceptingDriver {
    calls: Mutex<Vec<String>>,
}

impl AcceptingDriver {
    pub fn procedures(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcedureDriver for AcceptingDriver {
    fn call_sqlite(
        &self,
        _conn: &mut SqliteConnection,
        call: &EngineCall,
    ) -> Result<(), PersistenceError> {
        self.calls
            .lock()
            .unwrap()
            .push(call.procedure().name().to_string());
        Ok(())
    }

    fn call_mysql(
        &self,
        conn: &mut MysqlConnection,
        call: &EngineCall,
    ) -> Result<(), PersistenceError> {
        StoredProcedures.call_mysql(conn, call)
    }
}

pub fn create_test_persistence(driver: &Arc<AcceptingDriver>) -> Persistence {
    let persistence: Persistence = Persistence::new_in_memory()
        .expect("Failed to create in-memory database")
        .with_driver(Arc::clone(driver) as Arc<dyn ProcedureDriver>);
    persistence
        .execute_sql_script(SEED_SQL)
        .expect("Failed to seed database");
    persistence
}
