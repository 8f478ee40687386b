// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airsim::{CrewRoster, EngineCall, EntityRepository, SimulationEngine, StoreError};
use airsim_domain::{Airplane, AirplaneKey, Flight, Pilot};
use diesel::{MysqlConnection, SqliteConnection};

use crate::mutations::crew;
use crate::procedures::ProcedureDriver;
use crate::queries::{entities, flights};

/// A connection inside an open request transaction, seen through the
/// traits the command executor needs.
pub enum FlightStore<'c> {
    Sqlite {
        conn: &'c mut SqliteConnection,
        driver: &'c dyn ProcedureDriver,
    },
    Mysql {
        conn: &'c mut MysqlConnection,
        driver: &'c dyn ProcedureDriver,
    },
}

/// Calls the backend-specific variant generated by `backend_fn!`.
macro_rules! dispatch {
    ($store:ident, $module:ident :: $name:ident ( $($arg:expr),* $(,)? )) => {
        pastey::paste! {
            match $store {
                Self::Sqlite { conn, .. } => $module::[<$name _sqlite>](conn $(, $arg)*),
                Self::Mysql { conn, .. } => $module::[<$name _mysql>](conn $(, $arg)*),
            }
            .map_err(StoreError::from)
        }
    };
}

impl EntityRepository for FlightStore<'_> {
    fn airport_exists(&mut self, airport_id: &str) -> Result<bool, StoreError> {
        dispatch!(self, entities::airport_exists(airport_id))
    }

    fn location_exists(&mut self, location_id: &str) -> Result<bool, StoreError> {
        dispatch!(self, entities::location_exists(location_id))
    }

    fn location_in_use(&mut self, location_id: &str) -> Result<bool, StoreError> {
        dispatch!(self, entities::location_in_use(location_id))
    }

    fn person_exists(&mut self, person_id: &str) -> Result<bool, StoreError> {
        dispatch!(self, entities::person_exists(person_id))
    }

    fn pilot_by_id(&mut self, person_id: &str) -> Result<Option<Pilot>, StoreError> {
        dispatch!(self, entities::pilot_by_id(person_id))
    }

    fn airline_exists(&mut self, airline_id: &str) -> Result<bool, StoreError> {
        dispatch!(self, entities::airline_exists(airline_id))
    }

    fn route_exists(&mut self, route_id: &str) -> Result<bool, StoreError> {
        dispatch!(self, flights::route_exists(route_id))
    }

    fn route_leg_count(&mut self, route_id: &str) -> Result<u32, StoreError> {
        dispatch!(self, flights::route_leg_count(route_id))
    }

    fn route_arrival_location(&mut self, route_id: &str) -> Result<Option<String>, StoreError> {
        dispatch!(self, flights::route_arrival_location(route_id))
    }

    fn flight_by_id(&mut self, flight_id: &str) -> Result<Option<Flight>, StoreError> {
        dispatch!(self, flights::flight_by_id(flight_id))
    }

    fn airplane_by_key(&mut self, key: &AirplaneKey) -> Result<Option<Airplane>, StoreError> {
        dispatch!(self, flights::airplane_by_key(key))
    }

    fn flight_supported_by(&mut self, key: &AirplaneKey) -> Result<Option<String>, StoreError> {
        dispatch!(self, flights::flight_supported_by(key))
    }

    fn pilot_license(&mut self, person_id: &str, license_type: &str) -> Result<bool, StoreError> {
        dispatch!(self, entities::pilot_license(person_id, license_type))
    }

    fn pilots_commanding(&mut self, flight_id: &str) -> Result<u32, StoreError> {
        dispatch!(self, flights::pilots_commanding(flight_id))
    }

    fn passengers_at_location(&mut self, location_id: &str) -> Result<u32, StoreError> {
        dispatch!(self, entities::passengers_at_location(location_id))
    }
}

impl SimulationEngine for FlightStore<'_> {
    fn invoke(&mut self, call: &EngineCall) -> Result<(), StoreError> {
        match self {
            Self::Sqlite { conn, driver } => driver.call_sqlite(conn, call),
            Self::Mysql { conn, driver } => driver.call_mysql(conn, call),
        }
        .map_err(StoreError::from)
    }
}

impl CrewRoster for FlightStore<'_> {
    fn relocate_and_release_crew(
        &mut self,
        flight_id: &str,
        location_id: &str,
    ) -> Result<usize, StoreError> {
        dispatch!(self, crew::relocate_and_release_crew(flight_id, location_id))
    }
}
