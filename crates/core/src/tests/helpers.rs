// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::{HashMap, HashSet};

use crate::{CrewRoster, EngineCall, EntityRepository, SimulationEngine, StoreError};
use airsim_domain::{Airplane, AirplaneKey, AirplaneStatus, Flight, Pilot};

/// An in-memory stand-in for the simulation database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub locations: HashSet<String>,
    /// Airport id to location id.
    pub airports: HashMap<String, String>,
    pub airlines: HashSet<String>,
    /// Person id to location id.
    pub people: HashMap<String, Option<String>>,
    pub pilots: HashMap<String, Pilot>,
    /// (person id, lowercase license type).
    pub licenses: HashSet<(String, String)>,
    pub passengers: HashSet<String>,
    pub airplanes: HashMap<AirplaneKey, Airplane>,
    /// Route id to ordered (departure airport, arrival airport) legs.
    pub routes: HashMap<String, Vec<(String, String)>>,
    pub flights: HashMap<String, Flight>,
    /// Every engine call, in order.
    pub calls: Vec<EngineCall>,
    /// When set, the engine rejects every call with this message.
    pub engine_error: Option<String>,
    /// When set, every repository query fails.
    pub broken: bool,
    /// Number of repository queries answered.
    pub reads: usize,
}

impl MemoryStore {
    fn read(&mut self) -> Result<(), StoreError> {
        self.reads += 1;
        if self.broken {
            return Err(StoreError::new("connection lost"));
        }
        Ok(())
    }

    pub fn add_location(&mut self, location_id: &str) {
        self.locations.insert(location_id.to_string());
    }

    pub fn add_pilot(&mut self, person_id: &str, location_id: &str, licenses: &[&str]) {
        self.people
            .insert(person_id.to_string(), Some(location_id.to_string()));
        self.pilots.insert(
            person_id.to_string(),
            Pilot {
                person_id: person_id.to_string(),
                location_id: Some(location_id.to_string()),
                tax_id: format!("100-00-{:04}", self.pilots.len()),
                experience: 10,
                commanding_flight: None,
            },
        );
        for license in licenses {
            self.licenses
                .insert((person_id.to_string(), license.to_lowercase()));
        }
    }

    pub fn add_passenger(&mut self, person_id: &str, location_id: &str) {
        self.people
            .insert(person_id.to_string(), Some(location_id.to_string()));
        self.passengers.insert(person_id.to_string());
    }

    pub fn add_airplane(
        &mut self,
        airline_id: &str,
        tail_num: &str,
        plane_type: Option<&str>,
        location_id: &str,
    ) {
        self.add_location(location_id);
        let key: AirplaneKey = AirplaneKey::new(airline_id, tail_num);
        self.airplanes.insert(
            key.clone(),
            Airplane {
                key,
                seat_capacity: 4,
                speed: 600,
                location_id: Some(location_id.to_string()),
                plane_type: plane_type.map(ToString::to_string),
                maintained: plane_type.map(|_| true),
                model: plane_type.map(|_| String::from("737")),
                neo: false,
            },
        );
    }

    pub fn add_flight(
        &mut self,
        flight_id: &str,
        route_id: &str,
        support: Option<(&str, &str)>,
        progress: u32,
    ) {
        self.flights.insert(
            flight_id.to_string(),
            Flight {
                flight_id: flight_id.to_string(),
                route_id: route_id.to_string(),
                support: support.map(|(airline, tail)| AirplaneKey::new(airline, tail)),
                progress,
                airplane_status: AirplaneStatus::OnGround,
                cost: Some(200),
            },
        );
    }

    pub fn set_status(&mut self, flight_id: &str, status: AirplaneStatus) {
        if let Some(flight) = self.flights.get_mut(flight_id) {
            flight.airplane_status = status;
        }
    }

    pub fn set_progress(&mut self, flight_id: &str, progress: u32) {
        if let Some(flight) = self.flights.get_mut(flight_id) {
            flight.progress = progress;
        }
    }

    pub fn command(&mut self, person_id: &str, flight_id: &str) {
        if let Some(pilot) = self.pilots.get_mut(person_id) {
            pilot.commanding_flight = Some(flight_id.to_string());
        }
    }

    pub fn move_person(&mut self, person_id: &str, location_id: &str) {
        self.people
            .insert(person_id.to_string(), Some(location_id.to_string()));
        if let Some(pilot) = self.pilots.get_mut(person_id) {
            pilot.location_id = Some(location_id.to_string());
        }
    }

    pub fn procedures_called(&self) -> Vec<&'static str> {
        self.calls.iter().map(|call| call.procedure().name()).collect()
    }
}

impl EntityRepository for MemoryStore {
    fn airport_exists(&mut self, airport_id: &str) -> Result<bool, StoreError> {
        self.read()?;
        Ok(self.airports.contains_key(airport_id))
    }

    fn location_exists(&mut self, location_id: &str) -> Result<bool, StoreError> {
        self.read()?;
        Ok(self.locations.contains(location_id))
    }

    fn location_in_use(&mut self, location_id: &str) -> Result<bool, StoreError> {
        self.read()?;
        let wanted: Option<&str> = Some(location_id);
        Ok(self.locations.contains(location_id)
            || self.airports.values().any(|loc| loc == location_id)
            || self.people.values().any(|loc| loc.as_deref() == wanted)
            || self
                .airplanes
                .values()
                .any(|plane| plane.location_id.as_deref() == wanted))
    }

    fn person_exists(&mut self, person_id: &str) -> Result<bool, StoreError> {
        self.read()?;
        Ok(self.people.contains_key(person_id))
    }

    fn pilot_by_id(&mut self, person_id: &str) -> Result<Option<Pilot>, StoreError> {
        self.read()?;
        Ok(self.pilots.get(person_id).cloned())
    }

    fn airline_exists(&mut self, airline_id: &str) -> Result<bool, StoreError> {
        self.read()?;
        Ok(self.airlines.contains(airline_id))
    }

    fn route_exists(&mut self, route_id: &str) -> Result<bool, StoreError> {
        self.read()?;
        Ok(self.routes.contains_key(route_id))
    }

    fn route_leg_count(&mut self, route_id: &str) -> Result<u32, StoreError> {
        self.read()?;
        let legs: usize = self.routes.get(route_id).map_or(0, Vec::len);
        u32::try_from(legs).map_err(|e| StoreError::new(e.to_string()))
    }

    fn route_arrival_location(&mut self, route_id: &str) -> Result<Option<String>, StoreError> {
        self.read()?;
        Ok(self
            .routes
            .get(route_id)
            .and_then(|legs| legs.last())
            .and_then(|(_, arrival)| self.airports.get(arrival))
            .cloned())
    }

    fn flight_by_id(&mut self, flight_id: &str) -> Result<Option<Flight>, StoreError> {
        self.read()?;
        Ok(self.flights.get(flight_id).cloned())
    }

    fn airplane_by_key(&mut self, key: &AirplaneKey) -> Result<Option<Airplane>, StoreError> {
        self.read()?;
        Ok(self.airplanes.get(key).cloned())
    }

    fn flight_supported_by(&mut self, key: &AirplaneKey) -> Result<Option<String>, StoreError> {
        self.read()?;
        Ok(self
            .flights
            .values()
            .find(|flight| flight.support.as_ref() == Some(key))
            .map(|flight| flight.flight_id.clone()))
    }

    fn pilot_license(&mut self, person_id: &str, license_type: &str) -> Result<bool, StoreError> {
        self.read()?;
        Ok(self
            .licenses
            .contains(&(person_id.to_string(), license_type.to_lowercase())))
    }

    fn pilots_commanding(&mut self, flight_id: &str) -> Result<u32, StoreError> {
        self.read()?;
        let count: usize = self
            .pilots
            .values()
            .filter(|pilot| pilot.commanding_flight.as_deref() == Some(flight_id))
            .count();
        u32::try_from(count).map_err(|e| StoreError::new(e.to_string()))
    }

    fn passengers_at_location(&mut self, location_id: &str) -> Result<u32, StoreError> {
        self.read()?;
        let count: usize = self
            .passengers
            .iter()
            .filter(|id| {
                self.people
                    .get(*id)
                    .is_some_and(|loc| loc.as_deref() == Some(location_id))
            })
            .count();
        u32::try_from(count).map_err(|e| StoreError::new(e.to_string()))
    }
}

impl SimulationEngine for MemoryStore {
    fn invoke(&mut self, call: &EngineCall) -> Result<(), StoreError> {
        self.calls.push(call.clone());
        match &self.engine_error {
            Some(message) => Err(StoreError::new(message.clone())),
            None => Ok(()),
        }
    }
}

impl CrewRoster for MemoryStore {
    fn relocate_and_release_crew(
        &mut self,
        flight_id: &str,
        location_id: &str,
    ) -> Result<usize, StoreError> {
        let mut released: usize = 0;
        for pilot in self.pilots.values_mut() {
            if pilot.commanding_flight.as_deref() == Some(flight_id) {
                pilot.commanding_flight = None;
                pilot.location_id = Some(location_id.to_string());
                self.people
                    .insert(pilot.person_id.clone(), Some(location_id.to_string()));
                released += 1;
            }
        }
        Ok(released)
    }
}

/// A small world with two airports, two airlines, three airplanes and two flights.
///
/// - `ATL` at `port_1`, `JFK` at `port_2`
/// - `Delta/n106js` (Airbus) at `plane_1`, `United/n330ss` (Boeing) at `plane_2`,
///   `Delta/n110jn` (untyped) at `plane_3`
/// - `atl_jfk`: one leg; `tour`: three legs ending at `JFK`; `empty`: no legs
/// - `dl_10` on `atl_jfk` flown by `Delta/n106js`; `un_38` on `tour` flown by `United/n330ss`
/// - pilots `p1` (airbus, at `plane_1`), `p2` and `p3` (boeing, at `plane_2`)
/// - passenger `p20` at `port_1`
pub fn create_test_store() -> MemoryStore {
    let mut store: MemoryStore = MemoryStore::default();

    for location in ["port_1", "port_2"] {
        store.add_location(location);
    }
    store
        .airports
        .insert(String::from("ATL"), String::from("port_1"));
    store
        .airports
        .insert(String::from("JFK"), String::from("port_2"));
    store.airlines.insert(String::from("Delta"));
    store.airlines.insert(String::from("United"));

    store.add_airplane("Delta", "n106js", Some("Airbus"), "plane_1");
    store.add_airplane("United", "n330ss", Some("Boeing"), "plane_2");
    store.add_airplane("Delta", "n110jn", None, "plane_3");

    store.routes.insert(
        String::from("atl_jfk"),
        vec![(String::from("ATL"), String::from("JFK"))],
    );
    store.routes.insert(
        String::from("tour"),
        vec![
            (String::from("ATL"), String::from("JFK")),
            (String::from("JFK"), String::from("ATL")),
            (String::from("ATL"), String::from("JFK")),
        ],
    );
    store.routes.insert(String::from("empty"), Vec::new());

    store.add_flight("dl_10", "atl_jfk", Some(("Delta", "n106js")), 0);
    store.add_flight("un_38", "tour", Some(("United", "n330ss")), 0);

    store.add_pilot("p1", "plane_1", &["Airbus"]);
    store.add_pilot("p2", "plane_2", &["Boeing"]);
    store.add_pilot("p3", "plane_2", &["boeing", "general"]);
    store.add_passenger("p20", "port_1");

    store
}
