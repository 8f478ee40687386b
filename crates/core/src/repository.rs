// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only lookups used by the transition guards.
//!
//! Implementations must answer from the live store inside the request
//! transaction. Nothing here may be cached between calls.

use crate::error::StoreError;
use airsim_domain::{Airplane, AirplaneKey, Flight, Pilot};

/// Point lookups and small aggregates over the simulation's entities.
pub trait EntityRepository {
    /// Returns whether an airport with this identifier exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn airport_exists(&mut self, airport_id: &str) -> Result<bool, StoreError>;

    /// Returns whether a location row with this identifier exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn location_exists(&mut self, location_id: &str) -> Result<bool, StoreError>;

    /// Returns whether a location is already claimed.
    ///
    /// A location is in use when its row exists or when any airport,
    /// airplane or person references it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn location_in_use(&mut self, location_id: &str) -> Result<bool, StoreError>;

    /// Returns whether a person with this identifier exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn person_exists(&mut self, person_id: &str) -> Result<bool, StoreError>;

    /// Looks up a pilot together with their location and command.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn pilot_by_id(&mut self, person_id: &str) -> Result<Option<Pilot>, StoreError>;

    /// Returns whether the person is a pilot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn pilot_exists(&mut self, person_id: &str) -> Result<bool, StoreError> {
        Ok(self.pilot_by_id(person_id)?.is_some())
    }

    /// Returns whether an airline with this identifier exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn airline_exists(&mut self, airline_id: &str) -> Result<bool, StoreError>;

    /// Returns whether a route with this identifier exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn route_exists(&mut self, route_id: &str) -> Result<bool, StoreError>;

    /// Counts the legs on a route. Unknown routes have zero legs.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn route_leg_count(&mut self, route_id: &str) -> Result<u32, StoreError>;

    /// Resolves the location of the arrival airport of a route's final leg.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn route_arrival_location(&mut self, route_id: &str) -> Result<Option<String>, StoreError>;

    /// Looks up a flight.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn flight_by_id(&mut self, flight_id: &str) -> Result<Option<Flight>, StoreError>;

    /// Returns whether a flight with this identifier exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn flight_exists(&mut self, flight_id: &str) -> Result<bool, StoreError> {
        Ok(self.flight_by_id(flight_id)?.is_some())
    }

    /// Looks up an airplane by its composite key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn airplane_by_key(&mut self, key: &AirplaneKey) -> Result<Option<Airplane>, StoreError>;

    /// Returns the flight currently supported by an airplane, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn flight_supported_by(&mut self, key: &AirplaneKey) -> Result<Option<String>, StoreError>;

    /// Returns whether the pilot holds a license of the given type.
    ///
    /// License types compare case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn pilot_license(&mut self, person_id: &str, license_type: &str) -> Result<bool, StoreError>;

    /// Counts the pilots commanding a flight.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn pilots_commanding(&mut self, flight_id: &str) -> Result<u32, StoreError>;

    /// Counts the passengers at a location.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn passengers_at_location(&mut self, location_id: &str) -> Result<u32, StoreError>;
}
